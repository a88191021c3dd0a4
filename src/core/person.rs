use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Display name identifying a person in an expense group.
///
/// People are referenced by name everywhere outside the balance calculator,
/// so names must be unique within a group. The store enforces this; the
/// calculator only assumes it.
///
/// # Examples
///
/// ```
/// use settle_up::core::person::PersonName;
///
/// let alice = PersonName::new("Alice");
/// let bob = PersonName::new("Bob");
/// assert_ne!(alice, bob);
/// assert!(alice < bob);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for PersonName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PersonName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PersonName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_person_equality() {
        let a = PersonName::new("Alice");
        let b = PersonName::from("Alice");
        let c = PersonName::new("Carol");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_person_display() {
        assert_eq!(format!("{}", PersonName::new("Dana")), "Dana");
    }

    #[test]
    fn test_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(PersonName::new("Eve"), 3usize);
        assert_eq!(map.get("Eve"), Some(&3));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&PersonName::new("Frank")).unwrap();
        assert_eq!(json, "\"Frank\"");
    }
}
