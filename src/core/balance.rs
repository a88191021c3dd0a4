use crate::core::money::{Cents, MoneyError};
use crate::core::person::PersonName;
use crate::core::settlement::Settlement;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Net balance of each person in a group, in roster order.
///
/// A positive balance means the person is owed money (net creditor).
/// A negative balance means the person owes money (net debtor).
///
/// The sheet is the output of the balance calculator and the input of the
/// settlement planner. It keeps insertion order so that planning is
/// deterministic for equal balances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceSheet {
    /// Serialized as an ordered `{"name": "12.30"}` map.
    #[serde(with = "entries_serde")]
    entries: Vec<(PersonName, Cents)>,
}

mod entries_serde {
    use super::*;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;

    pub fn serialize<S: serde::Serializer>(
        entries: &[(PersonName, Cents)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (person, balance) in entries {
            map.serialize_entry(person, balance)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(PersonName, Cents)>, D::Error> {
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = Vec<(PersonName, Cents)>;
            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of person name to balance")
            }
            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
                let mut entries = Vec::new();
                while let Some((person, balance)) = access.next_entry::<PersonName, Cents>()? {
                    entries.push((person, balance));
                }
                Ok(entries)
            }
        }
        deserializer.deserialize_map(V)
    }
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sheet from decimal balances, rounding each half-up to cents.
    pub fn from_decimals<P, I>(balances: I) -> Result<Self, MoneyError>
    where
        I: IntoIterator<Item = (P, Decimal)>,
        P: Into<PersonName>,
    {
        let mut sheet = Self::new();
        for (person, amount) in balances {
            sheet.insert(person.into(), Cents::from_decimal(amount)?);
        }
        Ok(sheet)
    }

    /// Set a person's balance, replacing any previous value.
    pub fn insert(&mut self, person: PersonName, balance: Cents) {
        match self.entries.iter_mut().find(|(p, _)| *p == person) {
            Some((_, existing)) => *existing = balance,
            None => self.entries.push((person, balance)),
        }
    }

    /// Balance in cents, or `None` for a person not on the sheet.
    pub fn get(&self, person: &str) -> Option<Cents> {
        self.entries
            .iter()
            .find(|(p, _)| p.as_str() == person)
            .map(|(_, b)| *b)
    }

    /// Balance as a two-digit decimal. Unknown people have balance zero.
    pub fn balance(&self, person: &str) -> Decimal {
        self.get(person).unwrap_or(Cents::ZERO).to_decimal()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PersonName, Cents)> + '_ {
        self.entries.iter().map(|(p, b)| (p, *b))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all balances. Zero for any sheet produced by the calculator.
    pub fn total(&self) -> Cents {
        self.entries.iter().map(|(_, b)| *b).sum()
    }

    pub fn is_balanced(&self) -> bool {
        self.total().is_zero()
    }

    /// Total owed to creditors (sum of positive balances).
    pub fn total_outstanding(&self) -> Cents {
        self.entries
            .iter()
            .map(|(_, b)| *b)
            .filter(|b| *b > Cents::ZERO)
            .sum()
    }

    /// True when every balance is within `tolerance` of zero.
    pub fn is_settled_within(&self, tolerance: Cents) -> bool {
        self.entries.iter().all(|(_, b)| b.is_within(tolerance))
    }

    /// Apply a payment: the payer's balance rises, the payee's falls.
    ///
    /// People missing from the sheet are added with a zero starting balance.
    pub fn apply_settlement(&mut self, settlement: &Settlement) {
        let from = self.get(settlement.from.as_str()).unwrap_or(Cents::ZERO);
        self.insert(settlement.from.clone(), from + settlement.amount);
        let to = self.get(settlement.to.as_str()).unwrap_or(Cents::ZERO);
        self.insert(settlement.to.clone(), to - settlement.amount);
    }
}

impl FromIterator<(PersonName, Cents)> for BalanceSheet {
    fn from_iter<T: IntoIterator<Item = (PersonName, Cents)>>(iter: T) -> Self {
        let mut sheet = Self::new();
        for (person, balance) in iter {
            sheet.insert(person, balance);
        }
        sheet
    }
}
