use crate::core::money::{Cents, MoneyError};
use crate::core::person::PersonName;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single shared expense as seen by the balance calculator.
///
/// `paid_by` fronted the whole `amount`; `participants` split it. The
/// amount is held in cents and is never negative. Participant order is
/// significant: leftover cents from an uneven split go to the earliest
/// participants.
///
/// # Examples
///
/// ```
/// use settle_up::core::expense::ExpenseRecord;
/// use rust_decimal_macros::dec;
///
/// let dinner = ExpenseRecord::new("Dinner", dec!(30.00), "Alice", ["Alice", "Bob", "Carol"])
///     .unwrap();
///
/// assert_eq!(dinner.amount(), dec!(30.00));
/// assert_eq!(dinner.participants().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    description: String,
    #[serde(deserialize_with = "non_negative_cents")]
    amount: Cents,
    paid_by: PersonName,
    participants: Vec<PersonName>,
    #[serde(default)]
    date: String,
}

fn non_negative_cents<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Cents, D::Error> {
    let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
    Cents::from_non_negative_decimal(amount).map_err(serde::de::Error::custom)
}

impl ExpenseRecord {
    /// Create a record from a decimal amount.
    ///
    /// The amount is rounded half-up to cents; negative or out-of-range
    /// amounts are rejected.
    pub fn new<P, I>(
        description: impl Into<String>,
        amount: Decimal,
        paid_by: impl Into<PersonName>,
        participants: I,
    ) -> Result<Self, MoneyError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PersonName>,
    {
        let amount = Cents::from_non_negative_decimal(amount)?;
        Ok(Self::from_cents(description, amount, paid_by, participants))
    }

    /// Create a record from an amount already in cents.
    ///
    /// Negative amounts are clamped to zero.
    pub fn from_cents<P, I>(
        description: impl Into<String>,
        amount: Cents,
        paid_by: impl Into<PersonName>,
        participants: I,
    ) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PersonName>,
    {
        Self {
            description: description.into(),
            amount: amount.max(Cents::ZERO),
            paid_by: paid_by.into(),
            participants: participants.into_iter().map(Into::into).collect(),
            date: String::new(),
        }
    }

    /// Set the display date. The calculator never looks at it.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub(crate) fn remove_participant(&mut self, person: &PersonName) {
        self.participants.retain(|p| p != person);
    }

    // --- Accessors ---

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Decimal {
        self.amount.to_decimal()
    }

    pub fn amount_cents(&self) -> Cents {
        self.amount
    }

    pub fn paid_by(&self) -> &PersonName {
        &self.paid_by
    }

    pub fn participants(&self) -> &[PersonName] {
        &self.participants
    }

    pub fn date(&self) -> &str {
        &self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_expense_creation() {
        let e = ExpenseRecord::new("Taxi", dec!(12.5), "Bob", ["Alice", "Bob"])
            .unwrap()
            .with_date("2024-06-01");
        assert_eq!(e.description(), "Taxi");
        assert_eq!(e.amount_cents(), Cents::new(1250));
        assert_eq!(e.amount().to_string(), "12.50");
        assert_eq!(e.paid_by().as_str(), "Bob");
        assert_eq!(e.participants()[0].as_str(), "Alice");
        assert_eq!(e.date(), "2024-06-01");
    }

    #[test]
    fn test_expense_rounds_amount_half_up() {
        let e = ExpenseRecord::new("Snacks", dec!(3.335), "A", ["A"]).unwrap();
        assert_eq!(e.amount_cents(), Cents::new(334));
    }

    #[test]
    fn test_expense_rejects_negative_amount() {
        let result = ExpenseRecord::new("Refund", dec!(-5), "A", ["A"]);
        assert!(matches!(result, Err(MoneyError::Negative { .. })));
    }

    #[test]
    fn test_expense_zero_amount_allowed() {
        let e = ExpenseRecord::new("Free", Decimal::ZERO, "A", ["A", "B"]).unwrap();
        assert!(e.amount_cents().is_zero());
    }

    #[test]
    fn test_deserialize_rejects_negative_amount() {
        let json = r#"{"description":"x","amount":"-1.00","paid_by":"A","participants":["A"]}"#;
        assert!(serde_json::from_str::<ExpenseRecord>(json).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let e = ExpenseRecord::new("Taxi", dec!(18.50), "A", ["A", "B"])
            .unwrap()
            .with_date("2024-04-04");
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["amount"], "18.50");
        let back: ExpenseRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, e);
    }

    #[test]
    fn test_remove_participant_keeps_order() {
        let mut e = ExpenseRecord::from_cents("x", Cents::new(300), "A", ["A", "B", "C"]);
        e.remove_participant(&PersonName::new("B"));
        let names: Vec<&str> = e.participants().iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }
}
