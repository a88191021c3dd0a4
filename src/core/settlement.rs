use crate::core::money::Cents;
use crate::core::person::PersonName;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A suggested payment: `from` pays `to` the given `amount`.
///
/// `from` is always a debtor and `to` a creditor in the balance sheet the
/// settlement was planned against. The amount is always positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub from: PersonName,
    pub to: PersonName,
    pub amount: Cents,
}

impl Settlement {
    pub fn new(from: impl Into<PersonName>, to: impl Into<PersonName>, amount: Cents) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }

    /// Amount as a two-digit decimal for display.
    pub fn amount_decimal(&self) -> Decimal {
        self.amount.to_decimal()
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pays {} {}", self.from, self.to, self.amount)
    }
}
