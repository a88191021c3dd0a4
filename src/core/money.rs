use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

/// Number of fractional digits in the display unit.
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Errors arising from converting external amounts into cents.
#[derive(Debug, Error, PartialEq)]
pub enum MoneyError {
    #[error("invalid monetary amount '{input}'")]
    Invalid { input: String },
    #[error("amount must not be negative, got {amount}")]
    Negative { amount: Decimal },
    #[error("amount {amount} does not fit in 64-bit cents")]
    Overflow { amount: Decimal },
}

/// A signed amount of money in minor units (cents).
///
/// All balance and settlement arithmetic happens on `Cents` so that sums
/// never drift. Decimal values only appear at the edges: parsing input,
/// and rendering balances and settlements for display.
///
/// # Examples
///
/// ```
/// use settle_up::core::money::Cents;
/// use rust_decimal_macros::dec;
///
/// let amount = Cents::from_decimal(dec!(10.005)).unwrap();
/// assert_eq!(amount, Cents::new(1001));
/// assert_eq!(amount.to_decimal(), dec!(10.01));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cents(i64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    pub const fn new(cents: i64) -> Self {
        Cents(cents)
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    /// Convert a decimal amount to cents, rounding half away from zero at
    /// two fractional digits.
    pub fn from_decimal(amount: Decimal) -> Result<Self, MoneyError> {
        let rounded =
            amount.round_dp_with_strategy(MINOR_UNIT_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.to_i64())
            .map(Cents)
            .ok_or(MoneyError::Overflow { amount })
    }

    /// Like [`Cents::from_decimal`], but rejects negative amounts.
    pub fn from_non_negative_decimal(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative { amount });
        }
        Self::from_decimal(amount)
    }

    /// Decimal representation with exactly two fractional digits.
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, MINOR_UNIT_SCALE)
    }

    /// Absolute value, saturating at `i64::MAX`.
    pub fn abs(self) -> Self {
        Cents(self.0.saturating_abs())
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// True when `|self| <= tolerance`.
    pub fn is_within(self, tolerance: Cents) -> bool {
        self.0.saturating_abs() <= tolerance.0
    }

    /// Split into `parts` shares that sum exactly to `self`.
    ///
    /// Every share gets `floor(self / parts)`; the first `remainder` shares
    /// get one extra cent. Returns an empty vector when `parts` is zero.
    ///
    /// ```
    /// use settle_up::core::money::Cents;
    ///
    /// let shares = Cents::new(100).split_evenly(3);
    /// assert_eq!(shares, vec![Cents::new(34), Cents::new(33), Cents::new(33)]);
    /// ```
    pub fn split_evenly(self, parts: usize) -> Vec<Cents> {
        if parts == 0 {
            return Vec::new();
        }
        let n = parts as i64;
        let base = self.0.div_euclid(n);
        let remainder = self.0 - base * n;
        (0..n)
            .map(|i| Cents(base + i64::from(i < remainder)))
            .collect()
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_decimal().to_string())
    }
}

impl FromStr for Cents {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount: Decimal = s.trim().parse().map_err(|_| MoneyError::Invalid {
            input: s.to_string(),
        })?;
        Self::from_decimal(amount)
    }
}

impl Add for Cents {
    type Output = Cents;
    fn add(self, rhs: Cents) -> Cents {
        Cents(self.0 + rhs.0)
    }
}

impl Sub for Cents {
    type Output = Cents;
    fn sub(self, rhs: Cents) -> Cents {
        Cents(self.0 - rhs.0)
    }
}

impl Neg for Cents {
    type Output = Cents;
    fn neg(self) -> Cents {
        Cents(-self.0)
    }
}

impl AddAssign for Cents {
    fn add_assign(&mut self, rhs: Cents) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Cents {
    fn sub_assign(&mut self, rhs: Cents) {
        self.0 -= rhs.0;
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Cents>>(iter: I) -> Cents {
        iter.fold(Cents::ZERO, Add::add)
    }
}

// Serialized as a two-digit decimal string, e.g. "12.30".
impl Serialize for Cents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.to_decimal(), serializer)
    }
}

impl<'de> Deserialize<'de> for Cents {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Cents::from_decimal(amount).map_err(serde::de::Error::custom)
    }
}
