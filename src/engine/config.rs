use crate::core::money::Cents;
use serde::{Deserialize, Serialize};

/// Balances within this many cents of zero count as settled.
///
/// Uneven splits leave at most one cent of rounding per expense on any
/// single person, so one cent absorbs that residue without hiding real debt.
pub const DEFAULT_DUST_TOLERANCE: Cents = Cents::new(1);

/// Tuning knobs for the settlement planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementConfig {
    /// Largest absolute balance treated as already settled. Payments at or
    /// below this amount are never suggested.
    pub dust_tolerance: Cents,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            dust_tolerance: DEFAULT_DUST_TOLERANCE,
        }
    }
}

impl SettlementConfig {
    pub fn with_dust_tolerance(dust_tolerance: Cents) -> Self {
        Self {
            dust_tolerance: dust_tolerance.abs(),
        }
    }
}
