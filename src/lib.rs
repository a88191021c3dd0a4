//! # settle-up
//!
//! Shared expense tracking: who paid what, who owes whom, and the fewest
//! payments that square everyone up.
//!
//! Given a roster of people and a list of expenses, the engine computes each
//! person's net balance in exact integer cents and plans a short list of
//! debtor-to-creditor payments that settles the group.
//!
//! ## Architecture
//!
//! - **core**: People, money in cents, expenses, balance sheets and settlements
//! - **engine**: Balance calculator and greedy settlement planner
//! - **store**: In-memory, JSON-persisted group store that validates input and feeds the engine
//! - **simulation**: Random group generation for benchmarks and demos
//!
//! ## Example
//!
//! ```
//! use settle_up::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let people = ["Alice", "Bob", "Carol"];
//! let expenses = vec![
//!     ExpenseRecord::new("Dinner", dec!(30), "Alice", ["Alice", "Bob", "Carol"]).unwrap(),
//! ];
//!
//! let balances = calculate_balances(&people, &expenses);
//! assert_eq!(balances.balance("Alice"), dec!(20.00));
//!
//! let plan = calculate_settlements(&balances);
//! assert_eq!(plan.len(), 2);
//! ```

pub mod core;
pub mod engine;
pub mod simulation;
pub mod store;

pub use engine::{calculate_balances, calculate_settlements};

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::balance::BalanceSheet;
    pub use crate::core::expense::ExpenseRecord;
    pub use crate::core::money::{Cents, MoneyError};
    pub use crate::core::person::PersonName;
    pub use crate::core::settlement::Settlement;
    pub use crate::engine::calculator::BalanceCalculator;
    pub use crate::engine::config::{SettlementConfig, DEFAULT_DUST_TOLERANCE};
    pub use crate::engine::planner::{SettlementPlan, SettlementPlanner};
    pub use crate::engine::{calculate_balances, calculate_settlements};
    pub use crate::store::group::{ExpenseId, Group, NewExpense, StoreError};
}
