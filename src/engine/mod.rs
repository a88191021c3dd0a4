pub mod calculator;
pub mod config;
pub mod planner;

use crate::core::balance::BalanceSheet;
use crate::core::expense::ExpenseRecord;
use calculator::BalanceCalculator;
use planner::{SettlementPlan, SettlementPlanner};

/// Net balance of every person on the roster. See [`BalanceCalculator`].
pub fn calculate_balances<P: AsRef<str>>(people: &[P], expenses: &[ExpenseRecord]) -> BalanceSheet {
    BalanceCalculator::calculate_balances(people, expenses)
}

/// Payments that settle `balances`, using the default one-cent dust
/// tolerance. See [`SettlementPlanner`].
pub fn calculate_settlements(balances: &BalanceSheet) -> SettlementPlan {
    SettlementPlanner::default().calculate_settlements(balances)
}
