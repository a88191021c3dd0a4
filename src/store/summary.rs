use crate::core::balance::BalanceSheet;
use crate::core::money::Cents;
use crate::core::person::PersonName;
use crate::engine::planner::SettlementPlan;
use crate::store::group::StoredExpense;
use serde::Serialize;

/// Everything a group overview shows: roster, expenses (newest first),
/// balances and suggested settlements, tagged with the store version they
/// were computed from.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub version: u64,
    pub people: Vec<PersonName>,
    pub expenses: Vec<StoredExpense>,
    pub balances: BalanceSheet,
    pub settlements: SettlementPlan,
}

impl GroupSummary {
    /// Sum of all expense amounts.
    pub fn total_spent(&self) -> Cents {
        self.expenses.iter().map(|e| e.record.amount_cents()).sum()
    }
}

impl std::fmt::Display for GroupSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Group Summary (version {}) ===", self.version)?;
        writeln!(f, "People:       {}", self.people.len())?;
        writeln!(f, "Expenses:     {}", self.expenses.len())?;
        writeln!(f, "Total spent:  {}", self.total_spent())?;

        writeln!(f, "\n--- Expenses ---")?;
        for e in &self.expenses {
            let participants: Vec<&str> = e.record.participants().iter().map(|p| p.as_str()).collect();
            writeln!(
                f,
                "  {:<5} {:<10} {:<24} {:>10}  paid by {} for {}",
                e.id.to_string(),
                e.record.date(),
                e.record.description(),
                e.record.amount_cents(),
                e.record.paid_by(),
                participants.join(", ")
            )?;
        }

        writeln!(f, "\n--- Balances ---")?;
        for (person, balance) in self.balances.iter() {
            let status = if balance > Cents::ZERO {
                "is owed"
            } else if balance < Cents::ZERO {
                "owes"
            } else {
                "settled"
            };
            writeln!(f, "  {:<20} {:>10}  [{}]", person, balance, status)?;
        }

        writeln!(f, "\n--- Settlements ---")?;
        write!(f, "{}", self.settlements)
    }
}
