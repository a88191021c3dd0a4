use crate::core::balance::BalanceSheet;
use crate::core::expense::ExpenseRecord;
use crate::core::money::Cents;
use crate::core::person::PersonName;
use log::debug;
use std::collections::HashMap;

/// Computes each person's net balance from a list of expenses.
///
/// # Algorithm
///
/// 1. Every roster name gets a zero balance (duplicates keep the first slot).
/// 2. For each expense, in order:
///    - participants not on the roster are dropped; an expense left with no
///      participants is skipped entirely,
///    - the payer, if on the roster, is credited the full amount,
///    - the amount is split with [`Cents::split_evenly`] over the remaining
///      participants and each share is debited.
///
/// An unknown payer gets no credit while the participants are still debited,
/// so the sheet no longer sums to zero in that case. This mirrors how the
/// group has always been computed and is pinned down by tests.
pub struct BalanceCalculator;

impl BalanceCalculator {
    pub fn calculate_balances<P: AsRef<str>>(
        people: &[P],
        expenses: &[ExpenseRecord],
    ) -> BalanceSheet {
        let mut roster: Vec<PersonName> = Vec::with_capacity(people.len());
        let mut handles: HashMap<&str, usize> = HashMap::with_capacity(people.len());
        for name in people {
            let name = name.as_ref();
            if handles.contains_key(name) {
                debug!("duplicate roster name '{}' ignored", name);
                continue;
            }
            handles.insert(name, roster.len());
            roster.push(PersonName::new(name));
        }

        let mut balances = vec![Cents::ZERO; roster.len()];

        for expense in expenses {
            let participants: Vec<usize> = expense
                .participants()
                .iter()
                .filter_map(|p| handles.get(p.as_str()).copied())
                .collect();

            if participants.is_empty() {
                debug!(
                    "skipping expense '{}': no known participants",
                    expense.description()
                );
                continue;
            }
            if participants.len() < expense.participants().len() {
                debug!(
                    "expense '{}': dropped {} unknown participant(s)",
                    expense.description(),
                    expense.participants().len() - participants.len()
                );
            }

            let amount = expense.amount_cents();
            match handles.get(expense.paid_by().as_str()) {
                Some(&payer) => balances[payer] += amount,
                None => debug!(
                    "expense '{}': payer '{}' is not in the group, no credit given",
                    expense.description(),
                    expense.paid_by()
                ),
            }

            for (&person, share) in participants.iter().zip(amount.split_evenly(participants.len())) {
                balances[person] -= share;
            }
        }

        roster.into_iter().zip(balances).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn expense(amount: i64, payer: &str, participants: &[&str]) -> ExpenseRecord {
        ExpenseRecord::from_cents("test", Cents::new(amount), payer, participants.iter().copied())
    }

    #[test]
    fn test_payer_credited_once() {
        let sheet = BalanceCalculator::calculate_balances(
            &["A", "B", "C"],
            &[ExpenseRecord::new("Dinner", dec!(30), "A", ["A", "B", "C"]).unwrap()],
        );
        assert_eq!(sheet.balance("A"), dec!(20.00));
        assert_eq!(sheet.balance("B"), dec!(-10.00));
        assert_eq!(sheet.balance("C"), dec!(-10.00));
        assert!(sheet.is_balanced());
    }

    #[test]
    fn test_remainder_goes_to_first_participants() {
        let sheet = BalanceCalculator::calculate_balances(
            &["P", "A", "B", "C"],
            &[expense(100, "P", &["A", "B", "C"])],
        );
        assert_eq!(sheet.get("A"), Some(Cents::new(-34)));
        assert_eq!(sheet.get("B"), Some(Cents::new(-33)));
        assert_eq!(sheet.get("C"), Some(Cents::new(-33)));
        assert_eq!(sheet.get("P"), Some(Cents::new(100)));
    }

    #[test]
    fn test_remainder_follows_filtered_order() {
        // "X" is unknown, so "B" is first among the filtered participants.
        let sheet = BalanceCalculator::calculate_balances(
            &["A", "B", "C"],
            &[expense(200, "A", &["X", "B", "C", "A"])],
        );
        assert_eq!(sheet.get("B"), Some(Cents::new(-67)));
        assert_eq!(sheet.get("C"), Some(Cents::new(-67)));
        assert_eq!(sheet.get("A"), Some(Cents::new(200 - 66)));
    }

    #[test]
    fn test_unknown_participants_drop_expense() {
        let sheet = BalanceCalculator::calculate_balances(
            &["A", "B"],
            &[expense(5000, "A", &["X", "Y"])],
        );
        assert_eq!(sheet.get("A"), Some(Cents::ZERO));
        assert_eq!(sheet.get("B"), Some(Cents::ZERO));
    }

    #[test]
    fn test_empty_participants_drop_expense() {
        let sheet = BalanceCalculator::calculate_balances(&["A"], &[expense(5000, "A", &[])]);
        assert_eq!(sheet.get("A"), Some(Cents::ZERO));
    }

    /// Documents current behavior rather than asserting it is desirable:
    /// an unknown payer earns no credit but participants are still debited.
    #[test]
    fn test_unknown_payer_is_not_credited() {
        let sheet = BalanceCalculator::calculate_balances(
            &["A", "B"],
            &[expense(1000, "Ghost", &["A", "B"])],
        );
        assert_eq!(sheet.get("A"), Some(Cents::new(-500)));
        assert_eq!(sheet.get("B"), Some(Cents::new(-500)));
        assert_eq!(sheet.get("Ghost"), None);
        assert!(!sheet.is_balanced());
    }

    #[test]
    fn test_people_without_expenses_are_zero() {
        let sheet = BalanceCalculator::calculate_balances(
            &["A", "B", "Idle"],
            &[expense(1000, "A", &["A", "B"])],
        );
        assert_eq!(sheet.get("Idle"), Some(Cents::ZERO));
        assert_eq!(sheet.len(), 3);
    }

    #[test]
    fn test_duplicate_roster_names_collapse() {
        let sheet = BalanceCalculator::calculate_balances(
            &["A", "B", "A"],
            &[expense(1000, "A", &["A", "B"])],
        );
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.get("A"), Some(Cents::new(500)));
    }

    #[test]
    fn test_accepts_person_names() {
        let people = vec![PersonName::new("A"), PersonName::new("B")];
        let sheet = BalanceCalculator::calculate_balances(&people, &[expense(300, "B", &["A"])]);
        assert_eq!(sheet.get("A"), Some(Cents::new(-300)));
        assert_eq!(sheet.get("B"), Some(Cents::new(300)));
    }

    #[test]
    fn test_many_expenses_stay_balanced() {
        let expenses: Vec<ExpenseRecord> = (1..=50)
            .map(|i| expense(i * 37 + 1, ["A", "B", "C"][(i % 3) as usize], &["A", "B", "C"]))
            .collect();
        let sheet = BalanceCalculator::calculate_balances(&["A", "B", "C"], &expenses);
        assert!(sheet.is_balanced());
    }

    #[test]
    fn test_empty_inputs() {
        let people: [&str; 0] = [];
        let sheet = BalanceCalculator::calculate_balances(&people, &[]);
        assert!(sheet.is_empty());
    }
}
