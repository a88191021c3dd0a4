//! Random expense groups for benchmarks, demos and smoke tests.

use crate::core::money::Cents;
use crate::store::group::{Group, NewExpense, StoreError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Configuration for generating a random expense group.
#[derive(Debug, Clone)]
pub struct GroupConfig {
    /// Number of people in the group.
    pub people_count: usize,
    /// Number of expenses to record.
    pub expense_count: usize,
    /// Upper bound on participants per expense (at least one is always used).
    pub max_participants: usize,
    /// Smallest expense amount.
    pub min_amount: Cents,
    /// Largest expense amount.
    pub max_amount: Cents,
    /// Fixed RNG seed for reproducible groups.
    pub seed: Option<u64>,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            people_count: 6,
            expense_count: 20,
            max_participants: 6,
            min_amount: Cents::new(100),
            max_amount: Cents::new(50_000),
            seed: None,
        }
    }
}

/// Generate a group of `PERSON-000`, `PERSON-001`, ... with random expenses.
///
/// Expenses go through the regular store validation, so the result looks
/// exactly like a group built by hand.
pub fn generate_random_group(config: &GroupConfig) -> Result<Group, StoreError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut group = Group::new();

    let people: Vec<String> = (0..config.people_count)
        .map(|i| format!("PERSON-{:03}", i))
        .collect();
    for name in &people {
        group.add_person(name)?;
    }
    if people.is_empty() {
        return Ok(group);
    }

    let (low, high) = if config.min_amount <= config.max_amount {
        (config.min_amount, config.max_amount)
    } else {
        (config.max_amount, config.min_amount)
    };
    let low = low.max(Cents::ZERO);
    let high = high.max(low);
    let max_participants = config.max_participants.clamp(1, people.len());

    for i in 0..config.expense_count {
        let payer = &people[rng.gen_range(0..people.len())];
        let count = rng.gen_range(1..=max_participants);
        let participants: Vec<String> = people.choose_multiple(&mut rng, count).cloned().collect();
        let amount = Cents::new(rng.gen_range(low.value()..=high.value()));

        group.add_expense(NewExpense {
            description: format!("Expense {}", i + 1),
            amount: amount.to_string(),
            paid_by: payer.clone(),
            participants,
            date: None,
        })?;
    }

    Ok(group)
}
