use crate::core::expense::ExpenseRecord;
use crate::core::money::Cents;
use crate::core::person::PersonName;
use crate::engine::calculator::BalanceCalculator;
use crate::engine::config::SettlementConfig;
use crate::engine::planner::SettlementPlanner;
use crate::store::summary::GroupSummary;
use log::{debug, info};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors returned by group store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("person name must not be empty")]
    EmptyName,
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid amount '{input}'")]
    InvalidAmount { input: String },
    #[error("payer '{0}' is not a member of the group")]
    UnknownPayer(String),
    #[error("none of the participants are members of the group")]
    NoValidParticipants,
    #[error("cannot access store file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed store file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Largest amount a single expense may carry: 99,999,999.99.
///
/// Keeps every group sum far from the `i64` cent range.
pub const MAX_EXPENSE_AMOUNT: Cents = Cents::new(9_999_999_999);

/// Identifier of a stored expense. Ids only ever grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(u64);

impl ExpenseId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An expense together with its store id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredExpense {
    pub id: ExpenseId,
    #[serde(flatten)]
    pub record: ExpenseRecord,
}

/// Raw, unvalidated expense input as a form or command line supplies it.
#[derive(Debug, Clone, Default)]
pub struct NewExpense {
    pub description: String,
    pub amount: String,
    pub paid_by: String,
    pub participants: Vec<String>,
    /// Defaults to today's local date when `None`.
    pub date: Option<String>,
}

/// In-memory record store for one expense group.
///
/// Owns the roster and the expense list, validates input before it reaches
/// the balance calculator, and bumps a version counter on every change so
/// that clients can poll for updates cheaply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Group {
    /// Sorted by name.
    people: Vec<PersonName>,
    /// Sorted by ascending id.
    expenses: Vec<StoredExpense>,
    next_id: u64,
    version: u64,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a group from a JSON file. A missing file yields an empty group.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("store file '{}' not found, starting empty", path.display());
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let mut group: Group = serde_json::from_str(&content)?;
        if let Some(e) = group
            .expenses
            .iter()
            .find(|e| e.record.amount_cents() > MAX_EXPENSE_AMOUNT)
        {
            return Err(StoreError::InvalidAmount {
                input: e.record.amount_cents().to_string(),
            });
        }
        group.people.sort();
        group.expenses.sort_by_key(|e| e.id);
        let max_id = group.expenses.last().map(|e| e.id.value()).unwrap_or(0);
        group.next_id = group.next_id.max(max_id);
        Ok(group)
    }

    /// Write the group to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Monotonic change counter, bumped by every successful write.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Roster, sorted by name.
    pub fn people(&self) -> &[PersonName] {
        &self.people
    }

    pub fn contains_person(&self, name: &str) -> bool {
        self.people.binary_search_by(|p| p.as_str().cmp(name)).is_ok()
    }

    /// Expenses, newest first.
    pub fn expenses(&self) -> Vec<&StoredExpense> {
        self.expenses.iter().rev().collect()
    }

    pub fn expense(&self, id: ExpenseId) -> Option<&StoredExpense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Add a person. Returns `Ok(false)` if the name is already taken.
    pub fn add_person(&mut self, name: &str) -> Result<bool, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        match self.people.binary_search_by(|p| p.as_str().cmp(name)) {
            Ok(_) => Ok(false),
            Err(pos) => {
                self.people.insert(pos, PersonName::new(name));
                self.touch();
                info!("added person '{}'", name);
                Ok(true)
            }
        }
    }

    /// Remove a person and everything that depends on them.
    ///
    /// Expenses the person paid are deleted. The person is dropped from the
    /// participants of every other expense, and an expense left without
    /// participants is deleted. Returns `false` for an unknown name.
    pub fn remove_person(&mut self, name: &str) -> bool {
        let pos = match self.people.binary_search_by(|p| p.as_str().cmp(name)) {
            Ok(pos) => pos,
            Err(_) => return false,
        };
        let person = self.people.remove(pos);

        let before = self.expenses.len();
        self.expenses.retain_mut(|e| {
            if *e.record.paid_by() == person {
                return false;
            }
            if e.record.participants().contains(&person) {
                e.record.remove_participant(&person);
                return !e.record.participants().is_empty();
            }
            true
        });

        self.touch();
        info!(
            "removed person '{}' and {} expense(s)",
            person,
            before - self.expenses.len()
        );
        true
    }

    /// Validate and store a new expense.
    ///
    /// The amount is quantized to cents with banker's rounding and must not
    /// exceed [`MAX_EXPENSE_AMOUNT`]. Blank and unknown participant names are
    /// dropped, duplicates collapse to their first occurrence.
    ///
    /// Participants are stored in the order given, not roster order, so the
    /// leftover cents of an uneven split go to whoever was listed first.
    pub fn add_expense(&mut self, input: NewExpense) -> Result<ExpenseId, StoreError> {
        let description = input.description.trim();
        let amount_raw = input.amount.trim();
        let paid_by = input.paid_by.trim();
        let requested: Vec<&str> = input
            .participants
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect();

        if description.is_empty() {
            return Err(StoreError::MissingField("description"));
        }
        if amount_raw.is_empty() {
            return Err(StoreError::MissingField("amount"));
        }
        if paid_by.is_empty() {
            return Err(StoreError::MissingField("paid_by"));
        }
        if requested.is_empty() {
            return Err(StoreError::MissingField("participants"));
        }

        let amount = parse_amount(amount_raw)?;

        if !self.contains_person(paid_by) {
            return Err(StoreError::UnknownPayer(paid_by.to_string()));
        }

        let mut participants: Vec<PersonName> = Vec::with_capacity(requested.len());
        for name in requested {
            if self.contains_person(name) && !participants.iter().any(|p| p.as_str() == name) {
                participants.push(PersonName::new(name));
            }
        }
        if participants.is_empty() {
            return Err(StoreError::NoValidParticipants);
        }

        let date = input
            .date
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());

        self.next_id += 1;
        let id = ExpenseId(self.next_id);
        let record = ExpenseRecord::from_cents(description, amount, paid_by, participants).with_date(date);
        info!(
            "added expense {} '{}' of {} paid by {}",
            id,
            record.description(),
            record.amount(),
            record.paid_by()
        );
        self.expenses.push(StoredExpense { id, record });
        self.touch();
        Ok(id)
    }

    /// Delete an expense. Returns `false` if no such expense exists.
    pub fn delete_expense(&mut self, id: ExpenseId) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        if self.expenses.len() == before {
            return false;
        }
        self.touch();
        info!("deleted expense {}", id);
        true
    }

    /// Roster and expense records in the order the calculator expects.
    pub fn snapshot(&self) -> (Vec<PersonName>, Vec<ExpenseRecord>) {
        let records = self.expenses().into_iter().map(|e| e.record.clone()).collect();
        (self.people.clone(), records)
    }

    /// Balances and suggested settlements for the current state.
    pub fn summary(&self, config: &SettlementConfig) -> GroupSummary {
        let (people, records) = self.snapshot();
        let balances = BalanceCalculator::calculate_balances(&people, &records);
        let settlements = SettlementPlanner::new(*config).calculate_settlements(&balances);
        GroupSummary {
            version: self.version,
            people,
            expenses: self.expenses().into_iter().cloned().collect(),
            balances,
            settlements,
        }
    }

    fn touch(&mut self) {
        self.version += 1;
    }
}

fn parse_amount(raw: &str) -> Result<Cents, StoreError> {
    let invalid = || StoreError::InvalidAmount {
        input: raw.to_string(),
    };
    let amount: Decimal = raw.parse().map_err(|_| invalid())?;
    let quantized = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    let cents = Cents::from_non_negative_decimal(quantized).map_err(|_| invalid())?;
    if cents > MAX_EXPENSE_AMOUNT {
        return Err(invalid());
    }
    Ok(cents)
}
