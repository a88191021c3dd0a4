//! Group store example.
//!
//! Builds a group through the validating store, saves it to a JSON file,
//! loads it back and prints the summary before and after removing a person.

use settle_up::prelude::*;

fn expense(description: &str, amount: &str, paid_by: &str, participants: &[&str]) -> NewExpense {
    NewExpense {
        description: description.to_string(),
        amount: amount.to_string(),
        paid_by: paid_by.to_string(),
        participants: participants.iter().map(|p| p.to_string()).collect(),
        date: None,
    }
}

fn main() -> Result<(), StoreError> {
    println!("╔═══════════════════════════════════════╗");
    println!("║  settle-up: Group Store Round Trip    ║");
    println!("╚═══════════════════════════════════════╝\n");

    let mut group = Group::new();
    for name in ["Priya", "Tom", "Mei", "Jonas"] {
        group.add_person(name)?;
    }

    group.add_expense(expense("Rent", "1800", "Priya", &["Priya", "Tom", "Mei", "Jonas"]))?;
    group.add_expense(expense("Internet", "45.99", "Tom", &["Priya", "Tom", "Mei", "Jonas"]))?;
    group.add_expense(expense("Takeaway", "38.40", "Mei", &["Mei", "Jonas"]))?;
    group.add_expense(expense("Cleaning", "60", "Jonas", &["Priya", "Tom", "Mei", "Jonas"]))?;

    // Input that the store rejects
    println!("━━━ Validation ━━━\n");
    for bad in [
        expense("", "10", "Tom", &["Tom"]),
        expense("Snacks", "-3", "Tom", &["Tom"]),
        expense("Snacks", "3", "Nobody", &["Tom"]),
        expense("Snacks", "3", "Tom", &["Nobody"]),
    ] {
        match group.add_expense(bad) {
            Ok(id) => println!("  accepted {}", id),
            Err(e) => println!("  rejected: {}", e),
        }
    }
    println!();

    // --- Save and reload ---
    let path = std::env::temp_dir().join("settle-up-demo-group.json");
    group.save(&path)?;
    let loaded = Group::load(&path)?;
    println!("━━━ Saved to {} and reloaded ━━━\n", path.display());
    println!("{}", loaded.summary(&SettlementConfig::default()));

    // --- Cascade ---
    let mut moved_out = loaded.clone();
    moved_out.remove_person("Jonas");
    println!("━━━ After Jonas moves out ━━━\n");
    println!("{}", moved_out.summary(&SettlementConfig::default()));

    std::fs::remove_file(&path).map_err(|source| StoreError::Io {
        path: path.clone(),
        source,
    })?;

    Ok(())
}
