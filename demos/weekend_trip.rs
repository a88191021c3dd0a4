//! Weekend trip example.
//!
//! Four friends share a cabin, groceries, fuel and drinks. The engine
//! works out who is up and who is down, then plans the payments.

use rust_decimal_macros::dec;
use settle_up::prelude::*;

fn main() -> Result<(), MoneyError> {
    println!("╔═══════════════════════════════════════╗");
    println!("║  settle-up: Weekend Trip Example      ║");
    println!("╚═══════════════════════════════════════╝\n");

    let people = ["Alice", "Bob", "Carol", "Dave"];
    let everyone = people;

    let expenses = vec![
        ExpenseRecord::new("Cabin", dec!(400.00), "Alice", everyone)?.with_date("2024-06-14"),
        ExpenseRecord::new("Groceries", dec!(87.35), "Bob", everyone)?.with_date("2024-06-14"),
        ExpenseRecord::new("Fuel", dec!(60.00), "Carol", ["Alice", "Carol"])?.with_date("2024-06-15"),
        ExpenseRecord::new("Drinks", dec!(25.00), "Dave", ["Bob", "Carol", "Dave"])?.with_date("2024-06-15"),
    ];

    println!("━━━ Expenses ━━━\n");
    for e in &expenses {
        let participants: Vec<&str> = e.participants().iter().map(|p| p.as_str()).collect();
        println!(
            "  {}  {:<10} {:>8}  paid by {:<6} split {}",
            e.date(),
            e.description(),
            e.amount_cents(),
            e.paid_by(),
            participants.join(", ")
        );
    }
    println!();

    // --- Balances ---
    println!("━━━ Balances ━━━\n");
    let balances = calculate_balances(&people, &expenses);
    for (person, balance) in balances.iter() {
        let status = if balance > Cents::ZERO {
            "IS OWED"
        } else if balance < Cents::ZERO {
            "OWES"
        } else {
            "SETTLED"
        };
        println!("  {:<8} {:>9}  [{}]", person, balance, status);
    }
    println!("  {:<8} {:>9}", "total", balances.total());
    println!();

    // --- Settlements ---
    println!("━━━ Settlements ━━━\n");
    let plan = calculate_settlements(&balances);
    print!("{}", plan);
    println!(
        "\n  {} payments moving {} in total",
        plan.len(),
        plan.total_transferred()
    );

    let mut after = balances.clone();
    for s in &plan {
        after.apply_settlement(s);
    }
    println!(
        "  Everyone square within {} cent(s): {}",
        DEFAULT_DUST_TOLERANCE.value(),
        after.is_settled_within(DEFAULT_DUST_TOLERANCE)
    );

    Ok(())
}
