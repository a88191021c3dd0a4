//! settle-up CLI
//!
//! Track a group's shared expenses in a JSON file and print who owes whom.
//!
//! # Usage
//!
//! ```bash
//! settle-up add-person --name Alice
//! settle-up add-person --name Bob
//! settle-up add-expense --description Dinner --amount 42.50 --paid-by Alice --participants Alice,Bob
//!
//! # Balances and suggested payments
//! settle-up summary
//! settle-up summary --format json
//!
//! # Generate a random group for testing
//! settle-up generate --people 8 --expenses 40 --output trip.json
//! ```

use settle_up::core::money::Cents;
use settle_up::engine::config::SettlementConfig;
use settle_up::simulation::random_group::{generate_random_group, GroupConfig};
use settle_up::store::group::{ExpenseId, Group, NewExpense};
use std::process;

const STORE_ENV: &str = "SETTLE_UP_STORE";
const DEFAULT_STORE: &str = "group.json";

fn print_usage() {
    eprintln!(
        r#"settle-up: shared expenses and minimal settlements

USAGE:
    settle-up <COMMAND> [OPTIONS]

COMMANDS:
    summary          Show expenses, balances and suggested payments
    add-person       Add a person to the group
    remove-person    Remove a person and the expenses that depend on them
    add-expense      Record a shared expense
    delete-expense   Delete an expense by id
    generate         Generate a random group (for testing)
    help             Show this message

OPTIONS (all store commands):
    --store <FILE>          Group file (default: $SETTLE_UP_STORE or group.json)

OPTIONS (summary):
    --format <FORMAT>       Output format: text (default) or json
    --dust <CENTS>          Balances within this many cents count as settled (default: 1)

OPTIONS (add-person, remove-person):
    --name <NAME>

OPTIONS (add-expense):
    --description <TEXT>
    --amount <AMOUNT>       Decimal amount, e.g. 42.50
    --paid-by <NAME>
    --participants <LIST>   Comma-separated names
    --date <DATE>           Display date (default: today)

OPTIONS (delete-expense):
    --id <N>

OPTIONS (generate):
    --people <N>            Number of people (default: 6)
    --expenses <N>          Number of expenses (default: 20)
    --seed <N>              RNG seed for a reproducible group
    --output <FILE>         Write to file instead of stdout

EXAMPLES:
    settle-up add-person --name Alice
    settle-up add-expense --description Taxi --amount 18 --paid-by Alice --participants Alice,Bob
    settle-up summary --format json
    settle-up generate --people 5 --expenses 30 --output test.json"#
    );
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Parsed `--key value` pairs for one command.
struct Options {
    pairs: Vec<(String, String)>,
}

impl Options {
    fn parse(args: &[String], allowed: &[&str]) -> Self {
        let mut pairs = Vec::new();
        let mut i = 0;
        while i < args.len() {
            let key = args[i].as_str();
            if !allowed.contains(&key) {
                fail(format!("unknown option: {}", key));
            }
            i += 1;
            let value = args
                .get(i)
                .cloned()
                .unwrap_or_else(|| fail(format!("{} requires a value", key)));
            pairs.push((key.trim_start_matches("--").to_string(), value));
            i += 1;
        }
        Self { pairs }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn require(&self, key: &str) -> &str {
        self.get(key)
            .unwrap_or_else(|| fail(format!("--{} is required", key)))
    }

    fn number<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).map(|v| {
            v.parse()
                .unwrap_or_else(|_| fail(format!("--{} requires a number", key)))
        })
    }

    fn store_path(&self) -> String {
        self.get("store")
            .map(str::to_string)
            .or_else(|| std::env::var(STORE_ENV).ok())
            .unwrap_or_else(|| DEFAULT_STORE.to_string())
    }
}

fn load_group(path: &str) -> Group {
    Group::load(path).unwrap_or_else(|e| fail(e))
}

fn save_group(group: &Group, path: &str) {
    group.save(path).unwrap_or_else(|e| fail(e));
}

fn cmd_summary(args: &[String]) {
    let opts = Options::parse(args, &["--store", "--format", "--dust"]);
    let format = opts.get("format").unwrap_or("text");
    let config = match opts.number::<i64>("dust") {
        Some(cents) => SettlementConfig::with_dust_tolerance(Cents::new(cents)),
        None => SettlementConfig::default(),
    };

    let group = load_group(&opts.store_path());
    let summary = group.summary(&config);

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&summary).unwrap_or_else(|e| fail(e));
            println!("{}", json);
        }
        "text" => print!("{}", summary),
        other => fail(format!("unknown format '{}', expected 'text' or 'json'", other)),
    }
}

fn cmd_add_person(args: &[String]) {
    let opts = Options::parse(args, &["--store", "--name"]);
    let path = opts.store_path();
    let mut group = load_group(&path);
    let name = opts.require("name");

    match group.add_person(name) {
        Ok(true) => {
            save_group(&group, &path);
            println!("Added {}", name.trim());
        }
        Ok(false) => println!("{} is already in the group", name.trim()),
        Err(e) => fail(e),
    }
}

fn cmd_remove_person(args: &[String]) {
    let opts = Options::parse(args, &["--store", "--name"]);
    let path = opts.store_path();
    let mut group = load_group(&path);
    let name = opts.require("name");

    if group.remove_person(name) {
        save_group(&group, &path);
        println!("Removed {}", name);
    } else {
        println!("{} is not in the group", name);
    }
}

fn cmd_add_expense(args: &[String]) {
    let opts = Options::parse(
        args,
        &[
            "--store",
            "--description",
            "--amount",
            "--paid-by",
            "--participants",
            "--date",
        ],
    );
    let path = opts.store_path();
    let mut group = load_group(&path);

    let input = NewExpense {
        description: opts.get("description").unwrap_or_default().to_string(),
        amount: opts.get("amount").unwrap_or_default().to_string(),
        paid_by: opts.get("paid-by").unwrap_or_default().to_string(),
        participants: opts
            .get("participants")
            .unwrap_or_default()
            .split(',')
            .map(str::to_string)
            .collect(),
        date: opts.get("date").map(str::to_string),
    };

    let id = group.add_expense(input).unwrap_or_else(|e| fail(e));
    save_group(&group, &path);
    println!("Recorded expense {}", id);
}

fn cmd_delete_expense(args: &[String]) {
    let opts = Options::parse(args, &["--store", "--id"]);
    let path = opts.store_path();
    let mut group = load_group(&path);
    let id = ExpenseId::new(
        opts.number::<u64>("id")
            .unwrap_or_else(|| fail("--id is required")),
    );

    if group.delete_expense(id) {
        save_group(&group, &path);
        println!("Deleted expense {}", id);
    } else {
        println!("No expense {}", id);
    }
}

fn cmd_generate(args: &[String]) {
    let opts = Options::parse(args, &["--people", "--expenses", "--seed", "--output"]);
    let defaults = GroupConfig::default();
    let config = GroupConfig {
        people_count: opts.number("people").unwrap_or(defaults.people_count),
        expense_count: opts.number("expenses").unwrap_or(defaults.expense_count),
        seed: opts.number("seed"),
        ..defaults
    };

    let group = generate_random_group(&config).unwrap_or_else(|e| fail(e));

    match opts.get("output") {
        Some(path) => {
            save_group(&group, path);
            eprintln!(
                "Generated {} expenses across {} people → {}",
                group.expenses().len(),
                group.people().len(),
                path
            );
        }
        None => {
            let json = serde_json::to_string_pretty(&group).unwrap_or_else(|e| fail(e));
            println!("{}", json);
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "summary" => cmd_summary(rest),
        "add-person" => cmd_add_person(rest),
        "remove-person" => cmd_remove_person(rest),
        "add-expense" => cmd_add_expense(rest),
        "delete-expense" => cmd_delete_expense(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
