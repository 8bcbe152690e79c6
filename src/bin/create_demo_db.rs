use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;
use time::{Date, Month};

use centsible::{
    initialize_db,
    models::{Frequency, NewBudget, NewRecurringTransaction, NewSavingsGoal, Schedule},
    stores::{
        BudgetStore, GoalStore, RecurringTransactionStore,
        sqlite::{SQLiteBudgetStore, SQLiteGoalStore, SQLiteRecurringTransactionStore},
    },
};

/// A utility for creating a demo database for centsible.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let connection = Connection::open(output_path)?;

    initialize_db(&connection)?;

    let connection = Arc::new(Mutex::new(connection));

    println!("Creating recurring transactions...");
    let mut recurring_transaction_store =
        SQLiteRecurringTransactionStore::new(connection.clone());
    let start_of_year = Date::from_calendar_date(2024, Month::January, 1)?;

    recurring_transaction_store.create(NewRecurringTransaction::new(
        2_800.0,
        "Income",
        "Salary",
        true,
        start_of_year,
        None,
        Schedule::new(Frequency::Monthly, None, Some(25), None)?,
    )?)?;
    recurring_transaction_store.create(NewRecurringTransaction::new(
        1_200.0,
        "Housing",
        "Rent",
        false,
        start_of_year,
        None,
        Schedule::new(Frequency::Monthly, None, Some(1), None)?,
    )?)?;
    recurring_transaction_store.create(NewRecurringTransaction::new(
        4.5,
        "Dining",
        "Morning coffee",
        false,
        start_of_year,
        None,
        Schedule::new(Frequency::Daily, None, None, None)?,
    )?)?;
    recurring_transaction_store.create(NewRecurringTransaction::new(
        15.0,
        "Health",
        "Yoga class",
        false,
        start_of_year,
        None,
        Schedule::new(Frequency::Weekly, Some(2), None, None)?,
    )?)?;

    println!("Creating budgets...");
    let mut budget_store = SQLiteBudgetStore::new(connection.clone());
    budget_store.create(NewBudget {
        category: "Groceries".to_owned(),
        amount: 400.0,
    })?;
    budget_store.create(NewBudget {
        category: "Dining".to_owned(),
        amount: 150.0,
    })?;

    println!("Creating savings goals...");
    let mut goal_store = SQLiteGoalStore::new(connection);
    goal_store.create(NewSavingsGoal {
        name: "Holiday".to_owned(),
        target_amount: 2_000.0,
        current_amount: 350.0,
        currency: "EUR".to_owned(),
        target_date: Some(Date::from_calendar_date(2025, Month::July, 1)?),
    })?;
    goal_store.create(NewSavingsGoal {
        name: "Emergency fund".to_owned(),
        target_amount: 5_000.0,
        current_amount: 1_250.0,
        currency: "USD".to_owned(),
        target_date: None,
    })?;

    println!("Success!");

    Ok(())
}
