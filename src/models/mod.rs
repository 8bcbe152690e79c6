//! This module defines the domain data types.

pub use budget::{Budget, BudgetStatus, NewBudget};
pub use frequency::Frequency;
pub use goal::{NewSavingsGoal, SavingsGoal};
pub use recurring_transaction::{NewRecurringTransaction, RecurringTransaction};
pub use schedule::Schedule;
pub use transaction::{Transaction, TransactionBuilder};

mod budget;
mod frequency;
mod goal;
mod recurring_transaction;
mod schedule;
mod transaction;

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseID = i64;
