//! Defines the store traits that abstract over the persistence backend, and
//! the SQLite implementations of those traits.

pub use budget::BudgetStore;
pub use goal::GoalStore;
pub use recurring_transaction::RecurringTransactionStore;
pub use transaction::{SortOrder, TransactionQuery, TransactionStore};

mod budget;
mod goal;
mod recurring_transaction;
mod transaction;

pub mod sqlite;
