//! Implements the store traits on top of a SQLite database.

pub use budget::SQLiteBudgetStore;
pub use goal::SQLiteGoalStore;
pub use recurring_transaction::SQLiteRecurringTransactionStore;
pub use transaction::SQLiteTransactionStore;

mod budget;
mod goal;
mod recurring_transaction;
mod transaction;
