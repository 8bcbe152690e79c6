//! Defines the recurring transaction store trait.

use time::Date;

use crate::{
    Error,
    models::{DatabaseID, NewRecurringTransaction, RecurringTransaction},
};

/// Handles the creation and retrieval of recurring transactions.
pub trait RecurringTransactionStore {
    /// Create a new recurring transaction in the store.
    ///
    /// The watermark of a newly created recurring transaction is unset, so
    /// the next generation run starts from the day before its start date.
    fn create(&mut self, details: NewRecurringTransaction) -> Result<RecurringTransaction, Error>;

    /// Retrieve a recurring transaction from the store.
    fn get(&self, id: DatabaseID) -> Result<RecurringTransaction, Error>;

    /// Retrieve every recurring transaction in the store.
    fn get_all(&self) -> Result<Vec<RecurringTransaction>, Error>;

    /// Overwrite the details of the recurring transaction `id`.
    ///
    /// The watermark is left untouched: editing a recurring transaction does
    /// not retroactively regenerate past dates.
    fn update(
        &mut self,
        id: DatabaseID,
        details: NewRecurringTransaction,
    ) -> Result<RecurringTransaction, Error>;

    /// Advance the watermark of the recurring transaction `id` to `date`.
    ///
    /// A missing recurring transaction is a no-op rather than an error:
    /// generation must tolerate recurring transactions deleted while a run
    /// is in progress.
    fn set_last_generated(&mut self, id: DatabaseID, date: Date) -> Result<(), Error>;

    /// Remove a recurring transaction from the store.
    ///
    /// Transactions generated from it are kept; they carry the old ID as an
    /// informational back-reference only.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;
}
