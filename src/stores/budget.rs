//! Defines the budget store trait.

use crate::{
    Error,
    models::{Budget, DatabaseID, NewBudget},
};

/// Handles the creation and retrieval of budgets.
pub trait BudgetStore {
    /// Create a new budget in the store.
    ///
    /// Each category has at most one budget; implementers should reject a
    /// second budget for the same category with
    /// [Error::DuplicateBudgetCategory].
    fn create(&mut self, details: NewBudget) -> Result<Budget, Error>;

    /// Retrieve a budget from the store.
    fn get(&self, id: DatabaseID) -> Result<Budget, Error>;

    /// Retrieve the budget for `category`, if one exists.
    fn get_by_category(&self, category: &str) -> Result<Budget, Error>;

    /// Retrieve every budget in the store.
    fn get_all(&self) -> Result<Vec<Budget>, Error>;

    /// Overwrite the details of the budget `id`.
    fn update(&mut self, id: DatabaseID, details: NewBudget) -> Result<Budget, Error>;

    /// Remove a budget from the store.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;
}
