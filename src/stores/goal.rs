//! Defines the savings goal store trait.

use crate::{
    Error,
    models::{DatabaseID, NewSavingsGoal, SavingsGoal},
};

/// Handles the creation and retrieval of savings goals.
pub trait GoalStore {
    /// Create a new savings goal in the store.
    fn create(&mut self, details: NewSavingsGoal) -> Result<SavingsGoal, Error>;

    /// Retrieve a savings goal from the store.
    fn get(&self, id: DatabaseID) -> Result<SavingsGoal, Error>;

    /// Retrieve every savings goal in the store.
    fn get_all(&self) -> Result<Vec<SavingsGoal>, Error>;

    /// Overwrite the details of the savings goal `id`.
    fn update(&mut self, id: DatabaseID, details: NewSavingsGoal) -> Result<SavingsGoal, Error>;

    /// Remove a savings goal from the store.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;
}
