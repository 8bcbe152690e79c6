//! Implements a SQLite backed savings goal store.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{DatabaseID, NewSavingsGoal, SavingsGoal},
    stores::GoalStore,
};

/// Stores savings goals in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteGoalStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteGoalStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl GoalStore for SQLiteGoalStore {
    /// Create a new savings goal in the database.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn create(&mut self, details: NewSavingsGoal) -> Result<SavingsGoal, Error> {
        let goal = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "INSERT INTO savings_goal (name, target_amount, current_amount, currency, target_date)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id, name, target_amount, current_amount, currency, target_date",
            )?
            .query_row(
                (
                    &details.name,
                    details.target_amount,
                    details.current_amount,
                    &details.currency,
                    details.target_date,
                ),
                Self::map_row,
            )?;

        Ok(goal)
    }

    /// Retrieve a savings goal in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid savings goal,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get(&self, id: DatabaseID) -> Result<SavingsGoal, Error> {
        let goal = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, name, target_amount, current_amount, currency, target_date
                 FROM savings_goal WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], Self::map_row)?;

        Ok(goal)
    }

    /// Retrieve every savings goal in the database.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn get_all(&self) -> Result<Vec<SavingsGoal>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, name, target_amount, current_amount, currency, target_date
                 FROM savings_goal ORDER BY id ASC",
            )?
            .query_map([], Self::map_row)?
            .map(|maybe_goal| maybe_goal.map_err(Error::SqlError))
            .collect()
    }

    /// Overwrite the details of the savings goal `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::UpdateMissingGoal] if the savings goal is not in the
    ///   database,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update(&mut self, id: DatabaseID, details: NewSavingsGoal) -> Result<SavingsGoal, Error> {
        let rows_affected = self.connection.lock().unwrap().execute(
            "UPDATE savings_goal
             SET name = ?1, target_amount = ?2, current_amount = ?3, currency = ?4, target_date = ?5
             WHERE id = ?6",
            (
                &details.name,
                details.target_amount,
                details.current_amount,
                &details.currency,
                details.target_date,
                id,
            ),
        )?;

        if rows_affected == 0 {
            return Err(Error::UpdateMissingGoal);
        }

        Ok(SavingsGoal::new_unchecked(
            id,
            details.name,
            details.target_amount,
            details.current_amount,
            details.currency,
            details.target_date,
        ))
    }

    /// Remove a savings goal from the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DeleteMissingGoal] if the savings goal is not in the
    ///   database,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM savings_goal WHERE id = ?1", (id,))?;

        if rows_affected == 0 {
            return Err(Error::DeleteMissingGoal);
        }

        Ok(())
    }
}

impl CreateTable for SQLiteGoalStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS savings_goal (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    target_amount REAL NOT NULL,
                    current_amount REAL NOT NULL DEFAULT 0.0,
                    currency TEXT NOT NULL,
                    target_date TEXT
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteGoalStore {
    type ReturnType = SavingsGoal;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let name = row.get(offset + 1)?;
        let target_amount = row.get(offset + 2)?;
        let current_amount = row.get(offset + 3)?;
        let currency = row.get(offset + 4)?;
        let target_date = row.get(offset + 5)?;

        Ok(SavingsGoal::new_unchecked(
            id,
            name,
            target_amount,
            current_amount,
            currency,
            target_date,
        ))
    }
}
