//! Implements a SQLite backed recurring transaction store.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, types::Type};
use time::Date;

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{DatabaseID, Frequency, NewRecurringTransaction, RecurringTransaction, Schedule},
    stores::RecurringTransactionStore,
};

/// Stores recurring transactions in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteRecurringTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteRecurringTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

const COLUMNS: &str = "id, amount, category, description, is_income, start_date, end_date, \
                       frequency, day_of_week, day_of_month, month_of_year, last_generated";

impl RecurringTransactionStore for SQLiteRecurringTransactionStore {
    /// Create a new recurring transaction in the database.
    ///
    /// The watermark (`last_generated`) of the new row is unset.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn create(&mut self, details: NewRecurringTransaction) -> Result<RecurringTransaction, Error> {
        let recurring_transaction = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "INSERT INTO recurring_transaction (amount, category, description, is_income, start_date, end_date, frequency, day_of_week, day_of_month, month_of_year)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                 RETURNING {COLUMNS}"
            ))?
            .query_row(
                (
                    details.amount(),
                    details.category(),
                    details.description(),
                    details.is_income(),
                    details.start_date(),
                    details.end_date(),
                    details.schedule().frequency().as_i64(),
                    details.schedule().day_of_week(),
                    details.schedule().day_of_month(),
                    details.schedule().month_of_year(),
                ),
                Self::map_row,
            )?;

        Ok(recurring_transaction)
    }

    /// Retrieve a recurring transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid recurring
    ///   transaction,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get(&self, id: DatabaseID) -> Result<RecurringTransaction, Error> {
        let recurring_transaction = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {COLUMNS} FROM recurring_transaction WHERE id = :id"
            ))?
            .query_row(&[(":id", &id)], Self::map_row)?;

        Ok(recurring_transaction)
    }

    /// Retrieve every recurring transaction in the database.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn get_all(&self) -> Result<Vec<RecurringTransaction>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {COLUMNS} FROM recurring_transaction ORDER BY id ASC"
            ))?
            .query_map([], Self::map_row)?
            .map(|maybe_recurring_transaction| maybe_recurring_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Overwrite the details of the recurring transaction `id`.
    ///
    /// The watermark is left untouched.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::UpdateMissingRecurringTransaction] if the recurring
    ///   transaction is not in the database,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update(
        &mut self,
        id: DatabaseID,
        details: NewRecurringTransaction,
    ) -> Result<RecurringTransaction, Error> {
        let rows_affected = self.connection.lock().unwrap().execute(
            "UPDATE recurring_transaction
             SET amount = ?1, category = ?2, description = ?3, is_income = ?4, start_date = ?5, end_date = ?6, frequency = ?7, day_of_week = ?8, day_of_month = ?9, month_of_year = ?10
             WHERE id = ?11",
            (
                details.amount(),
                details.category(),
                details.description(),
                details.is_income(),
                details.start_date(),
                details.end_date(),
                details.schedule().frequency().as_i64(),
                details.schedule().day_of_week(),
                details.schedule().day_of_month(),
                details.schedule().month_of_year(),
                id,
            ),
        )?;

        if rows_affected == 0 {
            return Err(Error::UpdateMissingRecurringTransaction);
        }

        self.get(id)
    }

    /// Advance the watermark of the recurring transaction `id` to `date`.
    ///
    /// A missing recurring transaction is a no-op.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn set_last_generated(&mut self, id: DatabaseID, date: Date) -> Result<(), Error> {
        self.connection.lock().unwrap().execute(
            "UPDATE recurring_transaction SET last_generated = ?1 WHERE id = ?2",
            (date, id),
        )?;

        Ok(())
    }

    /// Remove a recurring transaction from the database.
    ///
    /// Transactions generated from it are kept.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DeleteMissingRecurringTransaction] if the recurring
    ///   transaction is not in the database,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM recurring_transaction WHERE id = ?1", (id,))?;

        if rows_affected == 0 {
            return Err(Error::DeleteMissingRecurringTransaction);
        }

        Ok(())
    }
}

impl CreateTable for SQLiteRecurringTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS recurring_transaction (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    amount REAL NOT NULL,
                    category TEXT NOT NULL,
                    description TEXT NOT NULL,
                    is_income INTEGER NOT NULL,
                    start_date TEXT NOT NULL,
                    end_date TEXT,
                    frequency INTEGER NOT NULL,
                    day_of_week INTEGER,
                    day_of_month INTEGER,
                    month_of_year INTEGER,
                    last_generated TEXT
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteRecurringTransactionStore {
    type ReturnType = RecurringTransaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let amount = row.get(offset + 1)?;
        let category = row.get(offset + 2)?;
        let description = row.get(offset + 3)?;
        let is_income = row.get(offset + 4)?;
        let start_date = row.get(offset + 5)?;
        let end_date = row.get(offset + 6)?;

        let frequency = Frequency::try_from(row.get::<_, i64>(offset + 7)?).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(offset + 7, Type::Integer, Box::new(error))
        })?;
        let day_of_week = row.get(offset + 8)?;
        let day_of_month = row.get(offset + 9)?;
        let month_of_year = row.get(offset + 10)?;
        let schedule = Schedule::new_unchecked(frequency, day_of_week, day_of_month, month_of_year);

        let last_generated = row.get(offset + 11)?;

        let details = NewRecurringTransaction::new_unchecked(
            amount,
            category,
            description,
            is_income,
            start_date,
            end_date,
            schedule,
        );

        Ok(RecurringTransaction::new_unchecked(
            id,
            details,
            last_generated,
        ))
    }
}
