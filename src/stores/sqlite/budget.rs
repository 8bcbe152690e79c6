//! Implements a SQLite backed budget store.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Budget, DatabaseID, NewBudget},
    stores::BudgetStore,
};

/// Stores budgets in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteBudgetStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteBudgetStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl BudgetStore for SQLiteBudgetStore {
    /// Create a new budget in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DuplicateBudgetCategory] if a budget already exists for the
    ///   category,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create(&mut self, details: NewBudget) -> Result<Budget, Error> {
        let result = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "INSERT INTO budget (category, amount) VALUES (?1, ?2)
                 RETURNING id, category, amount",
            )?
            .query_row((&details.category, details.amount), Self::map_row);

        result.map_err(|error| match error {
            rusqlite::Error::SqliteFailure(sql_error, Some(ref description))
                if sql_error.extended_code == 2067 && description.contains("budget.category") =>
            {
                Error::DuplicateBudgetCategory(details.category)
            }
            error => error.into(),
        })
    }

    /// Retrieve a budget in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid budget,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get(&self, id: DatabaseID) -> Result<Budget, Error> {
        let budget = self
            .connection
            .lock()
            .unwrap()
            .prepare("SELECT id, category, amount FROM budget WHERE id = :id")?
            .query_row(&[(":id", &id)], Self::map_row)?;

        Ok(budget)
    }

    /// Retrieve the budget for `category`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if no budget exists for `category`,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get_by_category(&self, category: &str) -> Result<Budget, Error> {
        let budget = self
            .connection
            .lock()
            .unwrap()
            .prepare("SELECT id, category, amount FROM budget WHERE category = :category")?
            .query_row(&[(":category", &category)], Self::map_row)?;

        Ok(budget)
    }

    /// Retrieve every budget in the database.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn get_all(&self) -> Result<Vec<Budget>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, category, amount FROM budget ORDER BY category ASC")?
            .query_map([], Self::map_row)?
            .map(|maybe_budget| maybe_budget.map_err(Error::SqlError))
            .collect()
    }

    /// Overwrite the details of the budget `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::UpdateMissingBudget] if the budget is not in the database,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update(&mut self, id: DatabaseID, details: NewBudget) -> Result<Budget, Error> {
        let rows_affected = self.connection.lock().unwrap().execute(
            "UPDATE budget SET category = ?1, amount = ?2 WHERE id = ?3",
            (&details.category, details.amount, id),
        )?;

        if rows_affected == 0 {
            return Err(Error::UpdateMissingBudget);
        }

        Ok(Budget::new_unchecked(id, details.category, details.amount))
    }

    /// Remove a budget from the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DeleteMissingBudget] if the budget is not in the database,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM budget WHERE id = ?1", (id,))?;

        if rows_affected == 0 {
            return Err(Error::DeleteMissingBudget);
        }

        Ok(())
    }
}

impl CreateTable for SQLiteBudgetStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS budget (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    category TEXT UNIQUE NOT NULL,
                    amount REAL NOT NULL
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteBudgetStore {
    type ReturnType = Budget;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let category = row.get(offset + 1)?;
        let amount = row.get(offset + 2)?;

        Ok(Budget::new_unchecked(id, category, amount))
    }
}

#[cfg(test)]
mod sqlite_budget_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{Error, db::initialize, models::NewBudget, stores::BudgetStore};

    use super::SQLiteBudgetStore;

    fn get_store() -> SQLiteBudgetStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SQLiteBudgetStore::new(Arc::new(Mutex::new(connection)))
    }

    fn groceries() -> NewBudget {
        NewBudget {
            category: "Groceries".to_owned(),
            amount: 400.0,
        }
    }

    #[test]
    fn create_succeeds() {
        let mut store = get_store();

        let got = store.create(groceries()).unwrap();

        assert_eq!(got.category(), "Groceries");
        assert_eq!(got.amount(), 400.0);
    }

    #[test]
    fn create_fails_on_duplicate_category() {
        let mut store = get_store();
        store.create(groceries()).unwrap();

        let got = store.create(NewBudget {
            category: "Groceries".to_owned(),
            amount: 250.0,
        });

        assert_eq!(
            got,
            Err(Error::DuplicateBudgetCategory("Groceries".to_owned()))
        );
    }

    #[test]
    fn get_succeeds() {
        let mut store = get_store();
        let budget = store.create(groceries()).unwrap();

        let got = store.get(budget.id());

        assert_eq!(got, Ok(budget));
    }

    #[test]
    fn get_fails_on_invalid_id() {
        let store = get_store();

        let got = store.get(999);

        assert_eq!(got, Err(Error::NotFound));
    }

    #[test]
    fn get_by_category_succeeds() {
        let mut store = get_store();
        let budget = store.create(groceries()).unwrap();
        store
            .create(NewBudget {
                category: "Transport".to_owned(),
                amount: 120.0,
            })
            .unwrap();

        let got = store.get_by_category("Groceries");

        assert_eq!(got, Ok(budget));
    }

    #[test]
    fn get_by_category_fails_on_missing_category() {
        let store = get_store();

        let got = store.get_by_category("Rocketry");

        assert_eq!(got, Err(Error::NotFound));
    }

    #[test]
    fn get_all_returns_every_budget() {
        let mut store = get_store();
        let want = vec![
            store.create(groceries()).unwrap(),
            store
                .create(NewBudget {
                    category: "Transport".to_owned(),
                    amount: 120.0,
                })
                .unwrap(),
        ];

        let got = store.get_all().unwrap();

        assert_eq!(got, want);
    }

    #[test]
    fn update_overwrites_stored_budget() {
        let mut store = get_store();
        let budget = store.create(groceries()).unwrap();

        let want = store
            .update(
                budget.id(),
                NewBudget {
                    category: "Groceries".to_owned(),
                    amount: 350.0,
                },
            )
            .unwrap();

        let got = store.get(budget.id()).unwrap();
        assert_eq!(got, want);
        assert_eq!(got.amount(), 350.0);
    }

    #[test]
    fn update_fails_on_missing_budget() {
        let mut store = get_store();

        let got = store.update(999, groceries());

        assert_eq!(got, Err(Error::UpdateMissingBudget));
    }

    #[test]
    fn delete_removes_budget() {
        let mut store = get_store();
        let budget = store.create(groceries()).unwrap();

        store.delete(budget.id()).unwrap();

        assert_eq!(store.get(budget.id()), Err(Error::NotFound));
    }

    #[test]
    fn delete_fails_on_missing_budget() {
        let mut store = get_store();

        let got = store.delete(999);

        assert_eq!(got, Err(Error::DeleteMissingBudget));
    }
}
