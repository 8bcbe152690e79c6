//! This file defines the type `Transaction`, an expense or income on a
//! concrete calendar date.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::models::DatabaseID;

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// A transaction may carry a back-reference to the recurring transaction that
/// generated it. The reference is informational only: deleting the recurring
/// transaction does not delete the transactions it generated.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: DatabaseID,
    amount: f64,
    date: Date,
    category: String,
    description: String,
    is_income: bool,
    recurring_transaction_id: Option<DatabaseID>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder::new] for discoverability.
    pub fn build(amount: f64, date: Date) -> TransactionBuilder {
        TransactionBuilder::new(amount, date)
    }

    /// Create a new transaction without validation.
    ///
    /// This function is intended for loading rows from the database.
    pub fn new_unchecked(
        id: DatabaseID,
        amount: f64,
        date: Date,
        category: String,
        description: String,
        is_income: bool,
        recurring_transaction_id: Option<DatabaseID>,
    ) -> Self {
        Self {
            id,
            amount,
            date,
            category,
            description,
            is_income,
            recurring_transaction_id,
        }
    }

    /// The ID of the transaction.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// The amount of money spent or earned in this transaction.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// When the transaction happened.
    pub fn date(&self) -> Date {
        self.date
    }

    /// A user-defined category that describes the type of the transaction.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// A text description of what the transaction was for.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the transaction is income (money earned) rather than an
    /// expense (money spent).
    pub fn is_income(&self) -> bool {
        self.is_income
    }

    /// The ID of the recurring transaction that generated this transaction,
    /// if any.
    pub fn recurring_transaction_id(&self) -> Option<DatabaseID> {
        self.recurring_transaction_id
    }
}

/// Builds a [Transaction].
///
/// The amount and date are required up front, everything else is optional:
/// category and description default to empty strings, `is_income` defaults to
/// false (an expense) and the recurring transaction reference defaults to
/// none.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionBuilder {
    pub(crate) amount: f64,
    pub(crate) date: Date,
    pub(crate) category: String,
    pub(crate) description: String,
    pub(crate) is_income: bool,
    pub(crate) recurring_transaction_id: Option<DatabaseID>,
}

impl TransactionBuilder {
    /// Create a new transaction builder for a transaction of `amount` that
    /// happened on `date`.
    pub fn new(amount: f64, date: Date) -> Self {
        Self {
            amount,
            date,
            category: String::new(),
            description: String::new(),
            is_income: false,
            recurring_transaction_id: None,
        }
    }

    /// Set the category of the transaction.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Set the description of the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Mark the transaction as income or an expense.
    pub fn is_income(mut self, is_income: bool) -> Self {
        self.is_income = is_income;
        self
    }

    /// Set the recurring transaction that generated this transaction.
    pub fn recurring_transaction_id(mut self, id: Option<DatabaseID>) -> Self {
        self.recurring_transaction_id = id;
        self
    }

    /// Build the final [Transaction] with the database assigned `id`.
    ///
    /// This is useful for comparing a transaction created in a store against
    /// the builder it was created from.
    pub fn finalise(self, id: DatabaseID) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            date: self.date,
            category: self.category,
            description: self.description,
            is_income: self.is_income,
            recurring_transaction_id: self.recurring_transaction_id,
        }
    }
}

#[cfg(test)]
mod transaction_builder_tests {
    use time::{Date, Month};

    use super::TransactionBuilder;

    #[test]
    fn builder_defaults_to_expense_without_category() {
        let date = Date::from_calendar_date(2024, Month::August, 7).unwrap();

        let transaction = TransactionBuilder::new(19.99, date).finalise(1);

        assert_eq!(transaction.amount(), 19.99);
        assert_eq!(transaction.date(), date);
        assert_eq!(transaction.category(), "");
        assert_eq!(transaction.description(), "");
        assert!(!transaction.is_income());
        assert_eq!(transaction.recurring_transaction_id(), None);
    }

    #[test]
    fn builder_sets_all_fields() {
        let date = Date::from_calendar_date(2024, Month::August, 7).unwrap();

        let transaction = TransactionBuilder::new(1200.0, date)
            .category("Salary")
            .description("Monthly wages")
            .is_income(true)
            .recurring_transaction_id(Some(42))
            .finalise(7);

        assert_eq!(transaction.id(), 7);
        assert_eq!(transaction.category(), "Salary");
        assert_eq!(transaction.description(), "Monthly wages");
        assert!(transaction.is_income());
        assert_eq!(transaction.recurring_transaction_id(), Some(42));
    }
}
