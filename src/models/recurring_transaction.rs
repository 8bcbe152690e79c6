//! This file defines the type `RecurringTransaction`, a template describing a
//! transaction that repeats on a regular schedule (e.g., wages, phone bill).

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    models::{DatabaseID, Schedule},
};

/// A transaction (income or expense) that repeats on a regular basis.
///
/// The recurring transaction itself never appears in balances; instead, the
/// generation runner materializes one concrete [Transaction] per calendar
/// date implied by the schedule. `last_generated` is the watermark: the last
/// "as of" date through which materialization has been completed. It is
/// absent on a freshly created recurring transaction and only ever advanced
/// by the generation runner.
///
/// New instances should be created through a store with a
/// [NewRecurringTransaction].
///
/// [Transaction]: crate::models::Transaction
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecurringTransaction {
    id: DatabaseID,
    amount: f64,
    category: String,
    description: String,
    is_income: bool,
    start_date: Date,
    end_date: Option<Date>,
    schedule: Schedule,
    last_generated: Option<Date>,
}

impl RecurringTransaction {
    /// Create a `RecurringTransaction` from parts that were validated when
    /// they entered the database.
    pub fn new_unchecked(
        id: DatabaseID,
        details: NewRecurringTransaction,
        last_generated: Option<Date>,
    ) -> Self {
        Self {
            id,
            amount: details.amount,
            category: details.category,
            description: details.description,
            is_income: details.is_income,
            start_date: details.start_date,
            end_date: details.end_date,
            schedule: details.schedule,
            last_generated,
        }
    }

    /// The ID of the recurring transaction.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// The amount of each generated transaction.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The category given to each generated transaction.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The description given to each generated transaction.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the generated transactions are income rather than expenses.
    pub fn is_income(&self) -> bool {
        self.is_income
    }

    /// The first date a transaction may be generated for.
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// The last date a transaction may be generated for (inclusive).
    ///
    /// `None` means the recurring transaction repeats indefinitely.
    pub fn end_date(&self) -> Option<Date> {
        self.end_date
    }

    /// When the recurring transaction repeats.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// The watermark: the last "as of" date through which transactions have
    /// been generated, or `None` if generation has never run for this
    /// recurring transaction.
    pub fn last_generated(&self) -> Option<Date> {
        self.last_generated
    }
}

/// The details of a recurring transaction before it is inserted into a store.
///
/// Create instances with [NewRecurringTransaction::new], which validates the
/// date order (the schedule parameters are validated by
/// [Schedule::new](crate::models::Schedule::new)).
#[derive(Clone, Debug, PartialEq)]
pub struct NewRecurringTransaction {
    amount: f64,
    category: String,
    description: String,
    is_income: bool,
    start_date: Date,
    end_date: Option<Date>,
    schedule: Schedule,
}

impl NewRecurringTransaction {
    /// Create the details for a new recurring transaction.
    ///
    /// An `end_date` of `None` is interpreted as the transaction recurring
    /// indefinitely. An `end_date` equal to `start_date` is allowed: a
    /// transaction dated exactly `end_date` is still generated.
    ///
    /// # Errors
    /// This function will return an [Error::EndDateBeforeStartDate] if
    /// `end_date` is before `start_date`.
    pub fn new(
        amount: f64,
        category: &str,
        description: &str,
        is_income: bool,
        start_date: Date,
        end_date: Option<Date>,
        schedule: Schedule,
    ) -> Result<Self, Error> {
        match end_date {
            Some(end) if end < start_date => Err(Error::EndDateBeforeStartDate {
                start: start_date,
                end,
            }),
            Some(_) | None => Ok(Self {
                amount,
                category: category.to_owned(),
                description: description.to_owned(),
                is_income,
                start_date,
                end_date,
                schedule,
            }),
        }
    }

    /// Create the details for a new recurring transaction without validating
    /// the date order.
    ///
    /// This function is intended for loading rows from the database.
    pub fn new_unchecked(
        amount: f64,
        category: String,
        description: String,
        is_income: bool,
        start_date: Date,
        end_date: Option<Date>,
        schedule: Schedule,
    ) -> Self {
        Self {
            amount,
            category,
            description,
            is_income,
            start_date,
            end_date,
            schedule,
        }
    }

    /// The amount of each generated transaction.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The category given to each generated transaction.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The description given to each generated transaction.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the generated transactions are income rather than expenses.
    pub fn is_income(&self) -> bool {
        self.is_income
    }

    /// The first date a transaction may be generated for.
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// The last date a transaction may be generated for (inclusive).
    pub fn end_date(&self) -> Option<Date> {
        self.end_date
    }

    /// When the recurring transaction repeats.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }
}
