//! Defines the app level error type shared across models, stores and the
//! generation runner.

use time::Date;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An integer frequency code loaded from the database did not map to a
    /// known frequency.
    #[error("{0} is not a valid frequency code")]
    InvalidFrequency(i64),

    /// A weekly schedule was given a day of the week outside 0-6
    /// (Monday = 0, Sunday = 6).
    #[error("{0} is not a valid day of the week, expected 0 (Monday) to 6 (Sunday)")]
    InvalidDayOfWeek(i64),

    /// A monthly or yearly schedule was given a day of the month outside 1-31.
    #[error("{0} is not a valid day of the month, expected 1 to 31")]
    InvalidDayOfMonth(i64),

    /// A yearly schedule was given a month outside 1-12.
    #[error("{0} is not a valid month, expected 1 (January) to 12 (December)")]
    InvalidMonthOfYear(i64),

    /// A weekly schedule was created without a day of the week.
    #[error("day_of_week is required for weekly schedules")]
    MissingDayOfWeek,

    /// A monthly or yearly schedule was created without a day of the month.
    #[error("day_of_month is required for monthly and yearly schedules")]
    MissingDayOfMonth,

    /// A yearly schedule was created without a month.
    #[error("month_of_year is required for yearly schedules")]
    MissingMonthOfYear,

    /// A recurring transaction was created with an end date earlier than its
    /// start date, so it could never generate anything.
    #[error("the end date {end} is before the start date {start}")]
    EndDateBeforeStartDate {
        /// The first date the recurring transaction is active.
        start: Date,
        /// The offending end date.
        end: Date,
    },

    /// A bearer token could not be verified by the identity provider.
    #[error("the bearer token could not be verified")]
    Unauthenticated,

    /// An error occurred while getting the local date from a canonical
    /// timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// The specified budget category already exists in the database.
    ///
    /// Each category has at most one budget, so a second budget for the same
    /// category is rejected rather than silently shadowing the first.
    #[error("a budget for the category \"{0}\" already exists in the database")]
    DuplicateBudgetCategory(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// Tried to update a recurring transaction that does not exist
    #[error("tried to update a recurring transaction that is not in the database")]
    UpdateMissingRecurringTransaction,

    /// Tried to delete a recurring transaction that does not exist
    #[error("tried to delete a recurring transaction that is not in the database")]
    DeleteMissingRecurringTransaction,

    /// Tried to update a budget that does not exist
    #[error("tried to update a budget that is not in the database")]
    UpdateMissingBudget,

    /// Tried to delete a budget that does not exist
    #[error("tried to delete a budget that is not in the database")]
    DeleteMissingBudget,

    /// Tried to update a savings goal that does not exist
    #[error("tried to update a savings goal that is not in the database")]
    UpdateMissingGoal,

    /// Tried to delete a savings goal that does not exist
    #[error("tried to delete a savings goal that is not in the database")]
    DeleteMissingGoal,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}
