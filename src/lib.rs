//! Centsible is a backend for tracking personal finances.
//!
//! The library keeps track of one-off and recurring transactions, monthly
//! budgets and savings goals, and generates concrete transactions from
//! recurring transaction schedules on demand or in the background.

#![warn(missing_docs)]

pub mod auth;
pub mod conversion;
pub mod db;
mod error;
pub mod generation;
pub mod models;
pub mod recurrence;
pub mod stores;
pub mod timezone;

pub use db::initialize as initialize_db;
pub use error::Error;
