//! This file defines the type `SavingsGoal`, a target amount being saved
//! towards in a particular currency.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{conversion::CurrencyConverter, models::DatabaseID};

/// A savings goal: a named target amount and the progress made towards it.
///
/// Amounts are denominated in the goal's currency. Use
/// [SavingsGoal::in_currency] to view the goal in another currency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    id: DatabaseID,
    name: String,
    target_amount: f64,
    current_amount: f64,
    currency: String,
    target_date: Option<Date>,
}

impl SavingsGoal {
    /// Create a `SavingsGoal` from parts loaded from the database.
    pub fn new_unchecked(
        id: DatabaseID,
        name: String,
        target_amount: f64,
        current_amount: f64,
        currency: String,
        target_date: Option<Date>,
    ) -> Self {
        Self {
            id,
            name,
            target_amount,
            current_amount,
            currency,
            target_date,
        }
    }

    /// The ID of the savings goal.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// The name of the savings goal.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The amount being saved towards.
    pub fn target_amount(&self) -> f64 {
        self.target_amount
    }

    /// The amount saved so far.
    pub fn current_amount(&self) -> f64 {
        self.current_amount
    }

    /// The currency code the goal's amounts are denominated in.
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// The date the goal should be reached by, if any.
    pub fn target_date(&self) -> Option<Date> {
        self.target_date
    }

    /// The progress towards the goal as a percentage, capped at 100.
    ///
    /// A goal with a non-positive target reports zero progress.
    pub fn progress_percentage(&self) -> f64 {
        if self.target_amount > 0.0 {
            ((self.current_amount / self.target_amount) * 100.0).min(100.0)
        } else {
            0.0
        }
    }

    /// Whether the goal has been fully funded.
    pub fn is_completed(&self) -> bool {
        self.progress_percentage() >= 100.0
    }

    /// A copy of the goal with both amounts converted into
    /// `target_currency`.
    ///
    /// If the goal is already denominated in `target_currency` the copy is
    /// unchanged. Conversion never fails; see
    /// [CurrencyConverter::convert] for the fallback behaviour when no rate
    /// is known.
    pub fn in_currency(&self, converter: &CurrencyConverter, target_currency: &str) -> SavingsGoal {
        if self.currency == target_currency {
            return self.clone();
        }

        let target = converter.convert(self.target_amount, &self.currency, target_currency);
        let current = converter.convert(self.current_amount, &self.currency, target_currency);

        SavingsGoal {
            id: self.id,
            name: self.name.clone(),
            target_amount: target.converted_amount,
            current_amount: current.converted_amount,
            currency: target_currency.to_owned(),
            target_date: self.target_date,
        }
    }
}

/// The details of a savings goal before it is inserted into a store.
#[derive(Clone, Debug, PartialEq)]
pub struct NewSavingsGoal {
    /// The name of the savings goal.
    pub name: String,
    /// The amount being saved towards.
    pub target_amount: f64,
    /// The amount saved so far.
    pub current_amount: f64,
    /// The currency code the amounts are denominated in.
    pub currency: String,
    /// The date the goal should be reached by, if any.
    pub target_date: Option<Date>,
}
