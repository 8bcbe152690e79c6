//! This file defines the type `Budget`, a monthly spending limit for a
//! transaction category.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::models::{DatabaseID, Transaction};

/// A monthly spending limit for a single transaction category.
///
/// Each category has at most one budget. The budget applies to each calendar
/// month independently: spending is summed over the month of the date it is
/// evaluated at, see [Budget::status].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    id: DatabaseID,
    category: String,
    amount: f64,
}

impl Budget {
    /// Create a `Budget` from parts loaded from the database.
    pub fn new_unchecked(id: DatabaseID, category: String, amount: f64) -> Self {
        Self {
            id,
            category,
            amount,
        }
    }

    /// The ID of the budget.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// The transaction category the budget applies to.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The maximum amount to spend on the category per calendar month.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Evaluate the budget against `transactions` for the calendar month that
    /// contains `as_of`.
    ///
    /// Only expenses (transactions with `is_income` false) in the budget's
    /// category dated within that month count towards the spent amount.
    /// Transactions outside the month or in other categories are ignored, so
    /// callers may pass an unfiltered transaction list.
    pub fn status(&self, transactions: &[Transaction], as_of: Date) -> BudgetStatus {
        let spent_amount: f64 = transactions
            .iter()
            .filter(|transaction| {
                !transaction.is_income()
                    && transaction.category() == self.category
                    && transaction.date().year() == as_of.year()
                    && transaction.date().month() == as_of.month()
            })
            .map(Transaction::amount)
            .sum();

        let percentage_used = if self.amount > 0.0 {
            (spent_amount / self.amount) * 100.0
        } else {
            0.0
        };

        BudgetStatus {
            budget_amount: self.amount,
            spent_amount,
            remaining_amount: self.amount - spent_amount,
            percentage_used,
        }
    }
}

/// The details of a budget before it is inserted into a store.
#[derive(Clone, Debug, PartialEq)]
pub struct NewBudget {
    /// The transaction category the budget applies to.
    pub category: String,
    /// The maximum amount to spend on the category per calendar month.
    pub amount: f64,
}

/// How much of a budget has been used in a given calendar month.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BudgetStatus {
    /// The budgeted amount for the month.
    pub budget_amount: f64,
    /// The amount spent on the budget's category in the month.
    pub spent_amount: f64,
    /// The budgeted amount minus the spent amount. Negative when the budget
    /// has been exceeded.
    pub remaining_amount: f64,
    /// The spent amount as a percentage of the budgeted amount. May exceed
    /// 100 when the budget has been exceeded.
    pub percentage_used: f64,
}

#[cfg(test)]
mod budget_tests {
    use time::{Date, Month};

    use crate::models::Transaction;

    use super::Budget;

    fn date(year: i32, month: u8, day: u8) -> Date {
        Date::from_calendar_date(year, Month::try_from(month).unwrap(), day).unwrap()
    }

    fn expense(id: i64, amount: f64, category: &str, on: Date) -> Transaction {
        Transaction::build(amount, on).category(category).finalise(id)
    }

    #[test]
    fn status_sums_expenses_in_category_and_month() {
        let budget = Budget::new_unchecked(1, "Groceries".to_owned(), 400.0);
        let transactions = vec![
            expense(1, 150.0, "Groceries", date(2024, 3, 2)),
            expense(2, 100.0, "Groceries", date(2024, 3, 20)),
            // Wrong month, ignored.
            expense(3, 75.0, "Groceries", date(2024, 2, 28)),
            // Wrong category, ignored.
            expense(4, 50.0, "Transport", date(2024, 3, 10)),
            // Income, ignored.
            Transaction::build(20.0, date(2024, 3, 15))
                .category("Groceries")
                .is_income(true)
                .finalise(5),
        ];

        let status = budget.status(&transactions, date(2024, 3, 31));

        assert_eq!(status.budget_amount, 400.0);
        assert_eq!(status.spent_amount, 250.0);
        assert_eq!(status.remaining_amount, 150.0);
        assert_eq!(status.percentage_used, 62.5);
    }

    #[test]
    fn status_reports_overspend_as_negative_remainder() {
        let budget = Budget::new_unchecked(1, "Dining".to_owned(), 100.0);
        let transactions = vec![expense(1, 150.0, "Dining", date(2024, 6, 5))];

        let status = budget.status(&transactions, date(2024, 6, 30));

        assert_eq!(status.remaining_amount, -50.0);
        assert_eq!(status.percentage_used, 150.0);
    }

    #[test]
    fn status_with_zero_budget_reports_zero_percentage() {
        let budget = Budget::new_unchecked(1, "Misc".to_owned(), 0.0);
        let transactions = vec![expense(1, 10.0, "Misc", date(2024, 6, 5))];

        let status = budget.status(&transactions, date(2024, 6, 30));

        assert_eq!(status.percentage_used, 0.0);
    }
}
