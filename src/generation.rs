//! Materializes recurring transactions into concrete transactions.
//!
//! The runner walks every recurring transaction, expands its schedule into
//! the dates that fall after the watermark and up to the "as of" date, and
//! creates one transaction per date. The watermark is then advanced to the
//! "as of" date, which makes re-running the generator at any time safe: a
//! run never produces a transaction for a date an earlier run has covered.

use serde::Serialize;
use time::Date;
use tokio::task::JoinHandle;

use crate::{
    Error,
    models::{RecurringTransaction, Transaction},
    stores::{RecurringTransactionStore, TransactionStore},
};

/// The outcome of a single generation run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GenerationSummary {
    /// How many transactions the run created across all recurring
    /// transactions.
    pub transactions_created: usize,
    /// One message per recurring transaction that failed. Failed recurring
    /// transactions keep their old watermark and are retried on the next run.
    pub errors: Vec<String>,
}

/// Generates transactions from recurring transactions.
#[derive(Debug, Clone)]
pub struct GenerationRunner<R, T> {
    recurring_transaction_store: R,
    transaction_store: T,
}

impl<R, T> GenerationRunner<R, T>
where
    R: RecurringTransactionStore,
    T: TransactionStore,
{
    /// Create a runner over the given stores.
    pub fn new(recurring_transaction_store: R, transaction_store: T) -> Self {
        Self {
            recurring_transaction_store,
            transaction_store,
        }
    }

    /// Generate transactions for every recurring transaction, up to and
    /// including `as_of`.
    ///
    /// Each recurring transaction is processed independently: an error while
    /// processing one is recorded in the summary and does not affect the
    /// others. A failed recurring transaction keeps its old watermark, so
    /// its missed dates are picked up by the next run.
    pub fn run_once(&mut self, as_of: Date) -> GenerationSummary {
        let mut summary = GenerationSummary::default();

        let recurring_transactions = match self.recurring_transaction_store.get_all() {
            Ok(recurring_transactions) => recurring_transactions,
            Err(error) => {
                tracing::warn!("could not load recurring transactions: {error}");
                summary
                    .errors
                    .push(format!("could not load recurring transactions: {error}"));
                return summary;
            }
        };

        for recurring_transaction in &recurring_transactions {
            match self.process(recurring_transaction, as_of) {
                Ok(transactions_created) => summary.transactions_created += transactions_created,
                Err(error) => {
                    tracing::warn!(
                        "could not generate transactions for recurring transaction {}: {error}",
                        recurring_transaction.id()
                    );
                    summary.errors.push(format!(
                        "recurring transaction {}: {error}",
                        recurring_transaction.id()
                    ));
                }
            }
        }

        tracing::info!(
            "generated {} transaction(s) from {} recurring transaction(s) as of {as_of} ({} error(s))",
            summary.transactions_created,
            recurring_transactions.len(),
            summary.errors.len()
        );

        summary
    }

    /// Run the generator on the blocking thread pool.
    ///
    /// The caller may await the returned handle for the summary, or drop it
    /// to let generation finish in the background.
    pub fn into_background_task(mut self, as_of: Date) -> JoinHandle<GenerationSummary>
    where
        R: Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(move || self.run_once(as_of))
    }

    fn process(
        &mut self,
        recurring_transaction: &RecurringTransaction,
        as_of: Date,
    ) -> Result<usize, Error> {
        // Fully generated: the watermark already covers the end date, so no
        // run can ever produce another date for this recurring transaction.
        if let Some(end_date) = recurring_transaction.end_date()
            && end_date < as_of
            && recurring_transaction
                .last_generated()
                .is_some_and(|watermark| watermark >= end_date)
        {
            return Ok(0);
        }

        // A recurring transaction that has never been generated starts from
        // the day before its start date, so the start date itself is the
        // first candidate.
        let watermark = match recurring_transaction.last_generated() {
            Some(last_generated) => last_generated,
            None => recurring_transaction
                .start_date()
                .previous_day()
                .unwrap_or(Date::MIN),
        };

        let mut transactions_created = 0;
        let mut produced_dates = false;

        for date in recurring_transaction.schedule().dates_between(
            watermark,
            as_of,
            recurring_transaction.end_date(),
        ) {
            produced_dates = true;

            // The watermark can sit before the start date when the start
            // date was edited forwards; dates in that gap are not generated.
            if date < recurring_transaction.start_date() {
                continue;
            }

            self.transaction_store.create(
                Transaction::build(recurring_transaction.amount(), date)
                    .category(recurring_transaction.category())
                    .description(recurring_transaction.description())
                    .is_income(recurring_transaction.is_income())
                    .recurring_transaction_id(Some(recurring_transaction.id())),
            )?;

            transactions_created += 1;
        }

        // The watermark advances to the "as of" date, not the last produced
        // date: the whole window up to "as of" has now been covered.
        if produced_dates {
            self.recurring_transaction_store
                .set_last_generated(recurring_transaction.id(), as_of)?;
        }

        Ok(transactions_created)
    }
}

#[cfg(test)]
mod generation_runner_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::{Date, Month};

    use crate::{
        Error,
        db::initialize,
        models::{
            DatabaseID, Frequency, NewRecurringTransaction, Schedule, Transaction,
            TransactionBuilder,
        },
        stores::{
            RecurringTransactionStore, SortOrder, TransactionQuery, TransactionStore,
            sqlite::{SQLiteRecurringTransactionStore, SQLiteTransactionStore},
        },
    };

    use super::GenerationRunner;

    fn get_runner() -> GenerationRunner<SQLiteRecurringTransactionStore, SQLiteTransactionStore> {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        GenerationRunner::new(
            SQLiteRecurringTransactionStore::new(connection.clone()),
            SQLiteTransactionStore::new(connection),
        )
    }

    fn date(year: i32, month: u8, day: u8) -> Date {
        Date::from_calendar_date(year, Month::try_from(month).unwrap(), day).unwrap()
    }

    fn daily(start_date: Date, end_date: Option<Date>) -> NewRecurringTransaction {
        NewRecurringTransaction::new(
            4.5,
            "Dining",
            "Morning coffee",
            false,
            start_date,
            end_date,
            Schedule::new_unchecked(Frequency::Daily, None, None, None),
        )
        .unwrap()
    }

    #[test]
    fn run_once_generates_from_start_date_through_as_of() {
        let mut runner = get_runner();
        let recurring_transaction = runner
            .recurring_transaction_store
            .create(daily(date(2024, 1, 1), None))
            .unwrap();

        let summary = runner.run_once(date(2024, 1, 5));

        assert_eq!(summary.transactions_created, 5);
        assert_eq!(summary.errors, Vec::<String>::new());

        let transactions = runner
            .transaction_store
            .get_query(TransactionQuery::default())
            .unwrap();
        let want_dates: Vec<_> = (1..=5).map(|day| date(2024, 1, day)).collect();
        let got_dates: Vec<_> = transactions.iter().map(Transaction::date).collect();
        assert_eq!(got_dates, want_dates);

        let transaction = &transactions[0];
        assert_eq!(transaction.amount(), 4.5);
        assert_eq!(transaction.category(), "Dining");
        assert_eq!(transaction.description(), "Morning coffee");
        assert!(!transaction.is_income());
        assert_eq!(
            transaction.recurring_transaction_id(),
            Some(recurring_transaction.id())
        );
    }

    #[test]
    fn run_once_advances_watermark_to_as_of() {
        let mut runner = get_runner();
        // Mondays only; the "as of" date is a Wednesday.
        let recurring_transaction = runner
            .recurring_transaction_store
            .create(
                NewRecurringTransaction::new(
                    100.0,
                    "Housing",
                    "Cleaner",
                    false,
                    date(2024, 1, 1),
                    None,
                    Schedule::new_unchecked(Frequency::Weekly, Some(0), None, None),
                )
                .unwrap(),
            )
            .unwrap();

        runner.run_once(date(2024, 1, 10));

        let got = runner
            .recurring_transaction_store
            .get(recurring_transaction.id())
            .unwrap();
        // The watermark covers the whole window, not just the last Monday.
        assert_eq!(got.last_generated(), Some(date(2024, 1, 10)));

        // The Wednesdays between the last Monday and the watermark must not
        // reappear in a later run.
        let summary = runner.run_once(date(2024, 1, 15));
        assert_eq!(summary.transactions_created, 1);
        assert_eq!(
            runner
                .transaction_store
                .get_query(TransactionQuery {
                    sort_date: Some(SortOrder::Descending),
                    limit: Some(1),
                    ..Default::default()
                })
                .unwrap()[0]
                .date(),
            date(2024, 1, 15)
        );
    }

    #[test]
    fn run_once_is_idempotent() {
        let mut runner = get_runner();
        runner
            .recurring_transaction_store
            .create(daily(date(2024, 1, 1), None))
            .unwrap();
        runner.run_once(date(2024, 1, 5));

        let summary = runner.run_once(date(2024, 1, 5));

        assert_eq!(summary.transactions_created, 0);
        assert_eq!(runner.transaction_store.count(), Ok(5));
    }

    #[test]
    fn run_once_skips_dates_before_start_date() {
        let mut runner = get_runner();
        let recurring_transaction = runner
            .recurring_transaction_store
            .create(daily(date(2024, 1, 10), None))
            .unwrap();
        // A watermark before the start date can be left behind by editing
        // the start date forwards.
        runner
            .recurring_transaction_store
            .set_last_generated(recurring_transaction.id(), date(2024, 1, 1))
            .unwrap();

        let summary = runner.run_once(date(2024, 1, 12));

        assert_eq!(summary.transactions_created, 3);
        let got_dates: Vec<_> = runner
            .transaction_store
            .get_query(TransactionQuery::default())
            .unwrap()
            .iter()
            .map(Transaction::date)
            .collect();
        assert_eq!(
            got_dates,
            vec![date(2024, 1, 10), date(2024, 1, 11), date(2024, 1, 12)]
        );
    }

    #[test]
    fn run_once_stops_at_end_date_and_settles() {
        let mut runner = get_runner();
        runner
            .recurring_transaction_store
            .create(daily(date(2024, 1, 1), Some(date(2024, 1, 3))))
            .unwrap();

        let summary = runner.run_once(date(2024, 1, 5));
        assert_eq!(summary.transactions_created, 3);

        // Once the watermark covers the end date, later runs do nothing.
        let summary = runner.run_once(date(2024, 1, 10));
        assert_eq!(summary.transactions_created, 0);
        assert_eq!(summary.errors, Vec::<String>::new());
        assert_eq!(runner.transaction_store.count(), Ok(3));
    }

    #[test]
    fn run_once_with_no_recurring_transactions_is_empty() {
        let mut runner = get_runner();

        let summary = runner.run_once(date(2024, 1, 5));

        assert_eq!(summary.transactions_created, 0);
        assert_eq!(summary.errors, Vec::<String>::new());
    }

    /// A transaction store whose writes always fail.
    struct FailingTransactionStore;

    impl TransactionStore for FailingTransactionStore {
        fn create(&mut self, _builder: TransactionBuilder) -> Result<Transaction, Error> {
            Err(Error::SqlError(rusqlite::Error::InvalidQuery))
        }

        fn get(&self, _id: DatabaseID) -> Result<Transaction, Error> {
            Err(Error::NotFound)
        }

        fn get_query(&self, _filter: TransactionQuery) -> Result<Vec<Transaction>, Error> {
            Ok(vec![])
        }

        fn update(&mut self, _transaction: &Transaction) -> Result<(), Error> {
            Err(Error::UpdateMissingTransaction)
        }

        fn delete(&mut self, _id: DatabaseID) -> Result<(), Error> {
            Err(Error::DeleteMissingTransaction)
        }

        fn count(&self) -> Result<usize, Error> {
            Ok(0)
        }
    }

    #[test]
    fn run_once_isolates_failures_per_recurring_transaction() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let mut recurring_transaction_store =
            SQLiteRecurringTransactionStore::new(Arc::new(Mutex::new(connection)));

        let first = recurring_transaction_store
            .create(daily(date(2024, 1, 1), None))
            .unwrap();
        let second = recurring_transaction_store
            .create(daily(date(2024, 1, 2), None))
            .unwrap();

        let mut runner =
            GenerationRunner::new(recurring_transaction_store.clone(), FailingTransactionStore);
        let summary = runner.run_once(date(2024, 1, 5));

        // Both recurring transactions fail, each with its own error, and
        // neither watermark moves so the next run retries both.
        assert_eq!(summary.transactions_created, 0);
        assert_eq!(summary.errors.len(), 2);
        assert!(summary.errors[0].contains(&format!("recurring transaction {}", first.id())));
        assert!(summary.errors[1].contains(&format!("recurring transaction {}", second.id())));
        assert_eq!(
            recurring_transaction_store
                .get(first.id())
                .unwrap()
                .last_generated(),
            None
        );
        assert_eq!(
            recurring_transaction_store
                .get(second.id())
                .unwrap()
                .last_generated(),
            None
        );
    }

    #[tokio::test]
    async fn background_task_returns_summary() {
        let mut runner = get_runner();
        runner
            .recurring_transaction_store
            .create(daily(date(2024, 1, 1), None))
            .unwrap();

        let summary = runner
            .into_background_task(date(2024, 1, 3))
            .await
            .unwrap();

        assert_eq!(summary.transactions_created, 3);
    }
}
