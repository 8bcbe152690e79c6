use std::{
    fs::OpenOptions,
    sync::{Arc, Mutex},
    time::Duration,
};

use clap::Parser;
use rusqlite::Connection;
use tokio::signal;
use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use centsible::{
    generation::GenerationRunner,
    initialize_db,
    stores::sqlite::{SQLiteRecurringTransactionStore, SQLiteTransactionStore},
    timezone,
};

/// Generates transactions from the recurring transactions in a centsible
/// database.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The IANA timezone to evaluate "today" in.
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,

    /// Keep running and repeat generation every this many seconds.
    ///
    /// Without this flag, generation runs once and exits.
    #[arg(long)]
    interval_seconds: Option<u64>,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let connection = Connection::open(&args.db_path).expect("Could not open the database");
    initialize_db(&connection).expect("Could not initialize the database");
    let connection = Arc::new(Mutex::new(connection));

    let runner = GenerationRunner::new(
        SQLiteRecurringTransactionStore::new(connection.clone()),
        SQLiteTransactionStore::new(connection),
    );

    match args.interval_seconds {
        None => {
            let as_of = timezone::local_date(&args.timezone).expect("Unknown timezone");
            let summary = runner.into_background_task(as_of).await.unwrap();

            println!("{}", serde_json::to_string_pretty(&summary).unwrap());
        }
        Some(interval_seconds) => {
            tracing::info!("generating every {interval_seconds} seconds, press ctrl+c to stop");

            loop {
                let as_of = timezone::local_date(&args.timezone).expect("Unknown timezone");
                runner
                    .clone()
                    .into_background_task(as_of)
                    .await
                    .expect("The generation task panicked");

                tokio::select! {
                    _ = signal::ctrl_c() => break,
                    () = tokio::time::sleep(Duration::from_secs(interval_seconds)) => {}
                }
            }
        }
    }
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}
