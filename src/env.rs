use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use tracing::Level;

use crate::gateway::{DryRunGateway, DynGateway, XlsxGateway, daily_report_path};

#[derive(clap::ValueEnum, Debug, Clone)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        (&log_level).into()
    }
}

impl From<&LogLevel> for Level {
    fn from(log_level: &LogLevel) -> Self {
        match log_level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "delivery-ledger")]
#[command(about = "Track the day's delivery orders in a styled spreadsheet report")]
#[command(version)]
pub struct Env {
    /// Directory holding the daily `deliveries_<date>.xlsx` reports
    #[clap(long, env, default_value = ".")]
    pub data_dir: PathBuf,
    /// Report date (YYYY-MM-DD); defaults to today's local date
    #[clap(long = "date", env = "REPORT_DATE")]
    pub report_date: Option<NaiveDate>,
    #[clap(long, env, default_value = "info")]
    pub log_level: LogLevel,
    /// Render reports without writing them to disk
    #[clap(long, env, default_value = "false")]
    pub dry_run: bool,
}

impl Env {
    /// The day's report path. `today` is only used when no date was
    /// configured.
    pub fn report_path(&self, today: NaiveDate) -> PathBuf {
        daily_report_path(&self.data_dir, self.report_date.unwrap_or(today))
    }

    pub fn get_gateway(&self) -> DynGateway {
        if self.dry_run {
            Box::new(DryRunGateway::new())
        } else {
            Box::new(XlsxGateway::new())
        }
    }
}

/// Console logging on stderr so the interactive prompt on stdout stays
/// readable. `RUST_LOG` overrides the configured level.
pub fn setup_tracing(log_level: &LogLevel) {
    let level: Level = log_level.into();
    let default_filter = format!("delivery_ledger={level},delivery_order={level}");

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
