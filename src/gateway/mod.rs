use std::fmt::Debug;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use delivery_order::Order;

use crate::error::PersistenceError;

pub mod dry_run;
pub mod xlsx;

pub use dry_run::DryRunGateway;
pub use xlsx::XlsxGateway;

/// Whole-file persistence of the day's orders.
///
/// Implementations hold no orders between calls: `load` hands ownership to
/// the caller and `save` only borrows.
pub trait OrderGateway: Debug {
    /// Reads every order of the report at `path` in row order. A missing
    /// file is [`PersistenceError::NotFound`].
    fn load(&self, path: &Path) -> Result<Vec<Order>, PersistenceError>;

    /// Renders the report for `orders` and fully overwrites `path`.
    fn save(&self, path: &Path, orders: &[Order]) -> Result<(), PersistenceError>;
}

pub type DynGateway = Box<dyn OrderGateway>;

/// `deliveries_<YYYY-MM-DD>.xlsx`, one report per calendar day.
pub fn daily_file_name(date: NaiveDate) -> String {
    format!("deliveries_{}.xlsx", date.format("%Y-%m-%d"))
}

pub fn daily_report_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(daily_file_name(date))
}
