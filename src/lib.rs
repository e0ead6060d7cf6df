use tracing::info;

pub mod cli;
pub mod env;
pub mod error;
pub mod gateway;
pub mod ledger;
pub mod reporter;
pub mod store;

#[cfg(test)]
pub mod test_utils;

use crate::env::Env;
use crate::ledger::DeliveryLedger;

pub use delivery_order::{DeliveryZone, NewOrder, Order, OrderError, OrderStatus};

/// Opens today's report (or the configured date's) and runs the interactive
/// menu until the user exits.
pub fn run(env: &Env) -> anyhow::Result<()> {
    let today = chrono::Local::now().date_naive();
    let path = env.report_path(today);

    if env.dry_run {
        info!("Dry-run mode: {} will not be written", path.display());
    }

    let mut ledger = DeliveryLedger::open(env.get_gateway(), path);
    cli::run(&mut ledger)
}
