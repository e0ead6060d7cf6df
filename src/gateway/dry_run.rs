use std::path::Path;

use delivery_order::Order;
use tracing::warn;

use super::{OrderGateway, XlsxGateway};
use crate::error::PersistenceError;
use crate::reporter;

/// Gateway for dry-run mode: reads the day's report as usual but only logs
/// what a save would write.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunGateway {
    reader: XlsxGateway,
}

impl DryRunGateway {
    pub const fn new() -> Self {
        Self {
            reader: XlsxGateway::new(),
        }
    }
}

impl OrderGateway for DryRunGateway {
    fn load(&self, path: &Path) -> Result<Vec<Order>, PersistenceError> {
        self.reader.load(path)
    }

    fn save(&self, path: &Path, orders: &[Order]) -> Result<(), PersistenceError> {
        let report = reporter::render(orders);
        let bytes = reporter::xlsx::to_bytes(&report)?;

        warn!(
            "[DRY-RUN] Would write {} orders ({} bytes) to {}",
            orders.len(),
            bytes.len(),
            path.display()
        );
        warn!(
            "[DRY-RUN] Summary: total sell {}, total delivery fee {}, total profit {}",
            report.summary.total_sell,
            report.summary.total_delivery_fee,
            report.summary.total_profit
        );

        Ok(())
    }
}
