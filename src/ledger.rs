use std::path::{Path, PathBuf};

use delivery_order::{NewOrder, Order, OrderStatus};
use tracing::{error, info, warn};

use crate::error::{LedgerError, PersistenceError};
use crate::gateway::DynGateway;
use crate::reporter::Summary;
use crate::store::OrderStore;

/// One day's session: the order store plus the report file it is mirrored
/// to. Every accepted mutation is followed by a full save.
#[derive(Debug)]
pub struct DeliveryLedger {
    store: OrderStore,
    gateway: DynGateway,
    path: PathBuf,
    unsaved: bool,
}

impl DeliveryLedger {
    /// Loads the day's report. A missing or unreadable report starts an empty
    /// session instead of failing.
    pub fn open(gateway: DynGateway, path: PathBuf) -> Self {
        let orders = match gateway.load(&path) {
            Ok(orders) if orders.is_empty() => {
                info!("{} is empty", path.display());
                Vec::new()
            }
            Ok(orders) => {
                info!("Data loaded from {}", path.display());
                orders
            }
            Err(PersistenceError::NotFound(_)) => {
                info!(
                    "File {} not found. Starting with an empty system",
                    path.display()
                );
                Vec::new()
            }
            Err(e) => {
                error!(
                    "Error loading data from {}: {e}. Starting with an empty system",
                    path.display()
                );
                Vec::new()
            }
        };

        Self {
            store: OrderStore::from_orders(orders),
            gateway,
            path,
            unsaved: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn orders(&self) -> &[Order] {
        self.store.list()
    }

    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    pub fn summary(&self) -> Summary {
        Summary::from_orders(self.store.list())
    }

    /// True when a mutation has not reached the report file because its save
    /// failed.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Heals derived fields and overwrites the report file.
    pub fn save(&mut self) -> Result<(), PersistenceError> {
        self.store.recompute_all();
        let result = self
            .gateway
            .save(&self.path, self.store.list())
            .inspect_err(|e| error!("Failed to save {}: {e}", self.path.display()));
        self.unsaved = result.is_err();
        result
    }

    /// Creates an order and saves. On a save failure the order stays in the
    /// session.
    pub fn add_order(&mut self, fields: NewOrder, zone_choice: &str) -> Result<u32, LedgerError> {
        let id = self.store.create(fields, zone_choice).id;
        self.save()?;
        Ok(id)
    }

    pub fn update_status(&mut self, id: u32, requested: &str) -> Result<(), LedgerError> {
        self.store.update_status(id, requested)?;
        info!("Order ID {id} status updated to {requested}");
        self.save()?;
        Ok(())
    }

    pub fn set_status(&mut self, id: u32, status: OrderStatus) -> Result<(), LedgerError> {
        self.store.set_status(id, status)?;
        info!("Order ID {id} status updated to {status}");
        self.save()?;
        Ok(())
    }

    pub fn clear_all(&mut self) -> Result<(), LedgerError> {
        warn!("Deleting all orders in {}", self.path.display());
        self.store.clear_all();
        self.save()?;
        Ok(())
    }
}
