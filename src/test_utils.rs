use std::cell::RefCell;
use std::path::{Path, PathBuf};

use delivery_order::{DeliveryZone, NewOrder, Order, OrderStatus};
use rust_decimal::Decimal;

use crate::error::PersistenceError;
use crate::gateway::OrderGateway;

pub fn new_order(customer_name: &str, buying_price: Decimal, product_price: Decimal) -> NewOrder {
    NewOrder {
        customer_name: customer_name.to_string(),
        phone_number: "01711111111".to_string(),
        address: "Mirpur 10".to_string(),
        product_name: "Rice Cooker".to_string(),
        buying_price,
        product_price,
    }
}

/// A consistent local-zone order with the given status.
pub fn order(
    id: u32,
    status: OrderStatus,
    buying_price: Decimal,
    product_price: Decimal,
) -> Order {
    let mut order = Order::new(
        id,
        NewOrder {
            customer_name: format!("Customer {id}"),
            product_name: format!("Product {id}"),
            ..new_order("", buying_price, product_price)
        },
        DeliveryZone::Local,
    );
    order.set_status(status);
    order
}

/// In-memory gateway recording every save.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    pub stored: RefCell<Option<Vec<Order>>>,
    pub saves: RefCell<Vec<PathBuf>>,
    pub fail_saves: bool,
    pub fail_loads: bool,
}

impl MemoryGateway {
    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            stored: RefCell::new(Some(orders)),
            ..Self::default()
        }
    }

    pub fn failing_saves() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn failing_loads() -> Self {
        Self {
            fail_loads: true,
            ..Self::default()
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.borrow().len()
    }

    pub fn stored_orders(&self) -> Vec<Order> {
        self.stored.borrow().clone().unwrap_or_default()
    }
}

impl OrderGateway for MemoryGateway {
    fn load(&self, path: &Path) -> Result<Vec<Order>, PersistenceError> {
        if self.fail_loads {
            return Err(PersistenceError::MissingSheet(crate::reporter::SHEET_NAME));
        }
        self.stored
            .borrow()
            .clone()
            .ok_or_else(|| PersistenceError::NotFound(path.to_path_buf()))
    }

    fn save(&self, path: &Path, orders: &[Order]) -> Result<(), PersistenceError> {
        if self.fail_saves {
            return Err(PersistenceError::Io(std::io::Error::other("disk full")));
        }
        self.saves.borrow_mut().push(path.to_path_buf());
        *self.stored.borrow_mut() = Some(orders.to_vec());
        Ok(())
    }
}

impl OrderGateway for std::rc::Rc<MemoryGateway> {
    fn load(&self, path: &Path) -> Result<Vec<Order>, PersistenceError> {
        self.as_ref().load(path)
    }

    fn save(&self, path: &Path, orders: &[Order]) -> Result<(), PersistenceError> {
        self.as_ref().save(path, orders)
    }
}
