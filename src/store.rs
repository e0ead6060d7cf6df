use delivery_order::{DeliveryZone, NewOrder, Order, OrderError, OrderStatus};
use tracing::{debug, info};

/// The day's orders in insertion order. Sole owner of every [`Order`] for
/// the lifetime of a session.
#[derive(Debug, Default)]
pub struct OrderStore {
    orders: Vec<Order>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from previously persisted orders, healing their
    /// derived fields.
    pub fn from_orders(orders: Vec<Order>) -> Self {
        let mut store = Self { orders };
        store.recompute_all();
        store
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    fn next_id(&self) -> u32 {
        u32::try_from(self.orders.len()).map_or(u32::MAX, |count| count.saturating_add(1))
    }

    /// Appends a new Pending order. `zone_choice` is the raw zone menu
    /// answer; anything other than `1` or `2` is charged the local tariff.
    pub fn create(&mut self, fields: NewOrder, zone_choice: &str) -> &Order {
        let zone = DeliveryZone::from_choice_or_local(zone_choice);
        self.push(fields, zone)
    }

    fn push(&mut self, fields: NewOrder, zone: DeliveryZone) -> &Order {
        let order = Order::new(self.next_id(), fields, zone);
        info!(
            id = order.id,
            customer = %order.customer_name,
            total_price = %order.total_price,
            "Order created"
        );
        let index = self.orders.len();
        self.orders.push(order);
        &self.orders[index]
    }

    pub fn find_by_id(&self, id: u32) -> Result<&Order, OrderError> {
        self.orders
            .iter()
            .find(|order| order.id == id)
            .ok_or(OrderError::NotFound { id })
    }

    pub fn find_by_id_mut(&mut self, id: u32) -> Result<&mut Order, OrderError> {
        self.orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or(OrderError::NotFound { id })
    }

    pub fn update_status(&mut self, id: u32, requested: &str) -> Result<(), OrderError> {
        self.find_by_id_mut(id)?.transition(requested)
    }

    pub fn set_status(&mut self, id: u32, status: OrderStatus) -> Result<(), OrderError> {
        self.find_by_id_mut(id)?.set_status(status);
        Ok(())
    }

    /// Drops every order. Numbering restarts at 1 afterwards.
    pub fn clear_all(&mut self) {
        info!(count = self.orders.len(), "Clearing all orders");
        self.orders.clear();
    }

    pub fn recompute_all(&mut self) {
        let stale = self
            .orders
            .iter()
            .filter(|order| !order.is_consistent())
            .count();
        if stale > 0 {
            debug!(stale, "Healing stale total prices");
        }

        self.orders.iter_mut().for_each(Order::recompute);
    }

    pub fn list(&self) -> &[Order] {
        &self.orders
    }
}
