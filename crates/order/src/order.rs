use rust_decimal::Decimal;

use crate::{DeliveryZone, OrderError, OrderStatus};

/// Largest magnitude accepted for any money amount entering the system
/// (1,000,000,000,000). Totals and summary sums over amounts within this
/// bound stay far below `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

pub fn is_amount_in_range(amount: Decimal) -> bool {
    amount.abs() <= MAX_AMOUNT
}

/// Operator-entered fields of an order that is about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_name: String,
    pub phone_number: String,
    pub address: String,
    pub product_name: String,
    pub buying_price: Decimal,
    pub product_price: Decimal,
}

/// A single delivery record.
///
/// `total_price` is derived from `product_price + delivery_fee` and is only
/// trustworthy after [`Order::recompute`]. Records read back from a report
/// file may carry a stale value until they are healed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: u32,
    pub customer_name: String,
    pub phone_number: String,
    pub address: String,
    pub product_name: String,
    pub buying_price: Decimal,
    pub product_price: Decimal,
    pub delivery_fee: Decimal,
    pub status: OrderStatus,
    pub total_price: Decimal,
}

impl Order {
    pub fn new(id: u32, fields: NewOrder, zone: DeliveryZone) -> Self {
        let NewOrder {
            customer_name,
            phone_number,
            address,
            product_name,
            buying_price,
            product_price,
        } = fields;

        let mut order = Self {
            id,
            customer_name,
            phone_number,
            address,
            product_name,
            buying_price,
            product_price,
            delivery_fee: zone.fee(),
            status: OrderStatus::Pending,
            total_price: Decimal::ZERO,
        };
        order.recompute();
        order
    }

    pub fn computed_total_price(&self) -> Decimal {
        self.product_price + self.delivery_fee
    }

    pub fn recompute(&mut self) {
        self.total_price = self.computed_total_price();
    }

    pub fn is_consistent(&self) -> bool {
        self.total_price == self.computed_total_price()
    }

    /// Profit realized by this order if it is delivered.
    pub fn margin(&self) -> Decimal {
        self.product_price - self.buying_price
    }

    /// Applies a textual status. Unknown statuses are rejected and leave the
    /// order untouched.
    pub fn transition(&mut self, requested: &str) -> Result<(), OrderError> {
        let status: OrderStatus = requested.parse()?;
        self.set_status(status);
        Ok(())
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        tracing::debug!(id = self.id, from = %self.status, to = %status, "Order status changed");
        self.status = status;
        self.recompute();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseOrderStatusError;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn new_order(buying_price: Decimal, product_price: Decimal) -> NewOrder {
        NewOrder {
            customer_name: "Rahim".to_string(),
            phone_number: "01700000000".to_string(),
            address: "House 4, Road 7".to_string(),
            product_name: "Kettle".to_string(),
            buying_price,
            product_price,
        }
    }

    #[test]
    fn test_new_order_is_pending_with_total() {
        let order = Order::new(1, new_order(dec!(300), dec!(500)), DeliveryZone::Local);

        assert_eq!(order.id, 1);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.delivery_fee, dec!(60));
        assert_eq!(order.total_price, dec!(560));
        assert!(order.is_consistent());
    }

    #[test]
    fn test_remote_zone_total() {
        let order = Order::new(2, new_order(dec!(700), dec!(1000)), DeliveryZone::Remote);
        assert_eq!(order.delivery_fee, dec!(100));
        assert_eq!(order.total_price, dec!(1100));
    }

    #[test]
    fn test_recompute_heals_stale_total() {
        let mut order = Order::new(1, new_order(dec!(10), dec!(20.50)), DeliveryZone::Local);
        order.total_price = dec!(0);
        assert!(!order.is_consistent());

        order.recompute();
        assert_eq!(order.total_price, dec!(80.50));

        order.recompute();
        assert_eq!(order.total_price, dec!(80.50));
    }

    #[test]
    fn test_transition_accepts_every_status() {
        let mut order = Order::new(1, new_order(dec!(300), dec!(500)), DeliveryZone::Local);

        for status in OrderStatus::ALL {
            order.transition(status.as_str()).unwrap();
            assert_eq!(order.status, status);
            assert_eq!(order.total_price, dec!(560));
        }

        order.transition("Delivered").unwrap();
        order.transition("Delivered").unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);
    }

    #[test]
    fn test_transition_rejects_unknown_status() {
        let mut order = Order::new(1, new_order(dec!(300), dec!(500)), DeliveryZone::Local);
        order.transition("In Progress").unwrap();
        let before = order.clone();

        let err = order.transition("Lost").unwrap_err();

        assert_eq!(
            err,
            OrderError::InvalidStatus(ParseOrderStatusError::InvalidStatus("Lost".to_string()))
        );
        assert_eq!(order, before);
    }

    #[test]
    fn test_margin() {
        let order = Order::new(1, new_order(dec!(300), dec!(500)), DeliveryZone::Local);
        assert_eq!(order.margin(), dec!(200));
    }

    #[test]
    fn test_amount_range() {
        assert_eq!(MAX_AMOUNT, Decimal::new(1_000_000_000_000, 0));
        assert!(is_amount_in_range(MAX_AMOUNT));
        assert!(is_amount_in_range(-MAX_AMOUNT));
        assert!(is_amount_in_range(Decimal::ZERO));
        assert!(!is_amount_in_range(MAX_AMOUNT + dec!(0.01)));
        assert!(!is_amount_in_range(Decimal::MAX));
    }

    #[test]
    fn test_total_at_amount_bound() {
        let order = Order::new(1, new_order(MAX_AMOUNT, MAX_AMOUNT), DeliveryZone::Remote);
        assert_eq!(order.total_price, Decimal::new(1_000_000_000_100, 0));
        assert_eq!(order.margin(), Decimal::ZERO);
    }

    proptest! {
        #[test]
        fn prop_total_price_tracks_inputs(
            product_cents in 0i64..10_000_000,
            buying_cents in 0i64..10_000_000,
            remote in any::<bool>(),
            status_index in 0usize..4,
        ) {
            let zone = if remote { DeliveryZone::Remote } else { DeliveryZone::Local };
            let mut order = Order::new(
                1,
                new_order(Decimal::new(buying_cents, 2), Decimal::new(product_cents, 2)),
                zone,
            );
            prop_assert!(order.is_consistent());

            order.set_status(OrderStatus::ALL[status_index]);
            prop_assert_eq!(order.total_price, order.product_price + order.delivery_fee);
        }
    }
}
