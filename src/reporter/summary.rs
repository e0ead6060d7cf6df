use delivery_order::Order;
use rust_decimal::Decimal;

/// Realized financials of the day. Only Delivered orders contribute;
/// pending, in-progress and cancelled orders are unrealized revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total_sell: Decimal,
    pub total_delivery_fee: Decimal,
    pub total_profit: Decimal,
}

impl Summary {
    pub fn from_orders(orders: &[Order]) -> Self {
        orders
            .iter()
            .filter(|order| order.status.is_delivered())
            .fold(Self::default(), |acc, order| Self {
                total_sell: acc.total_sell + order.product_price,
                total_delivery_fee: acc.total_delivery_fee + order.delivery_fee,
                total_profit: acc.total_profit + order.margin(),
            })
    }

    /// Label/value pairs in report order.
    pub fn rows(&self) -> [(&'static str, Decimal); 3] {
        [
            ("Total Sell", self.total_sell),
            ("Total Delivery Fee", self.total_delivery_fee),
            ("Total Profit", self.total_profit),
        ]
    }
}
