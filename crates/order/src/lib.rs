//! Delivery order model: the order record, its zone tariff and its status
//! lifecycle.

pub mod error;
pub mod order;
pub mod status;
pub mod zone;

pub use error::OrderError;
pub use order::{MAX_AMOUNT, NewOrder, Order, is_amount_in_range};
pub use status::{OrderStatus, ParseOrderStatusError};
pub use zone::{DeliveryZone, InvalidZoneChoice};

pub use rust_decimal::Decimal;
