use crate::status::ParseOrderStatusError;

/// Rejections of order mutations. The targeted order is never modified
/// when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error(transparent)]
    InvalidStatus(#[from] ParseOrderStatusError),
    #[error("Order ID {id} not found")]
    NotFound { id: u32 },
}
