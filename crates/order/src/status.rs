/// Delivery status lifecycle enum
///
/// Every status is reachable from every other one (self-transitions
/// included). Parsing is the only gate: a status string that is not one of
/// the four variants below is rejected.
/// - `Pending`: order recorded, nothing dispatched yet
/// - `InProgress`: order handed to a courier
/// - `Delivered`: order received by the customer, counted in the summary
/// - `Cancelled`: order abandoned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    /// Initial status of every newly created order
    #[default]
    Pending,

    /// Order is out for delivery
    InProgress,

    /// Order reached the customer; the only status that counts as revenue
    Delivered,

    /// Order will not be delivered
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Delivered,
        Self::Cancelled,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Maps the numbered status menu (1-4) onto a status.
    pub const fn from_menu_choice(choice: u8) -> Option<Self> {
        match choice {
            1 => Some(Self::Pending),
            2 => Some(Self::InProgress),
            3 => Some(Self::Delivered),
            4 => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub const fn is_delivered(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseOrderStatusError {
    #[error(
        "Invalid order status: '{0}'. Expected one of: Pending, In Progress, Delivered, Cancelled"
    )]
    InvalidStatus(String),
}

impl std::str::FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "In Progress" => Ok(Self::InProgress),
            "Delivered" => Ok(Self::Delivered),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseOrderStatusError::InvalidStatus(s.to_string())),
        }
    }
}
