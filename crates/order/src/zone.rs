use rust_decimal::Decimal;

/// Delivery tariff zone chosen when an order is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryZone {
    /// Inside the city, menu choice 1
    #[default]
    Local,
    /// Outside the city, menu choice 2
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid delivery zone choice: '{0}'. Expected 1 (local) or 2 (remote)")]
pub struct InvalidZoneChoice(pub String);

impl DeliveryZone {
    const LOCAL_FEE: u32 = 60;
    const REMOTE_FEE: u32 = 100;

    pub fn fee(self) -> Decimal {
        match self {
            Self::Local => Decimal::from(Self::LOCAL_FEE),
            Self::Remote => Decimal::from(Self::REMOTE_FEE),
        }
    }

    /// Parses the raw zone menu answer. Callers that want the tariff
    /// fallback use [`DeliveryZone::from_choice_or_local`].
    pub fn from_choice(raw: &str) -> Result<Self, InvalidZoneChoice> {
        match raw.trim().parse::<i64>() {
            Ok(1) => Ok(Self::Local),
            Ok(2) => Ok(Self::Remote),
            _ => Err(InvalidZoneChoice(raw.to_string())),
        }
    }

    pub fn from_choice_or_local(raw: &str) -> Self {
        Self::from_choice(raw).unwrap_or_else(|err| {
            tracing::warn!("{err}; defaulting to the local tariff");
            Self::Local
        })
    }
}
