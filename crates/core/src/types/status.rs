//! Status enums for carts and orders.

use serde::{Deserialize, Serialize};

/// Shopping cart status.
///
/// A user has at most one `InProgress` cart at a time; a cart becomes
/// reusable again after purchase because its lines are cleared rather
/// than the row being deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CartStatus {
    #[default]
    InProgress,
    Completed,
}

impl CartStatus {
    /// The database representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for CartStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CartStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("invalid cart status: {s}")),
        }
    }
}

/// Order status.
///
/// Orders are only written at purchase time, so today every persisted
/// order is `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Completed,
}

impl OrderStatus {
    /// The database representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(Self::Completed),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_status_roundtrip() {
        for status in [CartStatus::InProgress, CartStatus::Completed] {
            let parsed: CartStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_cart_status_rejects_unknown() {
        assert!("paused".parse::<CartStatus>().is_err());
    }

    #[test]
    fn test_order_status_roundtrip() {
        let parsed: OrderStatus = OrderStatus::Completed.as_str().parse().unwrap();
        assert_eq!(parsed, OrderStatus::Completed);
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&CartStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }
}
