use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One tracked line of a portfolio.
///
/// `current_value` is the monetary value of the position. It is either typed
/// in by the owner or derived as `price * quantity` by a price refresh when
/// `quantity` is present. Without a quantity, `current_value` is the only
/// source of truth and a refresh never overwrites it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Unique identifier within the owner's portfolio
    pub id: Uuid,

    /// Ticker symbol, uppercased (e.g., "PETR4", "IVVB11", "AAPL")
    pub asset_name: String,

    /// Free-text class label used as grouping key. `None` or blank means unclassified.
    #[serde(default)]
    pub asset_class: Option<String>,

    /// Desired share (0–100) of the total portfolio value for this asset.
    pub target_percent: Decimal,

    /// Units held, when quantity tracking is used for this line.
    #[serde(default)]
    pub quantity: Option<Decimal>,

    /// Monetary value of the position.
    pub current_value: Decimal,

    /// Last unit price applied by a price refresh.
    #[serde(default)]
    pub last_price: Option<Decimal>,

    /// When `last_price` was fetched.
    #[serde(default)]
    pub price_updated_at: Option<DateTime<Utc>>,
}

impl Holding {
    pub fn new(
        asset_name: impl Into<String>,
        target_percent: Decimal,
        current_value: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            asset_name: asset_name.into().trim().to_uppercase(),
            asset_class: None,
            target_percent,
            quantity: None,
            current_value,
            last_price: None,
            price_updated_at: None,
        }
    }

    /// Attach a class label.
    #[must_use]
    pub fn with_class(mut self, asset_class: impl Into<String>) -> Self {
        self.asset_class = Some(asset_class.into());
        self
    }

    /// Track this line by quantity.
    #[must_use]
    pub fn with_quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// The class label with surrounding whitespace removed, or `None` when blank.
    #[must_use]
    pub fn class_label(&self) -> Option<&str> {
        self.asset_class
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Editable fields of a holding, as submitted by an edit form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingUpdate {
    pub asset_name: String,
    #[serde(default)]
    pub asset_class: Option<String>,
    pub target_percent: Decimal,
    #[serde(default)]
    pub quantity: Option<Decimal>,
    pub current_value: Decimal,
}

impl From<&Holding> for HoldingUpdate {
    fn from(h: &Holding) -> Self {
        Self {
            asset_name: h.asset_name.clone(),
            asset_class: h.asset_class.clone(),
            target_percent: h.target_percent,
            quantity: h.quantity,
            current_value: h.current_value,
        }
    }
}

/// Sort order for holding listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldingSortOrder {
    /// Alphabetical by ticker
    AssetNameAsc,
    /// Smallest position first
    CurrentValueAsc,
    /// Largest position first
    CurrentValueDesc,
    /// Smallest target first
    TargetPercentAsc,
    /// Largest target first
    TargetPercentDesc,
}
