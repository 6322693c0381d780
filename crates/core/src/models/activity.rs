use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of change an activity entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    HoldingAdded,
    HoldingUpdated,
    HoldingRemoved,
    HoldingsImported,
    AssetClassAdded,
    AssetClassUpdated,
    AssetClassRemoved,
    FavoriteAdded,
    FavoriteRemoved,
    PricesRefreshed,
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ActivityKind::HoldingAdded => "Holding added",
            ActivityKind::HoldingUpdated => "Holding updated",
            ActivityKind::HoldingRemoved => "Holding removed",
            ActivityKind::HoldingsImported => "Holdings imported",
            ActivityKind::AssetClassAdded => "Asset class added",
            ActivityKind::AssetClassUpdated => "Asset class updated",
            ActivityKind::AssetClassRemoved => "Asset class removed",
            ActivityKind::FavoriteAdded => "Favorite added",
            ActivityKind::FavoriteRemoved => "Favorite removed",
            ActivityKind::PricesRefreshed => "Prices refreshed",
        };
        f.write_str(label)
    }
}

/// One line of the owner's activity history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Utc>,
    pub kind: ActivityKind,
    pub details: String,
}

impl ActivityEntry {
    pub fn new(kind: ActivityKind, details: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            details: details.into(),
        }
    }
}
