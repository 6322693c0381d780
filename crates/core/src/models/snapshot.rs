use rust_decimal::Decimal;

use super::asset_class::AssetClass;
use super::holding::Holding;

/// A validated holding paired with the group it aggregates under.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotHolding {
    pub holding: Holding,
    /// Trimmed class label, or the unclassified sentinel.
    pub class_key: String,
}

/// Immutable, point-in-time view of one owner's holdings and class targets.
///
/// Only `SnapshotService::build` creates one, so every value inside has
/// already passed validation. Never cached: build a new one per calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSnapshot {
    pub(crate) holdings: Vec<SnapshotHolding>,
    pub(crate) classes: Vec<AssetClass>,
    pub(crate) unclassified_label: String,
    pub(crate) total_value: Decimal,
}

impl PortfolioSnapshot {
    /// Holdings in the order they were supplied.
    #[must_use]
    pub fn holdings(&self) -> &[SnapshotHolding] {
        &self.holdings
    }

    /// Class definitions in the order they were supplied.
    #[must_use]
    pub fn classes(&self) -> &[AssetClass] {
        &self.classes
    }

    /// Group key used for holdings without a class.
    #[must_use]
    pub fn unclassified_label(&self) -> &str {
        &self.unclassified_label
    }

    /// Sum of `current_value` over all holdings.
    #[must_use]
    pub fn total_value(&self) -> Decimal {
        self.total_value
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.holdings.len()
    }
}
