use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::asset_class::{AssetClass, ClassTarget};
use crate::models::holding::Holding;
use crate::models::settings::DEFAULT_UNCLASSIFIED_LABEL;
use crate::models::snapshot::{PortfolioSnapshot, SnapshotHolding};
use crate::services::allocation_service::overflow;

/// Turns raw holding and class records into a validated `PortfolioSnapshot`.
///
/// Pure transform. Values are taken as given: if a caller derives
/// `current_value` from price × quantity it must do so before building.
pub struct SnapshotService {
    unclassified_label: String,
}

impl SnapshotService {
    pub fn new() -> Self {
        Self {
            unclassified_label: DEFAULT_UNCLASSIFIED_LABEL.to_string(),
        }
    }

    /// Use a custom group key for holdings without a class.
    pub fn with_unclassified_label(label: impl Into<String>) -> Self {
        Self {
            unclassified_label: label.into(),
        }
    }

    /// Validate every record and produce a snapshot.
    ///
    /// Fails on the first invalid record; nothing is returned in that case.
    /// Also fails when the portfolio total, or the sum of all class targets
    /// of one kind, is too large for a `Decimal`.
    pub fn build(
        &self,
        holdings: &[Holding],
        classes: &[AssetClass],
    ) -> Result<PortfolioSnapshot, CoreError> {
        let label = self.unclassified_label.trim();
        if label.is_empty() {
            return Err(CoreError::validation("Unclassified label must not be blank"));
        }

        let mut entries = Vec::with_capacity(holdings.len());
        let mut total_value = Decimal::ZERO;
        for holding in holdings {
            Self::validate_holding(holding)?;
            total_value = total_value
                .checked_add(holding.current_value)
                .ok_or_else(|| overflow("Portfolio total value"))?;

            let mut normalized = holding.clone();
            normalized.asset_name = holding.asset_name.trim().to_uppercase();
            let class_key = holding.class_label().unwrap_or(label).to_string();

            entries.push(SnapshotHolding {
                holding: normalized,
                class_key,
            });
        }

        // Bounding the sum over all classes bounds every per-name sum too.
        let mut defined = Vec::with_capacity(classes.len());
        let mut percent_sum = Decimal::ZERO;
        let mut value_sum = Decimal::ZERO;
        for class in classes {
            Self::validate_class(class)?;
            match class.target {
                ClassTarget::Percent(p) => {
                    percent_sum = percent_sum
                        .checked_add(p)
                        .ok_or_else(|| overflow("Sum of class target percents"))?;
                }
                ClassTarget::Value(v) => {
                    value_sum = value_sum
                        .checked_add(v)
                        .ok_or_else(|| overflow("Sum of class target values"))?;
                }
            }

            let mut normalized = class.clone();
            normalized.class_name = class.class_name.trim().to_string();
            defined.push(normalized);
        }

        log::debug!(
            "Built snapshot with {} holdings and {} class definitions, total value {}",
            entries.len(),
            defined.len(),
            total_value
        );

        Ok(PortfolioSnapshot {
            holdings: entries,
            classes: defined,
            unclassified_label: label.to_string(),
            total_value,
        })
    }

    fn validate_holding(holding: &Holding) -> Result<(), CoreError> {
        let name = holding.asset_name.trim();
        if name.is_empty() {
            return Err(CoreError::validation(format!(
                "Holding {} has an empty asset name",
                holding.id
            )));
        }
        if holding.current_value < Decimal::ZERO {
            return Err(CoreError::validation(format!(
                "Holding {name} has negative current value {}",
                holding.current_value
            )));
        }
        if holding.target_percent < Decimal::ZERO {
            return Err(CoreError::validation(format!(
                "Holding {name} has negative target percent {}",
                holding.target_percent
            )));
        }
        if let Some(quantity) = holding.quantity {
            if quantity < Decimal::ZERO {
                return Err(CoreError::validation(format!(
                    "Holding {name} has negative quantity {quantity}"
                )));
            }
        }
        Ok(())
    }

    fn validate_class(class: &AssetClass) -> Result<(), CoreError> {
        let name = class.class_name.trim();
        if name.is_empty() {
            return Err(CoreError::validation(format!(
                "Asset class {} has an empty name",
                class.id
            )));
        }
        let amount = class.target.amount();
        if amount < Decimal::ZERO {
            let what = match class.target {
                ClassTarget::Percent(_) => "target percent",
                ClassTarget::Value(_) => "target value",
            };
            return Err(CoreError::validation(format!(
                "Asset class {name} has negative {what} {amount}"
            )));
        }
        Ok(())
    }
}

impl Default for SnapshotService {
    fn default() -> Self {
        Self::new()
    }
}
