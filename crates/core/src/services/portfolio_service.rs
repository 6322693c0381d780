use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::activity::{ActivityEntry, ActivityKind};
use crate::models::asset_class::{AssetClass, ClassTarget};
use crate::models::favorite::Favorite;
use crate::models::holding::{Holding, HoldingSortOrder, HoldingUpdate};
use crate::models::portfolio::Portfolio;
use crate::models::snapshot::PortfolioSnapshot;
use crate::services::snapshot_service::SnapshotService;

/// Manages holdings, asset classes and favorites of one portfolio, and
/// records every change in the activity log.
///
/// Pure business logic with no I/O. The portfolio is always
/// passed in explicitly.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// Add a holding after validating it.
    pub fn add_holding(
        &self,
        portfolio: &mut Portfolio,
        mut holding: Holding,
    ) -> Result<Uuid, CoreError> {
        Self::normalize_holding(&mut holding);
        Self::validate_holding(&holding)?;
        if portfolio.holdings.iter().any(|h| h.id == holding.id) {
            return Err(CoreError::validation(format!(
                "Holding id {} is already in use",
                holding.id
            )));
        }

        let id = holding.id;
        Self::push_activity(
            portfolio,
            ActivityKind::HoldingAdded,
            format!("Holding {} added", holding.asset_name),
        );
        portfolio.holdings.push(holding);
        Ok(id)
    }

    /// Replace the editable fields of an existing holding. Price metadata is kept.
    pub fn update_holding(
        &self,
        portfolio: &mut Portfolio,
        holding_id: Uuid,
        update: HoldingUpdate,
    ) -> Result<(), CoreError> {
        let idx = Self::holding_index(portfolio, holding_id)?;

        let mut updated = portfolio.holdings[idx].clone();
        updated.asset_name = update.asset_name;
        updated.asset_class = update.asset_class;
        updated.target_percent = update.target_percent;
        updated.quantity = update.quantity;
        updated.current_value = update.current_value;
        Self::normalize_holding(&mut updated);
        Self::validate_holding(&updated)?;

        let details = format!("Holding {} updated", updated.asset_name);
        portfolio.holdings[idx] = updated;
        Self::push_activity(portfolio, ActivityKind::HoldingUpdated, details);
        Ok(())
    }

    /// Remove a holding by id and return it.
    pub fn remove_holding(
        &self,
        portfolio: &mut Portfolio,
        holding_id: Uuid,
    ) -> Result<Holding, CoreError> {
        let idx = Self::holding_index(portfolio, holding_id)?;
        let removed = portfolio.holdings.remove(idx);
        Self::push_activity(
            portfolio,
            ActivityKind::HoldingRemoved,
            format!("Holding {} removed", removed.asset_name),
        );
        Ok(removed)
    }

    /// Add many holdings at once. If any fails validation, none are added.
    pub fn import_holdings(
        &self,
        portfolio: &mut Portfolio,
        holdings: Vec<Holding>,
    ) -> Result<usize, CoreError> {
        let mut staged = Vec::with_capacity(holdings.len());
        for mut holding in holdings {
            Self::normalize_holding(&mut holding);
            Self::validate_holding(&holding)?;
            let clash = portfolio
                .holdings
                .iter()
                .chain(staged.iter())
                .any(|h: &Holding| h.id == holding.id);
            if clash {
                return Err(CoreError::validation(format!(
                    "Holding id {} is already in use",
                    holding.id
                )));
            }
            staged.push(holding);
        }

        let count = staged.len();
        portfolio.holdings.extend(staged);
        Self::push_activity(
            portfolio,
            ActivityKind::HoldingsImported,
            format!("{count} holdings imported"),
        );
        Ok(count)
    }

    /// All holdings in the requested order.
    pub fn get_holdings<'a>(
        &self,
        portfolio: &'a Portfolio,
        order: HoldingSortOrder,
    ) -> Vec<&'a Holding> {
        let mut holdings: Vec<&Holding> = portfolio.holdings.iter().collect();
        match order {
            HoldingSortOrder::AssetNameAsc => {
                holdings.sort_by(|a, b| a.asset_name.cmp(&b.asset_name))
            }
            HoldingSortOrder::CurrentValueAsc => {
                holdings.sort_by(|a, b| a.current_value.cmp(&b.current_value))
            }
            HoldingSortOrder::CurrentValueDesc => {
                holdings.sort_by(|a, b| b.current_value.cmp(&a.current_value))
            }
            HoldingSortOrder::TargetPercentAsc => {
                holdings.sort_by(|a, b| a.target_percent.cmp(&b.target_percent))
            }
            HoldingSortOrder::TargetPercentDesc => {
                holdings.sort_by(|a, b| b.target_percent.cmp(&a.target_percent))
            }
        }
        holdings
    }

    /// Sum of the per-asset targets. Not required to be 100; callers decide
    /// how to present a shortfall or an excess.
    pub fn target_percent_sum(&self, portfolio: &Portfolio) -> Decimal {
        portfolio.holdings.iter().map(|h| h.target_percent).sum()
    }

    // ── Asset classes ───────────────────────────────────────────────

    /// Add a class definition. Names must be unique (case-insensitive)
    /// within the portfolio.
    pub fn add_asset_class(
        &self,
        portfolio: &mut Portfolio,
        mut class: AssetClass,
    ) -> Result<Uuid, CoreError> {
        class.class_name = class.class_name.trim().to_string();
        Self::validate_class(&class)?;
        if Self::class_name_taken(portfolio, &class.class_name, None) {
            return Err(CoreError::DuplicateAssetClass(class.class_name));
        }

        let id = class.id;
        Self::push_activity(
            portfolio,
            ActivityKind::AssetClassAdded,
            format!("Asset class {} added with target {}", class.class_name, class.target),
        );
        portfolio.asset_classes.push(class);
        Ok(id)
    }

    /// Rename a class and/or change its target.
    pub fn update_asset_class(
        &self,
        portfolio: &mut Portfolio,
        class_id: Uuid,
        class_name: &str,
        target: ClassTarget,
    ) -> Result<(), CoreError> {
        let idx = portfolio
            .asset_classes
            .iter()
            .position(|c| c.id == class_id)
            .ok_or_else(|| CoreError::AssetClassNotFound(class_id.to_string()))?;

        let mut updated = portfolio.asset_classes[idx].clone();
        updated.class_name = class_name.trim().to_string();
        updated.target = target;
        Self::validate_class(&updated)?;
        if Self::class_name_taken(portfolio, &updated.class_name, Some(class_id)) {
            return Err(CoreError::DuplicateAssetClass(updated.class_name));
        }

        let details = format!(
            "Asset class {} updated to target {}",
            updated.class_name, updated.target
        );
        portfolio.asset_classes[idx] = updated;
        Self::push_activity(portfolio, ActivityKind::AssetClassUpdated, details);
        Ok(())
    }

    /// Remove a class definition. Holdings keep their label and become an
    /// undefined (zero-target) group.
    pub fn remove_asset_class(
        &self,
        portfolio: &mut Portfolio,
        class_id: Uuid,
    ) -> Result<AssetClass, CoreError> {
        let idx = portfolio
            .asset_classes
            .iter()
            .position(|c| c.id == class_id)
            .ok_or_else(|| CoreError::AssetClassNotFound(class_id.to_string()))?;
        let removed = portfolio.asset_classes.remove(idx);
        Self::push_activity(
            portfolio,
            ActivityKind::AssetClassRemoved,
            format!("Asset class {} removed", removed.class_name),
        );
        Ok(removed)
    }

    // ── Favorites ───────────────────────────────────────────────────

    pub fn add_favorite(
        &self,
        portfolio: &mut Portfolio,
        favorite: Favorite,
    ) -> Result<Uuid, CoreError> {
        if favorite.ticker.is_empty() {
            return Err(CoreError::validation("Favorite ticker must not be empty"));
        }
        if portfolio.favorites.iter().any(|f| f.ticker == favorite.ticker) {
            return Err(CoreError::validation(format!(
                "{} is already a favorite",
                favorite.ticker
            )));
        }

        let id = favorite.id;
        Self::push_activity(
            portfolio,
            ActivityKind::FavoriteAdded,
            format!("Favorite {} added", favorite.ticker),
        );
        portfolio.favorites.push(favorite);
        Ok(id)
    }

    pub fn remove_favorite(
        &self,
        portfolio: &mut Portfolio,
        favorite_id: Uuid,
    ) -> Result<Favorite, CoreError> {
        let idx = portfolio
            .favorites
            .iter()
            .position(|f| f.id == favorite_id)
            .ok_or_else(|| CoreError::FavoriteNotFound(favorite_id.to_string()))?;
        let removed = portfolio.favorites.remove(idx);
        Self::push_activity(
            portfolio,
            ActivityKind::FavoriteRemoved,
            format!("Favorite {} removed", removed.ticker),
        );
        Ok(removed)
    }

    // ── Activity ────────────────────────────────────────────────────

    /// Activity history, newest first.
    pub fn get_activity<'a>(&self, portfolio: &'a Portfolio) -> Vec<&'a ActivityEntry> {
        portfolio.activity.iter().rev().collect()
    }

    /// Append an entry to the activity log.
    pub fn record(
        &self,
        portfolio: &mut Portfolio,
        kind: ActivityKind,
        details: impl Into<String>,
    ) {
        Self::push_activity(portfolio, kind, details.into());
    }

    // ── Snapshot ────────────────────────────────────────────────────

    /// Build a fresh snapshot of the current state, using the portfolio's
    /// unclassified label.
    pub fn snapshot(&self, portfolio: &Portfolio) -> Result<PortfolioSnapshot, CoreError> {
        SnapshotService::with_unclassified_label(portfolio.settings.unclassified_label.clone())
            .build(&portfolio.holdings, &portfolio.asset_classes)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn holding_index(portfolio: &Portfolio, holding_id: Uuid) -> Result<usize, CoreError> {
        portfolio
            .holdings
            .iter()
            .position(|h| h.id == holding_id)
            .ok_or_else(|| CoreError::HoldingNotFound(holding_id.to_string()))
    }

    fn normalize_holding(holding: &mut Holding) {
        holding.asset_name = holding.asset_name.trim().to_uppercase();
        holding.asset_class = holding.class_label().map(str::to_string);
    }

    /// Rules:
    /// - Ticker must not be empty
    /// - Target percent within 0..=100
    /// - Value and quantity must not be negative
    fn validate_holding(holding: &Holding) -> Result<(), CoreError> {
        if holding.asset_name.is_empty() {
            return Err(CoreError::validation("Asset name must not be empty"));
        }
        if holding.target_percent < Decimal::ZERO || holding.target_percent > Decimal::ONE_HUNDRED {
            return Err(CoreError::validation(format!(
                "Target percent for {} must be between 0 and 100 (got {})",
                holding.asset_name, holding.target_percent
            )));
        }
        if holding.current_value < Decimal::ZERO {
            return Err(CoreError::validation(format!(
                "Current value for {} must not be negative (got {})",
                holding.asset_name, holding.current_value
            )));
        }
        if let Some(quantity) = holding.quantity {
            if quantity < Decimal::ZERO {
                return Err(CoreError::validation(format!(
                    "Quantity for {} must not be negative (got {quantity})",
                    holding.asset_name
                )));
            }
        }
        Ok(())
    }

    fn validate_class(class: &AssetClass) -> Result<(), CoreError> {
        if class.class_name.is_empty() {
            return Err(CoreError::validation("Asset class name must not be empty"));
        }
        match class.target {
            ClassTarget::Percent(p) if p < Decimal::ZERO || p > Decimal::ONE_HUNDRED => {
                Err(CoreError::validation(format!(
                    "Target percent for class {} must be between 0 and 100 (got {p})",
                    class.class_name
                )))
            }
            ClassTarget::Value(v) if v < Decimal::ZERO => Err(CoreError::validation(format!(
                "Target value for class {} must not be negative (got {v})",
                class.class_name
            ))),
            _ => Ok(()),
        }
    }

    fn class_name_taken(portfolio: &Portfolio, name: &str, except: Option<Uuid>) -> bool {
        let lower = name.to_lowercase();
        portfolio
            .asset_classes
            .iter()
            .filter(|c| Some(c.id) != except)
            .any(|c| c.class_name.to_lowercase() == lower)
    }

    fn push_activity(portfolio: &mut Portfolio, kind: ActivityKind, details: String) {
        log::debug!("[{}] {kind}: {details}", portfolio.owner);
        portfolio.activity.push(ActivityEntry::new(kind, details));
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
