pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use models::{
    activity::ActivityEntry,
    allocation::{AllocationReport, ClassAllocation},
    asset_class::{AssetClass, ClassTarget},
    favorite::Favorite,
    holding::{Holding, HoldingSortOrder, HoldingUpdate},
    portfolio::Portfolio,
    price::RefreshSummary,
    rebalance::RebalancePlan,
    settings::Settings,
    snapshot::PortfolioSnapshot,
};
use providers::{registry::QuoteProviderRegistry, traits::QuoteProvider};
use rust_decimal::Decimal;
use services::{
    allocation_service::AllocationService, portfolio_service::PortfolioService,
    price_service::PriceService, rebalance_service::RebalanceService,
    report_service::ReportService,
};
use storage::manager::StorageManager;
use uuid::Uuid;

use errors::CoreError;

/// Main entry point for the Portfolio Rebalancer core library.
/// Holds one owner's portfolio state and all services needed to operate on it.
///
/// Every calculation builds a fresh snapshot from the current state, so
/// results always reflect the latest edits and price refreshes.
#[must_use]
pub struct PortfolioTracker {
    portfolio: Portfolio,
    portfolio_service: PortfolioService,
    allocation_service: AllocationService,
    rebalance_service: RebalanceService,
    report_service: ReportService,
    price_service: PriceService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for PortfolioTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioTracker")
            .field("owner", &self.portfolio.owner)
            .field("holdings", &self.portfolio.holdings.len())
            .field("asset_classes", &self.portfolio.asset_classes.len())
            .field("settings", &self.portfolio.settings)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl PortfolioTracker {
    /// Create a brand new empty portfolio for `owner` with default settings.
    pub fn create_new(owner: impl Into<String>) -> Self {
        Self::build(Portfolio::new(owner))
    }

    /// Load an existing portfolio from bytes produced by `save_to_bytes`.
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, CoreError> {
        let portfolio = StorageManager::load_from_bytes(data)?;
        Ok(Self::build(portfolio))
    }

    /// Save the current portfolio to bytes.
    /// Clears the unsaved-changes flag on success.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, CoreError> {
        let bytes = StorageManager::save_to_bytes(&self.portfolio)?;
        self.dirty = false;
        Ok(bytes)
    }

    /// Load from a file on disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str) -> Result<Self, CoreError> {
        let portfolio = StorageManager::load_from_file(path)?;
        Ok(Self::build(portfolio))
    }

    /// Save to a file on disk (native only, not WASM).
    /// Clears the unsaved-changes flag on success.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(&mut self, path: &str) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.portfolio, path)?;
        self.dirty = false;
        Ok(())
    }

    /// Name of the owner this portfolio belongs to.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.portfolio.owner
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// Add a holding. Returns its id.
    pub fn add_holding(&mut self, holding: Holding) -> Result<Uuid, CoreError> {
        let id = self.portfolio_service.add_holding(&mut self.portfolio, holding)?;
        self.dirty = true;
        Ok(id)
    }

    /// Edit an existing holding.
    pub fn update_holding(
        &mut self,
        holding_id: Uuid,
        update: HoldingUpdate,
    ) -> Result<(), CoreError> {
        self.portfolio_service
            .update_holding(&mut self.portfolio, holding_id, update)?;
        self.dirty = true;
        Ok(())
    }

    /// Remove a holding. Returns the removed record.
    pub fn remove_holding(&mut self, holding_id: Uuid) -> Result<Holding, CoreError> {
        let removed = self
            .portfolio_service
            .remove_holding(&mut self.portfolio, holding_id)?;
        self.dirty = true;
        Ok(removed)
    }

    /// Get a single holding by its ID.
    #[must_use]
    pub fn get_holding(&self, holding_id: Uuid) -> Option<&Holding> {
        self.portfolio.holdings.iter().find(|h| h.id == holding_id)
    }

    /// Get all holdings in the requested order.
    #[must_use]
    pub fn get_holdings(&self, order: HoldingSortOrder) -> Vec<&Holding> {
        self.portfolio_service.get_holdings(&self.portfolio, order)
    }

    /// Sum of all per-asset target percents. Not forced to 100.
    #[must_use]
    pub fn target_percent_sum(&self) -> Decimal {
        self.portfolio_service.target_percent_sum(&self.portfolio)
    }

    // ── Asset Classes ───────────────────────────────────────────────

    /// Define a new asset class. Returns its id.
    pub fn add_asset_class(&mut self, class: AssetClass) -> Result<Uuid, CoreError> {
        let id = self
            .portfolio_service
            .add_asset_class(&mut self.portfolio, class)?;
        self.dirty = true;
        Ok(id)
    }

    /// Rename a class and/or change its target.
    pub fn update_asset_class(
        &mut self,
        class_id: Uuid,
        class_name: &str,
        target: ClassTarget,
    ) -> Result<(), CoreError> {
        self.portfolio_service
            .update_asset_class(&mut self.portfolio, class_id, class_name, target)?;
        self.dirty = true;
        Ok(())
    }

    /// Remove a class definition. Returns the removed record.
    pub fn remove_asset_class(&mut self, class_id: Uuid) -> Result<AssetClass, CoreError> {
        let removed = self
            .portfolio_service
            .remove_asset_class(&mut self.portfolio, class_id)?;
        self.dirty = true;
        Ok(removed)
    }

    /// All class definitions, in insertion order.
    #[must_use]
    pub fn get_asset_classes(&self) -> &[AssetClass] {
        &self.portfolio.asset_classes
    }

    // ── Favorites ───────────────────────────────────────────────────

    /// Add a ticker to the watchlist. Returns its id.
    pub fn add_favorite(
        &mut self,
        ticker: &str,
        company_name: Option<String>,
    ) -> Result<Uuid, CoreError> {
        let id = self
            .portfolio_service
            .add_favorite(&mut self.portfolio, Favorite::new(ticker, company_name))?;
        self.dirty = true;
        Ok(id)
    }

    /// Remove a ticker from the watchlist.
    pub fn remove_favorite(&mut self, favorite_id: Uuid) -> Result<Favorite, CoreError> {
        let removed = self
            .portfolio_service
            .remove_favorite(&mut self.portfolio, favorite_id)?;
        self.dirty = true;
        Ok(removed)
    }

    #[must_use]
    pub fn get_favorites(&self) -> &[Favorite] {
        &self.portfolio.favorites
    }

    // ── Activity ────────────────────────────────────────────────────

    /// Activity history, newest first.
    #[must_use]
    pub fn get_activity(&self) -> Vec<&ActivityEntry> {
        self.portfolio_service.get_activity(&self.portfolio)
    }

    // ── Allocation & Rebalancing ────────────────────────────────────

    /// Validated point-in-time view of the current holdings and classes.
    pub fn snapshot(&self) -> Result<PortfolioSnapshot, CoreError> {
        self.portfolio_service.snapshot(&self.portfolio)
    }

    /// Current share of each holding.
    pub fn allocation(&self) -> Result<AllocationReport, CoreError> {
        let snapshot = self.snapshot()?;
        self.allocation_service.calculate_allocation(&snapshot)
    }

    /// Current value and target of each asset class.
    pub fn class_allocation(&self) -> Result<Vec<ClassAllocation>, CoreError> {
        let snapshot = self.snapshot()?;
        self.allocation_service.calculate_class_allocation(&snapshot)
    }

    /// How to spread `extra_contribution` across holdings.
    pub fn plan_rebalance(&self, extra_contribution: Decimal) -> Result<RebalancePlan, CoreError> {
        let snapshot = self.snapshot()?;
        self.rebalance_service
            .plan_rebalance(&snapshot, extra_contribution)
    }

    /// How to spread `extra_contribution` across asset classes.
    pub fn plan_class_rebalance(
        &self,
        extra_contribution: Decimal,
    ) -> Result<RebalancePlan, CoreError> {
        let snapshot = self.snapshot()?;
        self.rebalance_service
            .plan_class_rebalance(&snapshot, extra_contribution)
    }

    /// Distance of each holding from its target today, without new money.
    pub fn suggest_rebalance(&self) -> Result<RebalancePlan, CoreError> {
        let snapshot = self.snapshot()?;
        self.rebalance_service.suggest_rebalance(&snapshot)
    }

    // ── Prices ──────────────────────────────────────────────────────

    /// Add a quote provider. Earlier registrations are tried first.
    pub fn register_quote_provider(&mut self, provider: Box<dyn QuoteProvider>) {
        self.price_service.register(provider);
    }

    /// Names of registered quote providers, in priority order.
    #[must_use]
    pub fn get_provider_names(&self) -> Vec<String> {
        self.price_service.get_provider_names()
    }

    /// Latest price for a ticker, with the configured exchange suffix applied.
    pub async fn quote(&self, ticker: &str) -> Result<Decimal, CoreError> {
        let symbol = self.portfolio.settings.quote_symbol(ticker);
        self.price_service.quote(&symbol).await
    }

    /// Refresh all holdings from the registered quote providers.
    pub async fn refresh_prices(&mut self) -> Result<RefreshSummary, CoreError> {
        let summary = self
            .price_service
            .refresh_prices(&mut self.portfolio)
            .await?;
        self.dirty = true;
        Ok(summary)
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Get current settings.
    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.portfolio.settings
    }

    /// Set the currency values are entered in (e.g., "BRL", "USD").
    /// Currency code must be a 3-letter alphabetic string.
    pub fn set_default_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        let trimmed = currency.trim().to_uppercase();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::ValidationError(format!(
                "Invalid currency code '{currency}': must be exactly 3 ASCII letters"
            )));
        }
        self.portfolio.settings.default_currency = trimmed;
        self.dirty = true;
        Ok(())
    }

    /// Set the group name used for holdings without a class.
    pub fn set_unclassified_label(&mut self, label: &str) -> Result<(), CoreError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(CoreError::ValidationError(
                "Unclassified label must not be blank".into(),
            ));
        }
        self.portfolio.settings.unclassified_label = trimmed.to_string();
        self.dirty = true;
        Ok(())
    }

    /// Set or clear the exchange suffix used for quote lookups (e.g., ".SA").
    pub fn set_ticker_suffix(&mut self, suffix: Option<&str>) {
        self.portfolio.settings.ticker_suffix = suffix
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_uppercase);
        self.dirty = true;
    }

    /// Set the CSV field separator. Quotes, newlines and alphanumerics are rejected.
    pub fn set_csv_delimiter(&mut self, delimiter: char) -> Result<(), CoreError> {
        if matches!(delimiter, '"' | '\n' | '\r') || delimiter.is_alphanumeric() {
            return Err(CoreError::ValidationError(format!(
                "Invalid CSV delimiter {delimiter:?}"
            )));
        }
        self.portfolio.settings.csv_delimiter = delimiter;
        self.dirty = true;
        Ok(())
    }

    /// Returns `true` if the portfolio has been modified since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Render a plan as CSV using the configured delimiter.
    #[must_use]
    pub fn export_plan_to_csv(&self, plan: &RebalancePlan) -> String {
        self.report_service
            .plan_to_csv(plan, self.portfolio.settings.csv_delimiter)
    }

    /// Render the current per-holding allocation as CSV.
    pub fn export_allocation_to_csv(&self) -> Result<String, CoreError> {
        let report = self.allocation()?;
        Ok(self
            .report_service
            .allocation_to_csv(&report, self.portfolio.settings.csv_delimiter))
    }

    /// Render the current per-class allocation as CSV.
    pub fn export_class_allocation_to_csv(&self) -> Result<String, CoreError> {
        let rows = self.class_allocation()?;
        Ok(self
            .report_service
            .class_allocation_to_csv(&rows, self.portfolio.settings.csv_delimiter))
    }

    /// Export all holdings as a JSON string.
    pub fn export_holdings_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.portfolio.holdings).map_err(|e| {
            CoreError::Serialization(format!("Failed to serialize holdings to JSON: {e}"))
        })
    }

    /// Import holdings from a JSON array, in the shape `export_holdings_to_json`
    /// produces (decimal fields as strings, e.g. `"1234.56"`). All-or-nothing.
    /// Returns the number of holdings imported.
    pub fn import_holdings_from_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let holdings: Vec<Holding> = serde_json::from_str(json)?;
        let count = self
            .portfolio_service
            .import_holdings(&mut self.portfolio, holdings)?;
        self.dirty = true;
        Ok(count)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(portfolio: Portfolio) -> Self {
        Self {
            portfolio,
            portfolio_service: PortfolioService::new(),
            allocation_service: AllocationService::new(),
            rebalance_service: RebalanceService::new(),
            report_service: ReportService::new(),
            price_service: PriceService::new(QuoteProviderRegistry::new()),
            dirty: false,
        }
    }
}
