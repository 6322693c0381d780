use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::activity::{ActivityEntry, ActivityKind};
use crate::models::portfolio::Portfolio;
use crate::models::price::{RefreshFailure, RefreshSummary};
use crate::providers::registry::QuoteProviderRegistry;
use crate::providers::traits::QuoteProvider;

/// Refreshes holding values from registered quote providers.
///
/// Refresh policy:
/// - Holdings with a quantity get `current_value = price × quantity`.
/// - Holdings without a quantity only get `last_price` recorded; their
///   `current_value` stays as entered.
/// - A ticker no provider can price keeps its previous values and is
///   listed in `RefreshSummary::failed`. One failure never aborts the rest.
pub struct PriceService {
    registry: QuoteProviderRegistry,
}

impl PriceService {
    pub fn new(registry: QuoteProviderRegistry) -> Self {
        Self { registry }
    }

    /// Add a provider after the existing ones.
    pub fn register(&mut self, provider: Box<dyn QuoteProvider>) {
        self.registry.register(provider);
    }

    /// Whether any provider is registered.
    pub fn has_providers(&self) -> bool {
        !self.registry.is_empty()
    }

    /// Names of all registered providers, in priority order.
    pub fn get_provider_names(&self) -> Vec<String> {
        self.registry.provider_names()
    }

    /// Latest price for a single symbol, with provider fallback.
    pub async fn quote(&self, symbol: &str) -> Result<Decimal, CoreError> {
        let providers = self.registry.providers();
        if providers.is_empty() {
            return Err(CoreError::NoProvider(symbol.to_string()));
        }

        let mut last_error = None;
        for provider in &providers {
            match provider.get_latest_price(symbol).await {
                Ok(price) if price < Decimal::ZERO => {
                    last_error = Some(CoreError::Api {
                        provider: provider.name().to_string(),
                        message: format!("Negative price returned for {symbol}: {price}"),
                    });
                }
                Ok(price) => return Ok(price),
                Err(e) => {
                    log::warn!("Quote provider {} failed for {symbol}: {e}", provider.name());
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| CoreError::PriceNotAvailable {
            symbol: symbol.to_string(),
        }))
    }

    /// Refresh every holding in the portfolio. Each distinct ticker is quoted once.
    ///
    /// A holding whose price × quantity does not fit in a `Decimal` is
    /// reported as failed and left untouched.
    pub async fn refresh_prices(
        &self,
        portfolio: &mut Portfolio,
    ) -> Result<RefreshSummary, CoreError> {
        if self.registry.is_empty() {
            return Err(CoreError::NoProvider("portfolio refresh".to_string()));
        }

        let mut quotes: HashMap<String, Result<Decimal, String>> = HashMap::new();
        for holding in &portfolio.holdings {
            let symbol = portfolio.settings.quote_symbol(&holding.asset_name);
            if quotes.contains_key(&symbol) {
                continue;
            }
            let result = self.quote(&symbol).await.map_err(|e| e.to_string());
            quotes.insert(symbol, result);
        }

        let fetched_at = Utc::now();
        let mut summary = RefreshSummary::default();

        for holding in &mut portfolio.holdings {
            let symbol = portfolio.settings.quote_symbol(&holding.asset_name);
            match quotes.get(&symbol) {
                Some(Ok(price)) => match holding.quantity {
                    Some(quantity) => match price.checked_mul(quantity) {
                        Some(value) => {
                            holding.last_price = Some(*price);
                            holding.price_updated_at = Some(fetched_at);
                            holding.current_value = value;
                            summary.updated += 1;
                        }
                        None => {
                            log::warn!(
                                "Value of {} at {price} × {quantity} overflows",
                                holding.asset_name
                            );
                            summary.failed.push(RefreshFailure {
                                asset_name: holding.asset_name.clone(),
                                reason: format!(
                                    "Value {price} × {quantity} is too large to represent"
                                ),
                            });
                        }
                    },
                    None => {
                        holding.last_price = Some(*price);
                        holding.price_updated_at = Some(fetched_at);
                        summary.priced_only += 1;
                    }
                },
                Some(Err(reason)) => summary.failed.push(RefreshFailure {
                    asset_name: holding.asset_name.clone(),
                    reason: reason.clone(),
                }),
                None => summary.failed.push(RefreshFailure {
                    asset_name: holding.asset_name.clone(),
                    reason: format!("No quote requested for {symbol}"),
                }),
            }
        }

        log::info!(
            "Price refresh for {}: {} updated, {} priced only, {} failed",
            portfolio.owner,
            summary.updated,
            summary.priced_only,
            summary.failed.len()
        );

        portfolio.activity.push(ActivityEntry::new(
            ActivityKind::PricesRefreshed,
            format!(
                "{} holdings revalued, {} failed",
                summary.updated,
                summary.failed.len()
            ),
        ));

        Ok(summary)
    }
}
