use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::rebalance::{RebalanceMode, RebalancePlan, RebalanceRow};
use crate::models::snapshot::PortfolioSnapshot;
use crate::services::allocation_service::{overflow, percent_of, share_of, AllocationService};

/// Computes how far each asset or class is from its target, optionally
/// simulating a cash contribution.
///
/// Three flavours:
/// - `plan_rebalance`: per holding, targets measured against the total
///   after `extra_contribution` is added ("where should new money go").
/// - `plan_class_rebalance`: the same per asset class.
/// - `suggest_rebalance`: per holding against today's total ("where do I stand").
///
/// With a zero contribution `plan_rebalance` and `suggest_rebalance` agree.
/// Negative deltas are ordinary results meaning "overweight".
pub struct RebalanceService {
    allocation_service: AllocationService,
}

impl RebalanceService {
    pub fn new() -> Self {
        Self {
            allocation_service: AllocationService::new(),
        }
    }

    /// Per-asset plan for a new contribution.
    pub fn plan_rebalance(
        &self,
        snapshot: &PortfolioSnapshot,
        extra_contribution: Decimal,
    ) -> Result<RebalancePlan, CoreError> {
        Self::validate_contribution(extra_contribution)?;

        let total_current = snapshot.total_value();
        let total_new = Self::total_after(total_current, extra_contribution)?;
        let rows = Self::asset_rows(snapshot, total_new)?;

        log::debug!(
            "Per-asset plan: {} rows, total {} + contribution {} = {}",
            rows.len(),
            total_current,
            extra_contribution,
            total_new
        );

        Ok(RebalancePlan {
            mode: RebalanceMode::PerAsset,
            total_current,
            extra_contribution,
            total_new,
            rows,
        })
    }

    /// Per-class plan for a new contribution.
    ///
    /// Percent targets scale with the post-contribution total; fixed-value
    /// targets stay where they are.
    pub fn plan_class_rebalance(
        &self,
        snapshot: &PortfolioSnapshot,
        extra_contribution: Decimal,
    ) -> Result<RebalancePlan, CoreError> {
        Self::validate_contribution(extra_contribution)?;

        let total_current = snapshot.total_value();
        let total_new = Self::total_after(total_current, extra_contribution)?;

        let classes = self.allocation_service.calculate_class_allocation(snapshot)?;
        let mut rows = Vec::with_capacity(classes.len());
        for class in classes {
            let target_value = class
                .target_value_at(total_new)
                .ok_or_else(|| overflow(format!("Target value of class {}", class.class_name)))?;
            let target_percent = class
                .percent_target
                .checked_add(percent_of(class.fixed_target, total_new)?)
                .ok_or_else(|| overflow(format!("Target percent of class {}", class.class_name)))?;
            rows.push(RebalanceRow {
                delta: target_value - class.total_current_value,
                key: class.class_name,
                current_value: class.total_current_value,
                target_percent,
                target_value,
            });
        }

        log::debug!(
            "Per-class plan: {} classes, total {} + contribution {} = {}",
            rows.len(),
            total_current,
            extra_contribution,
            total_new
        );

        Ok(RebalancePlan {
            mode: RebalanceMode::PerClass,
            total_current,
            extra_contribution,
            total_new,
            rows,
        })
    }

    /// Distance of every holding from its target share of today's total.
    ///
    /// Fails only when a target value is too large for a `Decimal`.
    pub fn suggest_rebalance(
        &self,
        snapshot: &PortfolioSnapshot,
    ) -> Result<RebalancePlan, CoreError> {
        let total_current = snapshot.total_value();

        Ok(RebalancePlan {
            mode: RebalanceMode::Report,
            total_current,
            extra_contribution: Decimal::ZERO,
            total_new: total_current,
            rows: Self::asset_rows(snapshot, total_current)?,
        })
    }

    fn total_after(
        total_current: Decimal,
        extra_contribution: Decimal,
    ) -> Result<Decimal, CoreError> {
        total_current.checked_add(extra_contribution).ok_or_else(|| {
            overflow(format!(
                "Total {total_current} plus contribution {extra_contribution}"
            ))
        })
    }

    fn asset_rows(
        snapshot: &PortfolioSnapshot,
        base_total: Decimal,
    ) -> Result<Vec<RebalanceRow>, CoreError> {
        snapshot
            .holdings()
            .iter()
            .map(|entry| {
                let h = &entry.holding;
                let target_value = share_of(h.target_percent, base_total)?;
                Ok(RebalanceRow {
                    key: h.asset_name.clone(),
                    current_value: h.current_value,
                    target_percent: h.target_percent,
                    target_value,
                    delta: target_value - h.current_value,
                })
            })
            .collect()
    }

    fn validate_contribution(extra_contribution: Decimal) -> Result<(), CoreError> {
        if extra_contribution < Decimal::ZERO {
            return Err(CoreError::validation(format!(
                "Extra contribution must not be negative (got {extra_contribution})"
            )));
        }
        Ok(())
    }
}

impl Default for RebalanceService {
    fn default() -> Self {
        Self::new()
    }
}
