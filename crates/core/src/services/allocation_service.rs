use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::allocation::{AllocationReport, ClassAllocation, HoldingAllocation};
use crate::models::asset_class::ClassTarget;
use crate::models::snapshot::PortfolioSnapshot;

/// `part` as a percentage of `total`. Zero when `total` is not positive.
///
/// Divides first, so a `part` no larger than `total` can never overflow.
pub(crate) fn percent_of(part: Decimal, total: Decimal) -> Result<Decimal, CoreError> {
    if total <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    part.checked_div(total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| overflow(format!("{part} as a percentage of {total}")))
}

/// Monetary share `percent` of `total`.
pub(crate) fn share_of(percent: Decimal, total: Decimal) -> Result<Decimal, CoreError> {
    (percent / Decimal::ONE_HUNDRED)
        .checked_mul(total)
        .ok_or_else(|| overflow(format!("{percent}% of {total}")))
}

/// Error for a result outside the range `Decimal` can represent.
pub(crate) fn overflow(what: impl std::fmt::Display) -> CoreError {
    CoreError::validation(format!("{what} is too large to represent"))
}

/// Computes what share of the portfolio each holding and each class holds.
///
/// An empty or zero-valued portfolio yields zero percentages. The only
/// error is a derived amount too large for `Decimal`.
pub struct AllocationService;

impl AllocationService {
    pub fn new() -> Self {
        Self
    }

    /// Per-holding allocation, in snapshot order.
    pub fn calculate_allocation(
        &self,
        snapshot: &PortfolioSnapshot,
    ) -> Result<AllocationReport, CoreError> {
        let total_value = snapshot.total_value();

        let mut holdings = Vec::with_capacity(snapshot.len());
        for entry in snapshot.holdings() {
            let h = &entry.holding;
            let current_pct = percent_of(h.current_value, total_value)?;
            holdings.push(HoldingAllocation {
                id: h.id,
                asset_name: h.asset_name.clone(),
                asset_class: entry.class_key.clone(),
                target_percent: h.target_percent,
                current_value: h.current_value,
                current_pct,
                drift_pct: current_pct - h.target_percent,
            });
        }

        log::debug!(
            "Allocation computed for {} holdings, total value {}",
            holdings.len(),
            total_value
        );

        Ok(AllocationReport {
            total_value,
            holdings,
        })
    }

    /// Per-class allocation: full outer join of observed and defined classes.
    ///
    /// Defined classes come first in definition order, followed by classes
    /// only seen on holdings in order of first appearance. Definitions that
    /// share a name are merged into one row and their targets add up.
    pub fn calculate_class_allocation(
        &self,
        snapshot: &PortfolioSnapshot,
    ) -> Result<Vec<ClassAllocation>, CoreError> {
        let total_value = snapshot.total_value();

        let mut rows: Vec<ClassAllocation> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        // Target sums were bounded when the snapshot was built.
        for class in snapshot.classes() {
            let pos = *index.entry(class.class_name.clone()).or_insert_with(|| {
                rows.push(Self::empty_row(&class.class_name, true));
                rows.len() - 1
            });
            let row = &mut rows[pos];
            match class.target {
                ClassTarget::Percent(p) => row.percent_target += p,
                ClassTarget::Value(v) => row.fixed_target += v,
            }
        }

        for entry in snapshot.holdings() {
            let pos = *index.entry(entry.class_key.clone()).or_insert_with(|| {
                rows.push(Self::empty_row(&entry.class_key, false));
                rows.len() - 1
            });
            let row = &mut rows[pos];
            row.holding_count += 1;
            row.total_current_value += entry.holding.current_value;
        }

        for row in &mut rows {
            row.current_pct = percent_of(row.total_current_value, total_value)?;
            row.target_value = row
                .target_value_at(total_value)
                .ok_or_else(|| overflow(format!("Target value of class {}", row.class_name)))?;
            // Fixed targets have no meaningful share of an empty portfolio.
            row.target_percent = row
                .percent_target
                .checked_add(percent_of(row.fixed_target, total_value)?)
                .ok_or_else(|| overflow(format!("Target percent of class {}", row.class_name)))?;
        }

        log::debug!(
            "Class allocation computed: {} classes over total value {}",
            rows.len(),
            total_value
        );

        Ok(rows)
    }

    fn empty_row(class_name: &str, is_defined: bool) -> ClassAllocation {
        ClassAllocation {
            class_name: class_name.to_string(),
            is_defined,
            holding_count: 0,
            total_current_value: Decimal::ZERO,
            current_pct: Decimal::ZERO,
            percent_target: Decimal::ZERO,
            fixed_target: Decimal::ZERO,
            target_percent: Decimal::ZERO,
            target_value: Decimal::ZERO,
        }
    }
}

impl Default for AllocationService {
    fn default() -> Self {
        Self::new()
    }
}
