use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current allocation of every holding in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationReport {
    /// Sum of all holdings' current values
    pub total_value: Decimal,

    /// One entry per holding, in snapshot order
    pub holdings: Vec<HoldingAllocation>,
}

/// A holding augmented with its share of the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingAllocation {
    pub id: Uuid,
    pub asset_name: String,

    /// Normalized class key (unclassified holdings carry the sentinel label)
    pub asset_class: String,

    pub target_percent: Decimal,
    pub current_value: Decimal,

    /// current_value / total_value × 100, or 0 when the portfolio is worth nothing
    pub current_pct: Decimal,

    /// current_pct − target_percent (positive = overweight)
    pub drift_pct: Decimal,
}

/// Aggregated value and target of one asset class.
///
/// Produced for every class that is either defined or referenced by a
/// holding; the missing side of that join is filled with zeros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassAllocation {
    pub class_name: String,

    /// `true` when at least one `AssetClass` record carries this name
    pub is_defined: bool,

    /// Number of holdings grouped under this class
    pub holding_count: usize,

    /// Sum of current values of the grouped holdings
    pub total_current_value: Decimal,

    /// Share of the total portfolio value held in this class
    pub current_pct: Decimal,

    /// Sum of the percent-of-portfolio targets defined for this name
    pub percent_target: Decimal,

    /// Sum of the fixed-value targets defined for this name
    pub fixed_target: Decimal,

    /// Effective target as a share of the current total
    pub target_percent: Decimal,

    /// Effective target in money at the current total
    pub target_value: Decimal,
}

impl ClassAllocation {
    /// Target value this class should have when the portfolio is worth `total`.
    ///
    /// `None` when the amount does not fit in a `Decimal`.
    #[must_use]
    pub fn target_value_at(&self, total: Decimal) -> Option<Decimal> {
        (self.percent_target / Decimal::ONE_HUNDRED)
            .checked_mul(total)?
            .checked_add(self.fixed_target)
    }
}
