use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which planner produced a `RebalancePlan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RebalanceMode {
    /// One row per holding, targets taken from the post-contribution total
    PerAsset,
    /// One row per asset class, targets taken from the post-contribution total
    PerClass,
    /// One row per holding against today's total, no new money
    Report,
}

impl std::fmt::Display for RebalanceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RebalanceMode::PerAsset => write!(f, "PerAsset"),
            RebalanceMode::PerClass => write!(f, "PerClass"),
            RebalanceMode::Report => write!(f, "Report"),
        }
    }
}

/// Suggested move for one asset or class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalanceRow {
    /// Asset name or class name, depending on the mode
    pub key: String,
    pub current_value: Decimal,
    pub target_percent: Decimal,
    pub target_value: Decimal,
    /// target_value − current_value. Positive: contribute. Negative: overweight.
    pub delta: Decimal,
}

impl RebalanceRow {
    #[must_use]
    pub fn is_contribution(&self) -> bool {
        self.delta > Decimal::ZERO
    }

    #[must_use]
    pub fn is_withdrawal(&self) -> bool {
        self.delta < Decimal::ZERO
    }
}

/// Output of the rebalance planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalancePlan {
    pub mode: RebalanceMode,

    /// Portfolio value before the contribution
    pub total_current: Decimal,

    /// New cash being simulated (always zero for `Report`)
    pub extra_contribution: Decimal,

    /// total_current + extra_contribution
    pub total_new: Decimal,

    pub rows: Vec<RebalanceRow>,
}

impl RebalancePlan {
    /// Find the row for an asset or class name.
    #[must_use]
    pub fn row(&self, key: &str) -> Option<&RebalanceRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    /// Sum of every row's delta, or `None` if it does not fit in a `Decimal`.
    #[must_use]
    pub fn total_delta(&self) -> Option<Decimal> {
        self.rows
            .iter()
            .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r.delta))
    }

    /// Rows that call for new money, largest first.
    #[must_use]
    pub fn contributions(&self) -> Vec<&RebalanceRow> {
        let mut rows: Vec<&RebalanceRow> =
            self.rows.iter().filter(|r| r.is_contribution()).collect();
        rows.sort_by(|a, b| b.delta.cmp(&a.delta));
        rows
    }

    /// Overweight rows, most overweight first.
    #[must_use]
    pub fn withdrawals(&self) -> Vec<&RebalanceRow> {
        let mut rows: Vec<&RebalanceRow> =
            self.rows.iter().filter(|r| r.is_withdrawal()).collect();
        rows.sort_by(|a, b| a.delta.cmp(&b.delta));
        rows
    }
}
