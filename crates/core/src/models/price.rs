use serde::{Deserialize, Serialize};

/// Outcome of refreshing prices for a whole portfolio.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshSummary {
    /// Holdings whose `current_value` was recomputed from price × quantity
    pub updated: usize,

    /// Holdings without quantity: price recorded, value left as entered
    pub priced_only: usize,

    /// Holdings no provider could price
    pub failed: Vec<RefreshFailure>,
}

impl RefreshSummary {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A holding that kept its old value because no quote was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshFailure {
    pub asset_name: String,
    pub reason: String,
}
