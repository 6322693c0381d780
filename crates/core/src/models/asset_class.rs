use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How an asset class expresses its goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassTarget {
    /// Share (0–100) of the total portfolio value.
    Percent(Decimal),
    /// Fixed monetary amount, independent of the portfolio total.
    Value(Decimal),
}

impl ClassTarget {
    /// The raw number carried by either variant.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        match self {
            ClassTarget::Percent(p) => *p,
            ClassTarget::Value(v) => *v,
        }
    }
}

impl std::fmt::Display for ClassTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassTarget::Percent(p) => write!(f, "{p}%"),
            ClassTarget::Value(v) => write!(f, "{v}"),
        }
    }
}

/// A user-defined grouping of holdings (e.g., "Equities", "Fixed Income").
///
/// Holdings reference a class by name only. A class with no holdings and a
/// holding whose class has no definition are both legal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetClass {
    pub id: Uuid,
    pub class_name: String,
    pub target: ClassTarget,
}

impl AssetClass {
    pub fn new(class_name: impl Into<String>, target: ClassTarget) -> Self {
        Self {
            id: Uuid::new_v4(),
            class_name: class_name.into().trim().to_string(),
            target,
        }
    }

    /// Class whose target is a share of the whole portfolio.
    pub fn percent(class_name: impl Into<String>, target_percent: Decimal) -> Self {
        Self::new(class_name, ClassTarget::Percent(target_percent))
    }

    /// Class whose target is a fixed amount of money.
    pub fn fixed_value(class_name: impl Into<String>, target_value: Decimal) -> Self {
        Self::new(class_name, ClassTarget::Value(target_value))
    }
}
