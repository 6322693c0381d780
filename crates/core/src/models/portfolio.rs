use serde::{Deserialize, Serialize};

use super::activity::ActivityEntry;
use super::asset_class::AssetClass;
use super::favorite::Favorite;
use super::holding::Holding;
use super::settings::Settings;

/// Everything one owner has stored. This is what gets serialized and
/// saved to the portable .prbl file.
///
/// Passed explicitly (`&Portfolio` / `&mut Portfolio`) to every service call;
/// there is no global handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Name of the owner all records belong to
    pub owner: String,

    /// Portfolio lines, in insertion order
    pub holdings: Vec<Holding>,

    /// Class definitions, in insertion order
    pub asset_classes: Vec<AssetClass>,

    /// Watchlist
    #[serde(default)]
    pub favorites: Vec<Favorite>,

    /// Activity history, oldest first
    #[serde(default)]
    pub activity: Vec<ActivityEntry>,

    pub settings: Settings,
}

impl Portfolio {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            holdings: Vec::new(),
            asset_classes: Vec::new(),
            favorites: Vec::new(),
            activity: Vec::new(),
            settings: Settings::default(),
        }
    }
}
