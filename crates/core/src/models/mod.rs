pub mod activity;
pub mod allocation;
pub mod asset_class;
pub mod favorite;
pub mod holding;
pub mod portfolio;
pub mod price;
pub mod rebalance;
pub mod settings;
pub mod snapshot;
