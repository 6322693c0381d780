pub mod allocation_service;
pub mod portfolio_service;
pub mod price_service;
pub mod rebalance_service;
pub mod report_service;
pub mod snapshot_service;
