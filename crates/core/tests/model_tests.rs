use portfolio_rebalancer_core::models::activity::{ActivityEntry, ActivityKind};
use portfolio_rebalancer_core::models::asset_class::{AssetClass, ClassTarget};
use portfolio_rebalancer_core::models::favorite::Favorite;
use portfolio_rebalancer_core::models::holding::{Holding, HoldingUpdate};
use portfolio_rebalancer_core::models::portfolio::Portfolio;
use portfolio_rebalancer_core::models::price::{RefreshFailure, RefreshSummary};
use portfolio_rebalancer_core::models::rebalance::{RebalanceMode, RebalancePlan, RebalanceRow};
use portfolio_rebalancer_core::models::settings::{Settings, DEFAULT_UNCLASSIFIED_LABEL};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn row(key: &str, current: Decimal, target: Decimal) -> RebalanceRow {
    RebalanceRow {
        key: key.into(),
        current_value: current,
        target_percent: Decimal::ZERO,
        target_value: target,
        delta: target - current,
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Holding
// ═══════════════════════════════════════════════════════════════════

mod holding {
    use super::*;

    #[test]
    fn new_uppercases_and_trims_ticker() {
        let h = Holding::new("  petr4 ", dec!(10), dec!(1500));
        assert_eq!(h.asset_name, "PETR4");
        assert_eq!(h.target_percent, dec!(10));
        assert_eq!(h.current_value, dec!(1500));
        assert!(h.asset_class.is_none());
        assert!(h.quantity.is_none());
        assert!(h.last_price.is_none());
        assert!(h.price_updated_at.is_none());
    }

    #[test]
    fn new_generates_unique_ids() {
        let a = Holding::new("A", dec!(1), dec!(1));
        let b = Holding::new("A", dec!(1), dec!(1));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn builders_set_class_and_quantity() {
        let h = Holding::new("IVVB11", dec!(20), dec!(3000))
            .with_class("Equities")
            .with_quantity(dec!(10));
        assert_eq!(h.asset_class.as_deref(), Some("Equities"));
        assert_eq!(h.quantity, Some(dec!(10)));
    }

    #[test]
    fn class_label_trims() {
        let h = Holding::new("A", dec!(1), dec!(1)).with_class("  Fixed Income ");
        assert_eq!(h.class_label(), Some("Fixed Income"));
    }

    #[test]
    fn class_label_blank_is_none() {
        let h = Holding::new("A", dec!(1), dec!(1)).with_class("   ");
        assert_eq!(h.class_label(), None);

        let h = Holding::new("A", dec!(1), dec!(1));
        assert_eq!(h.class_label(), None);
    }

    #[test]
    fn update_from_holding_copies_editable_fields() {
        let h = Holding::new("BOVA11", dec!(25), dec!(2500))
            .with_class("Equities")
            .with_quantity(dec!(20));
        let update = HoldingUpdate::from(&h);
        assert_eq!(update.asset_name, "BOVA11");
        assert_eq!(update.asset_class.as_deref(), Some("Equities"));
        assert_eq!(update.target_percent, dec!(25));
        assert_eq!(update.quantity, Some(dec!(20)));
        assert_eq!(update.current_value, dec!(2500));
    }

    #[test]
    fn json_keeps_decimal_precision() {
        let h = Holding::new("XPML11", dec!(12.5), dec!(1234.5678));
        let json = serde_json::to_string(&h).unwrap();
        let back: Holding = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);
        assert_eq!(back.current_value, dec!(1234.5678));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  AssetClass
// ═══════════════════════════════════════════════════════════════════

mod asset_class {
    use super::*;

    #[test]
    fn percent_constructor() {
        let c = AssetClass::percent(" Equities ", dec!(60));
        assert_eq!(c.class_name, "Equities");
        assert_eq!(c.target, ClassTarget::Percent(dec!(60)));
    }

    #[test]
    fn fixed_value_constructor() {
        let c = AssetClass::fixed_value("Reserve", dec!(10000));
        assert_eq!(c.target, ClassTarget::Value(dec!(10000)));
        assert_eq!(c.target.amount(), dec!(10000));
    }

    #[test]
    fn target_display() {
        assert_eq!(ClassTarget::Percent(dec!(12.5)).to_string(), "12.5%");
        assert_eq!(ClassTarget::Value(dec!(500)).to_string(), "500");
    }

    #[test]
    fn class_name_keeps_case() {
        let c = AssetClass::percent("fixed income", dec!(30));
        assert_eq!(c.class_name, "fixed income");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Favorite / Activity
// ═══════════════════════════════════════════════════════════════════

mod favorite_and_activity {
    use super::*;

    #[test]
    fn favorite_uppercases_ticker() {
        let f = Favorite::new(" itub4 ", Some("Itaú Unibanco".into()));
        assert_eq!(f.ticker, "ITUB4");
        assert_eq!(f.company_name.as_deref(), Some("Itaú Unibanco"));
    }

    #[test]
    fn activity_entry_is_timestamped_now() {
        let before = chrono::Utc::now();
        let e = ActivityEntry::new(ActivityKind::HoldingAdded, "Holding A added");
        let after = chrono::Utc::now();
        assert!(e.timestamp >= before && e.timestamp <= after);
        assert_eq!(e.kind, ActivityKind::HoldingAdded);
        assert_eq!(e.details, "Holding A added");
    }

    #[test]
    fn activity_kind_display() {
        assert_eq!(ActivityKind::AssetClassRemoved.to_string(), "Asset class removed");
        assert_eq!(ActivityKind::PricesRefreshed.to_string(), "Prices refreshed");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings / Portfolio
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.default_currency, "BRL");
        assert_eq!(s.unclassified_label, DEFAULT_UNCLASSIFIED_LABEL);
        assert_eq!(s.ticker_suffix, None);
        assert_eq!(s.csv_delimiter, ';');
    }

    #[test]
    fn quote_symbol_without_suffix() {
        let s = Settings::default();
        assert_eq!(s.quote_symbol(" petr4 "), "PETR4");
    }

    #[test]
    fn quote_symbol_appends_suffix() {
        let s = Settings {
            ticker_suffix: Some(".SA".into()),
            ..Settings::default()
        };
        assert_eq!(s.quote_symbol("petr4"), "PETR4.SA");
    }

    #[test]
    fn quote_symbol_does_not_double_suffix() {
        let s = Settings {
            ticker_suffix: Some(".sa".into()),
            ..Settings::default()
        };
        assert_eq!(s.quote_symbol("VALE3.SA"), "VALE3.SA");
    }

    #[test]
    fn new_portfolio_is_empty() {
        let p = Portfolio::new("alice");
        assert_eq!(p.owner, "alice");
        assert!(p.holdings.is_empty());
        assert!(p.asset_classes.is_empty());
        assert!(p.favorites.is_empty());
        assert!(p.activity.is_empty());
        assert_eq!(p.settings, Settings::default());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  RebalancePlan / RefreshSummary
// ═══════════════════════════════════════════════════════════════════

mod rebalance_plan {
    use super::*;

    fn plan() -> RebalancePlan {
        RebalancePlan {
            mode: RebalanceMode::PerAsset,
            total_current: dec!(1000),
            extra_contribution: dec!(0),
            total_new: dec!(1000),
            rows: vec![
                row("A", dec!(300), dec!(700)),
                row("B", dec!(700), dec!(300)),
                row("C", dec!(0), dec!(0)),
                row("D", dec!(0), dec!(50)),
            ],
        }
    }

    #[test]
    fn row_lookup() {
        let p = plan();
        assert_eq!(p.row("B").unwrap().delta, dec!(-400));
        assert!(p.row("Z").is_none());
    }

    #[test]
    fn contribution_and_withdrawal_flags() {
        let p = plan();
        assert!(p.row("A").unwrap().is_contribution());
        assert!(p.row("B").unwrap().is_withdrawal());
        let c = p.row("C").unwrap();
        assert!(!c.is_contribution() && !c.is_withdrawal());
    }

    #[test]
    fn contributions_sorted_largest_first() {
        let p = plan();
        let keys: Vec<&str> = p.contributions().iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["A", "D"]);
    }

    #[test]
    fn withdrawals_listed() {
        let p = plan();
        let keys: Vec<&str> = p.withdrawals().iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["B"]);
    }

    #[test]
    fn total_delta() {
        assert_eq!(plan().total_delta(), Some(dec!(50)));
    }

    #[test]
    fn mode_display() {
        assert_eq!(RebalanceMode::PerAsset.to_string(), "PerAsset");
        assert_eq!(RebalanceMode::PerClass.to_string(), "PerClass");
        assert_eq!(RebalanceMode::Report.to_string(), "Report");
    }

    #[test]
    fn refresh_summary_completeness() {
        let mut s = RefreshSummary::default();
        assert!(s.is_complete());
        s.failed.push(RefreshFailure {
            asset_name: "XYZ".into(),
            reason: "not found".into(),
        });
        assert!(!s.is_complete());
    }
}
