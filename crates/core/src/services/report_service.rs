use rust_decimal::Decimal;

use crate::models::allocation::{AllocationReport, ClassAllocation};
use crate::models::rebalance::RebalancePlan;

/// Decimal places used for every number in exported reports.
const REPORT_DECIMALS: u32 = 2;

/// Renders computed results as delimited text for download/export.
///
/// Numbers are rounded to two decimals with a plain `.` separator; no currency
/// symbol or thousands separator is added.
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    /// Columns: key, current_value, target_percent, target_value, delta
    pub fn plan_to_csv(&self, plan: &RebalancePlan, delimiter: char) -> String {
        let mut csv = Self::header(
            &["key", "current_value", "target_percent", "target_value", "delta"],
            delimiter,
        );
        for row in &plan.rows {
            Self::push_line(
                &mut csv,
                delimiter,
                &[
                    Self::escape(&row.key, delimiter),
                    Self::number(row.current_value),
                    Self::number(row.target_percent),
                    Self::number(row.target_value),
                    Self::number(row.delta),
                ],
            );
        }
        csv
    }

    /// Columns: asset_name, asset_class, current_value, target_percent, current_pct, drift_pct
    pub fn allocation_to_csv(&self, report: &AllocationReport, delimiter: char) -> String {
        let mut csv = Self::header(
            &[
                "asset_name",
                "asset_class",
                "current_value",
                "target_percent",
                "current_pct",
                "drift_pct",
            ],
            delimiter,
        );
        for h in &report.holdings {
            Self::push_line(
                &mut csv,
                delimiter,
                &[
                    Self::escape(&h.asset_name, delimiter),
                    Self::escape(&h.asset_class, delimiter),
                    Self::number(h.current_value),
                    Self::number(h.target_percent),
                    Self::number(h.current_pct),
                    Self::number(h.drift_pct),
                ],
            );
        }
        csv
    }

    /// Columns: class_name, total_current_value, current_pct, target_percent, target_value
    pub fn class_allocation_to_csv(&self, rows: &[ClassAllocation], delimiter: char) -> String {
        let mut csv = Self::header(
            &[
                "class_name",
                "total_current_value",
                "current_pct",
                "target_percent",
                "target_value",
            ],
            delimiter,
        );
        for row in rows {
            Self::push_line(
                &mut csv,
                delimiter,
                &[
                    Self::escape(&row.class_name, delimiter),
                    Self::number(row.total_current_value),
                    Self::number(row.current_pct),
                    Self::number(row.target_percent),
                    Self::number(row.target_value),
                ],
            );
        }
        csv
    }

    fn header(columns: &[&str], delimiter: char) -> String {
        let mut line = columns.join(&delimiter.to_string());
        line.push('\n');
        line
    }

    fn push_line(csv: &mut String, delimiter: char, fields: &[String]) {
        csv.push_str(&fields.join(&delimiter.to_string()));
        csv.push('\n');
    }

    fn number(value: Decimal) -> String {
        format!("{:.2}", value.round_dp(REPORT_DECIMALS))
    }

    /// Quote fields containing the delimiter, quotes, or newlines.
    fn escape(field: &str, delimiter: char) -> String {
        if field.contains(delimiter) || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}
