//! Aggregated payment statistics, derived from recorded payments at query
//! time and never persisted.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sum and count of completed payments inside one month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MonthTotals {
    pub total: Decimal,
    pub count: usize,
}

/// Completed-payment summary for one property over one calendar year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YearStatistics {
    pub year: i32,
    pub total_amount: Decimal,
    pub total_count: usize,
    /// Mean completed amount, rounded to 2 decimals. Zero when no payments.
    pub average_amount: Decimal,
    /// Sparse per-month breakdown; months whose sum is zero are omitted.
    pub monthly_breakdown: BTreeMap<u32, MonthTotals>,
    pub previous_year_total: Decimal,
    /// Percentage change against the previous year, rounded to 2 decimals.
    /// Zero when the previous year has no completed total, which conflates
    /// "no prior data" with "no change".
    pub year_over_year_change: Decimal,
}

/// Completed payments of one year grouped by fee definition. Ad-hoc
/// payments (no fee reference) form their own group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeeTypeTotal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_definition_id: Option<Uuid>,
    pub name: String,
    pub total_amount: Decimal,
    pub count: usize,
}
