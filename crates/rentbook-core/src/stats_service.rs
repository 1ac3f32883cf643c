//! Aggregation of completed payments into yearly statistics.

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use uuid::Uuid;

use rentbook_domain::{Book, FeeTypeTotal, MonthTotals, Payment, YearStatistics};

use crate::CoreError;

/// Group label for completed payments that carry no fee reference.
pub const AD_HOC_LABEL: &str = "ad-hoc payment";

/// Summarizes recorded payments. Works purely on what the book already
/// holds; nothing here schedules or mutates.
pub struct StatsService;

impl StatsService {
    /// Completed-payment summary for one property and calendar year, with a
    /// sparse monthly breakdown and a year-over-year comparison.
    pub fn year_statistics(
        book: &Book,
        property_id: Uuid,
        year: i32,
    ) -> Result<YearStatistics, CoreError> {
        if book.property(property_id).is_none() {
            return Err(CoreError::PropertyNotFound(property_id));
        }

        let mut total_amount = Decimal::ZERO;
        let mut total_count = 0usize;
        let mut monthly_breakdown: BTreeMap<u32, MonthTotals> = BTreeMap::new();
        for payment in Self::completed_in_year(book, property_id, year) {
            total_amount += payment.amount;
            total_count += 1;
            let entry = monthly_breakdown
                .entry(payment.payment_date.month())
                .or_default();
            entry.total += payment.amount;
            entry.count += 1;
        }
        // Months that only saw zero-amount payments are dropped from the
        // sparse breakdown.
        monthly_breakdown.retain(|_, totals| totals.total > Decimal::ZERO);

        let average_amount = if total_count == 0 {
            Decimal::ZERO
        } else {
            (total_amount / Decimal::from(total_count as u64)).round_dp(2)
        };

        let previous_year_total = Self::completed_in_year(book, property_id, year - 1)
            .map(|payment| payment.amount)
            .sum::<Decimal>();
        // Zero previous-year totals resolve the ratio to zero instead of
        // erroring, conflating "no prior data" with "no change".
        let year_over_year_change = if previous_year_total.is_zero() {
            Decimal::ZERO
        } else {
            ((total_amount - previous_year_total) / previous_year_total * Decimal::ONE_HUNDRED)
                .round_dp(2)
        };

        Ok(YearStatistics {
            year,
            total_amount,
            total_count,
            average_amount,
            monthly_breakdown,
            previous_year_total,
            year_over_year_change,
        })
    }

    /// Completed payments of the year grouped by fee definition, in
    /// first-encountered order. Payments without a fee reference are grouped
    /// under [`AD_HOC_LABEL`].
    pub fn by_fee_type(
        book: &Book,
        property_id: Uuid,
        year: i32,
    ) -> Result<Vec<FeeTypeTotal>, CoreError> {
        if book.property(property_id).is_none() {
            return Err(CoreError::PropertyNotFound(property_id));
        }

        let mut groups: Vec<FeeTypeTotal> = Vec::new();
        for payment in Self::completed_in_year(book, property_id, year) {
            let key = payment.fee_definition_id;
            match groups.iter_mut().find(|group| group.fee_definition_id == key) {
                Some(group) => {
                    group.total_amount += payment.amount;
                    group.count += 1;
                }
                None => {
                    let name = key
                        .and_then(|fee_id| book.fee_definition(fee_id))
                        .map(|fee| fee.name.clone())
                        .unwrap_or_else(|| AD_HOC_LABEL.to_string());
                    groups.push(FeeTypeTotal {
                        fee_definition_id: key,
                        name,
                        total_amount: payment.amount,
                        count: 1,
                    });
                }
            }
        }
        Ok(groups)
    }

    fn completed_in_year(
        book: &Book,
        property_id: Uuid,
        year: i32,
    ) -> impl Iterator<Item = &Payment> {
        book.payments.iter().filter(move |payment| {
            payment.property_id == property_id
                && payment.is_completed()
                && payment.payment_date.year() == year
        })
    }
}
