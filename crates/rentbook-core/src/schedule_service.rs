//! Due-fee resolution and schedule projection.

use chrono::NaiveDate;
use uuid::Uuid;

use rentbook_domain::{
    calendar::{month_name, YearMonth},
    Book, FeeDefinition, MonthSchedule, PropertyMonthDue, RequiredPayment, ScheduledFee,
    MONTHS_PER_YEAR,
};

use crate::{time::Clock, CoreError};

/// Resolves which fees are due and unpaid, and projects those resolutions
/// across months, years and property portfolios.
pub struct ScheduleService;

impl ScheduleService {
    /// Fees of the property that fall due in the given month and have no
    /// payment recorded inside that calendar month. Output follows the
    /// insertion order of the fee definitions.
    pub fn required_for_month(
        book: &Book,
        property_id: Uuid,
        year: i32,
        month: u32,
    ) -> Result<Vec<RequiredPayment>, CoreError> {
        if book.property(property_id).is_none() {
            return Err(CoreError::PropertyNotFound(property_id));
        }
        let window = YearMonth::new(year, month)
            .ok_or_else(|| CoreError::Validation(format!("month {} is outside 1..=12", month)))?;
        Ok(book
            .active_fees_for(property_id)
            .into_iter()
            .filter(|fee| fee.is_due_in(year, month))
            .filter(|fee| !Self::paid_in_month(book, property_id, fee.id, window))
            .map(Self::to_required)
            .collect())
    }

    /// Forward-looking obligation calendar for one property and year. Only
    /// the recurrence rules are consulted; payment history does not change
    /// this view. Months without due fees are omitted.
    pub fn yearly_schedule(
        book: &Book,
        property_id: Uuid,
        year: i32,
    ) -> Result<Vec<MonthSchedule>, CoreError> {
        if book.property(property_id).is_none() {
            return Err(CoreError::PropertyNotFound(property_id));
        }
        let fees = book.active_fees_for(property_id);
        let mut schedule = Vec::new();
        for month in 1..=MONTHS_PER_YEAR {
            let due: Vec<ScheduledFee> = fees
                .iter()
                .filter(|fee| fee.is_due_in(year, month))
                .map(|fee| ScheduledFee {
                    fee_definition_id: fee.id,
                    name: fee.name.clone(),
                    amount: fee.amount,
                    kind: fee.recurrence.kind,
                })
                .collect();
            if due.is_empty() {
                continue;
            }
            schedule.push(MonthSchedule {
                month,
                month_name: month_name(month).to_string(),
                fees: due,
            });
        }
        Ok(schedule)
    }

    /// Unpaid required fees for every property, month by month from the
    /// calendar month containing `start` through the one containing `end`.
    /// Property/month pairs with nothing outstanding are omitted.
    pub fn for_date_range(
        book: &Book,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PropertyMonthDue>, CoreError> {
        if end < start {
            return Err(CoreError::Validation(
                "date range end precedes its start".into(),
            ));
        }
        let months = YearMonth::containing(start).through(YearMonth::containing(end));
        let mut out = Vec::new();
        for ym in months {
            for property in &book.properties {
                let required = Self::required_for_month(book, property.id, ym.year, ym.month)?;
                if required.is_empty() {
                    continue;
                }
                out.push(PropertyMonthDue {
                    property_id: property.id,
                    property_name: property.name.clone(),
                    year: ym.year,
                    month: ym.month,
                    month_name: month_name(ym.month).to_string(),
                    required,
                });
            }
        }
        Ok(out)
    }

    /// Outstanding fees across all properties from the month containing
    /// `reference` through `horizon_months` months later, inclusive.
    pub fn upcoming(
        book: &Book,
        reference: NaiveDate,
        horizon_months: u32,
    ) -> Result<Vec<PropertyMonthDue>, CoreError> {
        let start = YearMonth::containing(reference);
        let end = start.plus_months(horizon_months);
        Self::for_date_range(book, start.first_day(), end.last_day())
    }

    /// Outstanding fees across all properties for the single month that
    /// contains `reference`.
    pub fn current_month(
        book: &Book,
        reference: NaiveDate,
    ) -> Result<Vec<PropertyMonthDue>, CoreError> {
        let ym = YearMonth::containing(reference);
        Self::for_date_range(book, ym.first_day(), ym.last_day())
    }

    /// [`Self::upcoming`] anchored on the clock's current date.
    pub fn upcoming_now(
        book: &Book,
        clock: &dyn Clock,
        horizon_months: u32,
    ) -> Result<Vec<PropertyMonthDue>, CoreError> {
        Self::upcoming(book, clock.today(), horizon_months)
    }

    /// [`Self::current_month`] anchored on the clock's current date.
    pub fn current_month_now(
        book: &Book,
        clock: &dyn Clock,
    ) -> Result<Vec<PropertyMonthDue>, CoreError> {
        Self::current_month(book, clock.today())
    }

    /// Whether any payment for this property/fee pair was recorded inside
    /// the month, regardless of payment status.
    fn paid_in_month(book: &Book, property_id: Uuid, fee_id: Uuid, window: YearMonth) -> bool {
        book.payments.iter().any(|payment| {
            payment.property_id == property_id
                && payment.fee_definition_id == Some(fee_id)
                && window.contains(payment.payment_date)
        })
    }

    fn to_required(fee: &FeeDefinition) -> RequiredPayment {
        RequiredPayment {
            fee_definition_id: fee.id,
            name: fee.name.clone(),
            description: fee.description.clone(),
            amount: fee.amount,
            recurrence: fee.recurrence,
        }
    }
}
