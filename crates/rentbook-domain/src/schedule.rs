//! Transient scheduling outputs. None of these are persisted; they exist
//! only as the results of resolver and projector calls.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fee::{FeeKind, FeeRecurrence};

/// A fee that is due in a month and has no matching recorded payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequiredPayment {
    pub fee_definition_id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: Decimal,
    pub recurrence: FeeRecurrence,
}

/// One obligation inside a forward-looking yearly calendar. Payment history
/// is deliberately not consulted for this view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledFee {
    pub fee_definition_id: Uuid,
    pub name: String,
    pub amount: Decimal,
    pub kind: FeeKind,
}

/// All obligations of one property in one month of a yearly calendar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthSchedule {
    pub month: u32,
    pub month_name: String,
    pub fees: Vec<ScheduledFee>,
}

/// Unpaid required fees for one property in one month, as produced by the
/// ledger-aware range projections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyMonthDue {
    pub property_id: Uuid,
    pub property_name: String,
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub required: Vec<RequiredPayment>,
}
