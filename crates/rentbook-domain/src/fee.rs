//! Fee definitions and their recurrence rules.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::MONTHS_PER_YEAR;
use crate::common::*;

/// Months in which a biannual fee falls due.
pub const BIANNUAL_MONTHS: [u32; 2] = [1, 7];
/// Month in which an annual fee falls due.
pub const ANNUAL_MONTH: u32 = 1;

/// Supported recurrence cadences for a fee definition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeeKind {
    Monthly,
    Quarterly,
    Biannual,
    Annual,
    SpecificMonth,
}

impl FeeKind {
    /// Whether this cadence carries a month parameter.
    pub fn takes_month(&self) -> bool {
        matches!(self, FeeKind::Quarterly | FeeKind::SpecificMonth)
    }
}

impl fmt::Display for FeeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FeeKind::Monthly => "Monthly",
            FeeKind::Quarterly => "Quarterly",
            FeeKind::Biannual => "Biannual",
            FeeKind::Annual => "Annual",
            FeeKind::SpecificMonth => "Specific month",
        };
        f.write_str(label)
    }
}

/// A recurrence cadence plus its optional month parameter.
///
/// For `Quarterly` the month is the anchor: the fee falls due every third
/// month sharing the anchor's residue class mod 3, so anchor 2 means
/// February, May, August and November. For `SpecificMonth` it is the single
/// month the fee is due. The other cadences carry no parameter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeeRecurrence {
    pub kind: FeeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
}

impl FeeRecurrence {
    pub fn monthly() -> Self {
        Self {
            kind: FeeKind::Monthly,
            month: None,
        }
    }

    pub fn quarterly(anchor_month: u32) -> Self {
        Self {
            kind: FeeKind::Quarterly,
            month: Some(anchor_month),
        }
    }

    pub fn biannual() -> Self {
        Self {
            kind: FeeKind::Biannual,
            month: None,
        }
    }

    pub fn annual() -> Self {
        Self {
            kind: FeeKind::Annual,
            month: None,
        }
    }

    pub fn specific_month(month: u32) -> Self {
        Self {
            kind: FeeKind::SpecificMonth,
            month: Some(month),
        }
    }

    /// Checks the kind/parameter pairing. Callers persist a recurrence only
    /// after this passes, so the due predicate never sees an invalid pair.
    pub fn validate(&self) -> Result<(), RecurrenceError> {
        match (self.kind.takes_month(), self.month) {
            (true, None) => Err(RecurrenceError::MissingMonth(self.kind)),
            (true, Some(month)) if !(1..=MONTHS_PER_YEAR).contains(&month) => {
                Err(RecurrenceError::MonthOutOfRange(month))
            }
            (false, Some(_)) => Err(RecurrenceError::UnexpectedMonth(self.kind)),
            _ => Ok(()),
        }
    }

    /// Whether a fee with this recurrence falls due in the given month.
    /// Out-of-range months are never due, as is a quarterly rule whose
    /// anchor escaped validation.
    ///
    /// No current cadence depends on the calendar year; the parameter is kept
    /// so callers always pass full month coordinates.
    pub fn is_due_in(&self, _year: i32, month: u32) -> bool {
        if !(1..=MONTHS_PER_YEAR).contains(&month) {
            return false;
        }
        match self.kind {
            FeeKind::Monthly => true,
            FeeKind::Quarterly => self
                .month
                .filter(|anchor| (1..=MONTHS_PER_YEAR).contains(anchor))
                .map(|anchor| (month - 1) % 3 == (anchor - 1) % 3)
                .unwrap_or(false),
            FeeKind::Biannual => BIANNUAL_MONTHS.contains(&month),
            FeeKind::Annual => month == ANNUAL_MONTH,
            FeeKind::SpecificMonth => self.month == Some(month),
        }
    }

    pub fn label(&self) -> String {
        match (self.kind, self.month) {
            (FeeKind::Quarterly, Some(anchor)) => {
                format!("Quarterly from {}", crate::calendar::month_name(anchor))
            }
            (FeeKind::SpecificMonth, Some(month)) => {
                format!("Every {}", crate::calendar::month_name(month))
            }
            (kind, _) => kind.to_string(),
        }
    }
}

/// Errors raised when a recurrence kind and parameter disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceError {
    MissingMonth(FeeKind),
    UnexpectedMonth(FeeKind),
    MonthOutOfRange(u32),
}

impl fmt::Display for RecurrenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceError::MissingMonth(kind) => {
                write!(f, "{} recurrence requires a month between 1 and 12", kind)
            }
            RecurrenceError::UnexpectedMonth(kind) => {
                write!(f, "{} recurrence does not take a month parameter", kind)
            }
            RecurrenceError::MonthOutOfRange(month) => {
                write!(f, "month {} is outside 1..=12", month)
            }
        }
    }
}

impl std::error::Error for RecurrenceError {}

/// A recurring charge template attached to a property.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeeDefinition {
    pub id: Uuid,
    pub property_id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: Decimal,
    pub recurrence: FeeRecurrence,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FeeDefinition {
    pub fn new(
        property_id: Uuid,
        name: impl Into<String>,
        amount: Decimal,
        recurrence: FeeRecurrence,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            property_id,
            name: name.into(),
            description: None,
            amount,
            recurrence,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether this fee falls due in the given month.
    pub fn is_due_in(&self, year: i32, month: u32) -> bool {
        self.recurrence.is_due_in(year, month)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Identifiable for FeeDefinition {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for FeeDefinition {
    fn name(&self) -> &str {
        &self.name
    }
}

impl BelongsToProperty for FeeDefinition {
    fn property_id(&self) -> Uuid {
        self.property_id
    }
}

impl Displayable for FeeDefinition {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.recurrence.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monthly_is_due_every_month() {
        let rule = FeeRecurrence::monthly();
        for month in 1..=12 {
            assert!(rule.is_due_in(2024, month));
            assert!(rule.is_due_in(2025, month));
        }
    }

    #[test]
    fn specific_month_is_due_only_in_its_month() {
        let rule = FeeRecurrence::specific_month(3);
        for month in 1..=12 {
            assert_eq!(rule.is_due_in(2025, month), month == 3);
        }
    }

    #[test]
    fn quarterly_anchor_one_hits_four_evenly_spaced_months() {
        let rule = FeeRecurrence::quarterly(1);
        let due: Vec<u32> = (1..=12).filter(|m| rule.is_due_in(2025, *m)).collect();
        assert_eq!(due, vec![1, 4, 7, 10]);
    }

    #[test]
    fn quarterly_anchor_is_a_residue_class() {
        let rule = FeeRecurrence::quarterly(11);
        let due: Vec<u32> = (1..=12).filter(|m| rule.is_due_in(2025, *m)).collect();
        assert_eq!(due, vec![2, 5, 8, 11]);
    }

    #[test]
    fn biannual_is_due_in_january_and_july() {
        let rule = FeeRecurrence::biannual();
        let due: Vec<u32> = (1..=12).filter(|m| rule.is_due_in(2025, *m)).collect();
        assert_eq!(due, vec![1, 7]);
    }

    #[test]
    fn annual_is_due_in_january_only() {
        let rule = FeeRecurrence::annual();
        let due: Vec<u32> = (1..=12).filter(|m| rule.is_due_in(2025, *m)).collect();
        assert_eq!(due, vec![1]);
    }

    #[test]
    fn validate_rejects_missing_or_out_of_range_months() {
        assert_eq!(
            FeeRecurrence {
                kind: FeeKind::Quarterly,
                month: None
            }
            .validate(),
            Err(RecurrenceError::MissingMonth(FeeKind::Quarterly))
        );
        assert_eq!(
            FeeRecurrence::quarterly(13).validate(),
            Err(RecurrenceError::MonthOutOfRange(13))
        );
        assert_eq!(
            FeeRecurrence::quarterly(0).validate(),
            Err(RecurrenceError::MonthOutOfRange(0))
        );
        assert!(FeeRecurrence::specific_month(6).validate().is_ok());
    }

    #[test]
    fn validate_rejects_parameter_on_fixed_cadences() {
        let rule = FeeRecurrence {
            kind: FeeKind::Annual,
            month: Some(4),
        };
        assert_eq!(
            rule.validate(),
            Err(RecurrenceError::UnexpectedMonth(FeeKind::Annual))
        );
        assert!(FeeRecurrence::annual().validate().is_ok());
        assert!(FeeRecurrence::biannual().validate().is_ok());
        assert!(FeeRecurrence::monthly().validate().is_ok());
    }

    #[test]
    fn out_of_range_months_are_never_due() {
        assert!(!FeeRecurrence::monthly().is_due_in(2025, 0));
        assert!(!FeeRecurrence::monthly().is_due_in(2025, 13));
        assert!(!FeeRecurrence::quarterly(2).is_due_in(2025, 0));
        // An anchor that bypassed validation must not panic either.
        let bad_anchor = FeeRecurrence {
            kind: FeeKind::Quarterly,
            month: Some(0),
        };
        assert!(!bad_anchor.is_due_in(2025, 5));
    }

    #[test]
    fn fee_kind_serializes_snake_case() {
        let json = serde_json::to_string(&FeeKind::SpecificMonth).unwrap();
        assert_eq!(json, "\"specific_month\"");
    }
}
