//! Lease records linking tenants to properties.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// Lifecycle state of a lease.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RentalStatus {
    #[default]
    Active,
    Ended,
}

impl fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RentalStatus::Active => "Active",
            RentalStatus::Ended => "Ended",
        };
        f.write_str(label)
    }
}

/// A lease of one property to one tenant for a period of time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rental {
    pub id: Uuid,
    pub property_id: Uuid,
    pub tenant_id: Uuid,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub rent_amount: Decimal,
    pub status: RentalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rental {
    pub fn new(
        property_id: Uuid,
        tenant_id: Uuid,
        start_date: NaiveDate,
        rent_amount: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            property_id,
            tenant_id,
            start_date,
            end_date: None,
            rent_amount,
            status: RentalStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == RentalStatus::Active
    }

    pub fn end(&mut self, end_date: NaiveDate) {
        self.end_date = Some(end_date);
        self.status = RentalStatus::Ended;
        self.updated_at = Utc::now();
    }
}

impl Identifiable for Rental {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl BelongsToProperty for Rental {
    fn property_id(&self) -> Uuid {
        self.property_id
    }
}
