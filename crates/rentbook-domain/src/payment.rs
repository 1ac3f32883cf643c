//! Recorded payments, the durable ledger the scheduling engine reconciles
//! against.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// How a payment was made.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    BankTransfer,
    Cash,
    Card,
    DirectDebit,
    Other,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::BankTransfer => "Bank transfer",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::DirectDebit => "Direct debit",
            PaymentMethod::Other => "Other",
        };
        f.write_str(label)
    }
}

/// Flat settlement state of a payment. Transitions are caller-driven; there
/// is no state machine here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Completed,
    Pending,
    Failed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentStatus::Completed => "Completed",
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Failed => "Failed",
        };
        f.write_str(label)
    }
}

/// A recorded disbursement against a property. The fee reference is optional:
/// ad-hoc payments have none, and removing a fee definition nulls the
/// reference while the payment itself remains.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub id: Uuid,
    pub property_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_definition_id: Option<Uuid>,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(
        property_id: Uuid,
        amount: Decimal,
        payment_date: NaiveDate,
        method: PaymentMethod,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_id,
            fee_definition_id: None,
            amount,
            payment_date,
            due_date: None,
            method,
            status: PaymentStatus::Completed,
            description: None,
            reference: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_fee(mut self, fee_definition_id: Uuid) -> Self {
        self.fee_definition_id = Some(fee_definition_id);
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn is_completed(&self) -> bool {
        self.status == PaymentStatus::Completed
    }
}

impl Identifiable for Payment {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl BelongsToProperty for Payment {
    fn property_id(&self) -> Uuid {
        self.property_id
    }
}

impl Displayable for Payment {
    fn display_label(&self) -> String {
        format!("{} on {} [{}]", self.amount, self.payment_date, self.status)
    }
}
