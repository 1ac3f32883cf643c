//! Payment recording, batch materialization, and due-date queries.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use rentbook_domain::{
    Book, Payment, PaymentMethod, PaymentStatus, RequiredPayment,
};

use crate::CoreError;

/// Fields shared by every payment created from one batch of required fees.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub payment_date: NaiveDate,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl BatchOptions {
    pub fn new(payment_date: NaiveDate, method: PaymentMethod) -> Self {
        Self {
            payment_date,
            method,
            status: PaymentStatus::Pending,
            due_date: None,
            notes: None,
        }
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Records payments against the book and answers due-date queries.
pub struct PaymentService;

impl PaymentService {
    /// Records a single payment after validating its references and amount.
    pub fn record(book: &mut Book, payment: Payment) -> Result<Uuid, CoreError> {
        Self::check_payment(book, &payment)?;
        Ok(book.add_payment(payment))
    }

    /// Materializes a batch of required fees into persisted payments.
    /// All-or-nothing: the entire batch is validated before the first
    /// insertion, so a rejected entry leaves the book untouched.
    pub fn create_batch(
        book: &mut Book,
        property_id: Uuid,
        required: &[RequiredPayment],
        options: &BatchOptions,
    ) -> Result<Vec<Uuid>, CoreError> {
        if book.property(property_id).is_none() {
            return Err(CoreError::PropertyNotFound(property_id));
        }
        let mut staged = Vec::with_capacity(required.len());
        for entry in required {
            let fee = book
                .fee_definition(entry.fee_definition_id)
                .ok_or(CoreError::FeeDefinitionNotFound(entry.fee_definition_id))?;
            if fee.property_id != property_id {
                return Err(CoreError::InvalidOperation(format!(
                    "fee {} belongs to a different property",
                    fee.id
                )));
            }
            Self::check_amount(entry.amount)?;
            let mut payment = Payment::new(property_id, entry.amount, options.payment_date, options.method)
                .with_fee(entry.fee_definition_id)
                .with_status(options.status);
            payment.due_date = options.due_date;
            payment.description = Some(entry.name.clone());
            payment.notes = options.notes.clone();
            staged.push(payment);
        }
        let ids: Vec<Uuid> = staged.iter().map(|payment| payment.id).collect();
        for payment in staged {
            book.payments.push(payment);
        }
        book.touch();
        info!(
            property = %property_id,
            created = ids.len(),
            "materialized required payments"
        );
        Ok(ids)
    }

    /// Pending payments of the property whose due date has passed.
    pub fn overdue(
        book: &Book,
        property_id: Uuid,
        reference: NaiveDate,
    ) -> Result<Vec<Payment>, CoreError> {
        if book.property(property_id).is_none() {
            return Err(CoreError::PropertyNotFound(property_id));
        }
        Ok(book
            .payments_for(property_id)
            .into_iter()
            .filter(|payment| payment.status == PaymentStatus::Pending)
            .filter(|payment| matches!(payment.due_date, Some(due) if due < reference))
            .cloned()
            .collect())
    }

    /// Pending payments of the property due within the next `days` days,
    /// today included.
    pub fn upcoming_due(
        book: &Book,
        property_id: Uuid,
        reference: NaiveDate,
        days: i64,
    ) -> Result<Vec<Payment>, CoreError> {
        if book.property(property_id).is_none() {
            return Err(CoreError::PropertyNotFound(property_id));
        }
        let cutoff = reference + Duration::days(days);
        Ok(book
            .payments_for(property_id)
            .into_iter()
            .filter(|payment| payment.status == PaymentStatus::Pending)
            .filter(|payment| {
                matches!(payment.due_date, Some(due) if due >= reference && due <= cutoff)
            })
            .cloned()
            .collect())
    }

    pub fn update_status(
        book: &mut Book,
        payment_id: Uuid,
        status: PaymentStatus,
    ) -> Result<(), CoreError> {
        let payment = book
            .payment_mut(payment_id)
            .ok_or(CoreError::PaymentNotFound(payment_id))?;
        payment.status = status;
        book.touch();
        Ok(())
    }

    pub fn remove(book: &mut Book, payment_id: Uuid) -> Result<(), CoreError> {
        if !book.remove_payment(payment_id) {
            return Err(CoreError::PaymentNotFound(payment_id));
        }
        Ok(())
    }

    fn check_payment(book: &Book, payment: &Payment) -> Result<(), CoreError> {
        if book.property(payment.property_id).is_none() {
            return Err(CoreError::PropertyNotFound(payment.property_id));
        }
        if let Some(fee_id) = payment.fee_definition_id {
            let fee = book
                .fee_definition(fee_id)
                .ok_or(CoreError::FeeDefinitionNotFound(fee_id))?;
            if fee.property_id != payment.property_id {
                return Err(CoreError::InvalidOperation(format!(
                    "fee {} belongs to a different property",
                    fee.id
                )));
            }
        }
        Self::check_amount(payment.amount)
    }

    fn check_amount(amount: Decimal) -> Result<(), CoreError> {
        if amount.is_sign_negative() {
            return Err(CoreError::Validation(
                "payment amount must not be negative".into(),
            ));
        }
        Ok(())
    }
}
