//! Validated maintenance of fee definitions.

use rust_decimal::Decimal;
use uuid::Uuid;

use rentbook_domain::{Book, FeeDefinition, FeeRecurrence};

use crate::CoreError;

/// Provides validated create/update/deactivate helpers for fee definitions.
/// Every mutation validates before touching the book, so a rejected call
/// leaves no partial state behind.
pub struct FeeService;

impl FeeService {
    /// Creates a fee definition on the property and returns its id.
    pub fn create(
        book: &mut Book,
        property_id: Uuid,
        name: impl Into<String>,
        description: Option<String>,
        amount: Decimal,
        recurrence: FeeRecurrence,
    ) -> Result<Uuid, CoreError> {
        if book.property(property_id).is_none() {
            return Err(CoreError::PropertyNotFound(property_id));
        }
        Self::check_amount(amount)?;
        recurrence
            .validate()
            .map_err(|err| CoreError::Validation(err.to_string()))?;
        let mut fee = FeeDefinition::new(property_id, name, amount, recurrence);
        fee.description = description;
        Ok(book.add_fee_definition(fee))
    }

    pub fn rename(book: &mut Book, fee_id: Uuid, name: impl Into<String>) -> Result<(), CoreError> {
        let fee = book
            .fee_definition_mut(fee_id)
            .ok_or(CoreError::FeeDefinitionNotFound(fee_id))?;
        fee.name = name.into();
        fee.touch();
        book.touch();
        Ok(())
    }

    pub fn set_description(
        book: &mut Book,
        fee_id: Uuid,
        description: Option<String>,
    ) -> Result<(), CoreError> {
        let fee = book
            .fee_definition_mut(fee_id)
            .ok_or(CoreError::FeeDefinitionNotFound(fee_id))?;
        fee.description = description;
        fee.touch();
        book.touch();
        Ok(())
    }

    pub fn set_amount(book: &mut Book, fee_id: Uuid, amount: Decimal) -> Result<(), CoreError> {
        Self::check_amount(amount)?;
        let fee = book
            .fee_definition_mut(fee_id)
            .ok_or(CoreError::FeeDefinitionNotFound(fee_id))?;
        fee.amount = amount;
        fee.touch();
        book.touch();
        Ok(())
    }

    /// Replaces the recurrence rule. Validation runs before assignment, so
    /// an invalid rule leaves the stored definition unchanged.
    pub fn set_recurrence(
        book: &mut Book,
        fee_id: Uuid,
        recurrence: FeeRecurrence,
    ) -> Result<(), CoreError> {
        recurrence
            .validate()
            .map_err(|err| CoreError::Validation(err.to_string()))?;
        let fee = book
            .fee_definition_mut(fee_id)
            .ok_or(CoreError::FeeDefinitionNotFound(fee_id))?;
        fee.recurrence = recurrence;
        fee.touch();
        book.touch();
        Ok(())
    }

    /// Soft-deletes the fee: the record stays for schedule and statistics
    /// history, it just stops matching active-fee queries.
    pub fn deactivate(book: &mut Book, fee_id: Uuid) -> Result<(), CoreError> {
        Self::set_active(book, fee_id, false)
    }

    pub fn reactivate(book: &mut Book, fee_id: Uuid) -> Result<(), CoreError> {
        Self::set_active(book, fee_id, true)
    }

    /// Hard-deletes the fee definition. Payments that referenced it keep
    /// their record with the fee reference nulled.
    pub fn remove(book: &mut Book, fee_id: Uuid) -> Result<(), CoreError> {
        if !book.remove_fee_definition(fee_id) {
            return Err(CoreError::FeeDefinitionNotFound(fee_id));
        }
        Ok(())
    }

    /// Active fee definitions for the property, in insertion order.
    pub fn active_for_property(
        book: &Book,
        property_id: Uuid,
    ) -> Result<Vec<FeeDefinition>, CoreError> {
        if book.property(property_id).is_none() {
            return Err(CoreError::PropertyNotFound(property_id));
        }
        Ok(book
            .active_fees_for(property_id)
            .into_iter()
            .cloned()
            .collect())
    }

    fn set_active(book: &mut Book, fee_id: Uuid, active: bool) -> Result<(), CoreError> {
        let fee = book
            .fee_definition_mut(fee_id)
            .ok_or(CoreError::FeeDefinitionNotFound(fee_id))?;
        fee.active = active;
        fee.touch();
        book.touch();
        Ok(())
    }

    fn check_amount(amount: Decimal) -> Result<(), CoreError> {
        if amount.is_sign_negative() {
            return Err(CoreError::Validation(
                "fee amount must not be negative".into(),
            ));
        }
        Ok(())
    }
}
