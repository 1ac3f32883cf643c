//! High-level book orchestration and association management.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use rentbook_domain::{Book, Owner, Property, Rental, Tenant};

use crate::CoreError;

/// Constructor and CRUD helpers for [`Book`] instances and the plain
/// association records around the scheduling core.
pub struct BookService;

impl BookService {
    /// Creates a new, empty book with the supplied name.
    pub fn create(name: impl Into<String>) -> Book {
        Book::new(name)
    }

    /// Renames a book.
    pub fn rename(book: &mut Book, new_name: impl Into<String>) {
        book.name = new_name.into();
        book.touch();
    }

    pub fn add_owner(book: &mut Book, owner: Owner) -> Uuid {
        book.add_owner(owner)
    }

    pub fn set_owner_contact(
        book: &mut Book,
        owner_id: Uuid,
        email: Option<String>,
        phone: Option<String>,
    ) -> Result<(), CoreError> {
        let owner = book
            .owner_mut(owner_id)
            .ok_or(CoreError::OwnerNotFound(owner_id))?;
        owner.email = email;
        owner.phone = phone;
        book.touch();
        Ok(())
    }

    /// Removes an owner unless a property still references them.
    pub fn remove_owner(book: &mut Book, owner_id: Uuid) -> Result<(), CoreError> {
        let referenced = book
            .properties
            .iter()
            .any(|property| property.owner_id == owner_id);
        if referenced {
            return Err(CoreError::InvalidOperation(
                "owner still has properties in the book".into(),
            ));
        }
        if !book.remove_owner(owner_id) {
            return Err(CoreError::OwnerNotFound(owner_id));
        }
        Ok(())
    }

    /// Adds a property after checking its owner exists.
    pub fn add_property(book: &mut Book, property: Property) -> Result<Uuid, CoreError> {
        if book.owner(property.owner_id).is_none() {
            return Err(CoreError::OwnerNotFound(property.owner_id));
        }
        Ok(book.add_property(property))
    }

    /// Removes a property; its fee definitions and payments go with it.
    pub fn remove_property(book: &mut Book, property_id: Uuid) -> Result<(), CoreError> {
        if !book.remove_property(property_id) {
            return Err(CoreError::PropertyNotFound(property_id));
        }
        Ok(())
    }

    pub fn add_tenant(book: &mut Book, tenant: Tenant) -> Uuid {
        book.add_tenant(tenant)
    }

    /// Removes a tenant unless an active lease still references them.
    pub fn remove_tenant(book: &mut Book, tenant_id: Uuid) -> Result<(), CoreError> {
        let leased = book
            .rentals
            .iter()
            .any(|rental| rental.tenant_id == tenant_id && rental.is_active());
        if leased {
            return Err(CoreError::InvalidOperation(
                "tenant still holds an active rental".into(),
            ));
        }
        if !book.remove_tenant(tenant_id) {
            return Err(CoreError::TenantNotFound(tenant_id));
        }
        Ok(())
    }

    /// Starts a lease after checking both ends of the association.
    pub fn start_rental(
        book: &mut Book,
        property_id: Uuid,
        tenant_id: Uuid,
        start_date: NaiveDate,
        rent_amount: Decimal,
    ) -> Result<Uuid, CoreError> {
        if book.property(property_id).is_none() {
            return Err(CoreError::PropertyNotFound(property_id));
        }
        if book.tenant(tenant_id).is_none() {
            return Err(CoreError::TenantNotFound(tenant_id));
        }
        if rent_amount.is_sign_negative() {
            return Err(CoreError::Validation(
                "rent amount must not be negative".into(),
            ));
        }
        Ok(book.add_rental(Rental::new(property_id, tenant_id, start_date, rent_amount)))
    }

    /// Ends a lease on the given date.
    pub fn end_rental(
        book: &mut Book,
        rental_id: Uuid,
        end_date: NaiveDate,
    ) -> Result<(), CoreError> {
        let rental = book
            .rental_mut(rental_id)
            .ok_or(CoreError::RentalNotFound(rental_id))?;
        if end_date < rental.start_date {
            return Err(CoreError::Validation(
                "rental end date precedes its start".into(),
            ));
        }
        rental.end(end_date);
        book.touch();
        Ok(())
    }

    /// Deletes a lease record entirely. Ending a lease is the usual path;
    /// removal is for records entered by mistake.
    pub fn remove_rental(book: &mut Book, rental_id: Uuid) -> Result<(), CoreError> {
        if !book.remove_rental(rental_id) {
            return Err(CoreError::RentalNotFound(rental_id));
        }
        Ok(())
    }

    /// Active leases for a property, in insertion order.
    pub fn active_rentals(book: &Book, property_id: Uuid) -> Result<Vec<Rental>, CoreError> {
        if book.property(property_id).is_none() {
            return Err(CoreError::PropertyNotFound(property_id));
        }
        Ok(book
            .rentals
            .iter()
            .filter(|rental| rental.property_id == property_id && rental.is_active())
            .cloned()
            .collect())
    }
}
