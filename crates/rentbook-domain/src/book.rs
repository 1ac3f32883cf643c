//! The book aggregate: one self-contained portfolio of owners, properties,
//! tenants, leases, fee definitions and payments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    fee::FeeDefinition,
    party::{Owner, Tenant},
    payment::Payment,
    property::Property,
    rental::Rental,
};

const CURRENT_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub owners: Vec<Owner>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub tenants: Vec<Tenant>,
    #[serde(default)]
    pub rentals: Vec<Rental>,
    #[serde(default)]
    pub fee_definitions: Vec<FeeDefinition>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Book::schema_version_default")]
    pub schema_version: u8,
}

impl Book {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            owners: Vec::new(),
            properties: Vec::new(),
            tenants: Vec::new(),
            rentals: Vec::new(),
            fee_definitions: Vec::new(),
            payments: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    pub fn add_owner(&mut self, owner: Owner) -> Uuid {
        let id = owner.id;
        self.owners.push(owner);
        self.touch();
        id
    }

    pub fn add_property(&mut self, property: Property) -> Uuid {
        let id = property.id;
        self.properties.push(property);
        self.touch();
        id
    }

    pub fn add_tenant(&mut self, tenant: Tenant) -> Uuid {
        let id = tenant.id;
        self.tenants.push(tenant);
        self.touch();
        id
    }

    pub fn add_rental(&mut self, rental: Rental) -> Uuid {
        let id = rental.id;
        self.rentals.push(rental);
        self.touch();
        id
    }

    pub fn add_fee_definition(&mut self, fee: FeeDefinition) -> Uuid {
        let id = fee.id;
        self.fee_definitions.push(fee);
        self.touch();
        id
    }

    pub fn add_payment(&mut self, payment: Payment) -> Uuid {
        let id = payment.id;
        self.payments.push(payment);
        self.touch();
        id
    }

    pub fn owner(&self, id: Uuid) -> Option<&Owner> {
        self.owners.iter().find(|owner| owner.id == id)
    }

    pub fn owner_mut(&mut self, id: Uuid) -> Option<&mut Owner> {
        self.owners.iter_mut().find(|owner| owner.id == id)
    }

    pub fn property(&self, id: Uuid) -> Option<&Property> {
        self.properties.iter().find(|property| property.id == id)
    }

    pub fn property_mut(&mut self, id: Uuid) -> Option<&mut Property> {
        self.properties.iter_mut().find(|property| property.id == id)
    }

    pub fn tenant(&self, id: Uuid) -> Option<&Tenant> {
        self.tenants.iter().find(|tenant| tenant.id == id)
    }

    pub fn rental(&self, id: Uuid) -> Option<&Rental> {
        self.rentals.iter().find(|rental| rental.id == id)
    }

    pub fn rental_mut(&mut self, id: Uuid) -> Option<&mut Rental> {
        self.rentals.iter_mut().find(|rental| rental.id == id)
    }

    pub fn fee_definition(&self, id: Uuid) -> Option<&FeeDefinition> {
        self.fee_definitions.iter().find(|fee| fee.id == id)
    }

    pub fn fee_definition_mut(&mut self, id: Uuid) -> Option<&mut FeeDefinition> {
        self.fee_definitions.iter_mut().find(|fee| fee.id == id)
    }

    pub fn payment(&self, id: Uuid) -> Option<&Payment> {
        self.payments.iter().find(|payment| payment.id == id)
    }

    pub fn payment_mut(&mut self, id: Uuid) -> Option<&mut Payment> {
        self.payments.iter_mut().find(|payment| payment.id == id)
    }

    /// Active fee definitions for a property, in insertion order.
    pub fn active_fees_for(&self, property_id: Uuid) -> Vec<&FeeDefinition> {
        self.fee_definitions
            .iter()
            .filter(|fee| fee.property_id == property_id && fee.active)
            .collect()
    }

    /// All payments recorded against a property, in insertion order.
    pub fn payments_for(&self, property_id: Uuid) -> Vec<&Payment> {
        self.payments
            .iter()
            .filter(|payment| payment.property_id == property_id)
            .collect()
    }

    /// Removes a property together with its fee definitions and payments.
    /// Returns `false` when the id is unknown.
    pub fn remove_property(&mut self, id: Uuid) -> bool {
        let before = self.properties.len();
        self.properties.retain(|property| property.id != id);
        if self.properties.len() == before {
            return false;
        }
        self.fee_definitions.retain(|fee| fee.property_id != id);
        self.payments.retain(|payment| payment.property_id != id);
        self.rentals.retain(|rental| rental.property_id != id);
        self.touch();
        true
    }

    /// Removes a fee definition and nulls the reference on any payment that
    /// pointed at it. The payments themselves remain.
    pub fn remove_fee_definition(&mut self, id: Uuid) -> bool {
        let before = self.fee_definitions.len();
        self.fee_definitions.retain(|fee| fee.id != id);
        if self.fee_definitions.len() == before {
            return false;
        }
        for payment in &mut self.payments {
            if payment.fee_definition_id == Some(id) {
                payment.fee_definition_id = None;
            }
        }
        self.touch();
        true
    }

    pub fn remove_owner(&mut self, id: Uuid) -> bool {
        let before = self.owners.len();
        self.owners.retain(|owner| owner.id != id);
        if self.owners.len() == before {
            return false;
        }
        self.touch();
        true
    }

    pub fn remove_tenant(&mut self, id: Uuid) -> bool {
        let before = self.tenants.len();
        self.tenants.retain(|tenant| tenant.id != id);
        if self.tenants.len() == before {
            return false;
        }
        self.touch();
        true
    }

    pub fn remove_rental(&mut self, id: Uuid) -> bool {
        let before = self.rentals.len();
        self.rentals.retain(|rental| rental.id != id);
        if self.rentals.len() == before {
            return false;
        }
        self.touch();
        true
    }

    pub fn remove_payment(&mut self, id: Uuid) -> bool {
        let before = self.payments.len();
        self.payments.retain(|payment| payment.id != id);
        if self.payments.len() == before {
            return false;
        }
        self.touch();
        true
    }
}
