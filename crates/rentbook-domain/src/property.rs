//! The rental property entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// A rental unit owned by an [`crate::party::Owner`]. Fee definitions and
/// payments hang off a property through its id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub address: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    pub fn new(owner_id: Uuid, name: impl Into<String>, address: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: name.into(),
            address: address.into(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Identifiable for Property {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Property {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Property {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.address)
    }
}
