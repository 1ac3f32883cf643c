//! Shared traits for entities stored in a book.

use uuid::Uuid;

/// Exposes a stable identifier for entities stored in the book.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Associates entities with the property that owns them.
pub trait BelongsToProperty {
    fn property_id(&self) -> Uuid;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}
