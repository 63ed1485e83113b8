//! Traits shared across the domain models.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Entities addressable by a stable unique id.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Entities that carry a modification timestamp.
pub trait Stamped {
    fn updated_at(&self) -> DateTime<Utc>;

    /// Records that the entity was just modified.
    fn touch(&mut self);
}

/// Supplies a presentation-ready label for listings and logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}
