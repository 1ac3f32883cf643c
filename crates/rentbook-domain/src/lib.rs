//! rentbook-domain
//!
//! Pure domain models (Book, Property, FeeDefinition, Payment, schedules, etc.).
//! No I/O, no storage. Only data types, the recurrence predicate, and calendar
//! helpers.

pub mod book;
pub mod calendar;
pub mod common;
pub mod fee;
pub mod party;
pub mod payment;
pub mod property;
pub mod rental;
pub mod schedule;
pub mod stats;

pub use book::*;
pub use calendar::*;
pub use common::*;
pub use fee::*;
pub use party::*;
pub use payment::*;
pub use property::*;
pub use rental::*;
pub use schedule::*;
pub use stats::*;
