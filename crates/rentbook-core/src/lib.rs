//! rentbook-core
//!
//! Business logic and services for the rental book: fee recurrence
//! validation, due-fee resolution, schedule projection, payment recording
//! and statistics. Depends on rentbook-domain. No I/O, no direct storage
//! interactions.

pub mod book_service;
pub mod error;
pub mod fee_service;
pub mod payment_service;
pub mod schedule_service;
pub mod stats_service;
pub mod storage;
pub mod time;

pub use book_service::*;
pub use error::CoreError;
pub use fee_service::*;
pub use payment_service::*;
pub use schedule_service::*;
pub use stats_service::*;
pub use storage::*;
pub use time::*;
