//! Book catalog and reader ratings.
//!
//! This crate tracks books, the readers who read them and the ratings they
//! give, and answers aggregate queries over them: most read book, highest
//! rated book, most prolific readers and so on.

pub mod book;
pub mod config;
pub mod error;
pub mod events;
pub mod listing;
pub mod observers;
pub mod registry;
pub mod user;
pub mod validation;

pub use book::{Book, BookId, BookKey, BookKind, Rating};
pub use config::{RegistryConfig, ValidationPolicy};
pub use error::{RatingError, RegistryError};
pub use events::RegistryEvent;
pub use listing::{Listing, ReportSummary};
pub use observers::{ConsoleNotifier, EventLogger, RegistryObserver};
pub use registry::{CatalogEntry, CatalogUpdate, Enrollment, RatingOutcome, Registry};
pub use user::{Reading, User};
pub use validation::{is_valid_email, validate_email};
