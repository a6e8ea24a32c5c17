use crate::{book::BookKey, error::RegistryError};

/// Something that happened to the registry
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryEvent {
    /// A new user was registered
    UserAdded {
        /// Display name
        name: String,
        /// Registry key
        email: String,
    },
    /// A user's email changed
    EmailChanged {
        /// Display name
        name: String,
        /// Previous address
        old: String,
        /// Current address
        new: String,
    },
    /// A user read a book
    BookRead {
        /// Reader's email
        email: String,
        /// The book
        book: BookKey,
        /// The rating the user gave
        rating: Option<i32>,
    },
    /// A submitted rating was not stored on the book
    RatingDropped {
        /// The book
        book: BookKey,
        /// The rejected value
        rating: i32,
    },
    /// A book entered the catalog
    Catalogued {
        /// The book
        book: BookKey,
    },
    /// A catalogued book's read-count went up
    ReadCountIncremented {
        /// The book
        book: BookKey,
        /// The new count
        count: u32,
    },
    /// A book was kept out of the catalog because its isbn is taken
    IsbnCollision {
        /// The book that was refused
        book: BookKey,
    },
    /// A book's isbn changed
    IsbnChanged {
        /// Title of the book
        title: String,
        /// The new isbn
        isbn: u64,
    },
    /// A book's price changed
    PriceChanged {
        /// Title of the book
        title: String,
        /// The new price
        price: f64,
    },
    /// An operation was refused and left the registry unchanged
    Rejected(RegistryError),
}
