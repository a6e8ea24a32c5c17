use std::{collections::HashMap, fmt};

use crate::{
    book::{BookId, BookKey, mean},
    config::ValidationPolicy,
    error::RegistryError,
    validation::validate_email,
};

/// One entry in a user's reading list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    /// The shelf handle first recorded for this book
    pub book: BookId,
    /// The rating the user gave, unvalidated
    pub rating: Option<i32>,
}

/// A reader and the books they have read
#[derive(Debug, Clone)]
pub struct User {
    /// Display name
    name: String,
    /// Contact address, also the registry key
    email: String,
    /// Reading list keyed by book identity
    books: HashMap<BookKey, Reading>,
}

impl User {
    /// Create a user with an empty reading list
    ///
    /// The email is not validated here; the registry does that on insert.
    #[must_use]
    pub fn new(name: &str, email: &str) -> Self {
        Self { name: name.to_owned(), email: email.to_owned(), books: HashMap::new() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Number of distinct books read
    #[must_use]
    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Iterate the reading list in no particular order
    pub fn readings(&self) -> impl Iterator<Item = (&BookKey, &Reading)> {
        self.books.iter()
    }

    /// The reading entry for `key`, if the user has read that book
    #[must_use]
    pub fn reading(&self, key: &BookKey) -> Option<&Reading> {
        self.books.get(key)
    }

    /// Record that the user read a book, overwriting any earlier rating
    ///
    /// The first handle recorded for a given key is kept.
    pub fn read_book(&mut self, key: BookKey, book: BookId, rating: Option<i32>) {
        self.books
            .entry(key)
            .and_modify(|reading| reading.rating = rating)
            .or_insert(Reading { book, rating });
    }

    /// Sum of the user's ratings over the number of books read
    ///
    /// Unrated books count towards the denominator. `None` when the user
    /// has read nothing.
    #[must_use]
    pub fn average_rating(&self) -> Option<f64> {
        let total: f64 = self.books.values().filter_map(|r| r.rating).map(f64::from).sum();
        mean(total, self.books.len())
    }

    /// Change the email after checking it with the default policy
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidEmail` and leaves the email unchanged
    /// when the check fails.
    pub fn change_email(&mut self, email: &str) -> Result<(), RegistryError> {
        self.change_email_with(email, &ValidationPolicy::default())
    }

    /// Change the email after checking it with `policy`
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidEmail` and leaves the email unchanged
    /// when the check fails.
    pub fn change_email_with(
        &mut self,
        email: &str,
        policy: &ValidationPolicy,
    ) -> Result<(), RegistryError> {
        validate_email(email, policy)?;
        email.clone_into(&mut self.email);
        Ok(())
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.email == other.email
    }
}

impl Eq for User {}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User {}, email: {}, books read: {}", self.name, self.email, self.books.len())
    }
}
