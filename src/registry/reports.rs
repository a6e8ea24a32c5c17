//! Read-only aggregate queries over the registry.
//!
//! Single-winner queries return the last maximum in insertion order, and the
//! top-`n` queries keep insertion order among ties.

use std::cmp::Ordering;

use super::Registry;
use crate::{book::Book, error::RegistryError, user::User};

impl Registry {
    /// The catalogued book with the highest read-count
    #[must_use]
    pub fn most_read_book(&self) -> Option<(&Book, u32)> {
        self.catalog().max_by_key(|&(_, count)| count)
    }

    /// The catalogued book with the highest average rating
    ///
    /// Books without ratings are skipped.
    #[must_use]
    pub fn highest_rated_book(&self) -> Option<&Book> {
        self.catalog()
            .filter_map(|(book, _)| book.average_rating().map(|avg| (book, avg)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(book, _)| book)
    }

    /// The user with the highest average rating
    ///
    /// Users who have read nothing are skipped.
    #[must_use]
    pub fn most_positive_user(&self) -> Option<&User> {
        self.users()
            .filter_map(|user| user.average_rating().map(|avg| (user, avg)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(user, _)| user)
    }

    /// The `n` most read catalogued books with their read-counts
    #[must_use]
    pub fn get_n_most_read_books(&self, n: usize) -> Vec<(&Book, u32)> {
        let books: Vec<(&Book, u32)> = self.catalog().collect();
        top_n(books, n, |a, b| b.1.cmp(&a.1))
    }

    /// The `n` most expensive catalogued books
    #[must_use]
    pub fn get_n_most_expensive_books(&self, n: usize) -> Vec<&Book> {
        let books: Vec<&Book> = self.catalog().map(|(book, _)| book).collect();
        top_n(books, n, |a, b| b.price().total_cmp(&a.price()))
    }

    /// The `n` users who have read the most books
    #[must_use]
    pub fn get_n_most_prolific_readers(&self, n: usize) -> Vec<&User> {
        let users: Vec<&User> = self.users().collect();
        top_n(users, n, |a, b| b.book_count().cmp(&a.book_count()))
    }

    /// Total price of every book on a user's reading list
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownUser` if no user has this email.
    pub fn get_worth_of_user(&self, email: &str) -> Result<f64, RegistryError> {
        let user = self.checked_user(email)?;
        Ok(user
            .readings()
            .filter_map(|(_, reading)| self.book(reading.book))
            .map(Book::price)
            .sum())
    }
}

/// Stable sort by `compare`, then keep the first `n`
fn top_n<T>(mut items: Vec<T>, n: usize, compare: impl FnMut(&T, &T) -> Ordering) -> Vec<T> {
    items.sort_by(compare);
    items.truncate(n);
    items
}
