use std::io::{self, Write};

use serde::Serialize;

use crate::{book::Book, registry::Registry, user::User};

/// A book as it appears in a report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookLine {
    /// Display form, e.g. "Dune by Frank Herbert"
    pub label: String,
    /// Catalog identifier
    pub isbn: u64,
    /// Price
    pub price: f64,
    /// Read-count, when the book is catalogued
    pub read_count: Option<u32>,
    /// Mean rating, when the book has any
    pub average_rating: Option<f64>,
}

/// A user as it appears in a report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLine {
    /// Display name
    pub name: String,
    /// Registry key
    pub email: String,
    /// Distinct books read
    pub books_read: usize,
    /// Mean rating over books read
    pub average_rating: Option<f64>,
}

/// Every report over a registry, ready for printing or serialization
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Registered users
    pub user_count: usize,
    /// Catalogued books
    pub book_count: usize,
    /// Highest read-count
    pub most_read_book: Option<BookLine>,
    /// Highest average rating
    pub highest_rated_book: Option<BookLine>,
    /// Highest user average
    pub most_positive_user: Option<UserLine>,
    /// Top books by read-count
    pub most_read_books: Vec<BookLine>,
    /// Top books by price
    pub most_expensive_books: Vec<BookLine>,
    /// Top users by books read
    pub most_prolific_readers: Vec<UserLine>,
}

/// Catalog and user listings
#[derive(Debug)]
pub struct Listing;

impl Listing {
    /// Report line for a book
    #[must_use]
    pub fn book_line(registry: &Registry, book: &Book) -> BookLine {
        BookLine {
            label: book.to_string(),
            isbn: book.isbn(),
            price: book.price(),
            read_count: registry.read_count_of(&book.key()),
            average_rating: book.average_rating(),
        }
    }

    /// Report line for a user
    #[must_use]
    pub fn user_line(user: &User) -> UserLine {
        UserLine {
            name: user.name().to_owned(),
            email: user.email().to_owned(),
            books_read: user.book_count(),
            average_rating: user.average_rating(),
        }
    }

    /// Run every report, keeping `top` entries in the ranked lists
    #[must_use]
    pub fn summary(registry: &Registry, top: usize) -> ReportSummary {
        let line = |book: &Book| Self::book_line(registry, book);
        ReportSummary {
            user_count: registry.user_count(),
            book_count: registry.book_count(),
            most_read_book: registry.most_read_book().map(|(book, _)| line(book)),
            highest_rated_book: registry.highest_rated_book().map(line),
            most_positive_user: registry.most_positive_user().map(Self::user_line),
            most_read_books: registry
                .get_n_most_read_books(top)
                .into_iter()
                .map(|(book, _)| line(book))
                .collect(),
            most_expensive_books: registry
                .get_n_most_expensive_books(top)
                .into_iter()
                .map(line)
                .collect(),
            most_prolific_readers: registry
                .get_n_most_prolific_readers(top)
                .into_iter()
                .map(Self::user_line)
                .collect(),
        }
    }

    /// Write one `"{book} {read_count}"` line per catalogued book
    ///
    /// # Errors
    ///
    /// Propagates any error from `out`.
    pub fn write_catalog(registry: &Registry, out: &mut impl Write) -> io::Result<()> {
        for (book, count) in registry.catalog() {
            writeln!(out, "{book} {count}")?;
        }
        Ok(())
    }

    /// Write one line per registered user
    ///
    /// # Errors
    ///
    /// Propagates any error from `out`.
    pub fn write_users(registry: &Registry, out: &mut impl Write) -> io::Result<()> {
        for user in registry.users() {
            writeln!(out, "{user}")?;
        }
        Ok(())
    }

    /// Print the catalog to stdout
    ///
    /// # Errors
    ///
    /// Returns an error if stdout cannot be written.
    pub fn print_catalog(registry: &Registry) -> io::Result<()> {
        Self::write_catalog(registry, &mut io::stdout().lock())
    }

    /// Print the users to stdout
    ///
    /// # Errors
    ///
    /// Returns an error if stdout cannot be written.
    pub fn print_users(registry: &Registry) -> io::Result<()> {
        Self::write_users(registry, &mut io::stdout().lock())
    }
}
