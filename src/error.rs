//! Error types for registry operations.

use thiserror::Error;

use crate::book::BookId;

/// Errors returned by registry and user operations.
///
/// A returned error always means the registry state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The email failed the format check.
    #[error("invalid email '{email}'")]
    InvalidEmail {
        /// The rejected email.
        email: String,
    },

    /// A user with this email is already registered.
    #[error("user with email '{email}' already exists")]
    DuplicateUser {
        /// The email already in use.
        email: String,
    },

    /// No user is registered under this email.
    #[error("no user with email '{email}'")]
    UnknownUser {
        /// The email that was looked up.
        email: String,
    },

    /// The handle does not refer to a book on this registry's shelf.
    #[error("no book with id {id}")]
    UnknownBook {
        /// The unknown handle.
        id: BookId,
    },

    /// Another user already holds the requested email.
    #[error("email '{email}' is already taken")]
    EmailTaken {
        /// The requested email.
        email: String,
    },

    /// The book has been read, so its isbn is part of its catalog identity.
    #[error("isbn of '{title}' cannot change after it has been read")]
    IsbnLocked {
        /// Title of the locked book.
        title: String,
    },
}

/// Errors returned when a rating is submitted to a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RatingError {
    /// The rating is outside the accepted `0..=4` range.
    #[error("invalid rating {value}: expected a value between 0 and 4")]
    OutOfRange {
        /// The rejected value.
        value: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_email_formats_correctly() {
        let err = RegistryError::InvalidEmail { email: "nope".to_owned() };
        assert_eq!(err.to_string(), "invalid email 'nope'");
    }

    #[test]
    fn unknown_user_formats_correctly() {
        let err = RegistryError::UnknownUser { email: "ghost@example.com".to_owned() };
        assert_eq!(err.to_string(), "no user with email 'ghost@example.com'");
    }

    #[test]
    fn isbn_locked_formats_correctly() {
        let err = RegistryError::IsbnLocked { title: "Dune".to_owned() };
        assert_eq!(err.to_string(), "isbn of 'Dune' cannot change after it has been read");
    }

    #[test]
    fn rating_out_of_range_formats_correctly() {
        let err = RatingError::OutOfRange { value: 7 };
        assert_eq!(err.to_string(), "invalid rating 7: expected a value between 0 and 4");
    }
}
