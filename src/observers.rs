use tracing::{debug, info, warn};

use crate::events::RegistryEvent;

/// Trait for registry event observation
pub trait RegistryObserver {
    /// Called after every registry change or rejection
    fn on_event(&self, event: &RegistryEvent);
}

/// Forwards every event to `tracing`
#[derive(Debug)]
pub struct EventLogger;

impl RegistryObserver for EventLogger {
    fn on_event(&self, event: &RegistryEvent) {
        match event {
            RegistryEvent::UserAdded { email, .. } => info!(%email, "user added"),
            RegistryEvent::EmailChanged { old, new, .. } => info!(%old, %new, "email changed"),
            RegistryEvent::BookRead { email, book, rating } => {
                debug!(%email, title = %book.title, isbn = book.isbn, ?rating, "book read");
            }
            RegistryEvent::RatingDropped { book, rating } => {
                warn!(title = %book.title, rating, "invalid rating dropped");
            }
            RegistryEvent::Catalogued { book } => {
                debug!(title = %book.title, isbn = book.isbn, "book catalogued");
            }
            RegistryEvent::ReadCountIncremented { book, count } => {
                debug!(title = %book.title, count, "read count incremented");
            }
            RegistryEvent::IsbnCollision { book } => {
                warn!(title = %book.title, isbn = book.isbn, "isbn already exists in catalog");
            }
            RegistryEvent::IsbnChanged { title, isbn } => info!(%title, isbn, "isbn changed"),
            RegistryEvent::PriceChanged { title, price } => info!(%title, price, "price changed"),
            RegistryEvent::Rejected(err) => warn!(%err, "operation rejected"),
        }
    }
}

/// Prints user-facing confirmations and complaints to stdout
#[derive(Debug)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    /// The line printed for `event`, `None` for silent bookkeeping
    #[must_use]
    pub fn notice(event: &RegistryEvent) -> Option<String> {
        match event {
            RegistryEvent::UserAdded { .. } => Some("user added".to_owned()),
            RegistryEvent::EmailChanged { name, new, .. } => {
                Some(format!("{name}'s email has been updated to {new}"))
            }
            RegistryEvent::RatingDropped { .. } => Some("Invalid Rating".to_owned()),
            RegistryEvent::IsbnCollision { book } => {
                Some(format!("ISBN {} already exists in catalog", book.isbn))
            }
            RegistryEvent::IsbnChanged { title, isbn } => {
                Some(format!("{title}'s ISBN has been changed to {isbn}"))
            }
            RegistryEvent::PriceChanged { title, price } => {
                Some(format!("{title}'s price has been changed to {price}"))
            }
            RegistryEvent::Rejected(err) => Some(err.to_string()),
            RegistryEvent::BookRead { .. }
            | RegistryEvent::Catalogued { .. }
            | RegistryEvent::ReadCountIncremented { .. } => None,
        }
    }
}

impl RegistryObserver for ConsoleNotifier {
    fn on_event(&self, event: &RegistryEvent) {
        if let Some(line) = Self::notice(event) {
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{book::BookKey, error::RegistryError};

    fn dune() -> BookKey {
        BookKey { title: "Dune".to_owned(), isbn: 1001 }
    }

    #[rstest]
    #[case(
        RegistryEvent::UserAdded { name: "Alan Turing".to_owned(), email: "alan@turing.com".to_owned() },
        Some("user added")
    )]
    #[case(
        RegistryEvent::EmailChanged {
            name: "David Marr".to_owned(),
            old: "david@computation.org".to_owned(),
            new: "david@marr.org".to_owned(),
        },
        Some("David Marr's email has been updated to david@marr.org")
    )]
    #[case(RegistryEvent::RatingDropped { book: dune(), rating: 9 }, Some("Invalid Rating"))]
    #[case(
        RegistryEvent::IsbnCollision { book: dune() },
        Some("ISBN 1001 already exists in catalog")
    )]
    #[case(
        RegistryEvent::IsbnChanged { title: "Dune".to_owned(), isbn: 2002 },
        Some("Dune's ISBN has been changed to 2002")
    )]
    #[case(
        RegistryEvent::PriceChanged { title: "Dune".to_owned(), price: 39.99 },
        Some("Dune's price has been changed to 39.99")
    )]
    #[case(
        RegistryEvent::Rejected(RegistryError::InvalidEmail { email: "nobody".to_owned() }),
        Some("invalid email 'nobody'")
    )]
    #[case(
        RegistryEvent::BookRead { email: "alan@turing.com".to_owned(), book: dune(), rating: Some(3) },
        None
    )]
    #[case(RegistryEvent::Catalogued { book: dune() }, None)]
    #[case(RegistryEvent::ReadCountIncremented { book: dune(), count: 2 }, None)]
    fn notices_match_each_event(#[case] event: RegistryEvent, #[case] expected: Option<&str>) {
        assert_eq!(ConsoleNotifier::notice(&event).as_deref(), expected);
    }
}
