use std::{
    fmt,
    hash::{Hash, Hasher},
};

use crate::error::RatingError;

/// Handle to a book held on a registry's shelf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(usize);

impl BookId {
    /// Wrap a shelf position
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the book on the shelf
    pub(crate) const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The logical identity of a book: two books are the same iff title and isbn match
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookKey {
    /// Book title
    pub title: String,
    /// Catalog identifier
    pub isbn: u64,
}

/// A validated rating in `0..=4`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating
    pub const MIN: u8 = 0;
    /// Highest accepted rating
    pub const MAX: u8 = 4;

    /// Validate a raw rating
    ///
    /// # Errors
    ///
    /// Returns `RatingError::OutOfRange` when `value` is not in `0..=4`.
    pub fn new(value: i32) -> Result<Self, RatingError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(RatingError::OutOfRange { value })
    }

    /// The rating as a plain integer
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i32> for Rating {
    type Error = RatingError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// What sort of book this is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BookKind {
    /// A book with no extra metadata
    #[default]
    General,
    /// A novel
    Fiction {
        /// Who wrote it
        author: String,
    },
    /// A manual on some subject
    NonFiction {
        /// What it covers
        subject: String,
        /// Intended reader level, e.g. "beginner"
        level: String,
    },
}

/// A book together with the ratings it has collected
///
/// Equality and hashing only look at title and isbn; kind, price and
/// ratings do not take part in identity.
#[derive(Debug, Clone)]
pub struct Book {
    /// Book title
    title: String,
    /// Catalog identifier
    isbn: u64,
    /// Price
    price: f64,
    /// Every valid rating recorded, in submission order
    ratings: Vec<Rating>,
    /// Fiction or non-fiction metadata
    kind: BookKind,
}

impl Book {
    /// Create a general book with no ratings
    #[must_use]
    pub fn new(title: &str, isbn: u64, price: f64) -> Self {
        Self { title: title.to_owned(), isbn, price, ratings: Vec::new(), kind: BookKind::General }
    }

    /// Create a novel
    #[must_use]
    pub fn fiction(title: &str, author: &str, isbn: u64, price: f64) -> Self {
        Self { kind: BookKind::Fiction { author: author.to_owned() }, ..Self::new(title, isbn, price) }
    }

    /// Create a non-fiction manual
    #[must_use]
    pub fn non_fiction(title: &str, subject: &str, level: &str, isbn: u64, price: f64) -> Self {
        Self {
            kind: BookKind::NonFiction { subject: subject.to_owned(), level: level.to_owned() },
            ..Self::new(title, isbn, price)
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn isbn(&self) -> u64 {
        self.isbn
    }

    #[must_use]
    pub fn price(&self) -> f64 {
        self.price
    }

    #[must_use]
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    #[must_use]
    pub fn kind(&self) -> &BookKind {
        &self.kind
    }

    /// Author of a novel, `None` for other kinds
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        match &self.kind {
            BookKind::Fiction { author } => Some(author),
            _ => None,
        }
    }

    /// Subject of a manual, `None` for other kinds
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        match &self.kind {
            BookKind::NonFiction { subject, .. } => Some(subject),
            _ => None,
        }
    }

    /// Level of a manual, `None` for other kinds
    #[must_use]
    pub fn level(&self) -> Option<&str> {
        match &self.kind {
            BookKind::NonFiction { level, .. } => Some(level),
            _ => None,
        }
    }

    /// The identity of this book
    #[must_use]
    pub fn key(&self) -> BookKey {
        BookKey { title: self.title.clone(), isbn: self.isbn }
    }

    /// Replace the isbn, no validation
    pub fn set_isbn(&mut self, isbn: u64) {
        self.isbn = isbn;
    }

    /// Replace the price, no validation
    pub fn set_price(&mut self, price: f64) {
        self.price = price;
    }

    /// Submit a rating
    ///
    /// `None` is accepted and records nothing. A value in `0..=4` is
    /// appended and returned.
    ///
    /// # Errors
    ///
    /// Returns `RatingError::OutOfRange` for any other value; the rating is
    /// discarded.
    pub fn add_rating(&mut self, rating: Option<i32>) -> Result<Option<Rating>, RatingError> {
        let Some(value) = rating else {
            return Ok(None);
        };
        let rating = Rating::new(value)?;
        self.ratings.push(rating);
        Ok(Some(rating))
    }

    /// Mean of all recorded ratings, `None` if there are none
    #[must_use]
    pub fn average_rating(&self) -> Option<f64> {
        let total: f64 = self.ratings.iter().map(|r| f64::from(r.value())).sum();
        mean(total, self.ratings.len())
    }
}

/// `total / count`, or `None` for an empty population
#[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
pub(crate) fn mean(total: f64, count: usize) -> Option<f64> {
    if count == 0 { None } else { Some(total / count as f64) }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.isbn == other.isbn
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
        self.isbn.hash(state);
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            BookKind::General => write!(f, "{}", self.title),
            BookKind::Fiction { author } => write!(f, "{} by {author}", self.title),
            BookKind::NonFiction { subject, level } => {
                write!(f, "{}, a {level} manual on {subject}", self.title)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0)]
    #[case(2)]
    #[case(4)]
    fn accepts_ratings_in_range(#[case] value: i32) {
        let mut book = Book::new("Dune", 1, 9.99);
        assert_eq!(book.add_rating(Some(value)), Ok(Rating::new(value).ok()));
        assert_eq!(book.ratings().len(), 1);
    }

    #[rstest]
    #[case(-1)]
    #[case(5)]
    #[case(300)]
    fn drops_ratings_out_of_range(#[case] value: i32) {
        let mut book = Book::new("Dune", 1, 9.99);
        assert_eq!(book.add_rating(Some(value)), Err(RatingError::OutOfRange { value }));
        assert!(book.ratings().is_empty());
    }

    #[test]
    fn null_rating_records_nothing() {
        let mut book = Book::new("Dune", 1, 9.99);
        assert_eq!(book.add_rating(None), Ok(None));
        assert!(book.ratings().is_empty());
    }

    #[test]
    fn average_counts_only_valid_ratings() {
        let mut book = Book::new("Dune", 1, 9.99);
        for rating in [Some(4), Some(9), None, Some(1), Some(-3), Some(2)] {
            let _ = book.add_rating(rating);
        }
        assert_eq!(book.ratings().len(), 3);
        assert_eq!(book.average_rating(), Some(7.0 / 3.0));
    }

    #[test]
    fn average_of_unrated_book_is_none() {
        assert_eq!(Book::new("Dune", 1, 9.99).average_rating(), None);
    }

    #[test]
    fn identity_ignores_kind_and_price() {
        let plain = Book::new("Dune", 42, 9.99);
        let novel = Book::fiction("Dune", "Frank Herbert", 42, 15.0);
        let other_isbn = Book::new("Dune", 43, 9.99);
        assert_eq!(plain, novel);
        assert_ne!(plain, other_isbn);
        assert_eq!(plain.key(), novel.key());
    }

    #[test]
    fn displays_per_kind() {
        assert_eq!(Book::new("Society", 1, 1.0).to_string(), "Society");
        assert_eq!(
            Book::fiction("Alice In Wonderland", "Lewis Carroll", 2, 1.0).to_string(),
            "Alice In Wonderland by Lewis Carroll"
        );
        assert_eq!(
            Book::non_fiction("Automate the Boring Stuff", "python", "beginner", 3, 1.0)
                .to_string(),
            "Automate the Boring Stuff, a beginner manual on python"
        );
    }

    #[test]
    fn kind_accessors() {
        let manual = Book::non_fiction("Hacking", "security", "advanced", 3, 1.0);
        assert_eq!(manual.subject(), Some("security"));
        assert_eq!(manual.level(), Some("advanced"));
        assert_eq!(manual.author(), None);
        assert_eq!(Book::fiction("Dune", "Frank Herbert", 4, 1.0).author(), Some("Frank Herbert"));
    }

    #[test]
    fn setters_mutate_unconditionally() {
        let mut book = Book::new("Dune", 1, 9.99);
        book.set_isbn(0);
        book.set_price(-1.0);
        assert_eq!(book.isbn(), 0);
        assert!((book.price() - -1.0).abs() < f64::EPSILON);
    }
}
