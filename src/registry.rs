use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use crate::{
    book::{Book, BookId, BookKey, Rating},
    config::RegistryConfig,
    error::{RatingError, RegistryError},
    events::RegistryEvent,
    observers::{ConsoleNotifier, EventLogger, RegistryObserver},
    user::User,
    validation::validate_email,
};

mod reports;

/// A catalogued book and how many times it has been read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// The first shelf handle catalogued under this identity
    pub book: BookId,
    /// Number of times any user has read the book
    pub read_count: u32,
}

/// What happened to the catalog when a user read a book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogUpdate {
    /// The book entered the catalog with a read-count of 1
    Inserted,
    /// The book was already catalogued
    Incremented {
        /// The new read-count
        read_count: u32,
    },
    /// A different book already holds this isbn; the catalog is unchanged
    IsbnCollision,
}

/// What happened to the rating submitted alongside a read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingOutcome {
    /// Stored on the book
    Recorded(Rating),
    /// No rating was given
    Unrated,
    /// Out of range; kept on the user but not on the book
    Dropped(i32),
}

/// Result of [`Registry::add_book_to_user`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enrollment {
    /// Catalog side of the read
    pub catalog: CatalogUpdate,
    /// Book side of the rating
    pub rating: RatingOutcome,
}

/// Books, readers and read-counts
pub struct Registry {
    /// Every book created through this registry, catalogued or not
    shelf: Vec<Book>,
    /// Books some user has read; their isbn can no longer change
    read: HashSet<BookId>,
    /// Registered users in registration order
    users: Vec<User>,
    /// Position in `users` by email
    user_index: HashMap<String, usize>,
    /// Catalogued books in insertion order
    catalog: Vec<CatalogEntry>,
    /// Position in `catalog` by book identity
    catalog_index: HashMap<BookKey, usize>,
    /// Position in `catalog` by isbn
    isbn_index: HashMap<u64, usize>,
    /// Settings
    config: RegistryConfig,
    /// Registered event observers
    observers: Vec<Box<dyn RegistryObserver>>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("shelf", &self.shelf)
            .field("users", &self.users)
            .field("catalog", &self.catalog)
            .field("config", &self.config)
            .field("observers_count", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry
    ///
    /// An [`EventLogger`] is always attached; a [`ConsoleNotifier`] is
    /// attached when `config.notify_console` is set.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        let mut registry = Self {
            shelf: Vec::new(),
            read: HashSet::new(),
            users: Vec::new(),
            user_index: HashMap::new(),
            catalog: Vec::new(),
            catalog_index: HashMap::new(),
            isbn_index: HashMap::new(),
            config,
            observers: Vec::new(),
        };
        registry.register_observer(Box::new(EventLogger));
        if registry.config.notify_console {
            registry.register_observer(Box::new(ConsoleNotifier));
        }
        registry
    }

    /// Register an observer to be notified of registry events
    pub fn register_observer(&mut self, observer: Box<dyn RegistryObserver>) {
        self.observers.push(observer);
    }

    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Deliver an event to every observer
    fn notify(&self, event: &RegistryEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }

    /// Announce a refused operation and hand the error back
    fn reject(&self, err: RegistryError) -> RegistryError {
        self.notify(&RegistryEvent::Rejected(err.clone()));
        err
    }

    /// Put a book on the shelf without cataloguing it
    pub fn shelve(&mut self, book: Book) -> BookId {
        let id = BookId::new(self.shelf.len());
        self.shelf.push(book);
        id
    }

    /// Create a general book
    pub fn create_book(&mut self, title: &str, isbn: u64, price: f64) -> BookId {
        self.shelve(Book::new(title, isbn, price))
    }

    /// Create a novel
    pub fn create_novel(&mut self, title: &str, author: &str, isbn: u64, price: f64) -> BookId {
        self.shelve(Book::fiction(title, author, isbn, price))
    }

    /// Create a non-fiction manual
    pub fn create_non_fiction(
        &mut self,
        title: &str,
        subject: &str,
        level: &str,
        isbn: u64,
        price: f64,
    ) -> BookId {
        self.shelve(Book::non_fiction(title, subject, level, isbn, price))
    }

    /// Look up a book on the shelf
    #[must_use]
    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.shelf.get(id.index())
    }

    /// Look up a shelf handle, announcing a miss
    fn checked_book(&self, id: BookId) -> Result<&Book, RegistryError> {
        self.book(id).ok_or_else(|| self.reject(RegistryError::UnknownBook { id }))
    }

    /// Look up a registered user by email
    #[must_use]
    pub fn user(&self, email: &str) -> Option<&User> {
        self.user_index.get(email).and_then(|&idx| self.users.get(idx))
    }

    /// Look up a registered user, announcing a miss
    fn checked_user(&self, email: &str) -> Result<&User, RegistryError> {
        self.user(email)
            .ok_or_else(|| self.reject(RegistryError::UnknownUser { email: email.to_owned() }))
    }

    /// Registered users in registration order
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    /// Catalogued books and their read-counts in insertion order
    pub fn catalog(&self) -> impl Iterator<Item = (&Book, u32)> {
        self.catalog
            .iter()
            .filter_map(|entry| self.book(entry.book).map(|book| (book, entry.read_count)))
    }

    /// Read-count of the catalog entry sharing `id`'s identity
    #[must_use]
    pub fn read_count(&self, id: BookId) -> Option<u32> {
        let key = self.book(id)?.key();
        self.read_count_of(&key)
    }

    /// Read-count of the catalog entry for `key`
    #[must_use]
    pub fn read_count_of(&self, key: &BookKey) -> Option<u32> {
        self.catalog_index
            .get(key)
            .and_then(|&slot| self.catalog.get(slot))
            .map(|entry| entry.read_count)
    }

    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of catalogued books
    #[must_use]
    pub fn book_count(&self) -> usize {
        self.catalog.len()
    }

    /// Register a user and enrol their initial books without ratings
    ///
    /// Returns one [`Enrollment`] per initial book.
    ///
    /// # Errors
    ///
    /// - `RegistryError::InvalidEmail` if the email fails the format check
    /// - `RegistryError::DuplicateUser` if the email is already registered
    /// - `RegistryError::UnknownBook` if an initial book is not on the shelf
    ///
    /// The registry is unchanged on error.
    pub fn add_user(
        &mut self,
        name: &str,
        email: &str,
        user_books: &[BookId],
    ) -> Result<Vec<Enrollment>, RegistryError> {
        validate_email(email, &self.config.validation).map_err(|err| self.reject(err))?;
        if self.user_index.contains_key(email) {
            return Err(self.reject(RegistryError::DuplicateUser { email: email.to_owned() }));
        }
        for &id in user_books {
            self.checked_book(id)?;
        }

        self.user_index.insert(email.to_owned(), self.users.len());
        self.users.push(User::new(name, email));
        self.notify(&RegistryEvent::UserAdded { name: name.to_owned(), email: email.to_owned() });

        user_books.iter().map(|&id| self.add_book_to_user(id, email, None)).collect()
    }

    /// Record that a registered user read a book
    ///
    /// The rating is stored on the user as given and submitted to the book,
    /// which keeps it only if it is in range. The catalog read-count is then
    /// incremented, or the book is catalogued if its isbn is free.
    ///
    /// # Errors
    ///
    /// - `RegistryError::UnknownUser` if no user has this email
    /// - `RegistryError::UnknownBook` if the book is not on the shelf
    ///
    /// The registry is unchanged on error.
    pub fn add_book_to_user(
        &mut self,
        id: BookId,
        email: &str,
        rating: Option<i32>,
    ) -> Result<Enrollment, RegistryError> {
        let Some(&user_idx) = self.user_index.get(email) else {
            return Err(self.reject(RegistryError::UnknownUser { email: email.to_owned() }));
        };
        let key = self.checked_book(id)?.key();

        if let Some(user) = self.users.get_mut(user_idx) {
            user.read_book(key.clone(), id, rating);
        }
        self.read.insert(id);
        self.notify(&RegistryEvent::BookRead {
            email: email.to_owned(),
            book: key.clone(),
            rating,
        });

        let rating = self.submit_rating(id, &key, rating);
        let catalog = self.count_read(id, key);
        Ok(Enrollment { catalog, rating })
    }

    /// Hand a rating to the book itself
    fn submit_rating(&mut self, id: BookId, key: &BookKey, rating: Option<i32>) -> RatingOutcome {
        let submitted = match self.shelf.get_mut(id.index()) {
            Some(book) => book.add_rating(rating),
            None => return RatingOutcome::Unrated,
        };
        match submitted {
            Ok(Some(rating)) => RatingOutcome::Recorded(rating),
            Ok(None) => RatingOutcome::Unrated,
            Err(RatingError::OutOfRange { value }) => {
                self.notify(&RegistryEvent::RatingDropped { book: key.clone(), rating: value });
                RatingOutcome::Dropped(value)
            }
        }
    }

    /// Bump or create the catalog entry for a read book
    fn count_read(&mut self, id: BookId, key: BookKey) -> CatalogUpdate {
        if let Some(entry) = self.catalog_index.get(&key).and_then(|&slot| self.catalog.get_mut(slot))
        {
            entry.read_count = entry.read_count.saturating_add(1);
            let read_count = entry.read_count;
            self.notify(&RegistryEvent::ReadCountIncremented { book: key, count: read_count });
            return CatalogUpdate::Incremented { read_count };
        }

        if self.isbn_index.contains_key(&key.isbn) {
            self.notify(&RegistryEvent::IsbnCollision { book: key });
            return CatalogUpdate::IsbnCollision;
        }

        let slot = self.catalog.len();
        self.catalog.push(CatalogEntry { book: id, read_count: 1 });
        self.isbn_index.insert(key.isbn, slot);
        self.catalog_index.insert(key.clone(), slot);
        self.notify(&RegistryEvent::Catalogued { book: key });
        CatalogUpdate::Inserted
    }

    /// Move a user to a new email
    ///
    /// Subsequent lookups use the new email.
    ///
    /// # Errors
    ///
    /// - `RegistryError::UnknownUser` if no user has `old`
    /// - `RegistryError::EmailTaken` if another user already has `new`
    /// - `RegistryError::InvalidEmail` if `new` fails the format check
    ///
    /// The registry is unchanged on error.
    pub fn change_user_email(&mut self, old: &str, new: &str) -> Result<(), RegistryError> {
        let Some(&user_idx) = self.user_index.get(old) else {
            return Err(self.reject(RegistryError::UnknownUser { email: old.to_owned() }));
        };
        if old != new && self.user_index.contains_key(new) {
            return Err(self.reject(RegistryError::EmailTaken { email: new.to_owned() }));
        }

        let changed = match self.users.get_mut(user_idx) {
            Some(user) => user
                .change_email_with(new, &self.config.validation)
                .map(|()| user.name().to_owned()),
            None => return Err(self.reject(RegistryError::UnknownUser { email: old.to_owned() })),
        };
        let name = changed.map_err(|err| self.reject(err))?;

        self.user_index.remove(old);
        self.user_index.insert(new.to_owned(), user_idx);
        self.notify(&RegistryEvent::EmailChanged {
            name,
            old: old.to_owned(),
            new: new.to_owned(),
        });
        Ok(())
    }

    /// Change the isbn of a book nobody has read yet
    ///
    /// # Errors
    ///
    /// - `RegistryError::UnknownBook` if the book is not on the shelf
    /// - `RegistryError::IsbnLocked` once any user has read the book
    pub fn set_book_isbn(&mut self, id: BookId, isbn: u64) -> Result<(), RegistryError> {
        let title = self.checked_book(id)?.title().to_owned();
        if self.read.contains(&id) {
            return Err(self.reject(RegistryError::IsbnLocked { title }));
        }
        if let Some(book) = self.shelf.get_mut(id.index()) {
            book.set_isbn(isbn);
        }
        self.notify(&RegistryEvent::IsbnChanged { title, isbn });
        Ok(())
    }

    /// Change the price of a book
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownBook` if the book is not on the shelf.
    pub fn set_book_price(&mut self, id: BookId, price: f64) -> Result<(), RegistryError> {
        let title = self.checked_book(id)?.title().to_owned();
        if let Some(book) = self.shelf.get_mut(id.index()) {
            book.set_price(price);
        }
        self.notify(&RegistryEvent::PriceChanged { title, price });
        Ok(())
    }
}

impl PartialEq for Registry {
    fn eq(&self, other: &Self) -> bool {
        self.users.len() == other.users.len()
            && self.book_count() == other.book_count()
            && self.users.iter().all(|user| other.user(user.email()) == Some(user))
            && self.catalog().all(|(book, count)| other.read_count_of(&book.key()) == Some(count))
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TomeRater: {} users, {} books.", self.users.len(), self.catalog.len())
    }
}
