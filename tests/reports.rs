//! End-to-end checks of the registry's public API and reports.

#![allow(clippy::expect_used)]

use rstest::{fixture, rstest};
use tome_rater::{Book, BookId, CatalogUpdate, Registry, RegistryConfig};

/// A registry that keeps quiet on stdout
#[fixture]
fn registry() -> Registry {
    Registry::with_config(RegistryConfig { notify_console: false, ..RegistryConfig::default() })
}

/// Read `book` `times` times, each by a fresh user
fn read_by_many(registry: &mut Registry, book: BookId, prefix: &str, times: usize) {
    for n in 0..times {
        let email = format!("{prefix}{n}@readers.org");
        registry.add_user(&format!("Reader {n}"), &email, &[book]).expect("fresh user");
    }
}

#[rstest]
fn n_most_read_books_sorts_descending(mut registry: Registry) {
    let a = registry.create_book("A", 1, 1.0);
    let b = registry.create_book("B", 2, 1.0);
    let c = registry.create_book("C", 3, 1.0);
    read_by_many(&mut registry, a, "a", 3);
    read_by_many(&mut registry, b, "b", 1);
    read_by_many(&mut registry, c, "c", 5);

    let top: Vec<(&str, u32)> = registry
        .get_n_most_read_books(2)
        .into_iter()
        .map(|(book, count)| (book.title(), count))
        .collect();
    assert_eq!(top, [("C", 5), ("A", 3)]);
    assert_eq!(registry.most_read_book().map(|(book, _)| book.title()), Some("C"));
}

#[rstest]
#[case(0, 0)]
#[case(2, 2)]
#[case(3, 3)]
#[case(10, 3)]
fn top_n_truncates_to_population(mut registry: Registry, #[case] n: usize, #[case] len: usize) {
    let books = [
        registry.create_book("A", 1, 5.0),
        registry.create_book("B", 2, 15.0),
        registry.create_book("C", 3, 10.0),
    ];
    registry.add_user("Reader", "reader@books.com", &books).expect("valid user");

    assert_eq!(registry.get_n_most_read_books(n).len(), len);
    assert_eq!(registry.get_n_most_expensive_books(n).len(), len);
    // one registered reader
    assert_eq!(registry.get_n_most_prolific_readers(n).len(), n.min(1));
}

#[rstest]
fn most_expensive_books_sorts_by_price(mut registry: Registry) {
    let books = [
        registry.create_book("Cheap", 1, 5.0),
        registry.create_book("Dear", 2, 15.0),
        registry.create_book("Middling", 3, 10.0),
    ];
    registry.add_user("Reader", "reader@books.com", &books).expect("valid user");

    let titles: Vec<&str> =
        registry.get_n_most_expensive_books(3).into_iter().map(Book::title).collect();
    assert_eq!(titles, ["Dear", "Middling", "Cheap"]);
}

#[rstest]
fn ties_keep_insertion_order(mut registry: Registry) {
    let first = registry.create_book("First", 1, 1.0);
    let second = registry.create_book("Second", 2, 1.0);
    registry.add_user("Reader", "reader@books.com", &[]).expect("valid user");
    registry.add_book_to_user(first, "reader@books.com", Some(3)).expect("known user");
    registry.add_book_to_user(second, "reader@books.com", Some(3)).expect("known user");

    let ranked: Vec<&str> =
        registry.get_n_most_read_books(2).into_iter().map(|(book, _)| book.title()).collect();
    assert_eq!(ranked, ["First", "Second"]);
    // single winners take the last of equals
    assert_eq!(registry.most_read_book().map(|(book, _)| book.title()), Some("Second"));
    assert_eq!(registry.highest_rated_book().map(Book::title), Some("Second"));
}

#[rstest]
fn highest_rated_book_skips_unrated(mut registry: Registry) {
    let rated = registry.create_book("Rated", 1, 1.0);
    let unrated = registry.create_book("Unrated", 2, 1.0);
    registry.add_user("Reader", "reader@books.com", &[unrated]).expect("valid user");
    assert_eq!(registry.highest_rated_book(), None);

    registry.add_book_to_user(rated, "reader@books.com", Some(0)).expect("known user");
    assert_eq!(registry.highest_rated_book().map(Book::title), Some("Rated"));
}

#[rstest]
fn most_positive_user_and_prolific_readers(mut registry: Registry) {
    let a = registry.create_book("A", 1, 1.0);
    let b = registry.create_book("B", 2, 1.0);
    registry.add_user("Idle", "idle@books.com", &[]).expect("valid user");
    registry.add_user("Harsh", "harsh@books.com", &[]).expect("valid user");
    registry.add_user("Kind", "kind@books.edu", &[]).expect("valid user");
    registry.add_book_to_user(a, "harsh@books.com", Some(1)).expect("known user");
    registry.add_book_to_user(b, "harsh@books.com", Some(0)).expect("known user");
    registry.add_book_to_user(a, "kind@books.edu", Some(4)).expect("known user");

    assert_eq!(registry.most_positive_user().map(|u| u.name()), Some("Kind"));
    let prolific: Vec<&str> =
        registry.get_n_most_prolific_readers(3).into_iter().map(|u| u.name()).collect();
    assert_eq!(prolific, ["Harsh", "Kind", "Idle"]);
}

#[rstest]
fn worth_sums_distinct_books(mut registry: Registry) {
    let a = registry.create_book("A", 1, 12.5);
    let b = registry.create_novel("B", "Someone", 2, 7.5);
    registry.add_user("Reader", "reader@books.com", &[a, b]).expect("valid user");
    // reading a book again does not add it twice
    registry.add_book_to_user(a, "reader@books.com", Some(4)).expect("known user");

    assert_eq!(registry.get_worth_of_user("reader@books.com"), Ok(20.0));
    assert!(registry.get_worth_of_user("ghost@books.com").is_err());
}

#[rstest]
fn collision_does_not_duplicate_isbn(mut registry: Registry) {
    let original = registry.create_book("Original", 77, 1.0);
    let clash = registry.create_book("Clash", 77, 1.0);
    registry.add_user("Reader", "reader@books.com", &[original]).expect("valid user");

    let enrollment =
        registry.add_book_to_user(clash, "reader@books.com", Some(2)).expect("known user");
    assert_eq!(enrollment.catalog, CatalogUpdate::IsbnCollision);
    assert_eq!(registry.book_count(), 1);
    assert_eq!(registry.book(clash).and_then(Book::average_rating), Some(2.0));
    assert_eq!(registry.user("reader@books.com").map(|u| u.book_count()), Some(2));
}

#[rstest]
fn configured_suffixes_apply_to_users(mut registry: Registry) {
    assert!(registry.add_user("Dev", "dev@rust.io", &[]).is_err());

    let json = r#"{"validation": {"emailSuffixes": [".io"]}, "notifyConsole": false}"#;
    let config = RegistryConfig::from_json(json).expect("valid config");
    let mut custom = Registry::with_config(config);
    assert!(custom.add_user("Dev", "dev@rust.io", &[]).is_ok());
    assert!(custom.change_user_email("dev@rust.io", "dev@rust.com").is_err());
}
