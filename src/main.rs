use std::error::Error;

use clap::Parser;
use colored::Colorize;
use tome_rater::{BookId, Listing, Registry, RegistryConfig};
use tracing::Level;

/// Command-line arguments for the TomeRater demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log catalog bookkeeping as well as changes
    #[arg(short, long)]
    verbose: bool,

    /// How many entries the ranked reports keep
    #[arg(short, long, default_value_t = 3)]
    top: usize,

    /// Print the report summary as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Do not print user-facing notices while populating
    #[arg(short, long)]
    quiet: bool,
}

/// Handles to the sample books
struct Shelf {
    /// Fiction
    alice: BookId,
    /// Fiction
    dune: BookId,
    /// Fiction
    neuromancer: BookId,
    /// Non-fiction
    automate: BookId,
    /// Non-fiction
    hacking: BookId,
    /// General
    society: BookId,
    /// Same isbn as `alice`, different title
    impostor: BookId,
}

/// Create the sample books without cataloguing them
fn stock_shelf(registry: &mut Registry) -> Shelf {
    Shelf {
        alice: registry.create_novel("Alice In Wonderland", "Lewis Carroll", 12345, 8.0),
        dune: registry.create_novel("Dune", "Frank Herbert", 33_312_555, 14.5),
        neuromancer: registry.create_novel("Neuromancer", "William Gibson", 9_780_441, 11.0),
        automate: registry.create_non_fiction(
            "Automate the Boring Stuff",
            "python",
            "beginner",
            1_929_452,
            29.0,
        ),
        hacking: registry.create_non_fiction(
            "Hacking: The Art of Exploitation",
            "security",
            "advanced",
            1_593_270,
            45.5,
        ),
        society: registry.create_book("Society of Mind", 12_345_678, 20.0),
        impostor: registry.create_book("Alice Through the Looking Glass", 12345, 9.0),
    }
}

/// Register readers and their reading, including a few refused operations
fn populate(registry: &mut Registry, shelf: &Shelf) {
    let readers = [
        ("Alan Turing", "alan@turing.com", vec![shelf.society, shelf.automate]),
        ("David Marr", "david@computation.org", vec![]),
        ("Marie Curie", "marie@curie.edu", vec![shelf.hacking]),
        ("Nobody", "nobody-at-all", vec![]),
    ];
    for (name, email, books) in readers {
        if let Err(err) = registry.add_user(name, email, &books) {
            tracing::debug!(%err, "sample user skipped");
        }
    }

    let reads = [
        (shelf.alice, "alan@turing.com", Some(3)),
        (shelf.alice, "marie@curie.edu", Some(4)),
        (shelf.dune, "david@computation.org", Some(4)),
        (shelf.dune, "alan@turing.com", Some(2)),
        (shelf.neuromancer, "david@computation.org", Some(9)),
        (shelf.automate, "marie@curie.edu", Some(1)),
        (shelf.impostor, "david@computation.org", Some(3)),
        (shelf.dune, "ghost@nowhere.com", None),
    ];
    for (book, email, rating) in reads {
        if let Err(err) = registry.add_book_to_user(book, email, rating) {
            tracing::debug!(%err, "sample read skipped");
        }
    }

    if let Err(err) = registry.change_user_email("david@computation.org", "david@marr.org") {
        tracing::debug!(%err, "email change skipped");
    }
    if let Err(err) = registry.set_book_price(shelf.hacking, 39.99) {
        tracing::debug!(%err, "price change skipped");
    }
}

/// Print every report as coloured text
fn print_reports(registry: &Registry, top: usize) -> Result<(), Box<dyn Error>> {
    println!("\n{}", registry.to_string().green().bold());

    println!("\n{}", "Catalog".yellow().bold());
    Listing::print_catalog(registry)?;

    println!("\n{}", "Users".yellow().bold());
    Listing::print_users(registry)?;

    println!("\n{}", "Reports".yellow().bold());
    if let Some((book, count)) = registry.most_read_book() {
        println!("Most read book: {book} ({count} reads)");
    }
    if let Some(book) = registry.highest_rated_book() {
        println!("Highest rated book: {book}");
    }
    if let Some(user) = registry.most_positive_user() {
        println!("Most positive user: {user}");
    }

    println!("\nTop {top} most read:");
    for (book, count) in registry.get_n_most_read_books(top) {
        println!("  {book}: {count}");
    }
    println!("Top {top} most expensive:");
    for book in registry.get_n_most_expensive_books(top) {
        println!("  {book}: {:.2}", book.price());
    }
    println!("Top {top} most prolific readers:");
    for user in registry.get_n_most_prolific_readers(top) {
        let worth = registry.get_worth_of_user(user.email())?;
        println!("  {user} (worth {worth:.2})");
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

    let config =
        RegistryConfig { notify_console: !args.quiet && !args.json, ..RegistryConfig::default() };
    let mut registry = Registry::with_config(config);
    let shelf = stock_shelf(&mut registry);
    populate(&mut registry, &shelf);

    if args.json {
        let summary = Listing::summary(&registry, args.top);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_reports(&registry, args.top)?;
    }
    Ok(())
}
