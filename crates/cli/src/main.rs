//! Demonstration driver: seeds a store with sample books and walks through the
//! main operations, narrating each step on stdout.

use anyhow::{Context, bail};

use bookstore_catalog::{Book, NewBook, PurchaseRequest};
use bookstore_core::{BookstoreError, Money};
use bookstore_inventory::{AddOutcome, Bookstore, Listing, StoreConfig};

const PREFIX: &str = "Quantum book store:";
const AGE_LIMIT_YEARS: u32 = 10;

fn main() -> anyhow::Result<()> {
    bookstore_observability::init_with_default("warn");

    let config = StoreConfig::from_env();
    tracing::info!(tax_rate = %config.tax_rate, current_year = config.current_year, "starting demo");

    let mut store = Bookstore::new(config);

    for book in sample_books()? {
        let title = book.title().to_string();
        match store.add(book) {
            AddOutcome::Added => println!("{PREFIX} Book added - {title}"),
            AddOutcome::AlreadyPresent => println!("{PREFIX} Book already there - {title}"),
        }
    }

    print_inventory(&store);

    buy(&mut store, "P1", PurchaseRequest::new(2, "ahmed@a.com", "Alexandria"))?;
    buy(&mut store, "E1", PurchaseRequest::new(1, "fatma@b.com", "Cairo"))?;

    match store.purchase("S1", &PurchaseRequest::new(1, "demo@demo.com", "Zamalek")) {
        Err(BookstoreError::NotAvailable { .. } | BookstoreError::NotPurchasable { .. }) => {
            println!("{PREFIX} As expected, can't buy showcase.");
        }
        Err(other) => return Err(other).context("showcase purchase failed unexpectedly"),
        Ok(receipt) => bail!("showcase book was sold: {receipt:?}"),
    }

    for isbn in store.remove_expired(AGE_LIMIT_YEARS) {
        println!("{PREFIX} Removed outdated - {isbn}");
    }

    print_inventory(&store);
    Ok(())
}

fn sample_books() -> anyhow::Result<Vec<Book>> {
    let books = vec![
        Book::paper(
            NewBook::new("P1", "Java 101", "Salma Nabil", 2020, Money::from_major(200)),
            6,
        )?,
        Book::ebook(
            NewBook::new("E1", "Microservices Intro", "Mohamed Tarek", 2021, Money::from_major(180)),
            "pdf",
        )?,
        Book::showcase(NewBook::new(
            "S1",
            "Architecture Visuals",
            "Abdulrahman Shalan",
            2023,
            Money::from_major(500),
        ))?,
        Book::paper(
            NewBook::new("P2", "Old School Code", "Omar Galal", 2008, Money::from_major(90)),
            2,
        )?,
    ];
    Ok(books)
}

fn print_inventory(store: &Bookstore) {
    match store.list_all() {
        Listing::Empty => println!("{PREFIX} Inventory is empty!"),
        Listing::Books(lines) => {
            for line in lines {
                println!("{PREFIX} {line}");
            }
        }
    }
}

fn buy(store: &mut Bookstore, isbn: &str, request: PurchaseRequest) -> anyhow::Result<()> {
    let receipt = store
        .purchase(isbn, &request)
        .with_context(|| format!("purchase of {isbn} failed"))?;
    println!(
        "{PREFIX} Done Paid: {} EGP for {} x {} (dispatch {})",
        receipt.amount_charged, receipt.quantity, receipt.isbn, receipt.dispatch.id
    );
    Ok(())
}
