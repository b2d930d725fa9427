use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use bookstore_catalog::{Book, PurchaseRequest};
use bookstore_core::{BookstoreError, BookstoreResult, Isbn, Money};
use bookstore_fulfillment::{
    Dispatch, EmailDispatch, LoggingMailer, LoggingShipping, ShippingDispatch,
};

use crate::config::StoreConfig;

/// Result of `Bookstore::add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// A book with the same isbn was already stocked; nothing changed.
    AlreadyPresent,
}

/// Result of `Bookstore::list_all`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Empty,
    /// Book descriptions, ordered by isbn.
    Books(Vec<String>),
}

impl Listing {
    pub fn len(&self) -> usize {
        match self {
            Listing::Empty => 0,
            Listing::Books(lines) => lines.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Listing::Empty)
    }
}

/// What a successful purchase charged and how it left the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub isbn: Isbn,
    pub quantity: u32,
    /// `price * quantity * (1 + tax_rate)`.
    pub amount_charged: Money,
    pub dispatch: Dispatch,
}

/// In-memory inventory keyed by isbn.
#[derive(Debug)]
pub struct Bookstore<S = LoggingShipping, M = LoggingMailer> {
    books: HashMap<Isbn, Book>,
    shipping: S,
    mailer: M,
    config: StoreConfig,
}

impl Bookstore {
    /// Empty store using the logging stub collaborators.
    pub fn new(config: StoreConfig) -> Self {
        Self::with_collaborators(config, LoggingShipping, LoggingMailer)
    }
}

impl Default for Bookstore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl<S, M> Bookstore<S, M>
where
    S: ShippingDispatch,
    M: EmailDispatch,
{
    pub fn with_collaborators(config: StoreConfig, shipping: S, mailer: M) -> Self {
        Self {
            books: HashMap::new(),
            shipping,
            mailer,
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, isbn: &str) -> Option<&Book> {
        self.books.get(isbn.trim())
    }

    pub fn contains(&self, isbn: &str) -> bool {
        self.books.contains_key(isbn.trim())
    }

    /// Insert `book` unless its isbn is already stocked. Never overwrites.
    pub fn add(&mut self, book: Book) -> AddOutcome {
        if self.books.contains_key(book.isbn()) {
            tracing::warn!(isbn = %book.isbn(), "book already there - {}", book.title());
            return AddOutcome::AlreadyPresent;
        }
        tracing::info!(isbn = %book.isbn(), kind = ?book.kind(), "book added - {}", book.title());
        self.books.insert(book.isbn().clone(), book);
        AddOutcome::Added
    }

    pub fn list_all(&self) -> Listing {
        if self.books.is_empty() {
            tracing::info!("inventory is empty");
            return Listing::Empty;
        }
        let mut books: Vec<&Book> = self.books.values().collect();
        books.sort_by(|a, b| a.isbn().cmp(b.isbn()));
        Listing::Books(books.into_iter().map(ToString::to_string).collect())
    }

    /// Buy `request.quantity` copies of `isbn`.
    ///
    /// Checks run in order: isbn present (`NotFound`), book available
    /// (`NotAvailable`), then the book's own purchase rules. The charge is computed
    /// before the book is touched, so every failure leaves the store unchanged.
    pub fn purchase(
        &mut self,
        isbn: &str,
        request: &PurchaseRequest,
    ) -> BookstoreResult<PurchaseReceipt> {
        let isbn = Isbn::parse(isbn)?;
        let tax_rate = self.config.tax_rate;

        let Some(book) = self.books.get_mut(&isbn) else {
            tracing::warn!(isbn = %isbn, "sorry, book not found");
            return Err(BookstoreError::not_found(isbn));
        };
        if !book.is_available() {
            tracing::warn!(isbn = %isbn, kind = ?book.kind(), "cannot purchase this book");
            return Err(BookstoreError::not_available(isbn));
        }

        let quantity = request.validated_quantity()?;
        let amount_charged = tax_rate.apply(book.price().times(quantity)?)?;

        let dispatch = book
            .purchase(request, &self.shipping, &self.mailer)
            .inspect_err(|err| tracing::warn!(isbn = %isbn, "purchase failed: {err}"))?;

        tracing::info!(isbn = %isbn, quantity, amount = %amount_charged, "done, paid {amount_charged} EGP");
        Ok(PurchaseReceipt {
            isbn,
            quantity,
            amount_charged,
            dispatch,
        })
    }

    /// Prune books older than `age_limit_years` relative to the configured year.
    pub fn remove_expired(&mut self, age_limit_years: u32) -> Vec<Isbn> {
        self.remove_expired_as_of(age_limit_years, self.config.current_year)
    }

    /// Remove every book with `current_year - publication_year > age_limit_years`.
    ///
    /// Returns the removed isbns in order. The map is scanned first and only mutated
    /// afterwards.
    pub fn remove_expired_as_of(&mut self, age_limit_years: u32, current_year: i32) -> Vec<Isbn> {
        let mut expired: Vec<Isbn> = self
            .books
            .values()
            .filter(|book| book.is_expired(current_year, age_limit_years))
            .map(|book| book.isbn().clone())
            .collect();
        expired.sort();

        for isbn in &expired {
            if let Some(book) = self.books.remove(isbn) {
                tracing::info!(isbn = %isbn, year = book.publication_year(), "removed outdated - {}", book.title());
            }
        }
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_catalog::NewBook;
    use bookstore_core::TaxRate;
    use bookstore_fulfillment::{Channel, RecordingMailer, RecordingShipping};
    use std::sync::Arc;

    type TestStore = Bookstore<Arc<RecordingShipping>, Arc<RecordingMailer>>;

    fn test_config() -> StoreConfig {
        StoreConfig::default().with_current_year(2024)
    }

    fn test_store() -> (TestStore, Arc<RecordingShipping>, Arc<RecordingMailer>) {
        let shipping = Arc::new(RecordingShipping::new());
        let mailer = Arc::new(RecordingMailer::new());
        let store =
            Bookstore::with_collaborators(test_config(), Arc::clone(&shipping), Arc::clone(&mailer));
        (store, shipping, mailer)
    }

    fn paper(isbn: &str, year: i32, price: u32, stock: u32) -> Book {
        Book::paper(
            NewBook::new(isbn, format!("Paper {isbn}"), "Salma Nabil", year, Money::from_major(price)),
            stock,
        )
        .unwrap()
    }

    fn ebook(isbn: &str, year: i32, price: u32) -> Book {
        Book::ebook(
            NewBook::new(isbn, format!("Ebook {isbn}"), "Mohamed Tarek", year, Money::from_major(price)),
            "pdf",
        )
        .unwrap()
    }

    fn showcase(isbn: &str, year: i32, price: u32) -> Book {
        Book::showcase(NewBook::new(
            isbn,
            format!("Showcase {isbn}"),
            "Abdulrahman Shalan",
            year,
            Money::from_major(price),
        ))
        .unwrap()
    }

    fn request(quantity: i64) -> PurchaseRequest {
        PurchaseRequest::new(quantity, "ahmed@a.com", "Alexandria")
    }

    #[test]
    fn add_then_list() {
        let (mut store, _, _) = test_store();
        assert_eq!(store.list_all(), Listing::Empty);

        assert_eq!(store.add(paper("P1", 2020, 200, 6)), AddOutcome::Added);
        assert_eq!(store.add(ebook("E1", 2021, 180)), AddOutcome::Added);
        assert_eq!(store.add(showcase("S1", 2023, 500)), AddOutcome::Added);

        match store.list_all() {
            Listing::Books(lines) => {
                assert_eq!(lines.len(), 3);
                assert_eq!(lines[0], "Ebook E1 by Mohamed Tarek (2021) - 180.00 EGP [Type: pdf]");
                assert_eq!(lines[1], "Paper P1 by Salma Nabil (2020) - 200.00 EGP, Stock: 6");
                assert_eq!(lines[2], "Showcase S1 by Abdulrahman Shalan (2023) - 500.00 EGP");
            }
            Listing::Empty => panic!("Expected books"),
        }
    }

    #[test]
    fn duplicate_add_keeps_original() {
        let (mut store, _, _) = test_store();
        store.add(paper("P1", 2020, 200, 6));

        let outcome = store.add(paper("P1", 1999, 10, 1));

        assert_eq!(outcome, AddOutcome::AlreadyPresent);
        assert_eq!(store.len(), 1);
        let kept = store.get("P1").unwrap();
        assert_eq!(kept.price(), Money::from_major(200));
        assert_eq!(kept.stock(), Some(6));
    }

    #[test]
    fn paper_purchase_charges_tax_and_ships() {
        let (mut store, shipping, mailer) = test_store();
        store.add(paper("P1", 2020, 200, 6));

        let receipt = store.purchase("P1", &request(2)).unwrap();

        assert_eq!(receipt.amount_charged, Money::from_major(456));
        assert_eq!(receipt.quantity, 2);
        assert_eq!(receipt.dispatch.channel, Channel::Shipping);
        assert_eq!(store.get("P1").unwrap().stock(), Some(4));
        assert_eq!(shipping.count(), 1);
        assert_eq!(shipping.dispatches()[0].id, receipt.dispatch.id);
        assert_eq!(mailer.count(), 0);
    }

    #[test]
    fn ebook_purchase_emails() {
        let (mut store, shipping, mailer) = test_store();
        store.add(ebook("E1", 2021, 180));

        let receipt = store
            .purchase("E1", &PurchaseRequest::new(1, "fatma@b.com", "Cairo"))
            .unwrap();

        // 180.00 * 1.14
        assert_eq!(receipt.amount_charged, Money::from_minor(20_520));
        assert_eq!(receipt.dispatch.channel, Channel::Email);
        assert_eq!(mailer.deliveries()[0].email, "fatma@b.com");
        assert_eq!(shipping.count(), 0);
    }

    #[test]
    fn configured_tax_rate_is_used() {
        let mut store = Bookstore::with_collaborators(
            test_config().with_tax_rate(TaxRate::from_basis_points(0)),
            RecordingShipping::new(),
            RecordingMailer::new(),
        );
        store.add(paper("P1", 2020, 200, 6));

        let receipt = store.purchase("P1", &request(3)).unwrap();
        assert_eq!(receipt.amount_charged, Money::from_major(600));
    }

    #[test]
    fn missing_isbn_is_not_found_and_changes_nothing() {
        let (mut store, shipping, mailer) = test_store();
        store.add(paper("P1", 2020, 200, 6));
        let before = store.list_all();

        let err = store.purchase("NOPE", &request(1)).unwrap_err();

        assert_eq!(err, BookstoreError::not_found(Isbn::parse("NOPE").unwrap()));
        assert_eq!(store.list_all(), before);
        assert_eq!(shipping.count() + mailer.count(), 0);
    }

    #[test]
    fn empty_isbn_lookup_is_invalid() {
        let (mut store, _, _) = test_store();
        assert_eq!(
            store.purchase("", &request(1)).unwrap_err(),
            BookstoreError::InvalidIsbn
        );
    }

    #[test]
    fn showcase_is_not_available() {
        let (mut store, _, _) = test_store();
        store.add(showcase("S1", 2023, 500));

        let err = store.purchase("S1", &request(1)).unwrap_err();
        assert!(matches!(err, BookstoreError::NotAvailable { .. }));
    }

    #[test]
    fn sold_out_paper_is_not_available() {
        let (mut store, _, _) = test_store();
        store.add(paper("P2", 2008, 90, 2));
        store.purchase("P2", &request(2)).unwrap();

        let err = store.purchase("P2", &request(1)).unwrap_err();
        assert!(matches!(err, BookstoreError::NotAvailable { .. }));
    }

    #[test]
    fn book_failures_propagate_and_leave_stock() {
        let (mut store, shipping, _) = test_store();
        store.add(paper("P2", 2008, 90, 2));

        let err = store.purchase("P2", &request(5)).unwrap_err();
        assert!(matches!(
            err,
            BookstoreError::InsufficientStock { remaining: 2, requested: 5, .. }
        ));

        let err = store.purchase("P2", &request(0)).unwrap_err();
        assert_eq!(err, BookstoreError::invalid_quantity(0));

        assert_eq!(store.get("P2").unwrap().stock(), Some(2));
        assert_eq!(shipping.count(), 0);
    }

    #[test]
    fn overflowing_charge_fails_before_stock_moves() {
        let (mut store, shipping, _) = test_store();
        let pricey = Book::paper(
            NewBook::new("X1", "Pricey", "Nobody", 2024, Money::from_minor(u64::MAX / 2)),
            10,
        )
        .unwrap();
        store.add(pricey);

        let err = store.purchase("X1", &request(3)).unwrap_err();
        assert_eq!(err, BookstoreError::AmountOverflow);
        assert_eq!(store.get("X1").unwrap().stock(), Some(10));
        assert_eq!(shipping.count(), 0);
    }

    #[test]
    fn remove_expired_prunes_old_books_only() {
        let (mut store, _, _) = test_store();
        store.add(paper("P1", 2020, 200, 6));
        store.add(paper("P2", 2008, 90, 2));
        store.add(ebook("E1", 2014, 180));

        let removed = store.remove_expired(10);

        assert_eq!(removed, vec![Isbn::parse("P2").unwrap()]);
        assert!(store.contains("P1"));
        assert!(store.contains("E1"));
        assert!(!store.contains("P2"));

        assert!(store.remove_expired(10).is_empty());
    }

    #[test]
    fn remove_expired_as_of_uses_given_year() {
        let (mut store, _, _) = test_store();
        store.add(paper("P1", 2020, 200, 6));

        assert!(store.remove_expired_as_of(10, 2030).is_empty());
        assert_eq!(store.remove_expired_as_of(10, 2031).len(), 1);
        assert!(store.is_empty());
        assert_eq!(store.list_all(), Listing::Empty);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::BTreeSet;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: N adds with unique isbns list exactly N books.
            #[test]
            fn unique_adds_are_all_listed(isbns in prop::collection::btree_set("[A-Z][0-9]{1,6}", 1..40)) {
                let (mut store, _, _) = test_store();
                for isbn in &isbns {
                    prop_assert_eq!(store.add(showcase(isbn, 2020, 1)), AddOutcome::Added);
                }
                prop_assert_eq!(store.list_all().len(), isbns.len());
            }

            /// Property: a purchase within stock charges `price * q * 1.14` and moves
            /// stock by exactly `q`.
            #[test]
            fn paper_charge_matches_formula(price in 0u32..100_000, stock in 1u32..1_000, q in 1i64..1_000) {
                let (mut store, _, _) = test_store();
                store.add(paper("P1", 2020, price, stock));

                let result = store.purchase("P1", &request(q));
                if q <= i64::from(stock) {
                    let receipt = result.unwrap();
                    // price is whole EGP, so price * q * 114 piastres is exact.
                    let expected = u64::from(price) * q as u64 * 114;
                    prop_assert_eq!(receipt.amount_charged, Money::from_minor(expected));
                    prop_assert_eq!(store.get("P1").unwrap().stock(), Some(stock - q as u32));
                } else {
                    prop_assert!(result.is_err());
                    prop_assert_eq!(store.get("P1").unwrap().stock(), Some(stock));
                }
            }

            /// Property: pruning removes exactly the expired books and is idempotent.
            #[test]
            fn pruning_partitions_by_age(
                years in prop::collection::vec(1950i32..2030, 0..40),
                limit in 0u32..50,
                now in 2000i32..2050,
            ) {
                let (mut store, _, _) = test_store();
                let mut expected_removed = BTreeSet::new();
                let mut expected_kept = BTreeSet::new();
                for (i, year) in years.iter().enumerate() {
                    let isbn = format!("B{i}");
                    if now - year > limit as i32 {
                        expected_removed.insert(isbn.clone());
                    } else {
                        expected_kept.insert(isbn.clone());
                    }
                    store.add(ebook(&isbn, *year, 10));
                }

                let removed: BTreeSet<String> = store
                    .remove_expired_as_of(limit, now)
                    .into_iter()
                    .map(String::from)
                    .collect();
                prop_assert_eq!(&removed, &expected_removed);
                for isbn in &expected_kept {
                    prop_assert!(store.contains(isbn));
                }
                prop_assert!(store.remove_expired_as_of(limit, now).is_empty());
                prop_assert_eq!(store.len(), expected_kept.len());
            }
        }
    }
}
