use serde::{Deserialize, Serialize};

use bookstore_core::{BookstoreError, BookstoreResult, Isbn, Money};
use bookstore_fulfillment::{Dispatch, EmailDelivery, EmailDispatch, Shipment, ShippingDispatch};

/// Discriminant of a book's format, without its substate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookKind {
    Paper,
    Ebook,
    Showcase,
}

/// Format-specific state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Format {
    /// Physical copies; available while `stock > 0`.
    Paper { stock: u32 },
    /// Unlimited digital copies in the given file type (e.g. "pdf").
    Ebook { file_type: String },
    /// Display-only item, never for sale.
    Showcase,
}

impl Format {
    pub fn kind(&self) -> BookKind {
        match self {
            Format::Paper { .. } => BookKind::Paper,
            Format::Ebook { .. } => BookKind::Ebook,
            Format::Showcase => BookKind::Showcase,
        }
    }
}

/// Attributes shared by every format, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub price: Money,
}

impl NewBook {
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        publication_year: i32,
        price: Money,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            publication_year,
            price,
        }
    }
}

/// Who gets the copies and where they go.
///
/// `quantity` is kept signed so non-positive requests can be rejected with
/// `InvalidQuantity` instead of being unrepresentable at the call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRequest {
    pub quantity: i64,
    pub email: String,
    pub address: String,
}

impl PurchaseRequest {
    pub fn new(quantity: i64, email: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            quantity,
            email: email.into(),
            address: address.into(),
        }
    }

    /// Positive quantity that fits the stock counter, or `InvalidQuantity`.
    pub fn validated_quantity(&self) -> BookstoreResult<u32> {
        if self.quantity <= 0 {
            return Err(BookstoreError::invalid_quantity(self.quantity));
        }
        u32::try_from(self.quantity).map_err(|_| BookstoreError::invalid_quantity(self.quantity))
    }
}

/// Catalog entry, identified by its isbn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    isbn: Isbn,
    title: String,
    author: String,
    publication_year: i32,
    price: Money,
    format: Format,
}

impl Book {
    pub fn paper(details: NewBook, stock: u32) -> BookstoreResult<Self> {
        Self::with_format(details, Format::Paper { stock })
    }

    /// Fails with `InvalidFileType` when `file_type` is blank.
    pub fn ebook(details: NewBook, file_type: impl Into<String>) -> BookstoreResult<Self> {
        let file_type = file_type.into();
        if file_type.trim().is_empty() {
            return Err(BookstoreError::InvalidFileType);
        }
        Self::with_format(details, Format::Ebook { file_type })
    }

    pub fn showcase(details: NewBook) -> BookstoreResult<Self> {
        Self::with_format(details, Format::Showcase)
    }

    fn with_format(details: NewBook, format: Format) -> BookstoreResult<Self> {
        let isbn = Isbn::parse(&details.isbn)?;
        Ok(Self {
            isbn,
            title: details.title,
            author: details.author,
            publication_year: details.publication_year,
            price: details.price,
            format,
        })
    }

    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn publication_year(&self) -> i32 {
        self.publication_year
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn format(&self) -> &Format {
        &self.format
    }

    pub fn kind(&self) -> BookKind {
        self.format.kind()
    }

    /// Copies on hand; `None` for formats that do not track stock.
    pub fn stock(&self) -> Option<u32> {
        match self.format {
            Format::Paper { stock } => Some(stock),
            _ => None,
        }
    }

    pub fn is_available(&self) -> bool {
        match &self.format {
            Format::Paper { stock } => *stock > 0,
            Format::Ebook { .. } => true,
            Format::Showcase => false,
        }
    }

    /// True iff `current_year - publication_year > age_limit_years`.
    pub fn is_expired(&self, current_year: i32, age_limit_years: u32) -> bool {
        i64::from(current_year) - i64::from(self.publication_year) > i64::from(age_limit_years)
    }

    /// Take copies out of the catalog and hand them to the matching collaborator.
    ///
    /// State is only mutated once every check has passed, so a failed purchase leaves
    /// the book untouched.
    pub fn purchase<S, M>(
        &mut self,
        request: &PurchaseRequest,
        shipping: &S,
        mailer: &M,
    ) -> BookstoreResult<Dispatch>
    where
        S: ShippingDispatch + ?Sized,
        M: EmailDispatch + ?Sized,
    {
        match &mut self.format {
            Format::Showcase => Err(BookstoreError::NotPurchasable {
                isbn: self.isbn.clone(),
            }),
            Format::Paper { stock } => {
                let quantity = request.validated_quantity()?;
                if quantity > *stock {
                    tracing::warn!(isbn = %self.isbn, requested = quantity, remaining = *stock, "not enough in stock");
                    return Err(BookstoreError::InsufficientStock {
                        isbn: self.isbn.clone(),
                        requested: quantity,
                        remaining: *stock,
                    });
                }
                *stock -= quantity;
                Ok(shipping.ship(Shipment {
                    isbn: self.isbn.clone(),
                    title: self.title.clone(),
                    address: request.address.clone(),
                    quantity,
                }))
            }
            Format::Ebook { .. } => {
                let quantity = request.validated_quantity()?;
                Ok(mailer.send(EmailDelivery {
                    isbn: self.isbn.clone(),
                    title: self.title.clone(),
                    email: request.email.clone(),
                    quantity,
                }))
            }
        }
    }
}

impl core::fmt::Display for Book {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} by {} ({}) - {} EGP",
            self.title, self.author, self.publication_year, self.price
        )?;
        match &self.format {
            Format::Paper { stock } => write!(f, ", Stock: {stock}"),
            Format::Ebook { file_type } => write!(f, " [Type: {file_type}]"),
            Format::Showcase => Ok(()),
        }
    }
}
