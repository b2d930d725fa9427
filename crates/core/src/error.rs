//! Bookstore error model.

use thiserror::Error;

use crate::isbn::Isbn;

/// Result type used across the bookstore crates.
pub type BookstoreResult<T> = Result<T, BookstoreError>;

/// Bookstore-level error.
///
/// Every failure is reported to the immediate caller of the store. None of them
/// are retried internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookstoreError {
    /// The isbn was empty (or whitespace only).
    #[error("ISBN needed")]
    InvalidIsbn,

    /// An e-book was constructed without a file type.
    #[error("missing file type")]
    InvalidFileType,

    /// Purchase quantity must be strictly positive.
    #[error("invalid quantity: {quantity} (must be > 0)")]
    InvalidQuantity { quantity: i64 },

    /// A paper book does not have enough copies left.
    #[error("not enough in stock for {isbn}: requested {requested}, only {remaining} left")]
    InsufficientStock {
        isbn: Isbn,
        requested: u32,
        remaining: u32,
    },

    /// Showcase items can never be bought.
    #[error("{isbn} is just for show")]
    NotPurchasable { isbn: Isbn },

    /// No book with this isbn is in the inventory.
    #[error("book not found: {isbn}")]
    NotFound { isbn: Isbn },

    /// The book exists but is not available for purchase right now.
    #[error("cannot purchase {isbn}: not available")]
    NotAvailable { isbn: Isbn },

    /// A charge could not be represented in minor units.
    #[error("amount overflow while computing charge")]
    AmountOverflow,
}

impl BookstoreError {
    pub fn invalid_quantity(quantity: i64) -> Self {
        Self::InvalidQuantity { quantity }
    }

    pub fn not_found(isbn: Isbn) -> Self {
        Self::NotFound { isbn }
    }

    pub fn not_available(isbn: Isbn) -> Self {
        Self::NotAvailable { isbn }
    }

    /// Input failures the caller can fix by changing the request.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidIsbn | Self::InvalidFileType | Self::InvalidQuantity { .. }
        )
    }
}
