//! Catalog domain module.
//!
//! A `Book` is one entity with three mutually exclusive formats (paper, e-book,
//! showcase). Availability, purchase behaviour and rendering differ per format;
//! the store only ever talks to `Book`.

pub mod book;

pub use book::{Book, BookKind, Format, NewBook, PurchaseRequest};
