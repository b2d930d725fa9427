//! `bookstore-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no logging setup).

pub mod error;
pub mod isbn;
pub mod money;
pub mod value_object;

pub use error::{BookstoreError, BookstoreResult};
pub use isbn::Isbn;
pub use money::{Money, TaxRate};
pub use value_object::ValueObject;
