//! Inventory store.
//!
//! Owns every book keyed by isbn and orchestrates add, listing, purchase (charge
//! computation + delegation to the book) and age-based pruning. Single owner, no
//! interior locking: share it across threads only behind an external mutex.

pub mod config;
pub mod store;

pub use config::{DEFAULT_TAX_RATE, StoreConfig};
pub use store::{AddOutcome, Bookstore, Listing, PurchaseReceipt};
