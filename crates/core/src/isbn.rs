//! Book identifier.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::BookstoreError;

/// Identifier of a catalog book.
///
/// Free-form, but never empty. Surrounding whitespace is trimmed on parse.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Isbn(String);

impl Isbn {
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, BookstoreError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(BookstoreError::InvalidIsbn);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Isbn {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Isbn {
    type Err = BookstoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Isbn {
    type Error = BookstoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Isbn> for String {
    fn from(value: Isbn) -> Self {
        value.0
    }
}

// Lets `HashMap<Isbn, _>` be queried with `&str`; hashing matches `str`.
impl core::borrow::Borrow<str> for Isbn {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Isbn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
