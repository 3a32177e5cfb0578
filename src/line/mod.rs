//! Line Format Module
//!
//! Encodes and decodes the wire format of one stored record.
//!
//! ## Wire Format
//! ```text
//! ┌─────┬──────────────┬─────┬──────────────────────────┐
//! │ "[" │ id (decimal) │ "]" │ body (opaque UTF-8 text) │
//! └─────┴──────────────┴─────┴──────────────────────────┘
//! ```
//! The id is a base-10 non-negative integer. The body is everything after
//! the first `]` and is never interpreted here; concrete codecs own its
//! internal structure. Empty and whitespace-only bodies are rejected.

pub mod parser;

use std::fmt;

/// One stored record: an id paired with its opaque body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: i64,
    body: String,
}

impl Record {
    pub fn new(id: i64, body: impl Into<String>) -> Self {
        Self {
            id,
            body: body.into(),
        }
    }

    /// The engine-assigned record id
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The codec-produced body text
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consume the record, yielding its body
    pub fn into_body(self) -> String {
        self.body
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.id, self.body)
    }
}
