//! Scan Module
//!
//! Linear-scan operators over the store file.
//!
//! ## Responsibilities
//! - Read-only fetches: all records, first record by id, running max-id
//! - Mutations: append a line, locate-then-update/remove a line by id
//! - One shared scan loop driven by data-only predicates
//!
//! ## Scan Loop
//! ```text
//! open ──▶ read_line ──▶ blank? skip ──▶ parse id/body ──▶ predicate
//!             ▲                                               │
//!             └──────────────── not complete ◀────────────────┘
//!                                (close on every exit path)
//! ```
//! Every operator opens its own accessor, works, and closes it within a
//! single call; no handle survives across calls.

mod fetcher;
mod persister;
mod predicate;

pub use fetcher::Fetcher;
pub use persister::Persister;
pub(crate) use predicate::{ScanOutcome, ScanPredicate};
