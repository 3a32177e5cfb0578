//! # linestore
//!
//! A minimal record-oriented storage engine persisting typed entities as
//! single text lines inside a flat file, with:
//! - Byte-accurate, line-addressable file access (forward/backward
//!   seeking, in-place variable-length replacement)
//! - Scan-based fetch and persist operators with early-exit predicates
//! - A type-keyed codec registry for string⇄entity conversion
//! - CRUD semantics with monotonic, scan-seeded id assignment
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Store (facade)                        │
//! │            get_all / get_one / save / remove                 │
//! └───────┬─────────────────┬───────────────────┬───────────────┘
//!         │                 │                   │
//!         ▼                 ▼                   ▼
//!  ┌─────────────┐   ┌─────────────┐     ┌─────────────┐
//!  │   Fetcher   │   │  Persister  │     │ IdAllocator │
//!  │  (scans)    │   │ (mutations) │     │ (CAS cache) │
//!  └──────┬──────┘   └──────┬──────┘     └─────────────┘
//!         │                 │
//!         ▼                 ▼
//!  ┌─────────────────────────────┐   ┌──────────────────┐
//!  │      TextFileAccessor       │   │  CodecRegistry   │
//!  │  (byte/line arithmetic)     │   │ (string⇄entity)  │
//!  └─────────────┬───────────────┘   └──────────────────┘
//!                ▼
//!         one flat text file, `[id]body` per line
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod accessor;
pub mod line;
pub mod scan;
pub mod codec;
pub mod ids;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StoreError};
pub use config::{Config, Newline};
pub use accessor::TextFileAccessor;
pub use line::Record;
pub use codec::{Codec, CodecRegistry, DelimitedFields, Entity, FIELD_SEPARATOR};
pub use ids::IdAllocator;
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of linestore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
