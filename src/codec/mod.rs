//! Codec Module
//!
//! Contracts between the storage engine and domain entity types, plus the
//! type-keyed registry resolving them.
//!
//! ## Responsibilities
//! - `Entity`: the id contract every stored type exposes
//! - `Codec`: bidirectional string⇄entity conversion
//! - `CodecRegistry`: one codec per logical type, no duplicates
//! - `DelimitedFields`: helper for `#`-joined field-chain bodies

mod delimited;
mod registry;

pub use delimited::{DelimitedFields, FIELD_SEPARATOR};
pub use registry::CodecRegistry;

/// Contract every stored entity type fulfils
///
/// The id is engine-assigned; 0 means "not yet stored".
pub trait Entity {
    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);
}

/// Bidirectional converter between an entity and its body text
///
/// `None` from either direction signals a conversion failure; the facade
/// surfaces it as a typed serialization/deserialization error. The body
/// never includes the `[id]` prefix — the engine owns that.
pub trait Codec<T>: Send + Sync + std::fmt::Debug {
    fn serialize(&self, entity: &T) -> Option<String>;

    fn deserialize(&self, body: &str) -> Option<T>;
}
