//! Delimited field chains
//!
//! Helper for codecs whose bodies are flat chains of `#`-separated
//! fields, e.g. `тест#test##noun`. Implementing [`DelimitedFields`]
//! yields a full [`Codec`] through the blanket impl below.

use crate::codec::Codec;

/// Separator between fields inside a record body
pub const FIELD_SEPARATOR: char = '#';

/// Field-chain view of an entity
///
/// `to_fields` renders the entity as an ordered chain (empty fields are
/// legal anywhere, including last — the chain is joined without a
/// trailing separator). `from_fields` rebuilds the entity from the split
/// chain; `None` from either direction signals a conversion failure.
pub trait DelimitedFields: Send + Sync {
    type Entity;

    fn to_fields(&self, entity: &Self::Entity) -> Option<Vec<String>>;

    fn from_fields(&self, fields: &[&str]) -> Option<Self::Entity>;
}

impl<C: DelimitedFields + std::fmt::Debug> Codec<C::Entity> for C {
    fn serialize(&self, entity: &C::Entity) -> Option<String> {
        let fields = self.to_fields(entity)?;
        let body = fields.join(&FIELD_SEPARATOR.to_string());
        if body.trim().is_empty() {
            return None;
        }
        Some(body)
    }

    fn deserialize(&self, body: &str) -> Option<C::Entity> {
        let fields: Vec<&str> = body.trim().split(FIELD_SEPARATOR).collect();
        self.from_fields(&fields)
    }
}
