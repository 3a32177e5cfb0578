//! Codec registry
//!
//! Type-keyed directory of codecs. The registration key is the entity
//! type's identity, so no two codecs can serve the same type.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::codec::Codec;
use crate::error::{Result, StoreError};

/// Directory of codecs keyed by entity type
#[derive(Default)]
pub struct CodecRegistry {
    codecs: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl CodecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the codec for entity type `T`
    ///
    /// Fails with `CodecAlreadyRegistered` when `T` already has one.
    pub fn register<T: 'static>(&mut self, codec: impl Codec<T> + 'static) -> Result<()> {
        let key = TypeId::of::<T>();
        if self.codecs.contains_key(&key) {
            return Err(StoreError::CodecAlreadyRegistered {
                type_name: std::any::type_name::<T>(),
            });
        }

        let shared: Arc<dyn Codec<T>> = Arc::new(codec);
        self.codecs.insert(key, Box::new(shared));
        Ok(())
    }

    /// Resolve the codec for entity type `T`
    ///
    /// Fails with `CodecNotRegistered` when none was registered.
    pub fn get<T: 'static>(&self) -> Result<Arc<dyn Codec<T>>> {
        self.codecs
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<Arc<dyn Codec<T>>>())
            .cloned()
            .ok_or(StoreError::CodecNotRegistered {
                type_name: std::any::type_name::<T>(),
            })
    }

    /// Number of registered codecs
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}
