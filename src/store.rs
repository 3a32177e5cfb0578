//! Store Module
//!
//! The facade domain code talks to.
//!
//! ## Responsibilities
//! - Orchestrate fetch, persist and (de)serialization
//! - Assign monotonic ids to newly saved entities
//! - Surface every failure as a typed [`StoreError`]

use std::any::type_name;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::codec::{Codec, CodecRegistry, Entity};
use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::ids::IdAllocator;
use crate::line::parser;
use crate::line::Record;
use crate::scan::{Fetcher, Persister};

/// Record-oriented store over one flat text file
///
/// ## Concurrency Model
///
/// Every operation is self-contained: it opens its own file handle,
/// works, and closes it before returning, so no handle is held across
/// calls. The only state shared between calls is the id cache, guarded
/// by an optimistic compare-exchange loop — concurrent `save` calls for
/// new entities race safely to distinct ids. The file itself is not
/// locked against other handles or processes; truly simultaneous
/// structural writes from elsewhere can corrupt offsets, so usage is
/// assumed single-writer-at-a-time per file.
pub struct Store {
    config: Config,
    fetcher: Fetcher,
    persister: Persister,
    registry: CodecRegistry,
    ids: Arc<IdAllocator>,
}

impl Store {
    /// Create a store over `config.path` with a private id cache
    pub fn new(config: Config, registry: CodecRegistry) -> Self {
        Self::with_id_allocator(config, registry, Arc::new(IdAllocator::new()))
    }

    /// Create a store sharing `ids` with other stores
    ///
    /// Stores over the same path must share one allocator for their
    /// issued ids to stay distinct.
    pub fn with_id_allocator(
        config: Config,
        registry: CodecRegistry,
        ids: Arc<IdAllocator>,
    ) -> Self {
        let fetcher = Fetcher::new(config.path.clone(), config.newline);
        let persister = Persister::new(config.path.clone(), config.newline);
        Self {
            config,
            fetcher,
            persister,
            registry,
            ids,
        }
    }

    /// Fetch every stored entity of type `T`, in physical file order
    pub fn get_all<T: Entity + 'static>(&self) -> Result<Vec<T>> {
        let codec = self.registry.get::<T>()?;
        let fetched = self.fetcher.fetch_all()?;

        debug!(
            path = %self.config.path.display(),
            count = fetched.len(),
            "fetched all records"
        );

        fetched
            .into_iter()
            .map(|record| Self::decode(codec.as_ref(), record))
            .collect()
    }

    /// Fetch the entity stored under `id`, or `None` when absent
    pub fn get_one<T: Entity + 'static>(&self, id: i64) -> Result<Option<T>> {
        let codec = self.registry.get::<T>()?;

        let record = match self.fetcher.fetch_by_id(id)? {
            Some(record) => record,
            None => return Ok(None),
        };

        let entity = Self::decode(codec.as_ref(), record)?;
        if entity.id() != id {
            return Err(StoreError::LineFetching(format!(
                "requested id {} but deserialized entity carries id {}",
                id,
                entity.id()
            )));
        }
        Ok(Some(entity))
    }

    /// Persist `entity`, returning its (possibly freshly assigned) id
    ///
    /// An entity with id 0 is appended under the next generated id, which
    /// is also written back into the entity. A nonzero id rewrites the
    /// matching line in place; saving an id that is not in the file is a
    /// silent no-op, like [`Self::remove`].
    pub fn save<T: Entity + 'static>(&self, entity: &mut T) -> Result<i64> {
        let codec = self.registry.get::<T>()?;

        if entity.id() == 0 {
            let id = self
                .ids
                .allocate(&self.config.path, || self.fetcher.fetch_max_id())?;
            entity.set_id(id);

            let line = Self::encode(codec.as_ref(), entity)?;
            self.persister.add(&line)?;
            debug!(path = %self.config.path.display(), id, "record appended");
        } else {
            let line = Self::encode(codec.as_ref(), entity)?;
            self.persister.update(entity.id(), &line)?;
            debug!(path = %self.config.path.display(), id = entity.id(), "record updated");
        }

        Ok(entity.id())
    }

    /// Delete the record stored under `id`; a no-op when absent
    pub fn remove(&self, id: i64) -> Result<()> {
        self.persister.remove(id)?;
        debug!(path = %self.config.path.display(), id, "record removed");
        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// The store file path
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// The configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The id cache backing this store
    pub fn id_allocator(&self) -> &Arc<IdAllocator> {
        &self.ids
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn decode<T: Entity>(codec: &dyn Codec<T>, record: Record) -> Result<T> {
        let mut entity =
            codec
                .deserialize(record.body())
                .ok_or(StoreError::Deserialization {
                    type_name: type_name::<T>(),
                })?;
        entity.set_id(record.id());
        Ok(entity)
    }

    fn encode<T: Entity>(codec: &dyn Codec<T>, entity: &T) -> Result<String> {
        let body = codec.serialize(entity).ok_or(StoreError::Serialization {
            type_name: type_name::<T>(),
        })?;
        if body.trim().is_empty() {
            return Err(StoreError::Serialization {
                type_name: type_name::<T>(),
            });
        }
        Ok(parser::build_line(entity.id(), &body))
    }
}
