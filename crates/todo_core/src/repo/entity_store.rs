//! Generic async entity store over a key-value backend.
//!
//! # Responsibility
//! - Load and persist whole collections as JSON arrays under one key.
//! - Assign ids on create and locate entities by id for get/put/remove.
//! - Simulate network latency on every collection read.
//!
//! # Invariants
//! - A missing collection reads as empty; it is never an error.
//! - Storage is written only after the new collection is fully computed, so
//!   a failed lookup leaves the persisted collection untouched.
//! - Read-modify-write is NOT atomic. Two writes to the same key issued
//!   without awaiting the first may lose one of them; callers serialize
//!   their own writes.

use crate::config::StoreConfig;
use crate::model::entity::{Entity, EntityId};
use crate::repo::kv_storage::{KeyValueStorage, StorageError};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub type StoreResult<T> = Result<T, StoreError>;

/// Entity-store failure.
#[derive(Debug)]
pub enum StoreError {
    /// No entity with `id` exists in `collection`.
    NotFound { collection: String, id: EntityId },
    Storage(StorageError),
    /// Stored value under `collection` is not a valid entity array, or an
    /// entity could not be encoded.
    Serialization {
        collection: String,
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { collection, id } => {
                write!(f, "cannot find entity with id {id} in `{collection}`")
            }
            Self::Storage(err) => write!(f, "{err}"),
            Self::Serialization { collection, source } => {
                write!(f, "invalid stored collection `{collection}`: {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Storage(err) => Some(err),
            Self::Serialization { source, .. } => Some(source),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Collection store with simulated read latency.
pub struct EntityStore<S: KeyValueStorage> {
    storage: S,
    config: StoreConfig,
}

impl<S: KeyValueStorage> EntityStore<S> {
    /// Store with the default 200 ms read delay and 5-char ids.
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, StoreConfig::default())
    }

    pub fn with_config(storage: S, config: StoreConfig) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Loads the full collection after the configured delay.
    pub async fn query<T: Entity>(&self, collection: &str) -> StoreResult<Vec<T>> {
        self.query_with_delay(collection, self.config.list_delay)
            .await
    }

    /// Loads the full collection, then resolves after `delay`.
    ///
    /// The snapshot is taken before the delay starts.
    pub async fn query_with_delay<T: Entity>(
        &self,
        collection: &str,
        delay: Duration,
    ) -> StoreResult<Vec<T>> {
        let entities = self.load_collection(collection)?;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(entities)
    }

    /// Returns the entity with `id`.
    pub async fn get<T: Entity>(&self, collection: &str, id: &EntityId) -> StoreResult<T> {
        let entities = self.query::<T>(collection).await?;
        entities
            .into_iter()
            .find(|entity| entity.id() == id)
            .ok_or_else(|| not_found(collection, id, "get"))
    }

    /// Assigns a fresh id to `draft`, appends it and persists the collection.
    pub async fn post<T: Entity>(&self, collection: &str, draft: T::Draft) -> StoreResult<T> {
        let entity = T::from_draft(EntityId::generate(self.config.id_length), draft);
        let mut entities = self.query::<T>(collection).await?;
        entities.push(entity.clone());
        self.save_collection(collection, &entities)?;

        debug!(
            "event=entity_post module=store status=ok collection={collection} id={} size={}",
            entity.id(),
            entities.len()
        );
        Ok(entity)
    }

    /// Replaces the entity sharing `entity.id()` in place.
    pub async fn put<T: Entity>(&self, collection: &str, entity: T) -> StoreResult<T> {
        let mut entities = self.query::<T>(collection).await?;
        let index = entities
            .iter()
            .position(|existing| existing.id() == entity.id())
            .ok_or_else(|| not_found(collection, entity.id(), "put"))?;

        entities[index] = entity.clone();
        self.save_collection(collection, &entities)?;

        debug!(
            "event=entity_put module=store status=ok collection={collection} id={} index={index}",
            entity.id()
        );
        Ok(entity)
    }

    /// Deletes the entity with `id`; later entries shift left.
    pub async fn remove<T: Entity>(&self, collection: &str, id: &EntityId) -> StoreResult<()> {
        let mut entities = self.query::<T>(collection).await?;
        let index = entities
            .iter()
            .position(|existing| existing.id() == id)
            .ok_or_else(|| not_found(collection, id, "remove"))?;

        entities.remove(index);
        self.save_collection(collection, &entities)?;

        debug!(
            "event=entity_remove module=store status=ok collection={collection} id={id} size={}",
            entities.len()
        );
        Ok(())
    }

    fn load_collection<T: Entity>(&self, collection: &str) -> StoreResult<Vec<T>> {
        // Empty string is treated like a missing key.
        match self.storage.get_item(collection)? {
            Some(raw) if !raw.is_empty() => {
                serde_json::from_str(&raw).map_err(|source| StoreError::Serialization {
                    collection: collection.to_string(),
                    source,
                })
            }
            _ => Ok(Vec::new()),
        }
    }

    fn save_collection<T: Entity>(&self, collection: &str, entities: &[T]) -> StoreResult<()> {
        let raw = serde_json::to_string(entities).map_err(|source| {
            StoreError::Serialization {
                collection: collection.to_string(),
                source,
            }
        })?;
        self.storage.set_item(collection, &raw)?;
        Ok(())
    }
}

fn not_found(collection: &str, id: &EntityId, operation: &str) -> StoreError {
    warn!("event=entity_{operation} module=store status=not_found collection={collection} id={id}");
    StoreError::NotFound {
        collection: collection.to_string(),
        id: id.clone(),
    }
}
