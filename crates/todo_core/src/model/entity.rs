//! Generic entity contract and identifier generation.
//!
//! # Responsibility
//! - Describe what the entity store needs from a record type.
//! - Generate short opaque ids from the `[A-Za-z0-9]` alphabet.
//!
//! # Invariants
//! - Generated ids have exactly the requested length (minimum 1).
//! - No collision check is performed; uniqueness is probabilistic.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Alphabet used for generated ids.
pub const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Default length for generated ids.
pub const DEFAULT_ID_LENGTH: usize = 5;

// Largest multiple of the alphabet size below 256; bytes above it are
// rejected so every symbol is equally likely.
const UNBIASED_BYTE_LIMIT: u8 = (256 / ID_ALPHABET.len() * ID_ALPHABET.len()) as u8;

/// Opaque identifier assigned by the entity store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generates a fresh random id of `length` alphanumeric characters.
    ///
    /// Randomness comes from v4 UUID bytes, skipping the version and
    /// variant bytes which are not uniformly distributed.
    pub fn generate(length: usize) -> Self {
        let length = length.max(1);
        let mut text = String::with_capacity(length);

        while text.len() < length {
            let random = Uuid::new_v4().into_bytes();
            for (index, byte) in random.iter().enumerate() {
                if index == 6 || index == 8 || *byte >= UNBIASED_BYTE_LIMIT {
                    continue;
                }
                text.push(char::from(ID_ALPHABET[usize::from(*byte) % ID_ALPHABET.len()]));
                if text.len() == length {
                    break;
                }
            }
        }

        Self(text)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl PartialEq<str> for EntityId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EntityId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Record type that can live in an entity-store collection.
///
/// `Draft` is the "partial entity" accepted by create: every field except
/// the id, which the store assigns.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync {
    type Draft: Send;

    fn id(&self) -> &EntityId;

    /// Completes a draft with the id chosen by the store.
    fn from_draft(id: EntityId, draft: Self::Draft) -> Self;
}
