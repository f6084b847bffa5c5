//! Last-response cache keyed by [`Slot`].
//!
//! One request fetches from the recipe API and stores the result set here;
//! a later request reads it back to render a list or a details view.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::db::CacheStore;
use crate::domain::Slot;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Failed to encode payload for slot {slot}: {source}")]
    Encode {
        slot: Slot,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cache storage error: {0}")]
    Storage(String),
}

#[derive(Clone)]
pub struct ResponseCache {
    store: CacheStore,
}

impl ResponseCache {
    #[must_use]
    pub const fn new(store: CacheStore) -> Self {
        Self { store }
    }

    /// Replaces whatever `slot` held with `payload`.
    pub async fn put<T: Serialize + ?Sized>(&self, slot: Slot, payload: &T) -> Result<(), CacheError> {
        let json = serde_json::to_string(payload).map_err(|source| {
            error!(slot = %slot, error = %source, "Failed to encode cache payload");
            CacheError::Encode { slot, source }
        })?;

        self.store
            .put_payload(slot.as_str(), json)
            .await
            .map_err(|e| {
                error!(slot = %slot, error = %e, "Failed to write cache slot");
                CacheError::Storage(e.to_string())
            })?;

        debug!(slot = %slot, "Cache slot updated");
        Ok(())
    }

    /// Reads `slot` back as `T`.
    ///
    /// Missing slots, storage failures and payloads that no longer decode as
    /// `T` all read as `None`.
    pub async fn get<T: DeserializeOwned>(&self, slot: Slot) -> Option<T> {
        let raw = match self.store.get_payload(slot.as_str()).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                error!(slot = %slot, error = %e, "Failed to read cache slot");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(slot = %slot, error = %e, "Cached payload has an unexpected shape");
                None
            }
        }
    }

    /// Drops every slot. Returns the number of entries removed.
    pub async fn clear(&self) -> Result<u64, CacheError> {
        let removed = self.store.clear().await.map_err(|e| {
            error!(error = %e, "Failed to clear response cache");
            CacheError::Storage(e.to_string())
        })?;

        debug!(removed, "Response cache cleared");
        Ok(removed)
    }
}
