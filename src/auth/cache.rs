//! Credential cache
//!
//! Holds one bearer credential per client instance. Reads of a fresh
//! credential only take the shared read lock. Refreshers serialize on a
//! separate lock and re-check the cache once they hold it, so concurrent
//! callers arriving during a refresh share the single fetched credential.
//! A credential installed while a caller waited is taken as-is, even when
//! its lifetime is shorter than the expiry margin.

use super::types::Credential;
use crate::error::Result;
use std::future::Future;
use std::sync::PoisonError;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

#[derive(Default)]
struct Slot {
    credential: Option<Credential>,
    /// Bumped on every install
    generation: u64,
}

impl Slot {
    fn fresh(&self) -> Option<Credential> {
        self.credential.as_ref().filter(|c| !c.is_expired()).cloned()
    }

    /// Fresh credential, or the one installed since `seen`
    fn usable_since(&self, seen: u64) -> Option<Credential> {
        if self.generation != seen {
            if let Some(credential) = &self.credential {
                return Some(credential.clone());
            }
        }
        self.fresh()
    }

    fn install(&mut self, credential: Credential) {
        self.credential = Some(credential);
        self.generation = self.generation.wrapping_add(1);
    }
}

/// Async credential cache
#[derive(Default)]
pub struct TokenCache {
    current: RwLock<Slot>,
    refresh: Mutex<()>,
}

impl TokenCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached credential, or fetch and store a new one
    pub async fn get_or_refresh<F, Fut>(&self, fetch_new: F) -> Result<Credential>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Credential>>,
    {
        let seen = {
            let slot = self.current.read().await;
            if let Some(credential) = slot.fresh() {
                return Ok(credential);
            }
            slot.generation
        };

        let _refreshing = self.refresh.lock().await;

        // Another task may have refreshed while we waited
        if let Some(credential) = self.current.read().await.usable_since(seen) {
            return Ok(credential);
        }

        debug!("Fetching new bearer credential");
        let credential = fetch_new().await?;
        self.current.write().await.install(credential.clone());
        Ok(credential)
    }

    /// Cached credential, if any, regardless of expiry
    pub async fn current(&self) -> Option<Credential> {
        self.current.read().await.credential.clone()
    }

    /// Drop the cached credential (forces a refresh on next use)
    pub async fn clear(&self) {
        self.current.write().await.credential = None;
    }
}

impl std::fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCache").finish_non_exhaustive()
    }
}

/// Blocking credential cache
#[derive(Default)]
pub struct BlockingTokenCache {
    current: std::sync::RwLock<Slot>,
    refresh: std::sync::Mutex<()>,
}

impl BlockingTokenCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached credential, or fetch and store a new one
    pub fn get_or_refresh<F>(&self, fetch_new: F) -> Result<Credential>
    where
        F: FnOnce() -> Result<Credential>,
    {
        let seen = {
            let slot = self.slot();
            if let Some(credential) = slot.fresh() {
                return Ok(credential);
            }
            slot.generation
        };

        let _refreshing = self
            .refresh
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(credential) = self.slot().usable_since(seen) {
            return Ok(credential);
        }

        debug!("Fetching new bearer credential");
        let credential = fetch_new()?;
        self.current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .install(credential.clone());
        Ok(credential)
    }

    /// Cached credential, if any, regardless of expiry
    pub fn current(&self) -> Option<Credential> {
        self.slot().credential.clone()
    }

    /// Drop the cached credential
    pub fn clear(&self) {
        self.current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .credential = None;
    }

    fn slot(&self) -> std::sync::RwLockReadGuard<'_, Slot> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for BlockingTokenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingTokenCache").finish_non_exhaustive()
    }
}
