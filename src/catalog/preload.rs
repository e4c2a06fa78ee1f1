//! # Resource Preloading
//!
//! Best-effort warming of image URLs for cards that are about to come up.
//! Each URL is fetched at most once per cache; nothing waits on the result
//! and failures are only logged.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;

use crate::catalog::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Never requested.
    Unknown,
    /// Request in flight.
    Pending,
    /// Body downloaded; carries its size in bytes.
    Ready(usize),
    Failed,
}

#[derive(Clone, Default)]
pub struct ResourceCache {
    client: reqwest::Client,
    entries: Arc<Mutex<HashMap<String, CacheStatus>>>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheStatus>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn status(&self, url: &str) -> CacheStatus {
        self.entries()
            .get(url)
            .copied()
            .unwrap_or(CacheStatus::Unknown)
    }

    /// Forgets every URL, so the map holds one session's worth of entries.
    /// A download still in flight records its outcome when it lands.
    pub fn clear(&self) {
        let mut entries = self.entries();
        if !entries.is_empty() {
            debug!("Dropping {} cached resource(s)", entries.len());
        }
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Marks `url` pending if it has never been requested.
    /// Returns false when another warm already claimed it.
    fn claim(&self, url: &str) -> bool {
        let mut entries = self.entries();
        if entries.contains_key(url) {
            return false;
        }
        entries.insert(url.to_string(), CacheStatus::Pending);
        true
    }

    /// Spawns one detached download per item not seen before.
    /// Returns how many downloads were started. Must be called inside a tokio runtime.
    pub fn warm(&self, items: &[Item]) -> usize {
        let mut started = 0;
        for item in items {
            if !self.claim(&item.resource_url) {
                continue;
            }
            started += 1;
            let cache = self.clone();
            let url = item.resource_url.clone();
            tokio::spawn(async move {
                cache.download(&url).await;
            });
        }
        if started > 0 {
            debug!("Preloading {} resource(s)", started);
        }
        started
    }

    /// Downloads `url` and records the outcome. Errors are swallowed.
    pub async fn download(&self, url: &str) {
        let result = async {
            let response = self.client.get(url).send().await?.error_for_status()?;
            response.bytes().await
        }
        .await;

        let status = match result {
            Ok(bytes) => {
                debug!("Preloaded {} ({} bytes)", url, bytes.len());
                CacheStatus::Ready(bytes.len())
            }
            Err(e) => {
                debug!("Preload failed for {}: {}", url, e);
                CacheStatus::Failed
            }
        };
        self.entries().insert(url.to_string(), status);
    }
}
