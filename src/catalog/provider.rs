use std::fmt;

use async_trait::async_trait;
use rand::Rng;

use super::types::Item;

/// Errors that can occur while fetching a batch.
/// None of them are retried automatically; the user restarts explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Catalog returned a non-success status.
    Api { status: u16, message: String },
    /// Response body wasn't the JSON we expected.
    Parse(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Api { status, message } => {
                write!(f, "catalog error (HTTP {status}): {message}")
            }
            FetchError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// How many items to ask for, and where in the catalog to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRequest {
    pub count: usize,
    pub offset_hint: usize,
}

impl BatchRequest {
    /// A request with a uniformly random offset in `[0, max_offset)` so that
    /// consecutive sessions see different items.
    pub fn randomized(count: usize, max_offset: usize) -> Self {
        let offset_hint = if max_offset == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..max_offset)
        };
        Self { count, offset_hint }
    }
}

#[async_trait]
pub trait ItemProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Fetches an ordered batch of items. An empty batch is a valid answer.
    async fn fetch_batch(&self, request: BatchRequest) -> Result<Vec<Item>, FetchError>;
}
