//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::catalog::{BatchRequest, FetchError, Item, ItemProvider};
use crate::core::deck::DeckController;
use crate::core::state::App;

/// `n` items with ids `item-0..item-n`.
pub fn items(n: usize) -> Vec<Item> {
    (0..n)
        .map(|i| Item::new(format!("item-{i}"), format!("http://cats.test/cat/item-{i}")))
        .collect()
}

/// A provider that hands out a fixed batch (or a fixed error) without any I/O.
pub struct FixedProvider {
    pub result: Result<Vec<Item>, FetchError>,
}

#[async_trait]
impl ItemProvider for FixedProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn fetch_batch(&self, request: BatchRequest) -> Result<Vec<Item>, FetchError> {
        self.result
            .clone()
            .map(|items| items.into_iter().take(request.count).collect())
    }
}

/// Creates a test App with default deck settings.
pub fn test_app() -> App {
    App::new(DeckController::default(), 10, 500)
}
