//! Cat-as-a-service catalog provider.
//!
//! Lists cats with `GET /api/cats?tags=..&limit=..&skip=..` and builds each
//! item's image URL as `/cat/{id}?width=..`.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::catalog::{BatchRequest, FetchError, Item, ItemProvider};

pub const DEFAULT_BASE_URL: &str = "https://cataas.com";

// ============================================================================
// Cataas API Types
// ============================================================================

/// One entry of the `/api/cats` listing. Older deployments call the id `_id`.
#[derive(Deserialize, Debug)]
struct CatEntry {
    #[serde(alias = "_id")]
    id: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

pub struct CataasProvider {
    base_url: String,
    tag: String,
    image_width: u32,
    client: reqwest::Client,
}

impl CataasProvider {
    pub fn new(base_url: impl Into<String>, tag: impl Into<String>, image_width: u32) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            tag: tag.into(),
            image_width,
            client: reqwest::Client::new(),
        }
    }

    fn list_url(&self) -> String {
        format!("{}/api/cats", self.base_url)
    }

    fn image_url(&self, id: &str) -> String {
        format!("{}/cat/{}?width={}", self.base_url, id, self.image_width)
    }

    fn to_items(&self, entries: Vec<CatEntry>) -> Vec<Item> {
        entries
            .into_iter()
            .map(|entry| {
                let resource_url = self.image_url(&entry.id);
                Item::new(entry.id, resource_url)
            })
            .collect()
    }
}

#[async_trait]
impl ItemProvider for CataasProvider {
    fn name(&self) -> &str {
        "cataas"
    }

    async fn fetch_batch(&self, request: BatchRequest) -> Result<Vec<Item>, FetchError> {
        info!(
            "Cataas request: tag={}, limit={}, skip={}",
            self.tag, request.count, request.offset_hint
        );

        let response = self
            .client
            .get(self.list_url())
            .query(&[
                ("tags", self.tag.clone()),
                ("limit", request.count.to_string()),
                ("skip", request.offset_hint.to_string()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        debug!("Cataas response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Cataas API error: {} - {}", status, err_body);
            return Err(FetchError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let entries: Vec<CatEntry> =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;

        let items = self.to_items(entries);
        info!("Cataas batch received: {} items", items.len());
        Ok(items)
    }
}
