use serde::{Deserialize, Serialize};

/// One card's worth of content: an opaque catalog id and the image it points at.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub resource_url: String,
}

impl Item {
    pub fn new(id: impl Into<String>, resource_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_url: resource_url.into(),
        }
    }

    /// Short label for places that can't fit the full id.
    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.id.len());
        &self.id[..end]
    }
}
