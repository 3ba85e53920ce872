//! Link entity representing a shortened URL mapping.

use serde::Serialize;

/// A stored mapping between a short code and a long URL.
///
/// Links are append-only: once the store assigns `id` nothing about the record
/// changes. `short_url` is captured at creation time and never re-derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: i64,
    pub long_url: String,
    pub short_code: String,
    pub short_url: String,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: i64, long_url: String, short_code: String, short_url: String) -> Self {
        Self {
            id,
            long_url,
            short_code,
            short_url,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub long_url: String,
    pub short_code: String,
    pub short_url: String,
}

impl NewLink {
    /// Attaches the store-assigned id, producing the persisted entity.
    pub fn into_link(self, id: i64) -> Link {
        Link::new(id, self.long_url, self.short_code, self.short_url)
    }
}
