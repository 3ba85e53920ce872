//! In-process implementation of link repository.
//!
//! Selected with `STORAGE_BACKEND=memory`. Links live only as long as the
//! process, which makes this backend useful for local runs and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(Debug, Default)]
struct Store {
    last_id: i64,
    by_code: HashMap<String, Link>,
}

/// Link repository backed by a `HashMap` behind a single `RwLock`.
///
/// Inserts check and write under the same write guard, so the uniqueness
/// guarantee matches the database constraint of [`super::PgLinkRepository`].
#[derive(Debug, Default)]
pub struct MemoryLinkRepository {
    store: RwLock<Store>,
}

impl MemoryLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn exists(&self, short_code: &str) -> Result<bool, AppError> {
        Ok(self.store.read().await.by_code.contains_key(short_code))
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut store = self.store.write().await;

        if store.by_code.contains_key(&new_link.short_code) {
            return Err(AppError::DuplicateCode {
                code: new_link.short_code,
            });
        }

        store.last_id += 1;
        let link = new_link.into_link(store.last_id);
        store
            .by_code
            .insert(link.short_code.clone(), link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.store.read().await.by_code.get(short_code).cloned())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.store.read().await.by_code.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_link(code: &str, url: &str) -> NewLink {
        NewLink {
            long_url: url.to_string(),
            short_code: code.to_string(),
            short_url: format!("http://localhost:8080/go/{code}"),
        }
    }

    #[tokio::test]
    async fn insert_and_find() {
        let repo = MemoryLinkRepository::new();

        let link = repo
            .insert(new_link("abc123", "https://example.com"))
            .await
            .unwrap();
        assert_eq!(link.id, 1);

        let found = repo.find_by_code("abc123").await.unwrap().unwrap();
        assert_eq!(found, link);
        assert!(repo.exists("abc123").await.unwrap());
    }

    #[tokio::test]
    async fn find_missing() {
        let repo = MemoryLinkRepository::new();

        assert!(repo.find_by_code("nope").await.unwrap().is_none());
        assert!(!repo.exists("nope").await.unwrap());
    }

    #[tokio::test]
    async fn insert_conflict_keeps_original() {
        let repo = MemoryLinkRepository::new();

        repo.insert(new_link("abc123", "https://example.com"))
            .await
            .unwrap();

        let err = repo
            .insert(new_link("abc123", "https://other.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateCode { ref code } if code == "abc123"));

        let found = repo.find_by_code("abc123").await.unwrap().unwrap();
        assert_eq!(found.long_url, "https://example.com");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn ids_are_unique_and_increasing() {
        let repo = MemoryLinkRepository::new();

        let first = repo.insert(new_link("aaa", "https://a.com")).await.unwrap();
        let second = repo.insert(new_link("bbb", "https://a.com")).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_same_code_single_winner() {
        let repo = Arc::new(MemoryLinkRepository::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.insert(new_link("race01", &format!("https://example.com/{i}")))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(AppError::DuplicateCode { .. }) => duplicates += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(duplicates, 15);
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
