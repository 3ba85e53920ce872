use golink::domain::entities::NewLink;
use golink::domain::repositories::LinkRepository;
use golink::error::{AppError, is_unique_violation_on_code, map_sqlx_error};
use golink::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(code: &str, url: &str) -> NewLink {
    NewLink {
        long_url: url.to_string(),
        short_code: code.to_string(),
        short_url: format!("http://localhost:8080/go/{}", code),
    }
}

#[sqlx::test]
async fn test_insert_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo
        .insert(new_link("test123", "https://example.com"))
        .await
        .unwrap();

    assert!(link.id > 0);
    assert_eq!(link.short_code, "test123");
    assert_eq!(link.long_url, "https://example.com");
    assert_eq!(link.short_url, "http://localhost:8080/go/test123");
}

#[sqlx::test]
async fn test_find_by_code(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let created = repo
        .insert(new_link("abc123", "https://example.com/path"))
        .await
        .unwrap();

    let found = repo.find_by_code("abc123").await.unwrap();

    assert_eq!(found, Some(created));
}

#[sqlx::test]
async fn test_find_by_code_not_found(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.find_by_code("nonexistent").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_exists(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(!repo.exists("taken1").await.unwrap());

    repo.insert(new_link("taken1", "https://example.com"))
        .await
        .unwrap();

    assert!(repo.exists("taken1").await.unwrap());
}

#[sqlx::test]
async fn test_duplicate_code_rejected(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert(new_link("dup123", "https://first.com"))
        .await
        .unwrap();

    let err = repo
        .insert(new_link("dup123", "https://second.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::DuplicateCode { ref code } if code == "dup123"));

    let kept = repo.find_by_code("dup123").await.unwrap().unwrap();
    assert_eq!(kept.long_url, "https://first.com");
}

#[sqlx::test]
async fn test_count(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert_eq!(repo.count().await.unwrap(), 0);

    repo.insert(new_link("one111", "https://example.com"))
        .await
        .unwrap();
    repo.insert(new_link("two222", "https://example.com"))
        .await
        .unwrap();

    assert_eq!(repo.count().await.unwrap(), 2);
}

#[sqlx::test]
async fn test_concurrent_inserts_single_winner(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.insert(new_link("race01", &format!("https://example.com/{i}")))
                    .await
            })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(AppError::DuplicateCode { .. }) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[sqlx::test]
async fn test_unique_violation_detected_on_short_code(pool: PgPool) {
    let insert = "INSERT INTO links (long_url, short_url, short_code) VALUES ($1, $2, $3)";

    sqlx::query(insert)
        .bind("https://first.com")
        .bind("http://localhost:8080/go/raw001")
        .bind("raw001")
        .execute(&pool)
        .await
        .unwrap();

    let err = sqlx::query(insert)
        .bind("https://second.com")
        .bind("http://localhost:8080/go/raw001")
        .bind("raw001")
        .execute(&pool)
        .await
        .unwrap_err();

    assert!(is_unique_violation_on_code(&err));
    assert!(matches!(
        map_sqlx_error(err, "raw001"),
        AppError::DuplicateCode { ref code } if code == "raw001"
    ));
}

#[sqlx::test]
async fn test_other_database_errors_are_storage(pool: PgPool) {
    let err = sqlx::query("INSERT INTO links (long_url, short_url) VALUES ($1, $2)")
        .bind("https://example.com")
        .bind("http://localhost:8080/go/")
        .execute(&pool)
        .await
        .unwrap_err();

    assert!(!is_unique_violation_on_code(&err));
    assert!(matches!(
        map_sqlx_error(err, ""),
        AppError::Storage { .. }
    ));
}
