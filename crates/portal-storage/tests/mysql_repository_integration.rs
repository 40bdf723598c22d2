use std::time::Duration;

use jiff::{SignedDuration, Timestamp};
use portal_core::{LinkRecord, ShortCode};
use portal_storage::{MySqlRepository, ReadRepository, Repository, StorageError};
use portal_test_infra::mysql::{MySqlServer, MysqlConfig};
use sqlx::mysql::MySqlPoolOptions;

struct Fixture {
    _mysql: MySqlServer,
    repo: MySqlRepository,
}

impl Fixture {
    async fn start() -> Self {
        let mysql = MySqlServer::new(MysqlConfig::builder().build())
            .await
            .expect("start mysql");
        let url = mysql.database_url().await.expect("mysql url");
        let pool = connect_with_retry(&url).await;

        sqlx::query(include_str!("../ddl/mysql/links.sql"))
            .execute(&pool)
            .await
            .expect("create schema");

        Self {
            _mysql: mysql,
            repo: MySqlRepository::new(pool),
        }
    }
}

async fn connect_with_retry(url: &str) -> sqlx::MySqlPool {
    let mut last_error = None;

    for _ in 0..20 {
        match MySqlPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
        {
            Ok(pool) => return pool,
            Err(err) => {
                last_error = Some(err);
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
        }
    }

    panic!("failed to connect mysql: {last_error:?}");
}

fn code(value: &str) -> ShortCode {
    ShortCode::new_unchecked(value)
}

fn record(url: &str, expires_at: Option<Timestamp>) -> LinkRecord {
    LinkRecord {
        original_url: url.to_string(),
        created_at: Timestamp::now(),
        expires_at,
        visit_count: 0,
    }
}

#[tokio::test]
async fn insert_and_get_record() {
    let fixture = Fixture::start().await;
    let short_code = code("abc123");

    fixture
        .repo
        .insert(&short_code, record("https://example.com", None))
        .await
        .unwrap();

    let got = fixture.repo.get(&short_code).await.unwrap().unwrap();
    assert_eq!(got.original_url, "https://example.com");
    assert_eq!(got.expires_at, None);
    assert_eq!(got.visit_count, 0);
}

#[tokio::test]
async fn insert_conflicts_when_code_already_exists() {
    let fixture = Fixture::start().await;
    let short_code = code("abc123");

    fixture
        .repo
        .insert(&short_code, record("https://one.example", None))
        .await
        .unwrap();

    let err = fixture
        .repo
        .insert(&short_code, record("https://two.example", None))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::Conflict(_)));
}

#[tokio::test]
async fn racing_inserts_admit_exactly_one_winner() {
    let fixture = Fixture::start().await;

    let mut handles = vec![];
    for i in 0..8u64 {
        let repo = fixture.repo.clone();
        handles.push(tokio::spawn(async move {
            repo.insert(
                &code("race01"),
                record(&format!("https://example{}.com", i), None),
            )
            .await
        }));
    }

    let mut winners = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => winners += 1,
            Err(StorageError::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(conflicts, 7);
}

#[tokio::test]
async fn get_returns_expired_record() {
    let fixture = Fixture::start().await;
    let short_code = code("expired1");
    let expired = Timestamp::now() - SignedDuration::from_secs(1);

    fixture
        .repo
        .insert(&short_code, record("https://example.com", Some(expired)))
        .await
        .unwrap();

    let got = fixture.repo.get(&short_code).await.unwrap().unwrap();
    assert!(got.is_expired_at(Timestamp::now()));
    assert_eq!(got.original_url, "https://example.com");
}

#[tokio::test]
async fn increment_visit_bumps_count() {
    let fixture = Fixture::start().await;
    let short_code = code("counted1");

    fixture
        .repo
        .insert(&short_code, record("https://example.com", None))
        .await
        .unwrap();

    fixture.repo.increment_visit(&short_code).await.unwrap();
    fixture.repo.increment_visit(&short_code).await.unwrap();

    let got = fixture.repo.get(&short_code).await.unwrap().unwrap();
    assert_eq!(got.visit_count, 2);
}

#[tokio::test]
async fn increment_visit_unknown_code() {
    let fixture = Fixture::start().await;

    let err = fixture
        .repo
        .increment_visit(&code("missing1"))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::NotFound(_)));
}

#[tokio::test]
async fn concurrent_increments_lose_no_updates() {
    let fixture = Fixture::start().await;
    let short_code = code("hot001");

    fixture
        .repo
        .insert(&short_code, record("https://example.com", None))
        .await
        .unwrap();

    let mut handles = vec![];
    for _ in 0..20 {
        let repo = fixture.repo.clone();
        handles.push(tokio::spawn(async move {
            repo.increment_visit(&code("hot001")).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let got = fixture.repo.get(&short_code).await.unwrap().unwrap();
    assert_eq!(got.visit_count, 20);
}

#[tokio::test]
async fn exists_tracks_codes_regardless_of_expiry() {
    let fixture = Fixture::start().await;
    let expired = Timestamp::now() - SignedDuration::from_secs(1);

    assert!(!fixture.repo.exists(&code("history1")).await.unwrap());

    fixture
        .repo
        .insert(&code("history1"), record("https://example.com", Some(expired)))
        .await
        .unwrap();

    assert!(fixture.repo.exists(&code("history1")).await.unwrap());
}
