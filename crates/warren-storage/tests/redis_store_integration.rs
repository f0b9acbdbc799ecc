use std::sync::Arc;
use std::time::Duration;

use redis::AsyncCommands;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage};
use warren_core::{RecordStore, ShortCode, StoreError, UrlRecord};
use warren_storage::{RedisStore, TimeoutStore};

/// Test fixture owning a disposable Redis container.
pub struct RedisTestContainer {
    container: ContainerAsync<GenericImage>,
    redis_url: String,
}

impl RedisTestContainer {
    /// Starts a new Redis container on a random host port.
    pub async fn start() -> Self {
        let container = GenericImage::new("redis", "8.6.0")
            .with_exposed_port(6379_u16.tcp())
            .with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"))
            .start()
            .await
            .expect("Failed to start Redis container");

        let host = container
            .get_host()
            .await
            .expect("Failed to get Redis host")
            .to_string();
        let host = match host.as_str() {
            "localhost" => String::from("127.0.0.1"),
            _ => host,
        };
        let port = container
            .get_host_port_ipv4(6379)
            .await
            .expect("Failed to get Redis port");
        let redis_url = format!("redis://{}:{}", host, port);

        Self {
            container,
            redis_url,
        }
    }

    /// Creates a new Redis connection.
    pub async fn create_connection(&self) -> redis::aio::MultiplexedConnection {
        let client =
            redis::Client::open(self.redis_url.as_str()).expect("Failed to create Redis client");
        client
            .get_multiplexed_async_connection()
            .await
            .expect("Failed to get Redis connection")
    }

    pub async fn store(&self) -> RedisStore {
        RedisStore::connect(&self.redis_url)
            .await
            .expect("Failed to connect record store")
    }
}

fn code(s: &str) -> ShortCode {
    ShortCode::new(s).unwrap()
}

fn payload(url: &str) -> Vec<u8> {
    UrlRecord::new(url, 1_700_000_000).encode().unwrap()
}

#[tokio::test]
async fn test_redis_store_get_missing_key() {
    let fixture = RedisTestContainer::start().await;
    let store = fixture.store().await;

    let err = store.get(&code("missing1")).await.unwrap_err();
    assert_eq!(err, StoreError::NotFound);
}

#[tokio::test]
async fn test_redis_store_put_and_get() {
    let fixture = RedisTestContainer::start().await;
    let store = fixture.store().await;
    let c = code("abc123");

    store.put(&c, payload("https://one.example")).await.unwrap();
    store.put(&c, payload("https://two.example")).await.unwrap();

    let record = UrlRecord::decode(&store.get(&c).await.unwrap()).unwrap();
    assert_eq!(record.original_url, "https://two.example");
}

#[tokio::test]
async fn test_redis_store_uses_prefixed_keys() {
    let fixture = RedisTestContainer::start().await;
    let store = fixture.store().await;
    let custom = RedisStore::with_prefix(fixture.create_connection().await, "other:");
    let c = code("abc123");

    store.insert(&c, payload("https://example.com")).await.unwrap();

    let mut conn = fixture.create_connection().await;
    let raw: Option<Vec<u8>> = conn.get("warren:url:abc123").await.unwrap();
    assert_eq!(raw, Some(payload("https://example.com")));

    // same code under another prefix is a different key
    assert_eq!(custom.get(&c).await.unwrap_err(), StoreError::NotFound);
}

#[tokio::test]
async fn test_redis_store_insert_conflict_keeps_first_value() {
    let fixture = RedisTestContainer::start().await;
    let store = fixture.store().await;
    let c = code("taken01");

    store.insert(&c, payload("https://first.example")).await.unwrap();
    let err = store
        .insert(&c, payload("https://second.example"))
        .await
        .unwrap_err();

    assert_eq!(err, StoreError::Conflict("taken01".to_string()));
    let record = UrlRecord::decode(&store.get(&c).await.unwrap()).unwrap();
    assert_eq!(record.original_url, "https://first.example");
}

#[tokio::test]
async fn test_redis_store_concurrent_inserts_single_winner() {
    let fixture = RedisTestContainer::start().await;
    let store = Arc::new(fixture.store().await);
    let c = code("race0001");

    let mut handles = vec![];
    for i in 0..16 {
        let store = Arc::clone(&store);
        let c = c.clone();
        handles.push(tokio::spawn(async move {
            let url = format!("https://example{i}.com");
            (url.clone(), store.insert(&c, payload(&url)).await)
        }));
    }

    let mut winners = vec![];
    for handle in handles {
        let (url, result) = handle.await.unwrap();
        match result {
            Ok(()) => winners.push(url),
            Err(err) => assert!(matches!(err, StoreError::Conflict(_)), "{err:?}"),
        }
    }

    assert_eq!(winners.len(), 1);
    let record = UrlRecord::decode(&store.get(&c).await.unwrap()).unwrap();
    assert_eq!(record.original_url, winners[0]);
}

#[tokio::test]
async fn test_redis_store_stopped_server_is_not_a_miss() {
    let fixture = RedisTestContainer::start().await;
    let store = TimeoutStore::new(fixture.store().await, Duration::from_secs(2));
    let c = code("abc123");
    store.put(&c, payload("https://example.com")).await.unwrap();

    fixture
        .container
        .stop()
        .await
        .expect("Failed to stop Redis container");

    let err = store.get(&c).await.unwrap_err();
    assert!(!err.is_not_found(), "{err:?}");
}
