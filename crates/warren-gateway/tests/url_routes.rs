use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use jiff::{SignedDuration, Timestamp};
use serde_json::{json, Value};
use tower::ServiceExt;
use warren_core::{ManualClock, RecordStore, ShortCode, UrlRecord};
use warren_gateway::{App, AppState};
use warren_generator::SeqGenerator;
use warren_redirector::RedirectorService;
use warren_shortener::ShortenerService;
use warren_storage::InMemoryStore;

const START: i64 = 1_700_000_000;

struct Fixture {
    app: Router,
    store: Arc<InMemoryStore>,
    clock: ManualClock,
}

impl Fixture {
    fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let clock = ManualClock::new(Timestamp::from_second(START).unwrap());

        let generator = SeqGenerator::with_prefix("wh").unwrap();
        let shortener =
            ShortenerService::new(Arc::clone(&store), generator).with_clock(clock.clone());
        let redirector = RedirectorService::with_clock(Arc::clone(&store), clock.clone());
        let state = AppState::new(
            Arc::new(shortener),
            Arc::new(redirector),
            "https://warren.link/",
        );

        Self {
            app: App::router(state),
            store,
            clock,
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.app.clone().oneshot(request).await.unwrap()
    }

    async fn create(&self, body: Value) -> Response {
        self.send(
            Request::post("/")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn get(&self, path: &str) -> Response {
        self.send(Request::get(path).body(Body::empty()).unwrap())
            .await
    }
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn json_body(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let fixture = Fixture::new();

    let response = fixture.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn create_returns_code_and_short_url() {
    let fixture = Fixture::new();

    let response = fixture
        .create(json!({ "originalUrl": "https://example.com", "expirationTime": "1" }))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "code": "wh000000", "shortUrl": "https://warren.link/wh000000" })
    );

    let stored = fixture
        .store
        .get(&ShortCode::new_unchecked("wh000000"))
        .await
        .unwrap();
    let record = UrlRecord::decode(&stored).unwrap();
    assert_eq!(record.original_url, "https://example.com");
    assert_eq!(record.expiration_time, START + 3_600);
}

#[tokio::test]
async fn create_then_redirect_then_expire() {
    let fixture = Fixture::new();

    let created = fixture
        .create(json!({ "originalUrl": "https://example.com", "expirationTime": 1 }))
        .await;
    let code = json_body(created).await["code"]
        .as_str()
        .unwrap()
        .to_string();

    let response = fixture.get(&format!("/{code}")).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://example.com"
    );

    fixture.clock.advance(SignedDuration::from_secs(3_601));

    let response = fixture.get(&format!("/{code}")).await;
    assert_eq!(response.status(), StatusCode::GONE);
    assert_eq!(body_bytes(response).await, b"This URL has expired.".to_vec());
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let fixture = Fixture::new();

    let response = fixture.get("/unknown123").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bare_root_and_nested_paths_are_not_found() {
    let fixture = Fixture::new();

    assert_eq!(fixture.get("/").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(fixture.get("/a/b/c").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_fields_are_bad_request() {
    let fixture = Fixture::new();

    let no_url = fixture.create(json!({ "expirationTime": 5 })).await;
    let no_expiry = fixture
        .create(json!({ "originalUrl": "https://example.com" }))
        .await;

    assert_eq!(no_url.status(), StatusCode::BAD_REQUEST);
    assert_eq!(no_expiry.status(), StatusCode::BAD_REQUEST);
    assert!(fixture.store.is_empty());
}

#[tokio::test]
async fn malformed_values_are_bad_request() {
    let fixture = Fixture::new();

    for body in [
        json!({ "originalUrl": "", "expirationTime": 5 }),
        json!({ "originalUrl": "http://x", "expirationTime": -1 }),
        json!({ "originalUrl": "http://x", "expirationTime": "tomorrow" }),
        json!({ "originalUrl": "http://x", "expirationTime": 2.5 }),
    ] {
        let response = fixture.create(body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        assert!(json_body(response).await["error"].is_string());
    }
    assert!(fixture.store.is_empty());
}

#[tokio::test]
async fn unparsable_json_is_bad_request() {
    let fixture = Fixture::new();

    let response = fixture
        .send(
            Request::post("/")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"originalUrl\":"))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn corrupted_record_is_server_error() {
    let fixture = Fixture::new();
    fixture
        .store
        .put(&ShortCode::new_unchecked("broken1"), b"garbage".to_vec())
        .await
        .unwrap();

    let response = fixture.get("/broken1").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
