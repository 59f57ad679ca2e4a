//! Black-box tests against a real listening socket.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::{json, Value};

use inventory_api::auth::Claims;
use inventory_api::cache::MemoryCache;
use inventory_api::storage::SqliteRepository;
use inventory_api::{create_router, AppState};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(jwt_secret: &str) -> Self {
        let state = AppState::with_backends(
            Arc::new(SqliteRepository::open_in_memory().unwrap()),
            Arc::new(MemoryCache::new(100)),
            jwt_secret.as_bytes(),
        );
        let app = create_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_jwt(jwt_secret: &str) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: "testuser".to_string(),
        exp: now + 600,
        iat: Some(now),
    };
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .expect("failed to encode jwt")
}

#[tokio::test]
async fn banner_is_plain_text_and_public() {
    let srv = TestServer::spawn("test-secret").await;

    let res = reqwest::get(format!("{}/", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let content_type = res
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/plain"));
}

#[tokio::test]
async fn item_lifecycle_over_http() {
    let secret = "test-secret";
    let srv = TestServer::spawn(secret).await;
    let token = mint_jwt(secret);
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/items/", srv.base_url))
        .json(&json!({"name": "X", "description": "first"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.headers().contains_key(reqwest::header::WWW_AUTHENTICATE));

    let res = client
        .post(format!("{}/items/", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({"name": "X", "description": "first"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    let url = format!("{}/items/{}/", srv.base_url, created["id"]);

    let res = client
        .post(format!("{}/items/", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({"name": "X", "description": "second"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    for _ in 0..2 {
        let res = client.get(&url).bearer_auth(&token).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let item: Value = res.json().await.unwrap();
        assert_eq!(item["name"], "X");
    }

    let res = client
        .put(&url)
        .bearer_auth(&token)
        .json(&json!({"name": "Updated Item"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let item: Value = client
        .get(&url)
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(item["name"], "Updated Item");
    assert_eq!(item["description"], "first");

    let res = client.delete(&url).bearer_auth(&token).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.get(&url).bearer_auth(&token).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
