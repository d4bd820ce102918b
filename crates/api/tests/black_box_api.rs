mod common;

use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(jwt_secret: &str) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = cart_api::app::build_app(jwt_secret).expect("failed to build app");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn error_code(res: reqwest::Response) -> String {
    let body: serde_json::Value = res.json().await.unwrap();
    body["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn(common::JWT_SECRET).await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_routes_require_bearer_token() {
    let srv = TestServer::spawn(common::JWT_SECRET).await;
    let client = reqwest::Client::new();

    for path in ["/api/order", "/api/order/42", "/api/store"] {
        let res = client
            .get(format!("{}{}", srv.base_url, path))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{path}");
        assert_eq!(error_code(res).await, "unauthorized");
    }

    let res = client
        .post(format!("{}/api/order", srv.base_url))
        .json(&json!({"sku": "A-1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn authorised_routes_answer_not_implemented() {
    let srv = TestServer::spawn(common::JWT_SECRET).await;
    let client = reqwest::Client::new();
    let token = common::valid_token();

    let requests = [
        client.get(format!("{}/api/order?offset=0&pageSize=15", srv.base_url)),
        client.get(format!("{}/api/order/42", srv.base_url)),
        client
            .post(format!("{}/api/order", srv.base_url))
            .json(&json!({"sku": "A-1", "quantity": 1})),
        client.get(format!("{}/api/store", srv.base_url)),
    ];

    for request in requests {
        let res = request.bearer_auth(&token).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(error_code(res).await, "not_implemented");
    }
}

#[tokio::test]
async fn open_hours_is_reachable_anonymously() {
    let srv = TestServer::spawn(common::JWT_SECRET).await;
    let res = reqwest::get(format!("{}/api/store/open-hours", srv.base_url))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_IMPLEMENTED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_implemented");
    assert!(body["message"].as_str().unwrap().contains("store.get_open_hours"));
}

#[tokio::test]
async fn unknown_routes_and_verbs_are_not_found() {
    let srv = TestServer::spawn(common::JWT_SECRET).await;
    let client = reqwest::Client::new();

    let res = client
        .delete(format!("{}/api/order", srv.base_url))
        .bearer_auth(common::valid_token())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_code(res).await, "route_not_found");

    let res = client
        .get(format!("{}/api/inventory", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_order_id_is_bad_request() {
    let srv = TestServer::spawn(common::JWT_SECRET).await;
    let res = reqwest::Client::new()
        .get(format!("{}/api/order/abc", srv.base_url))
        .bearer_auth(common::valid_token())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(res).await, "invalid_request");
}

#[tokio::test]
async fn token_signed_with_other_secret_is_rejected() {
    let srv = TestServer::spawn(common::JWT_SECRET).await;
    let token = common::mint_jwt("not-the-server-secret", chrono::Duration::minutes(5));

    let res = reqwest::Client::new()
        .get(format!("{}/api/store", srv.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn escaped_path_segments_reach_declared_routes() {
    let srv = TestServer::spawn(common::JWT_SECRET).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/store/open%2Dhours", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_IMPLEMENTED);

    let res = client
        .get(format!("{}/api/order/%34%32", srv.base_url))
        .bearer_auth(common::valid_token())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_IMPLEMENTED);
}
