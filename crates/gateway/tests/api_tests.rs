//! HTTP-level tests against a router backed by a temporary SQLite file.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use salon_config::DatabaseConfig;
use salon_database::SqlitePool;
use salon_gateway::{create_router, GatewayState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestApp {
    async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite://{}", temp_dir.path().join("api.db").display()),
            max_connections: 2,
        };
        let pool = salon_database::initialize_database(&config).await.unwrap();

        Self {
            router: create_router(GatewayState::new(pool.clone())),
            pool,
            _temp_dir: temp_dir,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn json(&self, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.json(Method::POST, uri, body).await
    }

    async fn create_shop(&self) -> String {
        let (status, shop) = self
            .post("/shop", json!({"name": "Downtown Cuts", "address": "1 Main Street"}))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        shop["id"].as_str().unwrap().to_string()
    }

    async fn create_stylist(&self, email: &str, shop_id: Option<&str>) -> Value {
        let (status, stylist) = self
            .post(
                "/stylist",
                json!({
                    "firstName": "Ada",
                    "lastName": "Shears",
                    "services": [{"type": "HAIRCUT", "price": 30}],
                    "email": email,
                    "password": "scissors",
                    "shopId": shop_id,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{stylist}");
        stylist
    }

    async fn sign_up_customer(&self, email: &str) -> String {
        let (status, customer) = self
            .post(
                "/customer/signup",
                json!({
                    "email": email,
                    "password": "hunter22",
                    "firstName": "Cleo",
                    "lastName": "Client",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{customer}");
        customer["id"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn health_and_openapi_are_served() {
    let app = TestApp::new().await;

    let (status, health) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");
    assert_eq!(health["database"], "up");

    let (status, doc) = app.get("/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/stylist/signup"].is_object());
}

#[tokio::test]
async fn stylist_created_in_shop_reads_back() {
    let app = TestApp::new().await;
    let shop_id = app.create_shop().await;

    let created = app.create_stylist("ada@example.com", Some(&shop_id)).await;
    let stylist_id = created["id"].as_str().unwrap();
    assert!(created.get("password").is_none());
    assert!(created.get("passwordHash").is_none());

    let (status, fetched) = app.get(&format!("/stylist/{stylist_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["shopId"], shop_id.as_str());
    assert_eq!(fetched["services"], json!([{"type": "HAIRCUT", "price": 30.0}]));

    let (_, shop) = app.get(&format!("/shop/{shop_id}")).await;
    assert_eq!(shop["stylistIds"], json!([stylist_id]));

    let (_, filtered) = app.get(&format!("/stylist?shopId={shop_id}&serviceType=HAIRCUT")).await;
    assert_eq!(filtered.as_array().unwrap().len(), 1);
    let (_, none) = app.get("/stylist?serviceType=NAIL").await;
    assert_eq!(none, json!([]));
}

#[tokio::test]
async fn stylist_for_unknown_shop_is_not_stored() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/stylist",
            json!({
                "firstName": "Ada",
                "lastName": "Shears",
                "services": [{"type": "HAIRCUT", "price": 30}],
                "email": "ada@example.com",
                "password": "scissors",
                "shopId": "no-such-shop",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "404");
    let (_, stylists) = app.get("/stylist").await;
    assert_eq!(stylists, json!([]));
}

#[tokio::test]
async fn missing_fields_are_listed_together() {
    let app = TestApp::new().await;

    let (status, body) = app.post("/stylist", json!({"firstName": "Ada"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "400");
    assert_eq!(
        body["message"],
        "missing required fields: Last Name, Services, Email, Password"
    );
}

#[tokio::test]
async fn null_fields_count_as_missing() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/stylist",
            json!({
                "firstName": null,
                "lastName": "Shears",
                "services": null,
                "email": "ada@example.com",
                "password": null,
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(
        body["message"],
        "missing required fields: First Name, Services, Password"
    );
}

#[tokio::test]
async fn price_may_be_sent_as_text() {
    let app = TestApp::new().await;

    let (status, stylist) = app
        .post(
            "/stylist",
            json!({
                "firstName": "Ada",
                "lastName": "Shears",
                "services": [{"type": "NAIL", "price": "12.50"}],
                "email": "ada@example.com",
                "password": "scissors",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(stylist["services"][0]["price"], 12.5);
}

#[tokio::test]
async fn signup_with_icon_stores_both() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/stylist/signup",
            json!({
                "firstName": "Ada",
                "lastName": "Shears",
                "services": [{"type": "HAIRCUT", "price": 30}],
                "email": "ada@example.com",
                "password": "scissors",
                "icon": {"type": "icon", "fileName": "ada_20240101120000000.png"},
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    let stylist_id = body["stylist"]["id"].as_str().unwrap();
    assert_eq!(body["stylist"]["iconPath"], "icons/ada_20240101120000000.png");
    assert_eq!(body["icon"]["userId"], stylist_id);

    let (status, blobs) = app.get(&format!("/blob?userId={stylist_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(blobs.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn signup_with_incomplete_icon_stores_nothing() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/stylist/signup",
            json!({
                "firstName": "Ada",
                "lastName": "Shears",
                "services": [{"type": "HAIRCUT", "price": 30}],
                "email": "ada@example.com",
                "password": "scissors",
                "icon": {"type": "icon"},
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    let (_, stylists) = app.get("/stylist").await;
    assert_eq!(stylists, json!([]));
}

#[tokio::test]
async fn duplicate_email_conflicts_and_login_hides_password() {
    let app = TestApp::new().await;
    app.create_stylist("ada@example.com", None).await;

    let (status, body) = app
        .post(
            "/stylist",
            json!({
                "firstName": "Another",
                "lastName": "Ada",
                "services": [{"type": "NAIL", "price": 10}],
                "email": "ADA@example.com",
                "password": "different",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    let (status, stylist) = app
        .post("/stylist/login", json!({"email": "ada@example.com", "password": "scissors"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(stylist.get("passwordHash").is_none());

    let (status, body) = app
        .post("/stylist/login", json!({"email": "ada@example.com", "password": "wrong"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "401");
}

#[tokio::test]
async fn booking_lifecycle_over_http() {
    let app = TestApp::new().await;
    let stylist = app.create_stylist("ada@example.com", None).await;
    let stylist_id = stylist["id"].as_str().unwrap();
    let customer_id = app.sign_up_customer("cleo@example.com").await;

    let (status, booking) = app
        .post(
            "/booking",
            json!({
                "customerId": customer_id,
                "stylistId": stylist_id,
                "serviceType": "HAIRCUT",
                "scheduledAt": "2024-06-01T10:00:00Z",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{booking}");
    assert_eq!(booking["status"], "PENDING");
    assert_eq!(booking["price"], 30.0);
    let booking_id = booking["id"].as_str().unwrap();

    let status_uri = format!("/booking/{booking_id}/status");
    let (status, _) = app
        .json(Method::PATCH, &status_uri, json!({"status": "COMPLETED"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, confirmed) = app
        .json(Method::PATCH, &status_uri, json!({"status": "CONFIRMED"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(confirmed["status"], "CONFIRMED");

    let (_, mine) = app.get(&format!("/customer/{customer_id}/bookings")).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);
    let (_, theirs) = app.get(&format!("/stylist/{stylist_id}/bookings")).await;
    assert_eq!(theirs[0]["id"], booking_id);
}

#[tokio::test]
async fn booking_with_unknown_party_is_rejected() {
    let app = TestApp::new().await;
    let stylist = app.create_stylist("ada@example.com", None).await;
    let stylist_id = stylist["id"].as_str().unwrap();
    let customer_id = app.sign_up_customer("cleo@example.com").await;

    for (customer, stylist) in [("ghost", stylist_id), (customer_id.as_str(), "ghost")] {
        let (status, _) = app
            .post(
                "/booking",
                json!({
                    "customerId": customer,
                    "stylistId": stylist,
                    "serviceType": "HAIRCUT",
                    "scheduledAt": "2024-06-01T10:00:00Z",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    let (_, bookings) = app.get(&format!("/customer/{customer_id}/bookings")).await;
    assert_eq!(bookings, json!([]));
}

#[tokio::test]
async fn malformed_json_gets_error_body() {
    let app = TestApp::new().await;

    let request = Request::post("/shop")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "400");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn bad_query_strings_get_error_body() {
    let app = TestApp::new().await;

    for uri in ["/stylist?shopId=a&shopId=b", "/blob?userId=a&userId=b"] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "400", "{uri}: {body}");
        assert!(body["message"].is_string(), "{uri}: {body}");
    }
}

#[tokio::test]
async fn health_reports_unreachable_database() {
    let app = TestApp::new().await;
    app.pool.close().await;

    let (status, health) = app.get("/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(health["status"], "degraded");
    assert_eq!(health["database"], "down");
}

#[tokio::test]
async fn unknown_resources_are_404() {
    let app = TestApp::new().await;

    for uri in ["/shop/nope", "/stylist/nope", "/customer/nope", "/booking/nope", "/blob/nope"] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["error"], "404");
    }
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/shop")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
