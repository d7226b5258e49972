//! Axum router configuration with middleware.
//!
//! User routes live under `/api/v1/`. Swagger UI is mounted at
//! `/swagger-ui` with the document at `/api-docs/openapi.json`.
//! Middleware: CORS (any origin), request tracing.

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::http::doc::ApiDoc;
use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/users",
            get(handlers::user::list_users).post(handlers::user::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness probe.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tower::ServiceExt;
    use userdesk_infra::sqlite::pool::DatabasePool;

    struct TestApp {
        _dir: TempDir,
        state: AppState,
        router: Router,
    }

    async fn test_app() -> TestApp {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        let state = AppState::from_pool(DatabasePool::new(&url).await.unwrap());
        TestApp {
            _dir: dir,
            router: build_router(state.clone()),
            state,
        }
    }

    impl TestApp {
        async fn send_raw(&self, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let headers = response.headers().clone();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            (status, headers, bytes.to_vec())
        }

        async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let builder = Request::builder().method(method).uri(uri);
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };
            let (status, _, bytes) = self.send_raw(request).await;
            let json = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, json)
        }

        async fn create(&self, name: &str, email: &str) -> Value {
            let (status, body) = self
                .send(Method::POST, "/api/v1/users", Some(json!({"name": name, "email": email})))
                .await;
            assert_eq!(status, StatusCode::CREATED);
            body
        }

        async fn stored_count(&self, email: &str) -> i64 {
            let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = ?")
                .bind(email)
                .fetch_one(&self.state.db_pool.reader)
                .await
                .unwrap();
            count
        }
    }

    #[tokio::test]
    async fn test_create_then_get_returns_same_body() {
        let app = test_app().await;

        let created = app.create("Dave", "dave@example.com").await;
        assert_eq!(created["name"], "Dave");
        assert_eq!(created["email"], "dave@example.com");
        let id = created["id"].as_i64().unwrap();

        let (status, fetched) = app.send(Method::GET, &format!("/api/v1/users/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
        assert_eq!(fetched, json!({"id": id, "name": "Dave", "email": "dave@example.com"}));
    }

    #[tokio::test]
    async fn test_list_returns_all_in_order() {
        let app = test_app().await;

        let (status, empty) = app.send(Method::GET, "/api/v1/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(empty, json!([]));

        let alice = app.create("Alice", "alice@example.com").await;
        let bob = app.create("Bob", "bob@example.com").await;

        let (status, users) = app.send(Method::GET, "/api/v1/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(users, json!([alice, bob]));
    }

    #[tokio::test]
    async fn test_create_ignores_client_id() {
        let app = test_app().await;
        let (status, body) = app
            .send(
                Method::POST,
                "/api/v1/users",
                Some(json!({"id": 500, "name": "Gus", "email": "gus@example.com"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 1);
    }

    #[tokio::test]
    async fn test_get_missing_or_malformed_id_is_404() {
        let app = test_app().await;
        for uri in ["/api/v1/users/1", "/api/v1/users/999999", "/api/v1/users/abc", "/api/v1/users/1.5"] {
            let (status, body) = app.send(Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body, json!({"message": "User not found"}));
        }
    }

    #[tokio::test]
    async fn test_create_malformed_json_is_400() {
        let app = test_app().await;

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/users")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, _, bytes) = app.send_raw(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"message": "Invalid input"}));

        let (status, _) = app
            .send(Method::POST, "/api/v1/users", Some(json!({"name": 42})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_ignores_content_type() {
        let app = test_app().await;

        let cases = [
            (None, "plain@example.com"),
            (Some("application/x-www-form-urlencoded"), "form@example.com"),
            (Some("text/plain"), "text@example.com"),
        ];
        for (content_type, email) in cases {
            let mut builder = Request::builder().method(Method::POST).uri("/api/v1/users");
            if let Some(content_type) = content_type {
                builder = builder.header(header::CONTENT_TYPE, content_type);
            }
            let request = builder
                .body(Body::from(json!({"name": "Dave", "email": email}).to_string()))
                .unwrap();
            let (status, _, bytes) = app.send_raw(request).await;
            assert_eq!(status, StatusCode::CREATED, "{content_type:?}");
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["email"], email);
        }

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/users")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, _, bytes) = app.send_raw(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"message": "Invalid input"}));
    }

    #[tokio::test]
    async fn test_update_ignores_content_type() {
        let app = test_app().await;
        let id = app.create("Eve", "eve@example.com").await["id"].as_i64().unwrap();

        let request = Request::builder()
            .method(Method::PUT)
            .uri(format!("/api/v1/users/{id}"))
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from(r#"{"name":"Evelyn","email":"evelyn@example.com"}"#))
            .unwrap();
        let (status, _, bytes) = app.send_raw(request).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"id": id, "name": "Evelyn", "email": "evelyn@example.com"}));
    }

    #[tokio::test]
    async fn test_storage_failure_is_500_without_detail() {
        let app = test_app().await;
        app.create("Alice", "alice@example.com").await;

        sqlx::query("DROP TABLE users")
            .execute(&app.state.db_pool.writer)
            .await
            .unwrap();

        let request = Request::builder()
            .method(Method::GET)
            .uri("/api/v1/users")
            .body(Body::empty())
            .unwrap();
        let (status, _, bytes) = app.send_raw(request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let text = String::from_utf8(bytes).unwrap();
        assert!(!text.contains("no such table"), "{text}");
        let body: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(body, json!({"message": "Error fetching users"}));

        let (status, body) = app.send(Method::GET, "/api/v1/users/1", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"message": "Error fetching user"}));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts_and_keeps_one_row() {
        let app = test_app().await;
        app.create("First", "same@example.com").await;

        let (status, body) = app
            .send(
                Method::POST,
                "/api/v1/users",
                Some(json!({"name": "Second", "email": "same@example.com"})),
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, json!({"message": "Email already in use"}));
        assert!(!body.to_string().contains("same@example.com"));
        assert_eq!(app.stored_count("same@example.com").await, 1);
    }

    #[tokio::test]
    async fn test_update_full_body_replaces_fields() {
        let app = test_app().await;
        let eve = app.create("Eve", "eve@example.com").await;
        let id = eve["id"].as_i64().unwrap();

        let (status, body) = app
            .send(
                Method::PUT,
                &format!("/api/v1/users/{id}"),
                Some(json!({"name": "Eve Updated", "email": "eve.updated@example.com"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"id": id, "name": "Eve Updated", "email": "eve.updated@example.com"})
        );

        let (_, fetched) = app.send(Method::GET, &format!("/api/v1/users/{id}"), None).await;
        assert_eq!(fetched, body);
    }

    #[tokio::test]
    async fn test_update_partial_body_blanks_omitted_fields() {
        let app = test_app().await;
        let eve = app.create("Eve", "eve@example.com").await;
        let id = eve["id"].as_i64().unwrap();

        let (status, body) = app
            .send(Method::PUT, &format!("/api/v1/users/{id}"), Some(json!({"name": "Eve"})))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": id, "name": "Eve", "email": ""}));
        assert_eq!(app.stored_count("").await, 1);
    }

    #[tokio::test]
    async fn test_update_missing_user_is_404_even_with_bad_body() {
        let app = test_app().await;

        let (status, _) = app
            .send(Method::PUT, "/api/v1/users/42", Some(json!({"name": "x", "email": "x@example.com"})))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let request = Request::builder()
            .method(Method::PUT)
            .uri("/api/v1/users/42")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{"))
            .unwrap();
        let (status, _, _) = app.send_raw(request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_existing_user_with_bad_body_is_400() {
        let app = test_app().await;
        let user = app.create("Hal", "hal@example.com").await;
        let id = user["id"].as_i64().unwrap();

        let request = Request::builder()
            .method(Method::PUT)
            .uri(format!("/api/v1/users/{id}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{"))
            .unwrap();
        let (status, _, _) = app.send_raw(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, fetched) = app.send(Method::GET, &format!("/api/v1/users/{id}"), None).await;
        assert_eq!(fetched, user);
    }

    #[tokio::test]
    async fn test_update_to_taken_email_conflicts() {
        let app = test_app().await;
        app.create("A", "a@example.com").await;
        let b = app.create("B", "b@example.com").await;
        let id = b["id"].as_i64().unwrap();

        let (status, _) = app
            .send(Method::PUT, &format!("/api/v1/users/{id}"), Some(json!({"name": "B", "email": "a@example.com"})))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_404() {
        let app = test_app().await;
        let frank = app.create("Frank", "frank@example.com").await;
        let id = frank["id"].as_i64().unwrap();
        let uri = format!("/api/v1/users/{id}");

        let (status, body) = app.send(Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "User deleted"}));

        let (status, _) = app.send(Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(app.stored_count("frank@example.com").await, 0);

        let (status, _) = app.send(Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let app = test_app().await;
        let request = Request::builder()
            .method(Method::GET)
            .uri("/api/v1/users")
            .header(header::ORIGIN, "https://elsewhere.example")
            .body(Body::empty())
            .unwrap();
        let (status, headers, _) = app.send_raw(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let app = test_app().await;
        let (status, doc) = app.send(Method::GET, "/api-docs/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(doc["info"]["title"], "User API");
        assert!(doc["paths"]["/api/v1/users/{id}"]["put"].is_object());
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = test_app().await;
        let (status, body) = app.send(Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
