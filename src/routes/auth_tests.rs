//! HTTP-level tests for the signup and login endpoints
//!
//! Drives the full router in-process with `tower::ServiceExt::oneshot`
//! against a temp-file credential store, so these cover routing, status
//! codes, and response bodies end to end.

#[cfg(test)]
mod tests {
    use crate::config::AppConfig;
    use crate::routes::create_router;
    use crate::state::AppState;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, Response, StatusCode},
        Router,
    };
    use proptest::prelude::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    /// Build a state backed by a throwaway store file, with the bcrypt
    /// cost dialed down to the minimum so the suite stays fast.
    fn create_test_state() -> (AppState, TempDir) {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.store.path = dir
            .path()
            .join("users.json")
            .to_str()
            .unwrap()
            .to_string();
        config.jwt.secret = "test-secret".to_string();
        config.password.hash_cost = 4;
        (AppState::new(config), dir)
    }

    async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
        let request = Request::builder()
            .uri(uri)
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response<Body>) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn signup_body(email: &str, password: &str) -> Value {
        json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": email,
            "password": password,
        })
    }

    #[tokio::test]
    async fn test_signup_returns_201_with_message() {
        let (state, _dir) = create_test_state();
        let app = create_router(state);

        let response = post_json(
            &app,
            "/uds-api/signup",
            signup_body("ada@example.com", "secret123"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["message"], "User created successfully");
    }

    #[tokio::test]
    async fn test_signup_then_login_returns_token() {
        let (state, _dir) = create_test_state();
        let app = create_router(state.clone());

        let response = post_json(
            &app,
            "/uds-api/signup",
            signup_body("ada@example.com", "secret123"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = post_json(
            &app,
            "/uds-api/login",
            json!({"email": "ada@example.com", "password": "secret123"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Login successful");

        let token = body["token"].as_str().unwrap();
        assert!(!token.is_empty());

        // The token's subject is the registered email
        let claims = state.auth().jwt().validate_token(token).unwrap();
        assert_eq!(claims.sub, "ada@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_signup_returns_400_conflict() {
        let (state, _dir) = create_test_state();
        let app = create_router(state);

        let first = post_json(
            &app,
            "/uds-api/signup",
            signup_body("ada@example.com", "secret123"),
        )
        .await;
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = post_json(
            &app,
            "/uds-api/signup",
            signup_body("ada@example.com", "another-password"),
        )
        .await;
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);

        let body = body_json(second).await;
        assert_eq!(body["error"]["code"], "EMAIL_IN_USE");
        assert_eq!(body["error"]["message"], "email already in use");
    }

    #[tokio::test]
    async fn test_login_wrong_password_returns_401() {
        let (state, _dir) = create_test_state();
        let app = create_router(state);

        post_json(
            &app,
            "/uds-api/signup",
            signup_body("ada@example.com", "secret123"),
        )
        .await;

        let response = post_json(
            &app,
            "/uds-api/login",
            json!({"email": "ada@example.com", "password": "wrong"}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_login_unknown_email_returns_404() {
        let (state, _dir) = create_test_state();
        let app = create_router(state);

        let response = post_json(
            &app,
            "/uds-api/login",
            json!({"email": "nobody@example.com", "password": "secret123"}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "user not found");
    }

    #[tokio::test]
    async fn test_signup_with_missing_field_returns_400() {
        let (state, _dir) = create_test_state();
        let app = create_router(state);

        // No lastName at all: treated like an empty field, not a
        // deserialization failure
        let response = post_json(
            &app,
            "/uds-api/signup",
            json!({"firstName": "Ada", "email": "ada@example.com", "password": "secret123"}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "all fields are required");
    }

    #[tokio::test]
    async fn test_login_with_empty_password_returns_400() {
        let (state, _dir) = create_test_state();
        let app = create_router(state);

        let response = post_json(
            &app,
            "/uds-api/login",
            json!({"email": "ada@example.com", "password": ""}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "email and password are required");
    }

    #[tokio::test]
    async fn test_readiness_reports_unreadable_store() {
        let (state, dir) = create_test_state();
        let app = create_router(state);

        let ready = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(ready.status(), StatusCode::OK);

        // Corrupt the backing file; readiness should flip to 503
        std::fs::write(dir.path().join("users.json"), b"{{{{").unwrap();

        let not_ready = app
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(not_ready.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    /// Generate signup payloads where at least one field is empty
    fn incomplete_signup_strategy() -> impl Strategy<Value = Value> {
        (
            "[a-zA-Z]{0,8}",
            "[a-zA-Z]{0,8}",
            "[a-z0-9@.]{0,12}",
            "[a-zA-Z0-9]{0,12}",
        )
            .prop_filter("at least one field must be empty", |(f, l, e, p)| {
                f.is_empty() || l.is_empty() || e.is_empty() || p.is_empty()
            })
            .prop_map(|(f, l, e, p)| {
                json!({"firstName": f, "lastName": l, "email": e, "password": p})
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Property: any signup with an empty field is rejected with 400
        /// before anything is hashed or persisted
        #[test]
        fn prop_incomplete_signup_returns_400(body in incomplete_signup_strategy()) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let (state, dir) = create_test_state();
                let app = create_router(state);

                let response = post_json(&app, "/uds-api/signup", body).await;
                prop_assert_eq!(response.status(), StatusCode::BAD_REQUEST);

                // Nothing was written
                prop_assert!(!dir.path().join("users.json").exists());
                Ok(())
            })?;
        }
    }
}
