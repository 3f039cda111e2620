//! Authentication routes
//!
//! Signup and login endpoints. Handlers are thin wrappers over the auth
//! service; password hashing and verification run on the blocking thread
//! pool inside it.

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::{LoginRequest, LoginResponse, MessageResponse, SignupRequest};
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// Register a new user
///
/// POST /uds-api/signup
async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    state.auth().register(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created successfully".to_string(),
        }),
    ))
}

/// Login with email and password
///
/// POST /uds-api/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let token = state.auth().authenticate(req).await?;
    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
    }))
}
