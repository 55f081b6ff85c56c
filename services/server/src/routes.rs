//! Taskboard server routes

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use common::model::WorkStatus;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    middleware::{AuthUser, SESSION_COOKIE},
    models::{
        CreateWorkRequest, NewUser, NewWork, PublicUser, UpdateWorkRequest, WorkChanges,
        parse_end_date,
    },
    validation::{validate_email, validate_password},
};

/// Request payload shared by registration and login
#[derive(Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Response for user login
#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: PublicUser,
}

/// Create the router for the taskboard server
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/register", post(register))
        .route("/", post(login).get(list_works))
        .route("/logout", post(logout))
        .route("/add", post(add_work))
        .route("/update/:id", patch(update_work))
        .route("/delete/:id", delete(delete_work))
        .layer(tower_http::cors::CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "taskboard-server"
    }))
}

/// User registration endpoint
///
/// Returns the created row as-is, password hash included (see DESIGN.md).
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    validate_email(&email).map_err(ApiError::Validation)?;
    validate_password(&password).map_err(ApiError::Validation)?;

    let existing = state
        .user_repository
        .find_by_email(&email)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            ApiError::InternalServerError
        })?;

    if existing.is_some() {
        return Err(ApiError::Conflict("User already exists".to_string()));
    }

    let user = state
        .user_repository
        .create(&NewUser { email, password })
        .await
        .map_err(|e| {
            error!("Failed to create user: {}", e);
            ApiError::InternalServerError
        })?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        return Err(ApiError::Validation("Invalid data".to_string()));
    }

    info!("Login attempt for user: {}", email);

    let user = state
        .user_repository
        .find_by_email(&email)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let password_matches = state
        .user_repository
        .verify_password(&user, &password)
        .await
        .map_err(|e| {
            error!("Failed to verify password: {}", e);
            ApiError::InternalServerError
        })?;

    if !password_matches {
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.jwt_service.generate_token(&user).map_err(|e| {
        error!("Failed to generate session token: {}", e);
        ApiError::InternalServerError
    })?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(state.jwt_service.token_expiry() as i64))
        .build();

    let response = LoginResponse {
        message: "Login successful".to_string(),
        user: PublicUser::from(&user),
    };

    Ok((jar.add(cookie), Json(response)))
}

/// Logout endpoint
///
/// Clears the session cookie unconditionally; safe to call repeatedly.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build();

    (
        jar.remove(cookie),
        Json(json!({"message": "Logged out successfully"})),
    )
}

/// List all work items owned by the caller
pub async fn list_works(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let works = state
        .work_repository
        .list_by_owner(user.id)
        .await
        .map_err(|e| {
            error!("Failed to list work items: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(works))
}

/// Create a work item owned by the caller
pub async fn add_work(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateWorkRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let title = payload.title.unwrap_or_default();
    let status = payload.status.unwrap_or_default();

    if title.is_empty() || status.is_empty() {
        return Err(ApiError::Validation("Invalid data".to_string()));
    }

    let status: WorkStatus = status.parse().map_err(ApiError::Validation)?;

    let end_date = payload
        .end_date
        .filter(|s| !s.is_empty())
        .as_deref()
        .map(parse_end_date)
        .transpose()
        .map_err(ApiError::Validation)?;

    let work = state
        .work_repository
        .create(&NewWork {
            title,
            description: payload.description,
            status,
            end_date,
            owner_id: user.id,
        })
        .await
        .map_err(|e| {
            error!("Failed to create work item: {}", e);
            ApiError::InternalServerError
        })?;

    Ok((StatusCode::CREATED, Json(work)))
}

/// Partially update a work item
///
/// The row lookup is by id alone, not scoped to the caller; DESIGN.md
/// documents this authorization gap.
pub async fn update_work(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateWorkRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let status = payload
        .status
        .as_deref()
        .map(str::parse::<WorkStatus>)
        .transpose()
        .map_err(ApiError::Validation)?;

    let end_date = match payload.end_date {
        None => None,
        Some(None) => Some(None),
        Some(Some(text)) if text.is_empty() => Some(None),
        Some(Some(text)) => Some(Some(parse_end_date(&text).map_err(ApiError::Validation)?)),
    };

    let changes = WorkChanges {
        title: payload.title,
        description: payload.description,
        status,
        end_date,
    };

    let work = state
        .work_repository
        .update(id, &changes)
        .await
        .map_err(|e| {
            error!("Failed to update work item {}: {}", id, e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::NotFound("Not found".to_string()))?;

    Ok(Json(work))
}

/// Delete a work item
///
/// Idempotent: deleting an unknown id still returns 204.
pub async fn delete_work(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.work_repository.delete(id).await.map_err(|e| {
        error!("Failed to delete work item {}: {}", id, e);
        ApiError::InternalServerError
    })?;

    Ok(StatusCode::NO_CONTENT)
}
