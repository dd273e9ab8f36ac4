//! User route handlers.
//!
//! Creation answers with an HTML page because it is the target of the form on
//! the front-end page; every other operation speaks JSON.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::instrument;

use restaurant_orders_core::UserId;

use super::extract::{JsonOrForm, JsonOrFormRejection};
use crate::db::RepositoryError;
use crate::error::{AppError, Result};
use crate::models::{User, UserInput};
use crate::state::AppState;

const USER_NOT_FOUND: &str = "User not found";

/// Confirmation page shown after a user is created.
#[derive(Template, WebTemplate)]
#[template(path = "users/created.html")]
pub struct UserCreatedTemplate {
    pub name: String,
    pub email: String,
}

impl From<&User> for UserCreatedTemplate {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone().unwrap_or_default(),
            email: user.email.clone().unwrap_or_default(),
        }
    }
}

/// Error page shown when a user cannot be created.
#[derive(Template, WebTemplate)]
#[template(path = "users/error.html")]
pub struct UserErrorTemplate {
    pub message: String,
}

/// Confirmation body for a deleted user.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

/// Create a user.
///
/// POST /users
///
/// Returns 201 with a confirmation page. An unreadable body answers with the
/// error page and the rejection's status; a store failure answers 500 with
/// the error page.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<JsonOrForm<UserInput>, JsonOrFormRejection>,
) -> Response {
    let input = match payload {
        Ok(JsonOrForm(input)) => input,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Rejected user payload");
            return (
                rejection.status(),
                UserErrorTemplate {
                    message: rejection.body_text(),
                },
            )
                .into_response();
        }
    };

    match state.store().create_user(input).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "User created");
            (StatusCode::CREATED, UserCreatedTemplate::from(&user)).into_response()
        }
        Err(e) => {
            let event_id = sentry::capture_error(&e);
            tracing::error!(error = %e, sentry_event_id = %event_id, "Failed to create user");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                UserErrorTemplate {
                    message: e.to_string(),
                },
            )
                .into_response()
        }
    }
}

/// List all users.
///
/// GET /users
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = state.store().list_users().await?;
    Ok(Json(users))
}

/// Get a single user.
///
/// GET /users/{id}
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<User>> {
    let id = parse_user_id(&id)?;

    state
        .store()
        .get_user(&id)
        .await?
        .map(Json)
        .ok_or_else(user_not_found)
}

/// Replace a user's name and email.
///
/// PUT /users/{id}
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UserInput>, JsonRejection>,
) -> Result<Json<User>> {
    let Json(input) = payload?;
    let id = parse_user_id(&id)?;

    let user = state
        .store()
        .update_user(&id, input)
        .await?
        .ok_or_else(user_not_found)?;

    tracing::info!(user_id = %user.id, "User updated");
    Ok(Json(user))
}

/// Delete a user.
///
/// DELETE /users/{id}
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id = parse_user_id(&id)?;

    if !state.store().delete_user(&id).await? {
        return Err(user_not_found());
    }

    tracing::info!(user_id = %id, "User deleted");
    Ok(Json(DeleteResponse {
        message: "User deleted successfully",
    }))
}

/// Parse a path id. A malformed id is a store-level failure (500), not a
/// missing record.
fn parse_user_id(raw: &str) -> Result<UserId> {
    UserId::parse(raw)
        .map_err(RepositoryError::from)
        .map_err(AppError::from)
}

fn user_not_found() -> AppError {
    AppError::NotFound(USER_NOT_FOUND.to_string())
}
