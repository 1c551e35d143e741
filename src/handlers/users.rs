//! User HTTP handlers.
//!
//! - POST /api/users - Register a user
//! - GET /api/users?email= - Look a user up by email
//! - GET /api/users/{id} - Look a user up by id

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    db::DbPool,
    error::AppError,
    models::user::{NewUser, UserLookupParams, UserResponse},
    services::users,
};

/// Register a new user.
///
/// # Response
///
/// - **201 Created**: the stored user, without its password hash
/// - **400**: a required field is blank
/// - **409**: the email is already registered
pub async fn create_user(
    State(pool): State<DbPool>,
    Json(request): Json<NewUser>,
) -> Result<impl IntoResponse, AppError> {
    let user = users::add_user(&pool, request).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Look a user up by exact email.
///
/// Returns 404 when nobody is registered under that email.
pub async fn find_user_by_email(
    State(pool): State<DbPool>,
    Query(params): Query<UserLookupParams>,
) -> Result<Json<UserResponse>, AppError> {
    let user = users::get_user_with_email(&pool, &params.email)
        .await?
        .ok_or(AppError::UserNotFound)?;

    Ok(Json(user.into()))
}

/// Look a user up by id.
pub async fn get_user(
    State(pool): State<DbPool>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserResponse>, AppError> {
    let user = users::get_user_with_id(&pool, user_id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    Ok(Json(user.into()))
}
