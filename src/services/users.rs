//! User lookup and registration.

use crate::{
    db::DbPool,
    error::AppError,
    models::user::{NewUser, User},
};

/// Find a user by exact email, ignoring surrounding whitespace as
/// `add_user` does.
///
/// Returns `Ok(None)` when no user has that email.
pub async fn get_user_with_email(pool: &DbPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password FROM users WHERE email = $1",
    )
    .bind(email.trim())
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Find a user by id.
///
/// Returns `Ok(None)` when the id does not exist.
pub async fn get_user_with_id(pool: &DbPool, id: i32) -> Result<Option<User>, AppError> {
    let user =
        sqlx::query_as::<_, User>("SELECT id, name, email, password FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(user)
}

/// Register a new user.
///
/// # Returns
///
/// The stored row, including its generated id.
///
/// # Errors
///
/// - `InvalidRequest`: blank name or email, email without `@`, empty password
/// - `ConstraintViolation`: the email is already registered
/// - `Unavailable` / `Database`: the insert failed
pub async fn add_user(pool: &DbPool, new_user: NewUser) -> Result<User, AppError> {
    validate_new_user(&new_user)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, password)
        VALUES ($1, $2, $3)
        RETURNING id, name, email, password
        "#,
    )
    .bind(new_user.name.trim())
    .bind(new_user.email.trim())
    .bind(&new_user.password)
    .fetch_one(pool)
    .await?;

    tracing::info!("Registered user {}", user.id);

    Ok(user)
}

fn validate_new_user(new_user: &NewUser) -> Result<(), AppError> {
    if new_user.name.trim().is_empty() {
        return Err(AppError::InvalidRequest("name is required".to_string()));
    }

    let email = new_user.email.trim();
    if email.is_empty() {
        return Err(AppError::InvalidRequest("email is required".to_string()));
    }
    if !email.contains('@') {
        return Err(AppError::InvalidRequest(
            "email must contain '@'".to_string(),
        ));
    }

    if new_user.password.is_empty() {
        return Err(AppError::InvalidRequest("password is required".to_string()));
    }

    Ok(())
}
