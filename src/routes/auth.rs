use crate::{
    auth::{
        generate_token, hash_password, verify_password, AuthResponse, ForgotPasswordRequest,
        LoginRequest, RegisterRequest,
    },
    error::AppError,
    models::User,
};
use actix_web::{post, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Register a new user
///
/// Creates a new account and returns the public user fields plus a signed
/// bearer token. Email and username must both be unused.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    // Friendly 409 for the common case; the unique constraints catch races.
    let existing_user: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM users WHERE email = $1 OR username = $2")
            .bind(&register_data.email)
            .bind(&register_data.username)
            .fetch_optional(&**pool)
            .await?;

    if existing_user.is_some() {
        return Err(AppError::Conflict("Email or username already exists".into()));
    }

    let password_hash = hash_password(&register_data.password)?;

    let user: User = sqlx::query_as(
        "INSERT INTO users (id, email, username, password_hash, created_at) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, email, username, password_hash, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(&register_data.email)
    .bind(&register_data.username)
    .bind(&password_hash)
    .bind(Utc::now())
    .fetch_one(&**pool)
    .await?;

    let token = generate_token(user.id)?;
    log::info!("registered user {}", user.username);

    Ok(HttpResponse::Created().json(AuthResponse {
        id: user.id,
        email: user.email,
        username: user.username,
        token,
    }))
}

/// Login user
///
/// Authenticates by username and password and returns a bearer token.
/// Unknown usernames and wrong passwords get the same 401 message.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let user: Option<User> = sqlx::query_as(
        "SELECT id, email, username, password_hash, created_at FROM users WHERE username = $1",
    )
    .bind(&login_data.username)
    .fetch_optional(&**pool)
    .await?;

    match user {
        Some(user) if verify_password(&login_data.password, &user.password_hash)? => {
            let token = generate_token(user.id)?;
            Ok(HttpResponse::Ok().json(AuthResponse {
                id: user.id,
                email: user.email,
                username: user.username,
                token,
            }))
        }
        _ => Err(AppError::Unauthorized("Invalid username or password".into())),
    }
}

/// Reset a forgotten password
///
/// Replaces the stored hash for the given username. The new password must
/// differ from the current one, which is checked against the stored hash
/// since plaintext is never kept.
#[post("/forgot-password")]
pub async fn forgot_password(
    pool: web::Data<PgPool>,
    reset_data: web::Json<ForgotPasswordRequest>,
) -> Result<impl Responder, AppError> {
    reset_data.validate()?;

    let user: Option<User> = sqlx::query_as(
        "SELECT id, email, username, password_hash, created_at FROM users WHERE username = $1",
    )
    .bind(&reset_data.username)
    .fetch_optional(&**pool)
    .await?;

    let user = user.ok_or_else(|| AppError::NotFound("User not found".into()))?;

    if verify_password(&reset_data.new_password, &user.password_hash)? {
        return Err(AppError::Validation(
            "New password must be different from the current password".into(),
        ));
    }

    let password_hash = hash_password(&reset_data.new_password)?;

    sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
        .bind(&password_hash)
        .bind(user.id)
        .execute(&**pool)
        .await?;

    log::info!("password reset for user {}", user.username);

    Ok(HttpResponse::Ok().json(json!({
        "message": "Password reset successful"
    })))
}
