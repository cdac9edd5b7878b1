use std::net::SocketAddr;
use std::sync::LazyLock;

use axum::Json;
use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::auth::jwt::{Claims, encode_token};
use crate::auth::password;
use crate::error::AppError;
use crate::models::User;
use crate::state::SharedState;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
    pub new_password_confirm: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: User,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

#[derive(Serialize)]
pub struct ForgotPasswordResponse {
    pub message: String,
    pub token: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn generate_reset_token() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}

fn validate_password(password: &str, confirm: &str) -> Result<(), AppError> {
    if password != confirm {
        return Err(AppError::BadRequest("Passwords do not match".to_string()));
    }
    if password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    Ok(())
}

pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let email = req.email.trim().to_lowercase();
    let full_name = req.full_name.trim();

    if email.is_empty() || req.password.is_empty() || full_name.is_empty() {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    }

    if !EMAIL_RE.is_match(&email) {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    validate_password(&req.password, &req.password_confirm)?;

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    let user = state.store.create(&email, &pw_hash, full_name).await?;

    tracing::info!("Registered user {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user,
        }),
    ))
}

pub async fn login(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if state.login_limiter.check(addr.ip()).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let email = req.email.trim().to_lowercase();

    let user = state
        .store
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = password::verify(&req.password, &user.password_hash).map_err(AppError::Internal)?;

    if !valid {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let access_token =
        encode_token(&Claims::access(user.id), &state.config.jwt_secret).map_err(AppError::Internal)?;
    let refresh_token =
        encode_token(&Claims::refresh(user.id), &state.config.jwt_secret).map_err(AppError::Internal)?;

    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
        user,
    }))
}

pub async fn forgot_password(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<ForgotPasswordResponse>, AppError> {
    if state.forgot_limiter.check(addr.ip()).is_err() {
        return Err(AppError::RateLimited(
            "Too many reset requests. Please try again later.".to_string(),
        ));
    }

    let email = req.email.trim().to_lowercase();

    let user = state
        .store
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::NotFound("User with this email does not exist".to_string()))?;

    let token = generate_reset_token();
    state.reset_tokens.insert(token.clone(), user.id);

    // Deliver the token out of band; send failure is logged, not surfaced
    if let Some(mailer) = state.mailer.clone() {
        let to = user.email.clone();
        let mail_token = token.clone();
        let ttl_minutes = state.config.reset_token_ttl / 60;
        tokio::spawn(async move {
            if let Err(e) = mailer
                .send_password_reset(&to, &mail_token, ttl_minutes)
                .await
            {
                tracing::error!("Failed to send password reset email: {e}");
            }
        });
    } else {
        tracing::warn!("System SMTP not configured. Password reset token: {token}");
    }

    Ok(Json(ForgotPasswordResponse {
        message: "Password reset token sent to your email".to_string(),
        token,
    }))
}

pub async fn reset_password(
    State(state): State<SharedState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    validate_password(&req.new_password, &req.new_password_confirm)?;

    let user_id = state
        .reset_tokens
        .take(&req.token)
        .ok_or_else(|| AppError::NotFound("Invalid or expired token".to_string()))?;

    let user = state
        .store
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let pw_hash = password::hash(&req.new_password).map_err(AppError::Internal)?;
    state.store.update_password(user.id, &pw_hash).await?;

    tracing::info!("Password reset for user {}", user.id);

    Ok(Json(MessageResponse {
        message: "Password reset successful".to_string(),
    }))
}

pub async fn profile(
    State(state): State<SharedState>,
    auth: AuthUser,
) -> Result<Json<User>, AppError> {
    let user = state
        .store
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    Ok(Json(user))
}
