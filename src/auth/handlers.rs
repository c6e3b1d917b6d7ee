use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            AuthResponse, JwtKeys, LoginRequest, PublicUser, RegisterRequest,
            UpdateProfileRequest,
        },
        extractors::AuthUser,
        repo_types::{NewUser, ProfilePatch, User},
        services::{hash_password, is_valid_email, verify_password},
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/users/me", get(get_me).put(update_me))
}

fn required(value: Option<&str>, field: &str) -> Result<String, ApiError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::Validation(format!("{field} is required")))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let name = required(payload.name.as_deref(), "Name")?;
    let email = required(payload.email.as_deref(), "Email")?.to_lowercase();
    let password = required(payload.password.as_deref(), "Password")?;

    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }
    if password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::Validation("Password too short".into()));
    }

    // Ensure email is not taken. The unique index backstops a concurrent
    // duplicate, which also surfaces as a conflict.
    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(ApiError::Conflict("Email already registered".into()));
    }

    let hash = hash_password(&password)?;

    let user = User::create(
        &state.db,
        NewUser {
            name: &name,
            email: &email,
            password_hash: &hash,
            gender: payload.gender.as_deref(),
            phone: payload.phone.as_deref(),
            birthday: payload.birthday.as_deref(),
            photo: payload.photo.as_deref(),
        },
    )
    .await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;
    User::record_token(&state.db, user.id, &token).await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = required(payload.email.as_deref(), "Email")?.to_lowercase();
    let password = required(payload.password.as_deref(), "Password")?;

    // Unknown email and wrong password answer with the same status and
    // message; only the logs differ.
    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| {
            warn!(email = %email, "login unknown email");
            ApiError::InvalidCredentials
        })?;

    if !verify_password(&password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;
    User::record_token(&state.db, user.id, &token).await?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn get_me(AuthUser(user): AuthUser) -> Json<PublicUser> {
    Json(user.into())
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    if let Some(name) = payload.name.as_deref() {
        if name.trim().is_empty() {
            return Err(ApiError::Validation("Name must not be empty".into()));
        }
    }

    let updated = User::update_profile(
        &state.db,
        user.id,
        ProfilePatch {
            name: payload.name.as_deref().map(str::trim),
            gender: payload.gender.as_deref(),
            phone: payload.phone.as_deref(),
            birthday: payload.birthday.as_deref(),
            photo: payload.photo.as_deref(),
        },
    )
    .await?;

    info!(user_id = %user.id, "profile updated");
    Ok(Json(updated.into()))
}
