use jsonwebtoken::{DecodingKey, EncodingKey};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo_types::User;

/// JWT payload used for authentication.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,   // user ID
    pub exp: usize,  // expiration time
    pub iat: usize,  // issued at
    pub iss: String, // issuer
    pub aud: String, // audience
}

/// Holds JWT signing and verification keys with config data.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
}

/// Request body for user registration. Presence of the required fields is
/// checked in the handler so a missing field answers 400, not a decode error.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub birthday: Option<String>,
    pub photo: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for profile update. Email and password have no fields here,
/// so they cannot change through this path.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub birthday: Option<String>,
    pub photo: Option<String>,
}

/// Response returned after login or register.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Public part of the user returned to the client. No password hash, no
/// stored token.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub birthday: Option<String>,
    pub photo: Option<String>,
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            gender: u.gender,
            phone: u.phone,
            birthday: u.birthday,
            photo: u.photo,
            created_at: u.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ann".into(),
            email: "ann@x.com".into(),
            password_hash: "$argon2id$fake".into(),
            gender: None,
            phone: None,
            birthday: None,
            photo: None,
            last_token: Some("stale.jwt.value".into()),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn public_user_omits_secret_columns() {
        let json = serde_json::to_string(&PublicUser::from(sample_user())).unwrap();
        assert!(json.contains("ann@x.com"));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2"));
        assert!(!json.contains("last_token"));
    }

    #[test]
    fn user_row_serialization_skips_secret_columns() {
        let json = serde_json::to_string(&sample_user()).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("last_token"));
        assert!(!json.contains("stale.jwt.value"));
    }
}
