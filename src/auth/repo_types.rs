use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String, // stored normalized lowercase
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub birthday: Option<String>,
    pub photo: Option<String>,
    #[serde(skip_serializing)]
    pub last_token: Option<String>, // informational copy of the latest JWT
    pub created_at: OffsetDateTime,
}

/// Fields for inserting a new user row.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub gender: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub birthday: Option<&'a str>,
    pub photo: Option<&'a str>,
}

/// Mutable profile fields. Anything left as `None` keeps its current value;
/// email and password are absent on purpose and cannot change here.
#[derive(Debug, Default)]
pub struct ProfilePatch<'a> {
    pub name: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub birthday: Option<&'a str>,
    pub photo: Option<&'a str>,
}
