use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::repo_types::{NewUser, ProfilePatch, User};

impl User {
    /// Find a user by normalized email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, gender, phone, birthday, photo,
                   last_token, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, gender, phone, birthday, photo,
                   last_token, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Create a new user with a hashed password.
    pub async fn create(db: &PgPool, new: NewUser<'_>) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, gender, phone, birthday, photo)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, email, password_hash, gender, phone, birthday, photo,
                      last_token, created_at
            "#,
        )
        .bind(new.name)
        .bind(new.email)
        .bind(new.password_hash)
        .bind(new.gender)
        .bind(new.phone)
        .bind(new.birthday)
        .bind(new.photo)
        .fetch_one(db)
        .await
    }

    /// Apply a partial profile update and return the fresh row.
    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        patch: ProfilePatch<'_>,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                name     = COALESCE($2, name),
                gender   = COALESCE($3, gender),
                phone    = COALESCE($4, phone),
                birthday = COALESCE($5, birthday),
                photo    = COALESCE($6, photo)
            WHERE id = $1
            RETURNING id, name, email, password_hash, gender, phone, birthday, photo,
                      last_token, created_at
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.gender)
        .bind(patch.phone)
        .bind(patch.birthday)
        .bind(patch.photo)
        .fetch_one(db)
        .await
    }

    /// Remember the most recently issued token. Informational only; token
    /// verification never consults this column.
    pub async fn record_token(db: &PgPool, id: Uuid, token: &str) -> sqlx::Result<()> {
        sqlx::query("UPDATE users SET last_token = $2 WHERE id = $1")
            .bind(id)
            .bind(token)
            .execute(db)
            .await?;
        Ok(())
    }
}
