use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// One entry of a recipe's ordered ingredient list, stored inside the JSONB
/// `ingredients` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
}

/// Recipe record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub user_id: Uuid, // owner; written once at creation
    pub title: String,
    pub instructions: String,
    pub ingredients: Json<Vec<Ingredient>>,
    pub category: String,
    pub image_url: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Recipe joined with its author's public identity.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeWithAuthor {
    #[sqlx(flatten)]
    pub recipe: Recipe,
    pub author_name: String,
    pub author_email: String,
}

/// Partial recipe update. `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct RecipePatch<'a> {
    pub title: Option<&'a str>,
    pub instructions: Option<&'a str>,
    pub ingredients: Option<&'a [Ingredient]>,
    pub category: Option<&'a str>,
    pub image_url: Option<&'a str>,
}

const SELECT_WITH_AUTHOR: &str = r#"
    SELECT r.id, r.user_id, r.title, r.instructions, r.ingredients,
           r.category, r.image_url, r.created_at, r.updated_at,
           u.name AS author_name, u.email AS author_email
    FROM recipes r
    JOIN users u ON u.id = r.user_id
"#;

impl Recipe {
    /// Newest first, optionally narrowed by category set and title substring.
    pub async fn list(
        db: &PgPool,
        categories: Option<Vec<String>>,
        search: Option<String>,
    ) -> sqlx::Result<Vec<RecipeWithAuthor>> {
        let sql = format!(
            r#"{SELECT_WITH_AUTHOR}
            WHERE ($1::text[] IS NULL OR r.category = ANY($1))
              AND ($2::text IS NULL OR r.title ILIKE '%' || $2 || '%')
            ORDER BY r.created_at DESC
            "#
        );
        sqlx::query_as::<_, RecipeWithAuthor>(&sql)
            .bind(categories)
            .bind(search)
            .fetch_all(db)
            .await
    }

    pub async fn get(db: &PgPool, id: Uuid) -> sqlx::Result<Option<RecipeWithAuthor>> {
        let sql = format!("{SELECT_WITH_AUTHOR} WHERE r.id = $1");
        sqlx::query_as::<_, RecipeWithAuthor>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<RecipeWithAuthor>> {
        let sql = format!("{SELECT_WITH_AUTHOR} WHERE r.user_id = $1 ORDER BY r.created_at DESC");
        sqlx::query_as::<_, RecipeWithAuthor>(&sql)
            .bind(user_id)
            .fetch_all(db)
            .await
    }

    pub async fn insert(
        db: &PgPool,
        owner: Uuid,
        title: &str,
        instructions: &str,
        ingredients: &[Ingredient],
        category: &str,
        image_url: &str,
    ) -> sqlx::Result<Recipe> {
        sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (user_id, title, instructions, ingredients, category, image_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, title, instructions, ingredients, category, image_url,
                      created_at, updated_at
            "#,
        )
        .bind(owner)
        .bind(title)
        .bind(instructions)
        .bind(Json(ingredients))
        .bind(category)
        .bind(image_url)
        .fetch_one(db)
        .await
    }

    /// Owner sits in the predicate so the ownership check and the write hit
    /// the store as one statement; a concurrent owner change matches zero
    /// rows instead of racing.
    pub async fn update_owned(
        db: &PgPool,
        id: Uuid,
        owner: Uuid,
        patch: RecipePatch<'_>,
    ) -> sqlx::Result<Option<Recipe>> {
        sqlx::query_as::<_, Recipe>(
            r#"
            UPDATE recipes SET
                title        = COALESCE($3, title),
                instructions = COALESCE($4, instructions),
                ingredients  = COALESCE($5, ingredients),
                category     = COALESCE($6, category),
                image_url    = COALESCE($7, image_url),
                updated_at   = now()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, instructions, ingredients, category, image_url,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(patch.title)
        .bind(patch.instructions)
        .bind(patch.ingredients.map(Json))
        .bind(patch.category)
        .bind(patch.image_url)
        .fetch_optional(db)
        .await
    }

    pub async fn delete_owned(db: &PgPool, id: Uuid, owner: Uuid) -> sqlx::Result<u64> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Bookmark link between a user and a recipe.
#[derive(Debug, Clone, FromRow)]
pub struct SavedRecipe {
    pub id: Uuid,
    pub user_id: Uuid,
    pub recipe_id: Uuid,
    pub created_at: OffsetDateTime,
}

impl SavedRecipe {
    pub async fn exists(db: &PgPool, user_id: Uuid, recipe_id: Uuid) -> sqlx::Result<bool> {
        let row: Option<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM saved_recipes WHERE user_id = $1 AND recipe_id = $2",
        )
        .bind(user_id)
        .bind(recipe_id)
        .fetch_optional(db)
        .await?;
        Ok(row.is_some())
    }

    pub async fn insert(db: &PgPool, user_id: Uuid, recipe_id: Uuid) -> sqlx::Result<SavedRecipe> {
        sqlx::query_as::<_, SavedRecipe>(
            r#"
            INSERT INTO saved_recipes (user_id, recipe_id)
            VALUES ($1, $2)
            RETURNING id, user_id, recipe_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(recipe_id)
        .fetch_one(db)
        .await
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, recipe_id: Uuid) -> sqlx::Result<u64> {
        let result =
            sqlx::query("DELETE FROM saved_recipes WHERE user_id = $1 AND recipe_id = $2")
                .bind(user_id)
                .bind(recipe_id)
                .execute(db)
                .await?;
        Ok(result.rows_affected())
    }

    /// The caller's bookmarked recipes, most recently saved first.
    pub async fn list_for_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<RecipeWithAuthor>> {
        sqlx::query_as::<_, RecipeWithAuthor>(
            r#"
            SELECT r.id, r.user_id, r.title, r.instructions, r.ingredients,
                   r.category, r.image_url, r.created_at, r.updated_at,
                   u.name AS author_name, u.email AS author_email
            FROM saved_recipes s
            JOIN recipes r ON r.id = s.recipe_id
            JOIN users u ON u.id = r.user_id
            WHERE s.user_id = $1
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }
}
