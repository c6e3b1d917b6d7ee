use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo_types::User;
use crate::recipes::repo::{Ingredient, Recipe, RecipeWithAuthor};

/// Request body for recipe creation. Required fields are validated in the
/// handler so a missing field answers 400, not a decode error. Any
/// client-supplied owner is ignored by construction: there is no field for it.
#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub title: Option<String>,
    pub instructions: Option<String>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

/// Partial recipe update.
#[derive(Debug, Deserialize)]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub instructions: Option<String>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecipeListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveRecipeRequest {
    #[serde(alias = "id")]
    pub recipe_id: Option<Uuid>,
}

/// Owner identity embedded in recipe responses.
#[derive(Debug, Serialize)]
pub struct RecipeAuthor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub instructions: String,
    pub ingredients: Vec<Ingredient>,
    pub category: String,
    pub image_url: String,
    pub user: RecipeAuthor,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl RecipeResponse {
    /// For mutation responses, where the author is the authenticated caller.
    pub fn with_author(recipe: Recipe, author: &User) -> Self {
        Self {
            id: recipe.id,
            user_id: recipe.user_id,
            title: recipe.title,
            instructions: recipe.instructions,
            ingredients: recipe.ingredients.0,
            category: recipe.category,
            image_url: recipe.image_url,
            user: RecipeAuthor {
                id: author.id,
                name: author.name.clone(),
                email: author.email.clone(),
            },
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

impl From<RecipeWithAuthor> for RecipeResponse {
    fn from(row: RecipeWithAuthor) -> Self {
        Self {
            id: row.recipe.id,
            user_id: row.recipe.user_id,
            title: row.recipe.title,
            instructions: row.recipe.instructions,
            ingredients: row.recipe.ingredients.0,
            category: row.recipe.category,
            image_url: row.recipe.image_url,
            user: RecipeAuthor {
                id: row.recipe.user_id,
                name: row.author_name,
                email: row.author_email,
            },
            created_at: row.recipe.created_at,
            updated_at: row.recipe.updated_at,
        }
    }
}

/// Response for a newly created bookmark.
#[derive(Debug, Serialize)]
pub struct SavedRecipeResponse {
    pub id: Uuid,
    pub recipe: RecipeResponse,
}

#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub message: String,
}
