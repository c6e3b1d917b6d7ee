use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::extractors::AuthUser,
    error::ApiError,
    recipes::{
        dto::{
            CreateRecipeRequest, RecipeListQuery, RecipeResponse, SaveRecipeRequest,
            SavedRecipeResponse, StatusMessage, UpdateRecipeRequest,
        },
        repo::{Recipe, RecipePatch, SavedRecipe},
        services::{escape_like, parse_category_filter, validate_ingredients, Category},
    },
    state::AppState,
};

pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route(
            "/recipes/:id",
            get(get_recipe).put(update_recipe).delete(delete_recipe),
        )
        .route("/recipes/user/:id", get(list_recipes_by_user))
}

pub fn saved_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes/saved", get(list_saved).post(save_recipe))
        .route("/recipes/saved/:id", delete(unsave_recipe))
}

fn required(value: Option<&str>, field: &str) -> Result<String, ApiError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::Validation(format!("{field} is required")))
}

/// `None` passes through; `Some` must be non-blank.
fn optional(value: Option<&str>, field: &str) -> Result<Option<String>, ApiError> {
    match value {
        None => Ok(None),
        Some(v) => {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                return Err(ApiError::Validation(format!("{field} must not be empty")));
            }
            Ok(Some(trimmed.to_string()))
        }
    }
}

fn parse_category(raw: &str) -> Result<Category, ApiError> {
    Category::parse(raw).ok_or_else(|| {
        ApiError::Validation("Category must be either 'veg' or 'nonveg'".into())
    })
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn create_recipe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError> {
    let title = required(payload.title.as_deref(), "Title")?;
    let instructions = required(payload.instructions.as_deref(), "Instructions")?;
    let image_url = required(payload.image_url.as_deref(), "Image")?;
    let ingredients = payload.ingredients.unwrap_or_default();
    validate_ingredients(&ingredients)?;
    let category = match payload.category.as_deref() {
        Some(raw) => parse_category(raw)?,
        None => Category::default(),
    };

    // Owner comes from the verified token, never from the body.
    let recipe = Recipe::insert(
        &state.db,
        user.id,
        &title,
        &instructions,
        &ingredients,
        category.as_str(),
        &image_url,
    )
    .await?;

    info!(recipe_id = %recipe.id, user_id = %user.id, "recipe created");
    Ok((
        StatusCode::CREATED,
        Json(RecipeResponse::with_author(recipe, &user)),
    ))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(query): Query<RecipeListQuery>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let categories = match query.category.as_deref() {
        Some(raw) => {
            let parsed = parse_category_filter(raw)?;
            if parsed.is_empty() {
                None
            } else {
                Some(parsed)
            }
        }
        None => None,
    };
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(escape_like);

    let rows = Recipe::list(&state.db, categories, search).await?;
    Ok(Json(rows.into_iter().map(RecipeResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let row = Recipe::get(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Recipe not found".into()))?;
    Ok(Json(row.into()))
}

#[instrument(skip(state))]
pub async fn list_recipes_by_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let rows = Recipe::list_by_user(&state.db, id).await?;
    Ok(Json(rows.into_iter().map(RecipeResponse::from).collect()))
}

#[instrument(skip_all, fields(recipe_id = %id, user_id = %user.id))]
pub async fn update_recipe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRecipeRequest>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let title = optional(payload.title.as_deref(), "Title")?;
    let instructions = optional(payload.instructions.as_deref(), "Instructions")?;
    let image_url = optional(payload.image_url.as_deref(), "Image")?;
    if let Some(ingredients) = &payload.ingredients {
        validate_ingredients(ingredients)?;
    }
    let category = match payload.category.as_deref() {
        Some(raw) => Some(parse_category(raw)?),
        None => None,
    };

    // Missing and not-yours are different answers; load first to tell them
    // apart.
    let existing = Recipe::get(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Recipe not found".into()))?;
    if existing.recipe.user_id != user.id {
        warn!(owner = %existing.recipe.user_id, "recipe update forbidden");
        return Err(ApiError::Forbidden(
            "Not authorized to update this recipe".into(),
        ));
    }

    let updated = Recipe::update_owned(
        &state.db,
        id,
        user.id,
        RecipePatch {
            title: title.as_deref(),
            instructions: instructions.as_deref(),
            ingredients: payload.ingredients.as_deref(),
            category: category.map(|c| c.as_str()),
            image_url: image_url.as_deref(),
        },
    )
    .await?
    // Owner changed or row vanished between the check and the write.
    .ok_or_else(|| ApiError::NotFound("Recipe not found".into()))?;

    info!("recipe updated");
    Ok(Json(RecipeResponse::with_author(updated, &user)))
}

#[instrument(skip_all, fields(recipe_id = %id, user_id = %user.id))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusMessage>, ApiError> {
    let existing = Recipe::get(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Recipe not found".into()))?;
    if existing.recipe.user_id != user.id {
        warn!(owner = %existing.recipe.user_id, "recipe delete forbidden");
        return Err(ApiError::Forbidden(
            "Not authorized to delete this recipe".into(),
        ));
    }

    let removed = Recipe::delete_owned(&state.db, id, user.id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Recipe not found".into()));
    }

    info!("recipe deleted");
    Ok(Json(StatusMessage {
        message: "Recipe deleted successfully".into(),
    }))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn save_recipe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<SaveRecipeRequest>,
) -> Result<(StatusCode, Json<SavedRecipeResponse>), ApiError> {
    let recipe_id = payload
        .recipe_id
        .ok_or_else(|| ApiError::Validation("Recipe id is required".into()))?;

    let recipe = Recipe::get(&state.db, recipe_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Recipe not found".into()))?;

    if SavedRecipe::exists(&state.db, user.id, recipe_id).await? {
        return Err(ApiError::Conflict("Recipe already saved".into()));
    }
    // The unique index backstops a concurrent double-save; that insert
    // fails and maps to the same conflict.
    let link = SavedRecipe::insert(&state.db, user.id, recipe_id).await?;

    info!(recipe_id = %recipe_id, "recipe saved");
    Ok((
        StatusCode::CREATED,
        Json(SavedRecipeResponse {
            id: link.id,
            recipe: recipe.into(),
        }),
    ))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn list_saved(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let rows = SavedRecipe::list_for_user(&state.db, user.id).await?;
    Ok(Json(rows.into_iter().map(RecipeResponse::from).collect()))
}

#[instrument(skip_all, fields(recipe_id = %id, user_id = %user.id))]
pub async fn unsave_recipe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusMessage>, ApiError> {
    let removed = SavedRecipe::delete(&state.db, user.id, id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Saved recipe not found".into()));
    }

    info!("recipe unsaved");
    Ok(Json(StatusMessage {
        message: "Recipe removed from saved recipes".into(),
    }))
}
