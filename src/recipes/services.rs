use crate::error::ApiError;
use crate::recipes::repo::Ingredient;

/// Fixed recipe category enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Category {
    #[default]
    Veg,
    NonVeg,
}

impl Category {
    /// Accepts the canonical values plus the spellings frontend filters send.
    pub fn parse(raw: &str) -> Option<Category> {
        match raw.trim().to_lowercase().as_str() {
            "veg" | "vegetarian" => Some(Category::Veg),
            "nonveg" | "non-veg" | "nonvegetarian" | "non-vegetarian" => Some(Category::NonVeg),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Veg => "veg",
            Category::NonVeg => "nonveg",
        }
    }
}

/// `?category=` takes a comma-separated list. Unknown names are rejected
/// rather than silently matching nothing.
pub fn parse_category_filter(raw: &str) -> Result<Vec<String>, ApiError> {
    let mut out = Vec::new();
    for part in raw.split(',').filter(|p| !p.trim().is_empty()) {
        let category = Category::parse(part).ok_or_else(|| {
            ApiError::Validation(format!("Unknown category '{}'", part.trim()))
        })?;
        let value = category.as_str().to_string();
        if !out.contains(&value) {
            out.push(value);
        }
    }
    Ok(out)
}

/// Every recipe needs at least one ingredient, each with both a name and a
/// quantity.
pub fn validate_ingredients(ingredients: &[Ingredient]) -> Result<(), ApiError> {
    if ingredients.is_empty() {
        return Err(ApiError::Validation(
            "At least one ingredient is required".into(),
        ));
    }
    for ingredient in ingredients {
        if ingredient.name.trim().is_empty() || ingredient.quantity.trim().is_empty() {
            return Err(ApiError::Validation(
                "Each ingredient must have both name and quantity".into(),
            ));
        }
    }
    Ok(())
}

/// Make `%`, `_` and `\` literal inside an ILIKE pattern.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(name: &str, quantity: &str) -> Ingredient {
        Ingredient {
            name: name.into(),
            quantity: quantity.into(),
        }
    }

    #[test]
    fn category_parses_canonical_and_aliases() {
        assert_eq!(Category::parse("veg"), Some(Category::Veg));
        assert_eq!(Category::parse("Vegetarian"), Some(Category::Veg));
        assert_eq!(Category::parse("nonveg"), Some(Category::NonVeg));
        assert_eq!(Category::parse("non-vegetarian"), Some(Category::NonVeg));
        assert_eq!(Category::parse("NonVegetarian"), Some(Category::NonVeg));
        assert_eq!(Category::parse("vegan"), None);
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn category_defaults_to_veg() {
        assert_eq!(Category::default(), Category::Veg);
    }

    #[test]
    fn filter_maps_and_dedupes() {
        let parsed = parse_category_filter("vegetarian,veg,nonveg").unwrap();
        assert_eq!(parsed, vec!["veg".to_string(), "nonveg".to_string()]);
    }

    #[test]
    fn filter_rejects_unknown_category() {
        let err = parse_category_filter("veg,seafood").unwrap_err();
        assert!(err.to_string().contains("seafood"));
    }

    #[test]
    fn filter_ignores_empty_segments() {
        let parsed = parse_category_filter(" , veg ,").unwrap();
        assert_eq!(parsed, vec!["veg".to_string()]);
    }

    #[test]
    fn ingredients_must_be_non_empty() {
        assert!(validate_ingredients(&[]).is_err());
    }

    #[test]
    fn ingredients_need_name_and_quantity() {
        assert!(validate_ingredients(&[ingredient("Salt", "1tsp")]).is_ok());
        assert!(validate_ingredients(&[ingredient("", "1tsp")]).is_err());
        assert!(validate_ingredients(&[ingredient("Salt", " ")]).is_err());
        assert!(
            validate_ingredients(&[ingredient("Salt", "1tsp"), ingredient("Pepper", "")]).is_err()
        );
    }

    #[test]
    fn like_escaping_makes_wildcards_literal() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("soup"), "soup");
    }
}
