//! HTTP handlers for recipe recommendations

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::external::{Recipe, RecipeClient};
use crate::middleware::CurrentUser;
use crate::services::SummaryService;
use crate::AppState;

/// Recommend recipes from the user's in-stock product names
pub async fn recommend_recipes(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Recipe>>> {
    let service = SummaryService::new(state.db.clone());
    let in_stock = service.in_stock_items(current_user.0.user_id).await?;

    let ingredients = ingredient_names(in_stock.into_iter().map(|entry| entry.item.name));

    // Nothing in stock means nothing to cook with; skip the upstream call
    if ingredients.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let client = RecipeClient::new(state.config.recipes.api_endpoint.clone());
    let recipes = client.recommend(&ingredients).await?;
    Ok(Json(recipes))
}

/// Deduplicated ingredient names in the recommendation service's wire
/// form, which is lowercase
fn ingredient_names(names: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut names: Vec<String> = names.into_iter().map(|name| name.to_lowercase()).collect();
    names.sort();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_names_are_lowercased_and_deduplicated() {
        let names = ingredient_names(vec![
            "Whole Milk".to_string(),
            "whole milk".to_string(),
            "Eggs".to_string(),
        ]);
        assert_eq!(names, vec!["eggs".to_string(), "whole milk".to_string()]);
    }

    #[test]
    fn test_empty_stock_yields_no_ingredients() {
        assert!(ingredient_names(Vec::new()).is_empty());
    }
}
