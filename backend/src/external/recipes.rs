//! Recipe recommendation API client
//!
//! Posts a list of ingredient names to the recommendation service and returns
//! the recipes it suggests.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// The upstream dataset contains one placeholder entry under this index;
/// it is filtered out of every response
const PLACEHOLDER_RECIPE_INDEX: i64 = 4969;

/// Recipe recommendation API client
#[derive(Clone)]
pub struct RecipeClient {
    client: Client,
    base_url: String,
}

/// A recommended recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub ingredients: Vec<String>,
}

/// Request body for the recommendation endpoint
#[derive(Debug, Serialize)]
struct RecommendationRequest<'a> {
    ingredients: &'a [String],
}

/// Recommendation service response
#[derive(Debug, Deserialize)]
struct RecommendationResponse {
    data: Vec<RecipeRecord>,
}

#[derive(Debug, Deserialize)]
struct RecipeRecord {
    index: i64,
    name: String,
    ingredients: Vec<String>,
}

impl RecipeClient {
    /// Create a new RecipeClient
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Recommend recipes for the given ingredient names
    pub async fn recommend(&self, ingredients: &[String]) -> AppResult<Vec<Recipe>> {
        let url = format!("{}/recommend", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&RecommendationRequest { ingredients })
            .send()
            .await
            .map_err(|e| AppError::RecipeService(format!("Recipe API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::RecipeService(format!(
                "Recipe API error: {} - {}",
                status, body
            )));
        }

        let data: RecommendationResponse = response.json().await.map_err(|e| {
            AppError::RecipeService(format!("Failed to parse recipe response: {}", e))
        })?;

        Ok(data
            .data
            .into_iter()
            .filter(|r| r.index != PLACEHOLDER_RECIPE_INDEX)
            .map(|r| Recipe {
                id: r.index,
                name: r.name,
                ingredients: r.ingredients,
            })
            .collect())
    }
}
