//! External API integrations

pub mod recipes;

pub use recipes::{Recipe, RecipeClient};
