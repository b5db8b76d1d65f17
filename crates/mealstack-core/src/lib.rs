//! Shared types and pure normalization logic for the mealstack import
//! pipeline.
//!
//! Everything in this crate is synchronous and side-effect free except
//! [`config::load_app_config`], which reads process environment variables.

pub mod app_config;
pub mod config;
pub mod normalize;
pub mod recipe;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use recipe::{CanonicalRecipe, ImportedRecipe, IngredientEntry, MethodStepEntry};
