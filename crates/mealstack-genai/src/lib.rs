//! Generative fallback extraction: submits recipe text or photographs to
//! Gemini under a strict response schema and maps the JSON reply onto
//! [`mealstack_core::ImportedRecipe`].
//!
//! Used when a page carries no structured recipe data, and for the
//! paste-text and photo-upload import paths.

pub mod client;
pub mod error;
pub mod extract;
pub mod schema;
pub mod settings;

pub use client::GeminiClient;
pub use error::ExtractionError;
pub use extract::GeminiExtractor;
pub use settings::{EnvSettings, SettingsStore, StaticSettings};
