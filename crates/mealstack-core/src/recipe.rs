//! Canonical recipe shapes produced by the import pipeline.
//!
//! ## Two output shapes, one contract
//!
//! [`CanonicalRecipe`] is what structured (JSON-LD) extraction produces:
//! `ingredients` and `method_steps` are **JSON-encoded array strings**,
//! never null — an empty list is the literal string `"[]"`. The array
//! elements are carried verbatim from the source page, so an element may
//! be a plain string (`"200g flour"`) or a schema.org object such as a
//! `HowToStep`.
//!
//! [`ImportedRecipe`] is what the generative fallback produces. The model
//! is called with a response schema that declares `ingredients` and
//! `method_steps` required, but schema enforcement is model-side and not
//! guaranteed: a response missing either array still parses, with the
//! missing array treated as empty via `#[serde(default)]`.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// The normalized output of structured-data extraction.
///
/// All fields are always present; absent source data degrades to `0` or
/// `"[]"` rather than to nulls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecipe {
    /// Kebab-cased title, or `imported-recipe-<timestamp>` when the source
    /// had no title.
    pub slug: String,
    pub title: String,
    /// Cooking time in whole minutes; `0` when absent.
    pub cook_time: u32,
    /// Preparation time in whole minutes; `0` when absent.
    pub prep_time: u32,
    /// Serving count; `0` when absent or non-numeric.
    pub serves: u32,
    /// JSON-encoded array string of ingredient entries, verbatim from the
    /// source. Never null; `"[]"` when absent.
    pub ingredients: String,
    /// JSON-encoded array string of method steps, verbatim from the
    /// source. Never null; `"[]"` when absent.
    pub method_steps: String,
}

/// A recipe extracted by the generative model.
///
/// Matches the response schema sent with every model call. Numeric fields
/// tolerate JSON floats (the schema declares them as NUMBER, so the model
/// may emit `90.0` where `90` is meant).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedRecipe {
    pub title: String,
    #[serde(deserialize_with = "lossy_u32")]
    pub cook_time: u32,
    #[serde(deserialize_with = "lossy_u32")]
    pub prep_time: u32,
    #[serde(deserialize_with = "lossy_u32")]
    pub serves: u32,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    /// Missing array in the model response means empty, not an error.
    #[serde(default)]
    pub ingredients: Vec<IngredientEntry>,
    #[serde(default)]
    pub method_steps: Vec<MethodStepEntry>,
}

/// One ingredient as structured by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientEntry {
    pub name: String,
    pub quantity: String,
    pub units: String,
    /// `"true"` or `"false"`; kept as a string to match the model schema.
    pub ismain: String,
}

/// One method step as structured by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodStepEntry {
    pub step_text: String,
}

/// Deserializes any JSON number into a `u32`, truncating floats and
/// clamping negatives to zero.
fn lossy_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() {
        return Err(de::Error::custom("non-finite number"));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(value.max(0.0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imported_recipe_missing_arrays_deserialize_as_empty() {
        let raw = r#"{"title":"Soup","cook_time":20,"prep_time":5,"serves":2}"#;
        let recipe: ImportedRecipe = serde_json::from_str(raw).unwrap();
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.method_steps.is_empty());
    }

    #[test]
    fn imported_recipe_accepts_float_minutes() {
        let raw = r#"{"title":"Soup","cook_time":90.0,"prep_time":5.5,"serves":2}"#;
        let recipe: ImportedRecipe = serde_json::from_str(raw).unwrap();
        assert_eq!(recipe.cook_time, 90);
        assert_eq!(recipe.prep_time, 5);
    }

    #[test]
    fn imported_recipe_full_shape_round_trips() {
        let raw = r#"{
            "title": "Chocolate Cake",
            "cook_time": 45,
            "prep_time": 20,
            "serves": 8,
            "author": "Jane",
            "source": "https://example.com/cake",
            "ingredients": [
                {"name": "flour", "quantity": "200", "units": "g", "ismain": "true"}
            ],
            "method_steps": [
                {"step_text": "Mix the dry ingredients."}
            ]
        }"#;
        let recipe: ImportedRecipe = serde_json::from_str(raw).unwrap();
        assert_eq!(recipe.ingredients.len(), 1);
        assert_eq!(recipe.ingredients[0].name, "flour");
        assert_eq!(recipe.method_steps[0].step_text, "Mix the dry ingredients.");
        assert_eq!(recipe.author.as_deref(), Some("Jane"));
    }

    #[test]
    fn imported_recipe_negative_number_clamps_to_zero() {
        let raw = r#"{"title":"Soup","cook_time":-5,"prep_time":0,"serves":2}"#;
        let recipe: ImportedRecipe = serde_json::from_str(raw).unwrap();
        assert_eq!(recipe.cook_time, 0);
    }
}
