//! Builds a [`CanonicalRecipe`] from a framed Recipe node.
//!
//! Field coercion is delegated to [`mealstack_core::normalize`]; this
//! module handles the structural assembly and the hollow-shell rule.

use chrono::Utc;
use serde_json::Value;

use mealstack_core::normalize::{
    duration_to_minutes, fallback_title, slug_for_title, yield_to_servings,
};
use mealstack_core::CanonicalRecipe;

use crate::types::FramedNode;

/// Result of building from a framed node: either a canonical recipe, or
/// the untouched framed node when it matched type Recipe but carried no
/// usable ingredient/step content.
///
/// The dual shape is deliberate — callers must pattern-match rather than
/// duck-type, and the `RawNode` arm is the escape hatch that lets the
/// orchestrator fall through to the generative path instead of emitting
/// an empty shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    Canonical(CanonicalRecipe),
    RawNode(FramedNode),
}

/// Builds a canonical recipe from a framed node.
///
/// Ingredients and instructions are serialized verbatim as JSON array
/// strings — elements may be plain strings or schema.org objects such as
/// `HowToStep` — and are never null (`"[]"` when absent). When both
/// serialize to `"[]"`, the node is handed back unchanged
/// ([`Extracted::RawNode`]).
#[must_use]
pub fn build_recipe(node: FramedNode) -> Extracted {
    let ingredients = serialize_list(node.recipe_ingredient());
    let method_steps = serialize_list(node.recipe_instructions());

    if ingredients == "[]" && method_steps == "[]" {
        tracing::debug!(
            "framed node has no ingredients or method steps; returning the raw node"
        );
        return Extracted::RawNode(node);
    }

    let now = Utc::now();
    let source_title = node.name().or_else(|| node.title());
    let slug = slug_for_title(source_title, now);
    let title = source_title.map_or_else(|| fallback_title(now), str::to_owned);

    let recipe = CanonicalRecipe {
        slug,
        title,
        cook_time: duration_to_minutes(node.cook_time()),
        prep_time: duration_to_minutes(node.prep_time()),
        serves: yield_to_servings(node.recipe_yield()),
        ingredients,
        method_steps,
    };
    Extracted::Canonical(recipe)
}

/// Serializes a list-shaped field to a JSON array string. A bare scalar
/// (single-ingredient pages) is wrapped into a one-element array so the
/// output is always a syntactically valid array.
fn serialize_list(value: Option<&Value>) -> String {
    let serialized = match value {
        None | Some(Value::Null) => None,
        Some(array @ Value::Array(_)) => serde_json::to_string(array).ok(),
        Some(scalar) => serde_json::to_string(&Value::Array(vec![scalar.clone()])).ok(),
    };
    serialized.unwrap_or_else(|| "[]".to_owned())
}
