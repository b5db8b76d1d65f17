//! Transient data shapes flowing through structured extraction.
//!
//! ## Observed JSON-LD value shapes from live recipe pages
//!
//! Recipe publishers are wildly inconsistent:
//! - `cookTime`/`prepTime` — ISO-8601 duration strings, occasionally
//!   wrapped as `{"@value": "PT30M"}` or a one-element array.
//! - `recipeYield` — a bare number, a numeric string, or an array like
//!   `["8", "8 servings"]`.
//! - `recipeIngredient` — array of strings on well-behaved sites, but a
//!   single bare string when the page has exactly one ingredient.
//! - `recipeInstructions` — array of strings, or array of `HowToStep`
//!   objects (`{"@type": "HowToStep", "text": "…"}`). Carried verbatim;
//!   the builder serializes whatever is there.
//!
//! Accessors on [`FramedNode`] unwrap the `@value`/one-element-array
//! packaging but never coerce types; coercion lives in
//! [`mealstack_core::normalize`].

use serde_json::{Map, Value};

/// A fetched page: HTML text plus the originating URL. Produced by one
/// fetch, consumed once, never stored.
#[derive(Debug, Clone)]
pub struct RawPage {
    pub url: String,
    pub html: String,
}

/// The result of framing a parsed linked-data document against the fixed
/// Recipe frame: a single flat node holding only allowlisted fields.
///
/// A `FramedNode` may be semantically empty — framing succeeded but the
/// source populated none of the recipe fields. The builder detects that
/// case (the "hollow shell") and hands the node back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramedNode {
    node: Map<String, Value>,
}

impl FramedNode {
    #[must_use]
    pub(crate) fn new(node: Map<String, Value>) -> Self {
        Self { node }
    }

    /// Raw field access by short schema.org term.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.node.get(field)
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    #[must_use]
    pub fn cook_time(&self) -> Option<&str> {
        self.str_field("cookTime")
    }

    #[must_use]
    pub fn prep_time(&self) -> Option<&str> {
        self.str_field("prepTime")
    }

    #[must_use]
    pub fn recipe_yield(&self) -> Option<&Value> {
        self.get("recipeYield").map(unwrap_value_object)
    }

    #[must_use]
    pub fn recipe_ingredient(&self) -> Option<&Value> {
        self.get("recipeIngredient")
    }

    #[must_use]
    pub fn recipe_instructions(&self) -> Option<&Value> {
        self.get("recipeInstructions")
    }

    /// String accessor that unwraps `{"@value": …}` objects and
    /// one-element arrays before requiring a string.
    fn str_field(&self, field: &str) -> Option<&str> {
        let value = unwrap_scalar(self.get(field)?);
        value.as_str()
    }

    /// The framed node as a plain JSON value, for callers that received a
    /// hollow shell and want the raw data.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.node)
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.node
    }
}

/// Unwraps JSON-LD value packaging: one-element arrays and `@value`
/// wrapper objects, applied repeatedly (`[{"@value": "PT30M"}]` resolves
/// to the inner string).
fn unwrap_scalar(mut value: &Value) -> &Value {
    loop {
        match value {
            Value::Array(items) if items.len() == 1 => value = &items[0],
            other => {
                let unwrapped = unwrap_value_object(other);
                if std::ptr::eq(unwrapped, other) {
                    return other;
                }
                value = unwrapped;
            }
        }
    }
}

/// Unwraps `{"@value": …}` one level; any other shape passes through.
fn unwrap_value_object(value: &Value) -> &Value {
    match value {
        Value::Object(map) => map.get("@value").unwrap_or(value),
        other => other,
    }
}
