//! The response schema sent with every model call.

use serde_json::{json, Value};

/// Gemini response schema constraining the model to the canonical recipe
/// field set. Enforcement is model-side: `required` is a strong hint, not
/// a guarantee, which is why [`mealstack_core::ImportedRecipe`] treats
/// missing arrays as empty.
#[must_use]
pub fn recipe_schema() -> Value {
    json!({
        "description": "Recipe data extraction schema",
        "type": "OBJECT",
        "properties": {
            "slug": { "type": "STRING", "description": "A unique slug for the recipe" },
            "title": { "type": "STRING", "description": "The recipe title" },
            "cook_time": { "type": "NUMBER", "description": "Cooking time in minutes" },
            "prep_time": { "type": "NUMBER", "description": "Preparation time in minutes" },
            "serves": { "type": "NUMBER", "description": "Number of servings" },
            "author": { "type": "STRING", "description": "Recipe author" },
            "source": { "type": "STRING", "description": "Recipe source URL or name" },
            "ingredients": {
                "type": "ARRAY",
                "description": "List of ingredients",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING", "description": "Ingredient name" },
                        "quantity": { "type": "STRING", "description": "Quantity" },
                        "units": { "type": "STRING", "description": "Units" },
                        "ismain": { "type": "STRING", "description": "'true' or 'false'" }
                    },
                    "required": ["name", "quantity", "units", "ismain"]
                }
            },
            "method_steps": {
                "type": "ARRAY",
                "description": "Cooking instructions",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "step_text": { "type": "STRING", "description": "Instruction text" }
                    },
                    "required": ["step_text"]
                }
            }
        },
        "required": ["title", "cook_time", "prep_time", "serves", "ingredients", "method_steps"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_requires_the_core_fields() {
        let schema = recipe_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        for field in ["title", "cook_time", "prep_time", "serves"] {
            assert!(required.contains(&field), "missing required field {field}");
        }
    }

    #[test]
    fn ingredient_items_require_all_four_fields() {
        let schema = recipe_schema();
        let required = &schema["properties"]["ingredients"]["items"]["required"];
        assert_eq!(required, &json!(["name", "quantity", "units", "ismain"]));
    }
}
