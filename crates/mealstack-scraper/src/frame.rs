//! Frames a parsed linked-data document against the fixed Recipe shape.
//!
//! This is a recipe-specific framing operation, not a general JSON-LD
//! processor: the graph is flattened, the first `Recipe`-typed node is
//! selected, and only the allowlisted fields survive projection
//! (`@explicit` semantics). `@context` is honored far enough to resolve
//! term aliases — inline context objects are used directly, remote
//! context URLs go through the pluggable [`ContextLoader`].

use std::collections::{HashMap, VecDeque};

use serde_json::{Map, Value};

use crate::context::ContextLoader;
use crate::diagnostics::DiagnosticLog;
use crate::error::ScrapeError;
use crate::types::FramedNode;

/// Field allowlist of the Recipe frame. Anything outside this list is
/// pruned during projection.
pub(crate) const RECIPE_FRAME_FIELDS: &[&str] = &[
    "cookTime",
    "prepTime",
    "recipeYield",
    "cookingMethod",
    "datePublished",
    "author",
    "description",
    "name",
    "title",
    "recipeIngredient",
    "recipeCategory",
    "recipeCuisine",
    "recipeInstructions",
    "url",
];

/// Frames `doc` against the Recipe frame.
///
/// Always yields a [`FramedNode`] on success; when the graph carries no
/// `Recipe`-typed node the result is semantically empty (framing
/// succeeded, no recipe fields populated) and the builder's hollow-shell
/// rule takes over downstream.
///
/// # Errors
///
/// Returns the loader's error when a remote `@context` cannot be
/// fetched or parsed — a failed context resolution aborts the frame.
pub async fn frame_recipe(
    doc: &Value,
    loader: &dyn ContextLoader,
    log: &mut DiagnosticLog,
) -> Result<FramedNode, ScrapeError> {
    let aliases = resolve_context(doc, loader, log).await?;

    let candidates = flatten_nodes(doc);
    log.push(format!("framing over {} graph node(s)", candidates.len()));

    let mut framed = Map::new();
    framed.insert(
        "@context".to_owned(),
        Value::String("https://schema.org/".to_owned()),
    );
    framed.insert("@type".to_owned(), Value::String("Recipe".to_owned()));

    match candidates
        .into_iter()
        .find(|node| is_recipe_node(node, &aliases))
    {
        Some(node) => {
            for (key, value) in node {
                let term = normalize_term(key, &aliases);
                if RECIPE_FRAME_FIELDS.contains(&term.as_str()) {
                    framed.insert(term, value.clone());
                }
            }
            log.push(format!(
                "framed Recipe node with {} field(s)",
                framed.len() - 2
            ));
        }
        None => log.push("no Recipe-typed node in the graph; framed result is empty"),
    }

    Ok(FramedNode::new(framed))
}

/// Builds the term → IRI alias map from every `@context` in the document.
///
/// Inline objects contribute directly; string contexts are fetched through
/// the loader (the loaded document's own `@context` member is used when
/// present, otherwise the whole document is treated as a term map); arrays
/// are processed left to right.
async fn resolve_context(
    doc: &Value,
    loader: &dyn ContextLoader,
    log: &mut DiagnosticLog,
) -> Result<HashMap<String, String>, ScrapeError> {
    let mut aliases: HashMap<String, String> = HashMap::new();
    let mut loaded_urls: Vec<String> = Vec::new();

    let mut queue: VecDeque<Value> = flatten_nodes(doc)
        .into_iter()
        .filter_map(|node| node.get("@context").cloned())
        .collect();

    while let Some(ctx) = queue.pop_front() {
        match ctx {
            Value::String(url) => {
                // Guard against context documents that reference themselves.
                if loaded_urls.iter().any(|seen| *seen == url) {
                    continue;
                }
                loaded_urls.push(url.clone());
                let loaded = loader.load(&url).await?;
                log.push(format!("resolved remote context {url}"));
                let term_map = match loaded {
                    Value::Object(ref map) if map.contains_key("@context") => {
                        map.get("@context").cloned().unwrap_or(Value::Null)
                    }
                    other => other,
                };
                queue.push_front(term_map);
            }
            Value::Object(map) => {
                for (term, value) in map {
                    if term.starts_with('@') {
                        continue;
                    }
                    match value {
                        Value::String(iri) => {
                            aliases.insert(term, iri);
                        }
                        Value::Object(def) => {
                            if let Some(Value::String(iri)) = def.get("@id") {
                                aliases.insert(term, iri.clone());
                            }
                        }
                        _ => {}
                    }
                }
            }
            Value::Array(items) => {
                for item in items.into_iter().rev() {
                    queue.push_front(item);
                }
            }
            _ => {}
        }
    }

    Ok(aliases)
}

/// Flattens the document into its constituent nodes, depth first: array
/// elements, `@graph` members, and nested object values (JSON-LD graphs
/// frequently bury the Recipe under `mainEntity` or similar).
fn flatten_nodes(value: &Value) -> Vec<&Map<String, Value>> {
    let mut out = Vec::new();
    collect_nodes(value, &mut out);
    out
}

fn collect_nodes<'a>(value: &'a Value, out: &mut Vec<&'a Map<String, Value>>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_nodes(item, out);
            }
        }
        Value::Object(map) => {
            out.push(map);
            for (key, nested) in map {
                if key == "@context" {
                    continue;
                }
                collect_nodes(nested, out);
            }
        }
        _ => {}
    }
}

/// Whether a node's `@type` (string or array of strings) resolves to
/// `Recipe`.
fn is_recipe_node(node: &Map<String, Value>, aliases: &HashMap<String, String>) -> bool {
    let Some(type_value) = node.get("@type") else {
        return false;
    };
    match type_value {
        Value::String(s) => is_recipe_type(s, aliases),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .any(|s| is_recipe_type(s, aliases)),
        _ => false,
    }
}

fn is_recipe_type(raw: &str, aliases: &HashMap<String, String>) -> bool {
    let expanded = expand_term(raw, aliases);
    let stripped = strip_schema_org(&expanded);
    let tail = stripped.rsplit(['/', '#']).next().unwrap_or(stripped);
    tail == "Recipe"
}

/// Maps a node key to the short schema.org term the frame allowlist uses.
fn normalize_term(key: &str, aliases: &HashMap<String, String>) -> String {
    if key.starts_with('@') {
        return key.to_owned();
    }
    let expanded = expand_term(key, aliases);
    strip_schema_org(&expanded).to_owned()
}

/// Expands a term through the alias map and compact-IRI prefixes, a few
/// rounds deep (the schema.org context maps `cookTime` → `schema:cookTime`
/// → `http://schema.org/cookTime`).
fn expand_term(term: &str, aliases: &HashMap<String, String>) -> String {
    let mut current = term.to_owned();
    for _ in 0..3 {
        if let Some(iri) = aliases.get(&current) {
            if *iri != current {
                current = iri.clone();
                continue;
            }
        }
        if let Some((prefix, suffix)) = current.split_once(':') {
            if !suffix.starts_with("//") {
                if let Some(base) = aliases.get(prefix) {
                    current = format!("{base}{suffix}");
                    continue;
                }
                if prefix == "schema" {
                    current = format!("http://schema.org/{suffix}");
                    continue;
                }
            }
        }
        break;
    }
    current
}

fn strip_schema_org(iri: &str) -> &str {
    iri.strip_prefix("https://schema.org/")
        .or_else(|| iri.strip_prefix("http://schema.org/"))
        .unwrap_or(iri)
}

#[cfg(test)]
#[path = "frame_test.rs"]
mod tests;
