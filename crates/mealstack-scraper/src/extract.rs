//! The structured-data extractor façade: HTML in, framed Recipe node out.

use serde_json::Value;

use crate::context::ContextLoader;
use crate::diagnostics::DiagnosticLog;
use crate::frame::frame_recipe;
use crate::jsonld::collect_jsonld_text;
use crate::types::FramedNode;

/// Extracts and frames embedded recipe metadata from raw HTML.
///
/// Never fails for malformed input: no script blocks, invalid JSON, and
/// framing errors (including context-fetch failures) all degrade to
/// `None`, with the reason recorded on the diagnostic log. Callers treat
/// `None` as "no structured data" and fall through to the generative
/// path.
pub async fn extract_structured(
    html: &str,
    loader: &dyn ContextLoader,
    log: &mut DiagnosticLog,
) -> Option<FramedNode> {
    let buffer = collect_jsonld_text(html, log)?;

    let parsed: Value = match serde_json::from_str(&buffer) {
        Ok(value) => value,
        Err(e) => {
            log.push(format!("JSON-LD buffer is not valid JSON: {e}"));
            return None;
        }
    };

    match frame_recipe(&parsed, loader, log).await {
        Ok(framed) => Some(framed),
        Err(e) => {
            log.push(format!("framing aborted: {e}"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::StaticContextLoader;
    use serde_json::json;

    fn loader() -> StaticContextLoader {
        StaticContextLoader::new(json!({"@context": {}}))
    }

    async fn extract(html: &str) -> Option<FramedNode> {
        extract_structured(html, &loader(), &mut DiagnosticLog::new()).await
    }

    #[tokio::test]
    async fn empty_html_returns_none() {
        assert!(extract("").await.is_none());
    }

    #[tokio::test]
    async fn invalid_jsonld_body_returns_none_without_panicking() {
        let html = r#"<script type="application/ld+json">{"@type": "Recipe",</script>"#;
        assert!(extract(html).await.is_none());
    }

    #[tokio::test]
    async fn well_formed_recipe_block_is_framed() {
        let html = r#"<script type="application/ld+json">
            {"@type": "Recipe", "name": "Inline Recipe", "recipeIngredient": ["1 egg"]}
        </script>"#;
        let framed = extract(html).await.expect("expected a framed node");
        assert_eq!(framed.name(), Some("Inline Recipe"));
    }

    /// Two independent JSON-LD blocks are concatenated into one buffer
    /// before parsing, and two concatenated objects are not valid JSON.
    /// This documents the known failure mode of the concatenation policy:
    /// such pages yield `None` and take the generative fallback path.
    #[tokio::test]
    async fn multiple_independent_blocks_fail_to_parse_as_one_document() {
        let html = r#"
            <script type="application/ld+json">{"@type": "Recipe", "name": "One"}</script>
            <script type="application/ld+json">{"@type": "Recipe", "name": "Two"}</script>
        "#;
        assert!(extract(html).await.is_none());
    }

    #[tokio::test]
    async fn diagnostic_log_records_the_failing_stage() {
        let mut log = DiagnosticLog::new();
        let html = r#"<script type="application/ld+json">not json</script>"#;
        let result = extract_structured(html, &loader(), &mut log).await;
        assert!(result.is_none());
        assert!(log
            .lines()
            .iter()
            .any(|line| line.contains("not valid JSON")));
    }
}
