//! Locates `application/ld+json` script blocks in raw HTML.

use scraper::{Html, Selector};

use crate::diagnostics::DiagnosticLog;

/// Collects the text of every `<script type="application/ld+json">`
/// element into one buffer, in document order. Returns `None` when no
/// block carries any text.
///
/// Multiple blocks are concatenated into a single buffer and later parsed
/// as one JSON document. This mirrors the page-rewriter scan the importer
/// has always done, and it is knowingly fragile: two independent JSON
/// objects concatenated back to back are not valid JSON, so such pages
/// fail the parse and take the generative fallback path instead. See the
/// failure-mode test in [`crate::extract`].
#[must_use]
pub fn collect_jsonld_text(html: &str, log: &mut DiagnosticLog) -> Option<String> {
    // The selector literal is valid; parse cannot fail.
    let Ok(selector) = Selector::parse(r#"script[type="application/ld+json"]"#) else {
        return None;
    };

    let document = Html::parse_document(html);
    let mut buffer = String::new();
    let mut blocks = 0usize;

    for script in document.select(&selector) {
        let text: String = script.text().collect();
        if !text.trim().is_empty() {
            buffer.push_str(&text);
            blocks += 1;
        }
    }

    if buffer.trim().is_empty() {
        log.push("no JSON-LD script blocks found");
        return None;
    }
    log.push(format!(
        "found {blocks} JSON-LD block(s), {} bytes total",
        buffer.len()
    ));
    Some(buffer)
}
