//! Ordered diagnostic trail for one extraction attempt.

/// Human-readable log lines accumulated across the stages of a single
/// pipeline invocation.
///
/// Extraction never fails loudly mid-stream — malformed JSON-LD degrades
/// to the fallback path — so the trail is how an operator reconstructs
/// *which* stage gave up without re-running the pipeline. Terminal errors
/// carry the accumulated lines in their payload. Every line is also
/// mirrored to `tracing` at debug level.
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    lines: Vec<String>,
}

impl DiagnosticLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one line to the trail and mirrors it to `tracing`.
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::debug!("{line}");
        self.lines.push(line);
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consumes the log, yielding the ordered lines for attachment to an
    /// error payload.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_preserve_insertion_order() {
        let mut log = DiagnosticLog::new();
        log.push("fetching page");
        log.push(format!("response status: {}", 200));
        log.push("no JSON-LD found");
        assert_eq!(
            log.lines(),
            ["fetching page", "response status: 200", "no JSON-LD found"]
        );
    }
}
