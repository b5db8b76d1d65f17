//! Pure field normalizers: ISO-8601 durations to minutes, duck-typed
//! yield values to serving counts, and title-to-slug transforms.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Seconds per ISO-8601 duration unit, using the conventional calendar
/// approximations (year = 365 days, month = 30 days).
const SECS_YEAR: f64 = 31_536_000.0;
const SECS_MONTH: f64 = 2_592_000.0;
const SECS_WEEK: f64 = 604_800.0;
const SECS_DAY: f64 = 86_400.0;
const SECS_HOUR: f64 = 3_600.0;
const SECS_MINUTE: f64 = 60.0;

/// Converts an ISO-8601 duration string (`"PT1H30M"`) to whole minutes.
///
/// Total seconds are floor-divided by 60, so `PT90S` is 1 minute.
/// Absent or unparseable input yields `0` — a recipe page with a garbled
/// `cookTime` should still import, just without timing data.
#[must_use]
pub fn duration_to_minutes(value: Option<&str>) -> u32 {
    let Some(raw) = value else { return 0 };
    let Some(total_secs) = parse_iso8601_secs(raw.trim()) else {
        return 0;
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let minutes = (total_secs / 60.0).floor() as u32;
    minutes
}

/// Parses an ISO-8601 duration (`P[nY][nM][nW][nD][T[nH][nM][nS]]`) into
/// total seconds. Fractional component values are accepted.
///
/// Returns `None` for anything that does not match the grammar, including
/// an empty component list (`"P"` alone) or a designator with no number.
fn parse_iso8601_secs(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'P') {
        return None;
    }

    let mut i = 1usize;
    let mut in_time = false;
    let mut saw_component = false;
    let mut total = 0.0f64;

    while i < bytes.len() {
        if bytes[i] == b'T' {
            if in_time {
                return None;
            }
            in_time = true;
            i += 1;
            continue;
        }

        // Number: digits with at most one dot or comma.
        let num_start = i;
        let mut has_sep = false;
        while i < bytes.len()
            && (bytes[i].is_ascii_digit() || ((bytes[i] == b'.' || bytes[i] == b',') && !has_sep))
        {
            if bytes[i] == b'.' || bytes[i] == b',' {
                has_sep = true;
            }
            i += 1;
        }
        if i == num_start || i == bytes.len() {
            return None;
        }
        let value: f64 = s[num_start..i].replace(',', ".").parse().ok()?;

        let per_unit = match (bytes[i], in_time) {
            (b'Y', false) => SECS_YEAR,
            (b'M', false) => SECS_MONTH,
            (b'W', false) => SECS_WEEK,
            (b'D', false) => SECS_DAY,
            (b'H', true) => SECS_HOUR,
            (b'M', true) => SECS_MINUTE,
            (b'S', true) => 1.0,
            _ => return None,
        };
        total += value * per_unit;
        saw_component = true;
        i += 1;
    }

    if saw_component {
        Some(total)
    } else {
        None
    }
}

/// Classification of a `recipeYield` value as found in the wild.
///
/// Schema.org declares `recipeYield` as Text-or-QuantitativeValue, but
/// observed pages emit a bare number, a numeric string, or an array of
/// strings (often `["8", "8 servings"]`). The classification is explicit
/// so callers never rely on implicit coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum YieldValue<'a> {
    Number(f64),
    Text(&'a str),
    List(&'a [Value]),
    Absent,
}

impl<'a> YieldValue<'a> {
    /// Classifies a raw JSON value into one of the four observed shapes.
    /// Object and boolean shapes have never been observed and classify as
    /// `Absent`.
    #[must_use]
    pub fn classify(value: Option<&'a Value>) -> Self {
        match value {
            Some(Value::Number(n)) => n.as_f64().map_or(YieldValue::Absent, YieldValue::Number),
            Some(Value::String(s)) => YieldValue::Text(s),
            Some(Value::Array(items)) => YieldValue::List(items),
            _ => YieldValue::Absent,
        }
    }
}

/// Coerces a `recipeYield` value into a plain serving count.
///
/// - number → truncated to an integer
/// - string → numeric-coerced, `0` when non-numeric
/// - array → first element coerced by the same rules
/// - absent → `0`
#[must_use]
pub fn yield_to_servings(value: Option<&Value>) -> u32 {
    match YieldValue::classify(value) {
        YieldValue::Number(n) => truncate_servings(n),
        YieldValue::Text(s) => coerce_numeric(s),
        YieldValue::List(items) => yield_to_servings(items.first()),
        YieldValue::Absent => 0,
    }
}

/// Numeric-coerces a string the strict way: the whole trimmed string must
/// parse as a number. `"8"` → 8, `"8 servings"` → 0.
fn coerce_numeric(s: &str) -> u32 {
    s.trim().parse::<f64>().map_or(0, truncate_servings)
}

fn truncate_servings(n: f64) -> u32 {
    if n.is_finite() && n > 0.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let servings = n as u32;
        servings
    } else {
        0
    }
}

/// Kebab-cases a title: lowercased, camelCase boundaries split, runs of
/// non-alphanumeric characters collapsed to single hyphens.
#[must_use]
pub fn kebab_case(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut prev_lower_or_digit = false;

    for ch in title.chars() {
        if ch.is_alphanumeric() {
            if ch.is_uppercase() && prev_lower_or_digit && !out.is_empty() {
                out.push('-');
            }
            out.extend(ch.to_lowercase());
            prev_lower_or_digit = ch.is_lowercase() || ch.is_numeric();
        } else {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            prev_lower_or_digit = false;
        }
    }

    out.trim_end_matches('-').to_string()
}

/// Compact UTC timestamp used in fallback titles and slugs:
/// `20260826T141503123Z` (ISO-8601 with separators stripped).
#[must_use]
pub fn compact_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y%m%dT%H%M%S%3fZ").to_string()
}

/// Title for a recipe whose source carried no `name`/`title` field.
#[must_use]
pub fn fallback_title(now: DateTime<Utc>) -> String {
    format!("Imported Recipe-{}", compact_timestamp(now))
}

/// Slug for an optional title: kebab-case when present and non-empty,
/// otherwise `imported-recipe-<compact timestamp>`.
#[must_use]
pub fn slug_for_title(title: Option<&str>, now: DateTime<Utc>) -> String {
    match title {
        Some(t) if !t.trim().is_empty() => kebab_case(t),
        _ => format!("imported-recipe-{}", compact_timestamp(now)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    // -----------------------------------------------------------------------
    // duration_to_minutes
    // -----------------------------------------------------------------------

    #[test]
    fn duration_hours_and_minutes() {
        assert_eq!(duration_to_minutes(Some("PT1H30M")), 90);
    }

    #[test]
    fn duration_minutes_only() {
        assert_eq!(duration_to_minutes(Some("PT45M")), 45);
    }

    #[test]
    fn duration_seconds_floor_to_minutes() {
        assert_eq!(duration_to_minutes(Some("PT90S")), 1);
        assert_eq!(duration_to_minutes(Some("PT59S")), 0);
    }

    #[test]
    fn duration_days() {
        assert_eq!(duration_to_minutes(Some("P1D")), 1_440);
    }

    #[test]
    fn duration_date_and_time_parts() {
        assert_eq!(duration_to_minutes(Some("P1DT2H")), 1_440 + 120);
    }

    #[test]
    fn duration_month_vs_minute_designator() {
        // M before T is months, after T is minutes.
        assert_eq!(duration_to_minutes(Some("P1M")), 43_200);
        assert_eq!(duration_to_minutes(Some("PT1M")), 1);
    }

    #[test]
    fn duration_fractional_hours() {
        assert_eq!(duration_to_minutes(Some("PT1.5H")), 90);
    }

    #[test]
    fn duration_comma_decimal_separator() {
        assert_eq!(duration_to_minutes(Some("PT1,5H")), 90);
    }

    #[test]
    fn duration_absent_is_zero() {
        assert_eq!(duration_to_minutes(None), 0);
    }

    #[test]
    fn duration_invalid_is_zero() {
        assert_eq!(duration_to_minutes(Some("90 minutes")), 0);
        assert_eq!(duration_to_minutes(Some("P")), 0);
        assert_eq!(duration_to_minutes(Some("PT")), 0);
        assert_eq!(duration_to_minutes(Some("PTM")), 0);
        assert_eq!(duration_to_minutes(Some("")), 0);
    }

    #[test]
    fn duration_designator_in_wrong_section_is_zero() {
        // H is only valid after T.
        assert_eq!(duration_to_minutes(Some("P2H")), 0);
    }

    // -----------------------------------------------------------------------
    // yield_to_servings
    // -----------------------------------------------------------------------

    #[test]
    fn servings_from_number() {
        assert_eq!(yield_to_servings(Some(&json!(4))), 4);
    }

    #[test]
    fn servings_from_numeric_string() {
        assert_eq!(yield_to_servings(Some(&json!("6"))), 6);
    }

    #[test]
    fn servings_from_array_takes_first_element() {
        assert_eq!(yield_to_servings(Some(&json!(["8", "8 servings"]))), 8);
    }

    #[test]
    fn servings_from_array_of_numbers() {
        assert_eq!(yield_to_servings(Some(&json!([12]))), 12);
    }

    #[test]
    fn servings_non_numeric_string_is_zero() {
        assert_eq!(yield_to_servings(Some(&json!("invalid"))), 0);
        assert_eq!(yield_to_servings(Some(&json!("8 servings"))), 0);
    }

    #[test]
    fn servings_absent_is_zero() {
        assert_eq!(yield_to_servings(None), 0);
        assert_eq!(yield_to_servings(Some(&Value::Null)), 0);
    }

    #[test]
    fn servings_empty_array_is_zero() {
        assert_eq!(yield_to_servings(Some(&json!([]))), 0);
    }

    #[test]
    fn yield_value_classification() {
        assert_eq!(YieldValue::classify(Some(&json!(4))), YieldValue::Number(4.0));
        assert_eq!(YieldValue::classify(Some(&json!("6"))), YieldValue::Text("6"));
        assert!(matches!(
            YieldValue::classify(Some(&json!(["8"]))),
            YieldValue::List(_)
        ));
        assert_eq!(YieldValue::classify(None), YieldValue::Absent);
    }

    // -----------------------------------------------------------------------
    // slugs and fallback titles
    // -----------------------------------------------------------------------

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 26, 14, 15, 3).unwrap()
    }

    #[test]
    fn kebab_case_simple_title() {
        assert_eq!(kebab_case("Chocolate Cake"), "chocolate-cake");
    }

    #[test]
    fn kebab_case_splits_camel_case() {
        assert_eq!(kebab_case("chocolateCake"), "chocolate-cake");
    }

    #[test]
    fn kebab_case_collapses_punctuation_runs() {
        assert_eq!(kebab_case("Mum's  Best -- Cake!"), "mum-s-best-cake");
    }

    #[test]
    fn kebab_case_trims_edges() {
        assert_eq!(kebab_case("  Cake  "), "cake");
    }

    #[test]
    fn slug_for_present_title() {
        assert_eq!(
            slug_for_title(Some("Chocolate Cake"), fixed_now()),
            "chocolate-cake"
        );
    }

    #[test]
    fn slug_for_absent_title_is_timestamped() {
        let slug = slug_for_title(None, fixed_now());
        assert_eq!(slug, "imported-recipe-20260826T141503000Z");
    }

    #[test]
    fn slug_for_blank_title_is_timestamped() {
        let slug = slug_for_title(Some("   "), fixed_now());
        assert!(slug.starts_with("imported-recipe-"));
    }

    #[test]
    fn fallback_title_format() {
        assert_eq!(
            fallback_title(fixed_now()),
            "Imported Recipe-20260826T141503000Z"
        );
    }
}
