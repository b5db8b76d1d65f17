use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_variants() {
    assert_eq!(parse_environment("development"), Environment::Development);
    assert_eq!(parse_environment("test"), Environment::Test);
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(config.env, Environment::Development);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.request_timeout_secs, 30);
    assert_eq!(config.genai_model, "gemini-3-flash-preview");
    assert!(config.genai_api_key.is_none());
    assert!(config.user_agent.starts_with("mealstack-import/"));
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("MEALSTACK_ENV", "production");
    map.insert("MEALSTACK_REQUEST_TIMEOUT_SECS", "10");
    map.insert("MEALSTACK_GENAI_MODEL", "gemini-test");
    map.insert("GEMINI_API_KEY", "key-123");
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(config.env, Environment::Production);
    assert_eq!(config.request_timeout_secs, 10);
    assert_eq!(config.genai_model, "gemini-test");
    assert_eq!(config.genai_api_key.as_deref(), Some("key-123"));
}

#[test]
fn build_app_config_rejects_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("MEALSTACK_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MEALSTACK_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar, got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_api_key() {
    let mut map = HashMap::new();
    map.insert("GEMINI_API_KEY", "super-secret");
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("[redacted]"));
}
