//! Runtime configuration, read once from the environment at startup.

use std::env;

pub const DEFAULT_ADDR: &str = "127.0.0.1:5001";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,
    pub unsplash_access_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            bind_addr: get("BANNER_STUDIO_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            anthropic_api_key: get("ANTHROPIC_API_KEY"),
            anthropic_model: get("ANTHROPIC_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            unsplash_access_key: get("UNSPLASH_ACCESS_KEY"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::default();
        assert_eq!(config.bind_addr, "127.0.0.1:5001");
        assert_eq!(config.anthropic_model, DEFAULT_MODEL);
        assert_eq!(config.anthropic_api_key, None);
        assert_eq!(config.unsplash_access_key, None);
    }

    #[test]
    fn test_blank_keys_are_unset() {
        let vars: HashMap<&str, &str> = [
            ("ANTHROPIC_API_KEY", "  "),
            ("UNSPLASH_ACCESS_KEY", "abc123"),
            ("BANNER_STUDIO_ADDR", "0.0.0.0:8080"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.anthropic_api_key, None);
        assert_eq!(config.unsplash_access_key.as_deref(), Some("abc123"));
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
    }
}
