//! Core configuration types and utilities.
use crate::{EXAMPLE_CLASS, SPECVC_CONFIG};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use thiserror::Error;

lazy_static! {
    /// Lazy static reference to core configuration loaded from the file named
    /// by the `SPECVC_CONFIG` environment variable, falling back to defaults
    /// when the variable is unset.
    pub static ref CORE_CONFIG: CoreConfig = load_config();
}

fn load_config() -> CoreConfig {
    match std::env::var(SPECVC_CONFIG) {
        Ok(path) => parse_toml(
            &fs::read_to_string(&path).expect("Error reading specvc configuration file."),
        ),
        Err(_) => CoreConfig::default(),
    }
}

/// Parses and returns core configuration.
fn parse_toml(toml_str: &str) -> CoreConfig {
    toml::from_str::<Config>(toml_str)
        .expect("Error parsing specvc configuration file.")
        .core
}

/// Gets `specvc-core` configuration variables.
pub fn core_config() -> &'static CORE_CONFIG {
    &CORE_CONFIG
}

/// An error relating to configuration handling.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A context document file could not be read.
    #[error("Failed to read context document {0}: {1}")]
    ContextDocument(String, std::io::Error),
}

/// Configuration variables for the `specvc` crates.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct CoreConfig {
    /// Class name marking credential example elements.
    #[serde(default = "default_example_class")]
    pub example_class: String,
    /// Format identifiers secured by default when an example carries no
    /// `data-vc-tabs` attribute.
    #[serde(default = "default_tabs")]
    pub default_tabs: Vec<String>,
    /// Additional JSON-LD context documents, mapping context URL to a local
    /// file holding the context JSON.
    #[serde(default)]
    pub contexts: HashMap<String, String>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            example_class: default_example_class(),
            default_tabs: default_tabs(),
            contexts: HashMap::new(),
        }
    }
}

impl CoreConfig {
    /// Reads the configured context documents into a URL-to-JSON map suitable
    /// for seeding a JSON-LD context loader.
    pub fn context_map(&self) -> Result<HashMap<String, String>, ConfigError> {
        self.contexts
            .iter()
            .map(|(url, path)| {
                fs::read_to_string(path)
                    .map(|json| (url.clone(), json))
                    .map_err(|e| ConfigError::ContextDocument(path.clone(), e))
            })
            .collect()
    }
}

fn default_example_class() -> String {
    EXAMPLE_CLASS.to_string()
}

fn default_tabs() -> Vec<String> {
    ["eddsa-2022", "ecdsa-2019", "vc-jwt"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Wrapper struct for parsing the `core` table.
#[derive(Serialize, Deserialize, PartialEq, Debug)]
struct Config {
    /// Core configuration data.
    #[serde(default)]
    core: CoreConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() {
        let config_string = r##"
        [core]
        example_class = "vc"
        default_tabs = ["eddsa-2022", "vc-jwt", "sd-jwt", "cose"]

        [core.contexts]
        "https://www.w3.org/ns/credentials/examples/v2" = "contexts/examples-v2.jsonld"

        [non_core]
        key = "value"
        "##;

        let config: CoreConfig = parse_toml(config_string);

        assert_eq!(config.example_class, "vc");
        assert_eq!(
            config.default_tabs,
            vec!["eddsa-2022", "vc-jwt", "sd-jwt", "cose"]
        );
        assert_eq!(
            config
                .contexts
                .get("https://www.w3.org/ns/credentials/examples/v2")
                .unwrap(),
            "contexts/examples-v2.jsonld"
        );
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: CoreConfig = parse_toml("");
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.example_class, "vc");
        assert_eq!(config.default_tabs, vec!["eddsa-2022", "ecdsa-2019", "vc-jwt"]);
        assert!(config.contexts.is_empty());
    }

    #[test]
    fn test_context_map_missing_file() {
        let mut config = CoreConfig::default();
        config.contexts.insert(
            "https://example.org/ns/v1".to_string(),
            "/nonexistent/context.jsonld".to_string(),
        );
        assert!(matches!(
            config.context_map(),
            Err(ConfigError::ContextDocument(_, _))
        ));
    }
}
