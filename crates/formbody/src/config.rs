// File: src/config.rs
// Purpose: Configuration parsing from formbody.toml

use crate::descriptor::FieldDescriptor;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub form: FormSettings,

    #[serde(default)]
    pub server: ServerConfig,

    /// Field descriptors, in render order
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

/// Labels, endpoints and logging for rendered forms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSettings {
    /// DOM id of the `<form>`; field ids are derived from it
    #[serde(default = "default_form_id")]
    pub form_id: String,

    /// Base path of the form endpoints (`{action}/submit`, `{action}/edit`, ...)
    #[serde(default = "default_action")]
    pub action: String,

    #[serde(default = "default_submit_label")]
    pub submit_label: String,

    /// Submit button text while a submission is in flight
    #[serde(default = "default_loading_label")]
    pub loading_label: String,

    #[serde(default = "default_cancel_label")]
    pub cancel_label: String,

    #[serde(default = "default_reset_label")]
    pub reset_label: String,

    /// Shown by date fields that have no value and no placeholder of their own
    #[serde(default = "default_date_placeholder")]
    pub date_placeholder: String,

    /// Emit a tracing event with the field names of every accepted submission
    #[serde(default = "default_true")]
    pub log_submissions: bool,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

// Default values
fn default_form_id() -> String {
    "form-body".to_string()
}

fn default_action() -> String {
    "/form".to_string()
}

fn default_submit_label() -> String {
    "Submit".to_string()
}

fn default_loading_label() -> String {
    "Loading...".to_string()
}

fn default_cancel_label() -> String {
    "Cancel".to_string()
}

fn default_reset_label() -> String {
    "Reset".to_string()
}

fn default_date_placeholder() -> String {
    "Pick a date".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            form_id: default_form_id(),
            action: default_action(),
            submit_label: default_submit_label(),
            loading_label: default_loading_label(),
            cancel_label: default_cancel_label(),
            reset_label: default_reset_label(),
            date_placeholder: default_date_placeholder(),
            log_submissions: true,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl FormSettings {
    pub fn submit_url(&self) -> String {
        format!("{}/submit", self.action)
    }

    pub fn edit_url(&self) -> String {
        format!("{}/edit", self.action)
    }

    pub fn reset_url(&self, field: &str) -> String {
        format!("{}/reset/{}", self.action, field)
    }

    pub fn cancel_url(&self) -> String {
        format!("{}/cancel", self.action)
    }

    pub fn field_id(&self, field: &str) -> String {
        format!("{}-{}", self.form_id, field)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./formbody.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("formbody.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::FieldKind;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.form.submit_label, "Submit");
        assert_eq!(config.form.loading_label, "Loading...");
        assert_eq!(config.form.date_placeholder, "Pick a date");
        assert!(config.form.log_submissions);
        assert!(config.fields.is_empty());
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<Config>("").unwrap_or_default();
        assert_eq!(config.form.action, "/form");
        assert_eq!(config.form.submit_url(), "/form/submit");
        assert_eq!(config.form.reset_url("item"), "/form/reset/item");
    }

    #[test]
    fn test_fields_and_labels() {
        let toml = r#"
            [form]
            submit_label = "Save"
            log_submissions = false

            [[fields]]
            name = "introduction"
            type = "textarea"
            label = "Introduction"
            required = true

            [[fields]]
            name = "item"
            type = "select"
            label = "Item"
            options = ["KG", "LB"]
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.form.submit_label, "Save");
        assert_eq!(config.form.reset_label, "Reset");
        assert!(!config.form.log_submissions);
        assert_eq!(config.fields.len(), 2);
        assert_eq!(config.fields[0].kind, FieldKind::Textarea);
        assert!(config.fields[0].required);
        assert_eq!(config.fields[1].kind.tag(), "select");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load("does-not-exist/formbody.toml").unwrap();
        assert_eq!(config.server.port, 3000);
    }
}
