//! Output layout configuration.
//!
//! Serialization is byte-stable for a given configuration. The defaults
//! produce the canonical layout (XML declaration, two-space indentation,
//! pretty-printed JSON). Deployments that need something else can ship a
//! TOML file:
//!
//! ```toml
//! indent = 4
//! xml_declaration = false
//! pretty_json = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Controls how documents and entities are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireConfig {
    /// Spaces per nesting level in XML output and pretty JSON output.
    #[serde(default = "default_indent")]
    pub indent: usize,
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>` before XML documents.
    /// Entity fragments never carry a declaration.
    #[serde(default = "default_true")]
    pub xml_declaration: bool,
    /// Pretty-print JSON output. Compact JSON has no whitespace at all.
    #[serde(default = "default_true")]
    pub pretty_json: bool,
}

fn default_indent() -> usize {
    2
}

fn default_true() -> bool {
    true
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            xml_declaration: true,
            pretty_json: true,
        }
    }
}

impl WireConfig {
    /// Parses a configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Loads a configuration file, falling back to defaults when the file is
    /// missing or cannot be parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "No wire config found, using defaults");
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!(path = %path.display(), "Loaded wire config");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse wire config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read wire config, using defaults");
                Self::default()
            }
        }
    }

    /// Serializes a JSON value according to `pretty_json` and `indent`.
    pub fn write_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, serde_json::Error> {
        if !self.pretty_json {
            return serde_json::to_string(value);
        }
        let indent = " ".repeat(self.indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        value.serialize(&mut serializer)?;
        // serde_json only ever writes valid UTF-8
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}
