//! Per-application list screen defaults.
//!
//! Loaded once at startup from YAML or JSON:
//!
//! ```yaml
//! page_size: 25
//! window_size: 7
//! export_format: json
//! search_fields: [name, email, address.city]
//! ```
//!
//! Every key is optional. Values are validated after parsing, so a zero
//! page size is rejected here rather than on the first query.

use std::path::Path;

use ledgerly_export::ExportFormat;
use ledgerly_query::{QuerySpec, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default number of page buttons shown around the current page.
pub const DEFAULT_WINDOW_SIZE: usize = 5;

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

/// Defaults applied to every list screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListDefaults {
    /// Records per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Page-number buttons to render.
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Format used when the caller does not pick one.
    #[serde(default)]
    pub export_format: ExportFormat,
    /// Fields searched by default; empty means every top-level string field.
    #[serde(default)]
    pub search_fields: Vec<String>,
}

impl Default for ListDefaults {
    fn default() -> Self {
        ListDefaults {
            page_size: DEFAULT_PAGE_SIZE,
            window_size: DEFAULT_WINDOW_SIZE,
            export_format: ExportFormat::default(),
            search_fields: Vec::new(),
        }
    }
}

impl ListDefaults {
    /// Parses and validates a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let defaults: ListDefaults = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            path: None,
            message: e.to_string(),
        })?;
        defaults.validate()
    }

    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let defaults: ListDefaults = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            path: None,
            message: e.to_string(),
        })?;
        defaults.validate()
    }

    /// Loads a file, choosing the parser by extension: `.json` is read as
    /// JSON, anything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        };

        parsed.map_err(|err| match err {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })
    }

    /// Checks ranges.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid {
                field: "page_size",
                message: "must be positive",
            });
        }
        if self.window_size == 0 {
            return Err(ConfigError::Invalid {
                field: "window_size",
                message: "must be positive",
            });
        }
        Ok(self)
    }

    /// A first-page query carrying these defaults.
    pub fn query(&self) -> QuerySpec {
        QuerySpec::new()
            .search_in(self.search_fields.iter().cloned())
            .page_size(self.page_size)
    }
}
