//! Plugin identity and manifest
//!
//! Every plugin answers `--manifest` with a JSON description of itself.

use serde::{Deserialize, Serialize};

/// Plugin manifest declaring capabilities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Plugin name (e.g., "metadoc-markdown")
    pub name: String,

    /// Plugin version
    pub version: String,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Supported operations
    pub operations: Vec<String>,
}

/// Name and version of a plugin, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginIdentity {
    name: String,
    version: String,
    description: String,
}

impl PluginIdentity {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: String::new(),
        }
    }

    /// Derives the name from a package identifier, keeping its last path
    /// segment (`@docs/metadoc-markdown` becomes `metadoc-markdown`)
    pub fn from_package(package_id: &str, version: impl Into<String>) -> Self {
        let name = package_id
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or(package_id);

        Self::new(name, version)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn manifest(&self) -> PluginManifest {
        PluginManifest {
            name: self.name.clone(),
            version: self.version.clone(),
            description: self.description.clone(),
            operations: vec!["process".to_string()],
        }
    }
}
