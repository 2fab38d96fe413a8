use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Top-level project configuration (stencil.config.json)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StencilConfig {
    /// JSON Schema reference
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Spec format version (e.g., "1.0.0")
    pub version: String,

    /// Project name
    pub name: String,

    /// Output directory, relative to the project root
    #[serde(default = "default_output")]
    pub output: String,

    /// Seed the catalog with the built-in fragment library
    #[serde(default = "default_builtin_catalog")]
    pub builtin_catalog: bool,
}

fn default_output() -> String {
    "generated".to_string()
}

fn default_builtin_catalog() -> bool {
    true
}

impl StencilConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            version: "1.0.0".to_string(),
            name: name.into(),
            output: default_output(),
            builtin_catalog: true,
        }
    }
}
