use std::path::Path;

use crate::types::class::ClassSpec;
use crate::types::config::StencilConfig;
use crate::types::error::{ErrorEntry, E_PARSE_ERROR};
use crate::types::fragment::FragmentFile;

pub const CONFIG_FILE: &str = "stencil.config.json";

/// Parse a stencil.config.json file
#[allow(clippy::result_large_err)]
pub fn parse_config(content: &str, file_path: &str) -> Result<StencilConfig, ErrorEntry> {
    serde_json::from_str(content).map_err(|e| serde_error_to_entry(e, file_path))
}

/// Parse a *.fragments.json file
#[allow(clippy::result_large_err)]
pub fn parse_fragment_file(content: &str, file_path: &str) -> Result<FragmentFile, ErrorEntry> {
    serde_json::from_str(content).map_err(|e| serde_error_to_entry(e, file_path))
}

/// Parse a *.class.json file
#[allow(clippy::result_large_err)]
pub fn parse_class_spec(content: &str, file_path: &str) -> Result<ClassSpec, ErrorEntry> {
    serde_json::from_str(content).map_err(|e| serde_error_to_entry(e, file_path))
}

/// Detect spec file type from file name
pub fn detect_spec_type(file_path: &Path) -> Option<SpecFileType> {
    let name = file_path.file_name()?.to_str()?;
    if name == CONFIG_FILE {
        Some(SpecFileType::Config)
    } else if name.ends_with(".fragments.json") {
        Some(SpecFileType::Fragments)
    } else if name.ends_with(".class.json") {
        Some(SpecFileType::Class)
    } else {
        None
    }
}

/// Spec file types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFileType {
    Config,
    Fragments,
    Class,
}

/// Convert a serde_json error into a structured ErrorEntry
fn serde_error_to_entry(err: serde_json::Error, file_path: &str) -> ErrorEntry {
    let line = err.line();
    let col = err.column();
    let path = format!("$.line:{line}:col:{col}");

    ErrorEntry::error(
        E_PARSE_ERROR,
        format!("JSON parse error: {err}"),
        file_path,
        &path,
    )
    .with_suggestion("Check JSON syntax and field types")
}
