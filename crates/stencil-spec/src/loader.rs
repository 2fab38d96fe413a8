use std::path::{Component, Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::builtin;
use crate::catalog::FragmentCatalog;
use crate::parser::{self, SpecFileType, CONFIG_FILE};
use crate::types::class::ClassSpec;
use crate::types::config::StencilConfig;
use crate::types::error::{ErrorEntry, ValidationReport, E_DUPLICATE_FRAGMENT, E_PARSE_ERROR};
use crate::types::fragment::{FragmentFile, FragmentKind, SyntaxFragment};

/// A loaded Stencil project with its catalog and class specs
#[derive(Debug, Clone)]
pub struct LoadedProject {
    /// Project root directory
    pub root: PathBuf,
    /// Parsed project config
    pub config: StencilConfig,
    /// Built-in fragments (if enabled) overlaid with the project's own
    pub catalog: FragmentCatalog,
    /// Relative paths of the project fragment files that were loaded
    pub fragment_files: Vec<String>,
    /// All parsed class specs with their relative file paths
    pub classes: Vec<(String, ClassSpec)>,
}

impl LoadedProject {
    /// Find a class spec by class name.
    pub fn class(&self, name: &str) -> Option<&(String, ClassSpec)> {
        self.classes.iter().find(|(_, spec)| spec.name == name)
    }

    /// Absolute output directory from the config.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.config.output)
    }
}

/// Load and parse an entire Stencil project directory.
/// Accumulates errors instead of failing on the first one.
#[allow(clippy::result_large_err)]
pub fn load_project(project_dir: &Path) -> Result<(LoadedProject, ValidationReport), LoadError> {
    let mut report = ValidationReport::success();

    if !project_dir.is_dir() {
        return Err(LoadError::ProjectNotFound(
            project_dir.to_string_lossy().into_owned(),
        ));
    }

    // Load config first (required)
    let config_path = project_dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Err(LoadError::ConfigNotFound(
            config_path.to_string_lossy().into_owned(),
        ));
    }

    let config_content = std::fs::read_to_string(&config_path)
        .map_err(|e| LoadError::IoError(config_path.to_string_lossy().into_owned(), e))?;

    let config = parser::parse_config(&config_content, CONFIG_FILE)
        .map_err(LoadError::ConfigParseError)?;

    let output_dir = normalized_output(&config.output);
    let mut project_catalog = FragmentCatalog::new();
    let mut fragment_files = Vec::new();
    let mut classes = Vec::new();

    for entry in WalkDir::new(project_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        let rel = path.strip_prefix(project_dir).unwrap_or(path);
        if is_skipped(rel, output_dir.as_deref()) {
            continue;
        }
        let rel_path = rel.to_string_lossy().into_owned();

        let Some(spec_type) = parser::detect_spec_type(path) else {
            continue;
        };

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                report.push(ErrorEntry::error(
                    E_PARSE_ERROR,
                    format!("Failed to read file: {e}"),
                    &rel_path,
                    "$",
                ));
                continue;
            }
        };

        match spec_type {
            SpecFileType::Config => {
                // Already loaded above
            }
            SpecFileType::Fragments => match parser::parse_fragment_file(&content, &rel_path) {
                Ok(file) => {
                    debug!(file = %rel_path, language = %file.language, "loaded fragment file");
                    register_fragments(&mut project_catalog, &file, &rel_path, &mut report);
                    fragment_files.push(rel_path);
                }
                Err(entry) => report.push(entry),
            },
            SpecFileType::Class => match parser::parse_class_spec(&content, &rel_path) {
                Ok(spec) => classes.push((rel_path, spec)),
                Err(entry) => report.push(entry),
            },
        }
    }

    let mut catalog = if config.builtin_catalog {
        builtin::catalog()
    } else {
        FragmentCatalog::new()
    };
    catalog.overlay(project_catalog);

    let project = LoadedProject {
        root: project_dir.to_path_buf(),
        config,
        catalog,
        fragment_files,
        classes,
    };

    Ok((project, report))
}

/// The configured output directory as a relative path without `.`
/// components. `None` when it names the project root itself.
fn normalized_output(output: &str) -> Option<PathBuf> {
    let path: PathBuf = Path::new(output.trim())
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    (!path.as_os_str().is_empty()).then_some(path)
}

/// Generated output and dot-prefixed top-level entries are not project input.
/// Compares whole path components, so `gen` does not hide `generators/`.
fn is_skipped(rel_path: &Path, output_dir: Option<&Path>) -> bool {
    let hidden = rel_path
        .components()
        .next()
        .is_some_and(|c| c.as_os_str().to_string_lossy().starts_with('.'));
    hidden || output_dir.is_some_and(|out| rel_path.starts_with(out))
}

/// Add a file's fragments to the project catalog, reporting duplicates
/// across project files instead of aborting.
fn register_fragments(
    catalog: &mut FragmentCatalog,
    file: &FragmentFile,
    rel_path: &str,
    report: &mut ValidationReport,
) {
    if let Some(indent) = file.indent {
        catalog.set_indent(&file.language, indent);
    }

    let tables = [
        (FragmentKind::Keyword, "keywords", &file.keywords),
        (FragmentKind::Method, "methods", &file.methods),
    ];
    for (kind, table, entries) in tables {
        for (idx, entry) in entries.iter().enumerate() {
            let fragment = SyntaxFragment {
                language: file.language.clone(),
                kind,
                key: entry.key.clone(),
                name: entry.name.clone(),
                template: entry.template.clone(),
            };
            if let Err(err) = catalog.insert(fragment) {
                report.push(
                    ErrorEntry::error(
                        E_DUPLICATE_FRAGMENT,
                        err.to_string(),
                        rel_path,
                        &format!("$.{table}[{idx}].key"),
                    )
                    .with_suggestion("Each (language, key) pair may be defined only once per table"),
                );
            }
        }
    }
}

/// Errors that prevent project loading entirely
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Project directory not found: {0}")]
    ProjectNotFound(String),

    #[error("stencil.config.json not found: {0}")]
    ConfigNotFound(String),

    #[error("Failed to parse stencil.config.json: {0:?}")]
    ConfigParseError(ErrorEntry),

    #[error("I/O error reading {0}: {1}")]
    IoError(String, std::io::Error),
}
