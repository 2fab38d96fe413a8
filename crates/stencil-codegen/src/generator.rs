use std::path::Path;

use serde::Serialize;
use stencil_spec::catalog::FragmentCatalog;
use stencil_spec::types::class::ClassSpec;
use stencil_spec::types::common::EmitterKind;
use stencil_spec::types::fragment::keys;
use tracing::{debug, warn};

use crate::context::{EmitContext, IndentStyle};
use crate::emitters;
use crate::error::{CodegenError, GenerationWarning};

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub filename: String,
    pub content: String,
}

impl Artifact {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

/// The generated files for one class, in emission order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GeneratedProject {
    class_name: String,
    language: String,
    files: Vec<Artifact>,
    warnings: Vec<GenerationWarning>,
}

impl GeneratedProject {
    pub fn new(class_name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            language: language.into(),
            ..Self::default()
        }
    }

    /// Add a file, replacing an earlier file of the same name in place.
    pub fn add_file(&mut self, filename: impl Into<String>, content: impl Into<String>) {
        let artifact = Artifact::new(filename, content);
        match self.files.iter_mut().find(|a| a.filename == artifact.filename) {
            Some(existing) => *existing = artifact,
            None => self.files.push(artifact),
        }
    }

    /// All generated files in emission order.
    pub fn artifacts(&self) -> &[Artifact] {
        &self.files
    }

    /// Content of a generated file by name.
    pub fn file(&self, filename: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|a| a.filename == filename)
            .map(|a| a.content.as_str())
    }

    /// Number of generated files.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn warnings(&self) -> &[GenerationWarning] {
        &self.warnings
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Name of the archive the files are packaged under: `{Class}_[{Language}].zip`.
    pub fn archive_name(&self) -> String {
        format!("{}.zip", self.archive_stem())
    }

    /// Archive name without the extension; also used as a directory name.
    pub fn archive_stem(&self) -> String {
        format!("{}_[{}]", self.class_name, self.language)
    }

    /// Write all generated files to the given output directory.
    pub fn write_to_disk(&self, output_dir: &Path) -> Result<(), CodegenError> {
        std::fs::create_dir_all(output_dir)?;
        for artifact in &self.files {
            let full_path = output_dir.join(&artifact.filename);
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&full_path, &artifact.content)?;
        }
        Ok(())
    }
}

/// Dispatches a class spec to its emitter and collects the result.
///
/// Borrows the catalog shared; generations never mutate it.
#[derive(Debug, Clone, Copy)]
pub struct CodeGenerator<'a> {
    catalog: &'a FragmentCatalog,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(catalog: &'a FragmentCatalog) -> Self {
        Self { catalog }
    }

    /// Generate every artifact for one class.
    pub fn generate(&self, spec: &ClassSpec) -> Result<GeneratedProject, CodegenError> {
        let kind = EmitterKind::for_language(&spec.language);
        let fragments =
            self.catalog
                .resolve(&spec.language)
                .ok_or_else(|| CodegenError::MissingTemplate {
                    language: spec.language.clone(),
                    key: keys::CLASS_SKELETON.to_string(),
                })?;

        let emitter = emitters::create_emitter(kind);
        debug!(class = %spec.name, language = fragments.language(), ?kind, "dispatching emitter");

        let style = fragments
            .indent()
            .map(IndentStyle::Spaces)
            .unwrap_or_else(|| emitter.indent_style());
        let mut ctx = EmitContext::new(style);
        if kind.is_default() {
            ctx.warn(GenerationWarning::UnknownLanguage {
                language: spec.language.clone(),
            });
        }

        let artifacts = emitter.emit_class(spec, fragments, &mut ctx)?;

        let mut output = GeneratedProject::new(&spec.name, fragments.language());
        for artifact in artifacts {
            output.add_file(artifact.filename, artifact.content);
        }
        for warning in ctx.take_warnings() {
            warn!(code = warning.code(), class = %spec.name, "{warning}");
            output.warnings.push(warning);
        }

        debug!(class = %spec.name, files = output.file_count(), "generation complete");
        Ok(output)
    }
}

/// Generate the artifacts for `spec` using `catalog`.
pub fn generate(spec: &ClassSpec, catalog: &FragmentCatalog) -> Result<GeneratedProject, CodegenError> {
    CodeGenerator::new(catalog).generate(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stencil_spec::builtin;
    use stencil_spec::types::class::FieldSpec;

    #[test]
    fn test_add_file_replaces_same_name() {
        let mut project = GeneratedProject::new("Point", "C++");
        project.add_file("Point.h", "a");
        project.add_file("Point.cpp", "b");
        project.add_file("Point.h", "c");
        assert_eq!(project.file_count(), 2);
        assert_eq!(project.artifacts()[0].content, "c");
        assert_eq!(project.file("Point.cpp"), Some("b"));
    }

    #[test]
    fn test_archive_name() {
        let project = GeneratedProject::new("Point", "C++");
        assert_eq!(project.archive_name(), "Point_[C++].zip");
        assert_eq!(project.archive_stem(), "Point_[C++]");
    }

    #[test]
    fn test_alias_uses_catalog_language_name() {
        let catalog = builtin::catalog();
        let spec = ClassSpec::new("Point", "cpp").with_field(FieldSpec::new("x", "integer"));
        let output = generate(&spec, &catalog).unwrap();
        assert_eq!(output.language(), "C++");
        assert_eq!(output.file_count(), 3);
        assert!(output.warnings().is_empty());
    }

    #[test]
    fn test_language_missing_from_catalog() {
        let catalog = builtin::catalog();
        let err = generate(&ClassSpec::new("Point", "Rust"), &catalog).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::MissingTemplate { ref language, ref key }
                if language == "Rust" && key == "class-skeleton"
        ));
    }

    #[test]
    fn test_write_to_disk() {
        let mut project = GeneratedProject::new("Point", "Python");
        project.add_file("Point.py", "class Point(object):\n    pass\n");
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join(project.archive_stem());
        project.write_to_disk(&target).unwrap();
        assert_eq!(
            std::fs::read_to_string(target.join("Point.py")).unwrap(),
            "class Point(object):\n    pass\n"
        );
    }

    #[test]
    fn test_write_to_disk_reports_io_error() {
        let mut project = GeneratedProject::new("Point", "Python");
        project.add_file("Point.py", "pass\n");
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("occupied");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = project.write_to_disk(&blocker).unwrap_err();
        assert!(matches!(err, CodegenError::Io(_)));
        assert!(err.to_string().starts_with("IO error: "));
    }
}
