use stencil_spec::catalog::FragmentCatalog;
use stencil_spec::loader::LoadedProject;
use stencil_spec::types::class::ClassSpec;
use stencil_spec::types::error::ValidationReport;
use tracing::debug;

use crate::rules;

/// Validate a loaded project.
/// Runs all validation rules and returns a consolidated report.
pub fn validate(project: &LoadedProject) -> ValidationReport {
    let mut report = ValidationReport::success();

    rules::version_check::check(&project.config, &mut report);
    rules::required_fields::check_config(&project.config, &mut report);
    rules::duplicates::check_class_names(&project.classes, &mut report);

    for (file, spec) in &project.classes {
        report.merge(validate_class(file, spec, &project.catalog));
    }

    report
}

/// Validate a single class spec against the catalog it will be generated with.
pub fn validate_class(file: &str, spec: &ClassSpec, catalog: &FragmentCatalog) -> ValidationReport {
    debug!(file, class = %spec.name, language = %spec.language, "validating class spec");
    let mut report = ValidationReport::success();

    rules::required_fields::check_class(file, spec, &mut report);
    rules::identifiers::check(file, spec, &mut report);
    rules::duplicates::check_members(file, spec, &mut report);
    rules::template_presence::check(file, spec, catalog, &mut report);
    rules::type_mapping::check(file, spec, catalog, &mut report);

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use stencil_spec::builtin;
    use stencil_spec::types::class::FieldSpec;
    use stencil_spec::types::common::Severity;
    use stencil_spec::types::config::StencilConfig;
    use stencil_spec::types::error::{E_DUPLICATE_SYMBOL, E_VERSION_MISMATCH, W_UNMAPPED_TYPE};

    fn project(classes: Vec<ClassSpec>) -> LoadedProject {
        LoadedProject {
            root: PathBuf::from("/tmp/test"),
            config: StencilConfig::new("test"),
            catalog: builtin::catalog(),
            fragment_files: vec![],
            classes: classes
                .into_iter()
                .map(|c| (format!("{}.class.json", c.name.to_lowercase()), c))
                .collect(),
        }
    }

    fn point(language: &str) -> ClassSpec {
        ClassSpec::new("Point", language)
            .with_field(FieldSpec::new("x", "integer"))
            .with_field(FieldSpec::new("y", "integer"))
    }

    #[test]
    fn test_valid_project_passes() {
        let report = validate(&project(vec![point("C++"), point("Python")]));
        assert!(report.ok, "{report:?}");
        assert!(report.errors.is_empty(), "{report:?}");
    }

    #[test]
    fn test_same_class_twice_for_one_language() {
        let report = validate(&project(vec![point("C++"), point("cpp")]));
        assert!(!report.ok);
        assert_eq!(report.with_code(E_DUPLICATE_SYMBOL).count(), 1);
    }

    #[test]
    fn test_single_class_project_is_clean() {
        let report = validate(&project(vec![point("Java")]));
        assert!(report.ok);
        assert!(report.errors.is_empty(), "{report:?}");
    }

    #[test]
    fn test_warnings_do_not_fail_report() {
        let spec = ClassSpec::new("Wallet", "C#").with_field(FieldSpec::new("balance", "Money"));
        let report = validate_class("wallet.class.json", &spec, &builtin::catalog());
        assert!(report.ok);
        assert_eq!(report.count(Severity::Warning), 1);
        assert_eq!(report.errors[0].code, W_UNMAPPED_TYPE);
    }

    #[test]
    fn test_version_checked_for_project() {
        let mut p = project(vec![]);
        p.config.version = "2.0.0".to_string();
        let report = validate(&p);
        assert!(!report.ok);
        assert_eq!(report.errors[0].code, E_VERSION_MISMATCH);
    }
}
