use stencil_spec::parser::CONFIG_FILE;
use stencil_spec::types::class::ClassSpec;
use stencil_spec::types::config::StencilConfig;
use stencil_spec::types::error::{ErrorEntry, ValidationReport, E_MISSING_FIELD};

/// Check that required config fields are present.
pub fn check_config(config: &StencilConfig, report: &mut ValidationReport) {
    if config.name.trim().is_empty() {
        report.push(
            ErrorEntry::error(E_MISSING_FIELD, "Project name is required", CONFIG_FILE, "$.name")
                .with_suggestion("Add a 'name' field to stencil.config.json"),
        );
    }

    if config.output.trim().is_empty() {
        report.push(
            ErrorEntry::error(
                E_MISSING_FIELD,
                "Output directory must not be empty",
                CONFIG_FILE,
                "$.output",
            )
            .with_suggestion("Remove 'output' to use the default 'generated' directory"),
        );
    }
}

/// Check that a class spec carries every field generation relies on.
pub fn check_class(file: &str, spec: &ClassSpec, report: &mut ValidationReport) {
    if spec.name.trim().is_empty() {
        report.push(
            ErrorEntry::error(E_MISSING_FIELD, "Class name is required", file, "$.name")
                .with_suggestion("Add a 'name' field (e.g., 'Point')"),
        );
    }

    if spec.language.trim().is_empty() {
        report.push(
            ErrorEntry::error(E_MISSING_FIELD, "Target language is required", file, "$.language")
                .with_suggestion("Set 'language' to Python, C++, C#, Java or a catalog language"),
        );
    }

    for (idx, field) in spec.fields.iter().enumerate() {
        if field.name.trim().is_empty() {
            report.push(ErrorEntry::error(
                E_MISSING_FIELD,
                "Field name is required",
                file,
                &format!("$.fields[{idx}].name"),
            ));
        }
        if field.type_tag.trim().is_empty() {
            report.push(
                ErrorEntry::error(
                    E_MISSING_FIELD,
                    format!("Field '{}' has no type", field.name),
                    file,
                    &format!("$.fields[{idx}].type"),
                )
                .with_suggestion("Use one of integer, real, string, boolean or a custom type tag"),
            );
        }
    }

    for (idx, function) in spec.functions.iter().enumerate() {
        if function.name.trim().is_empty() {
            report.push(ErrorEntry::error(
                E_MISSING_FIELD,
                "Function name is required",
                file,
                &format!("$.functions[{idx}].name"),
            ));
        }
        if function.return_type.trim().is_empty() {
            report.push(ErrorEntry::error(
                E_MISSING_FIELD,
                format!("Function '{}' has no return type", function.name),
                file,
                &format!("$.functions[{idx}].returnType"),
            ));
        }
    }
}
