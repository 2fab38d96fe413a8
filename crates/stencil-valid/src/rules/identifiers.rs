use std::sync::OnceLock;

use regex::Regex;
use stencil_spec::types::class::ClassSpec;
use stencil_spec::types::error::{ErrorEntry, ValidationReport, E_INVALID_IDENTIFIER};

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"))
}

/// Whether `name` can be spliced into generated code as an identifier.
pub fn is_identifier(name: &str) -> bool {
    identifier_pattern().is_match(name)
}

/// Check that class, field and function names are plain identifiers.
/// Empty names are left to the required-fields rule.
pub fn check(file: &str, spec: &ClassSpec, report: &mut ValidationReport) {
    check_name(file, "$.name", "Class", &spec.name, report);

    for (idx, field) in spec.fields.iter().enumerate() {
        check_name(file, &format!("$.fields[{idx}].name"), "Field", &field.name, report);
    }

    for (idx, function) in spec.functions.iter().enumerate() {
        check_name(
            file,
            &format!("$.functions[{idx}].name"),
            "Function",
            &function.name,
            report,
        );
    }
}

fn check_name(file: &str, path: &str, what: &str, name: &str, report: &mut ValidationReport) {
    if name.is_empty() || is_identifier(name) {
        return;
    }
    report.push(
        ErrorEntry::error(
            E_INVALID_IDENTIFIER,
            format!("{what} name '{name}' is not a valid identifier"),
            file,
            path,
        )
        .with_suggestion("Use letters, digits and underscores, not starting with a digit"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_spec::types::class::{CustomFunctionSpec, FieldSpec};

    #[test]
    fn test_identifier_pattern() {
        assert!(is_identifier("Point"));
        assert!(is_identifier("_private2"));
        assert!(!is_identifier("2d"));
        assert!(!is_identifier("my field"));
        assert!(!is_identifier("x-y"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_invalid_names_reported() {
        let spec = ClassSpec::new("Bad Class", "Java")
            .with_field(FieldSpec::new("ok", "integer"))
            .with_field(FieldSpec::new("9lives", "integer"))
            .with_function(CustomFunctionSpec::new("do-it", "void"));
        let mut report = ValidationReport::success();
        check("bad.class.json", &spec, &mut report);

        let paths: Vec<_> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["$.name", "$.fields[1].name", "$.functions[0].name"]);
        assert!(report.errors.iter().all(|e| e.code == E_INVALID_IDENTIFIER));
    }

    #[test]
    fn test_empty_name_left_to_required_fields() {
        let spec = ClassSpec::new("", "Java");
        let mut report = ValidationReport::success();
        check("empty.class.json", &spec, &mut report);
        assert!(report.ok);
    }
}
