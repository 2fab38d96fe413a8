use std::collections::HashMap;

use stencil_spec::types::class::ClassSpec;
use stencil_spec::types::common::EmitterKind;
use stencil_spec::types::error::{ErrorEntry, ValidationReport, E_DUPLICATE_SYMBOL};

/// Two class specs generating the same class for the same language would
/// overwrite each other's output.
pub fn check_class_names(classes: &[(String, ClassSpec)], report: &mut ValidationReport) {
    let mut seen: HashMap<(String, String), &str> = HashMap::new();

    for (file, spec) in classes {
        let key = (spec.name.clone(), language_key(&spec.language));
        match seen.get(&key) {
            Some(first) => report.push(
                ErrorEntry::error(
                    E_DUPLICATE_SYMBOL,
                    format!(
                        "Class '{}' for language '{}' is already defined in {}",
                        spec.name, spec.language, first
                    ),
                    file,
                    "$.name",
                )
                .with_suggestion("Rename the class or target a different language"),
            ),
            None => {
                seen.insert(key, file.as_str());
            }
        }
    }
}

/// Duplicate field names and duplicate function signatures inside one class.
pub fn check_members(file: &str, spec: &ClassSpec, report: &mut ValidationReport) {
    let mut fields: HashMap<&str, usize> = HashMap::new();
    for (idx, field) in spec.fields.iter().enumerate() {
        if field.name.is_empty() {
            continue;
        }
        let first = *fields.entry(field.name.as_str()).or_insert(idx);
        if first != idx {
            report.push(ErrorEntry::error(
                E_DUPLICATE_SYMBOL,
                format!(
                    "Field '{}' is already declared at $.fields[{first}]",
                    field.name
                ),
                file,
                &format!("$.fields[{idx}].name"),
            ));
        }
    }

    let mut functions: HashMap<(&str, &str), usize> = HashMap::new();
    for (idx, function) in spec.functions.iter().enumerate() {
        if function.name.is_empty() {
            continue;
        }
        let signature = (function.name.as_str(), function.params.trim());
        let first = *functions.entry(signature).or_insert(idx);
        if first != idx {
            report.push(ErrorEntry::error(
                E_DUPLICATE_SYMBOL,
                format!(
                    "Function '{}({})' is already declared at $.functions[{first}]",
                    function.name, function.params
                ),
                file,
                &format!("$.functions[{idx}].name"),
            ));
        }
    }
}

fn language_key(language: &str) -> String {
    EmitterKind::for_language(language)
        .catalog_language()
        .unwrap_or(language)
        .trim()
        .to_lowercase()
}
