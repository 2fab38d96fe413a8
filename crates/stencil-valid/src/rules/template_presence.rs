use stencil_spec::catalog::{FragmentCatalog, LanguageFragments};
use stencil_spec::types::class::ClassSpec;
use stencil_spec::types::common::EmitterKind;
use stencil_spec::types::error::{
    ErrorEntry, ValidationReport, E_MISSING_TEMPLATE, W_MISSING_FRAGMENT, W_UNKNOWN_LANGUAGE,
};
use stencil_spec::types::fragment::{keys, FragmentKind};

/// Check that the catalog holds the fragments the class's emitter will ask for.
///
/// A missing class skeleton (or a language absent from the catalog) makes
/// generation fail, so it is an error. Missing accessor, constructor or
/// custom-function fragments only drop those sections and are warnings.
pub fn check(file: &str, spec: &ClassSpec, catalog: &FragmentCatalog, report: &mut ValidationReport) {
    if spec.language.trim().is_empty() {
        return;
    }

    let kind = EmitterKind::for_language(&spec.language);
    if kind.is_default() {
        report.push(
            ErrorEntry::warning(
                W_UNKNOWN_LANGUAGE,
                format!(
                    "No dedicated emitter for '{}'; the default emitter will be used",
                    spec.language
                ),
                file,
                "$.language",
            )
            .with_suggestion("Dedicated emitters exist for Python, C++, C# and Java"),
        );
    }

    let Some(fragments) = catalog.resolve(&spec.language) else {
        report.push(
            ErrorEntry::error(
                E_MISSING_TEMPLATE,
                format!("The catalog has no fragments for language '{}'", spec.language),
                file,
                "$.language",
            )
            .with_suggestion(format!(
                "Add a *.fragments.json file with \"language\": \"{}\"",
                spec.language
            )),
        );
        return;
    };

    if !fragments.has_skeleton() {
        report.push(
            ErrorEntry::error(
                E_MISSING_TEMPLATE,
                format!(
                    "Language '{}' has no '{}' fragment",
                    fragments.language(),
                    keys::CLASS_SKELETON
                ),
                file,
                "$.language",
            )
            .with_suggestion("Add a class-skeleton keyword fragment for this language"),
        );
    }

    for (fragment_kind, key) in optional_fragments(kind, spec) {
        if fragments.get(fragment_kind, key).is_none() {
            report.push(missing_fragment(file, fragments, fragment_kind, key));
        }
    }
}

/// Fragments the emitter uses when present, given what the spec declares.
fn optional_fragments(kind: EmitterKind, spec: &ClassSpec) -> Vec<(FragmentKind, &'static str)> {
    let mut wanted = Vec::new();

    if !spec.fields.is_empty()
        && matches!(kind, EmitterKind::HeaderSourcePair | EmitterKind::VerboseOop)
    {
        wanted.push((FragmentKind::Keyword, keys::GETTER));
        wanted.push((FragmentKind::Keyword, keys::SETTER));
    }

    if kind == EmitterKind::HeaderSourcePair {
        wanted.push((FragmentKind::Method, keys::CONSTRUCTOR));
        wanted.push((FragmentKind::Method, keys::DESTRUCTOR));
    }

    if !spec.functions.is_empty() {
        wanted.push((FragmentKind::Keyword, keys::CUSTOM_FUNCTION));
    }

    wanted
}

fn missing_fragment(
    file: &str,
    fragments: &LanguageFragments,
    kind: FragmentKind,
    key: &str,
) -> ErrorEntry {
    ErrorEntry::warning(
        W_MISSING_FRAGMENT,
        format!(
            "Language '{}' has no {kind} fragment '{key}'; that section will be skipped",
            fragments.language()
        ),
        file,
        "$.language",
    )
}
