use stencil_spec::catalog::FragmentCatalog;
use stencil_spec::types::class::ClassSpec;
use stencil_spec::types::error::{ErrorEntry, ValidationReport, W_UNMAPPED_TYPE};

/// Warn about type tags the target language has no token for.
/// Generation still succeeds; the raw tag is emitted verbatim.
pub fn check(file: &str, spec: &ClassSpec, catalog: &FragmentCatalog, report: &mut ValidationReport) {
    let Some(fragments) = catalog.resolve(&spec.language) else {
        return;
    };

    let fields = spec
        .fields
        .iter()
        .enumerate()
        .map(|(idx, f)| (f.type_tag.as_str(), format!("$.fields[{idx}].type")));
    let returns = spec
        .functions
        .iter()
        .enumerate()
        .map(|(idx, f)| (f.return_type.as_str(), format!("$.functions[{idx}].returnType")));

    for (tag, path) in fields.chain(returns) {
        if tag.is_empty() || fragments.type_token(tag).is_some() {
            continue;
        }
        report.push(
            ErrorEntry::warning(
                W_UNMAPPED_TYPE,
                format!(
                    "Type '{tag}' has no mapping for language '{}'; it will be emitted verbatim",
                    fragments.language()
                ),
                file,
                &path,
            )
            .with_suggestion(format!(
                "Add a keyword fragment with key '{tag}' to the {} fragments",
                fragments.language()
            )),
        );
    }
}
