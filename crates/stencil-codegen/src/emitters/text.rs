use stencil_spec::catalog::LanguageFragments;
use stencil_spec::types::class::ClassSpec;
use stencil_spec::types::common::EmitterKind;
use stencil_spec::types::fragment::{keys, FragmentKind};

use super::optional_fragment;
use super::python::assemble_structural;
use crate::context::{EmitContext, IndentStyle};
use crate::error::CodegenError;
use crate::generator::Artifact;
use crate::template::{Slot, Slots};
use crate::traits::LanguageEmitter;

/// Fallback for catalog languages without a dedicated emitter.
///
/// Lays the class out like the Python emitter, but takes its constructor
/// from the language's `constructor` fragment and writes `{Class}.txt`.
pub struct TextEmitter;

impl LanguageEmitter for TextEmitter {
    fn kind(&self) -> EmitterKind {
        EmitterKind::Default
    }

    fn file_extension(&self) -> &str {
        "txt"
    }

    fn indent_style(&self) -> IndentStyle {
        IndentStyle::Spaces(2)
    }

    fn null_literal(&self) -> &str {
        "null"
    }

    fn emit_class(
        &self,
        spec: &ClassSpec,
        fragments: &LanguageFragments,
        ctx: &mut EmitContext,
    ) -> Result<Vec<Artifact>, CodegenError> {
        let constructor = match optional_fragment(
            fragments,
            FragmentKind::Method,
            keys::CONSTRUCTOR,
            ctx,
        ) {
            Some(template) => {
                let params = spec
                    .fields
                    .iter()
                    .map(|f| format!("{} {}", self.emit_type(&f.type_tag, fragments, ctx), f.name))
                    .collect::<Vec<_>>()
                    .join(", ");
                let slots = Slots::new()
                    .with(Slot::ClassName, &spec.name)
                    .with(Slot::Name, &spec.name)
                    .with(Slot::Scope, "")
                    .with(Slot::Params, params)
                    .with(Slot::Body, "");
                template.render(&slots)
            }
            None => String::new(),
        };

        let content = assemble_structural(self, spec, fragments, constructor, None, ctx)?;
        Ok(vec![Artifact::new(
            format!("{}.{}", spec.name, self.file_extension()),
            content,
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stencil_spec::catalog::FragmentCatalog;
    use stencil_spec::types::class::{CustomFunctionSpec, FieldSpec};
    use stencil_spec::types::fragment::FragmentFile;

    use crate::error::GenerationWarning;

    fn go_catalog() -> FragmentCatalog {
        let file: FragmentFile = serde_json::from_value(serde_json::json!({
            "language": "Go",
            "indent": 4,
            "keywords": [
                { "key": "class-skeleton", "template": "type {name} struct {\n{body}\n}\n\n{methods}" },
                { "key": "custom-function", "template": "func {name}() {return_type} {\n}" },
                { "key": "integer", "template": "int" }
            ],
            "methods": [
                { "key": "constructor", "template": "// New{class_name}({params})" },
                { "key": "equal", "template": "// equal" },
                { "key": "add", "template": "// add" }
            ]
        }))
        .unwrap();
        FragmentCatalog::from_files([&file]).unwrap()
    }

    #[test]
    fn test_structural_layout_with_constructor_fragment() {
        let catalog = go_catalog();
        let fragments = catalog.language("Go").unwrap();
        let spec = ClassSpec::new("Point", "Go")
            .with_field(FieldSpec::new("x", "integer"))
            .with_function(CustomFunctionSpec::new("Len", "integer"));
        let mut ctx = EmitContext::new(IndentStyle::Spaces(4));

        let artifacts = TextEmitter.emit_class(&spec, fragments, &mut ctx).unwrap();
        assert_eq!(artifacts[0].filename, "Point.txt");
        assert_eq!(
            artifacts[0].content,
            "type Point struct {\n    // NewPoint(int x)\n\n    // add\n\n    // equal\n}\n\n    func Len() int {\n    }\n"
        );
    }

    #[test]
    fn test_custom_function_params_have_no_receiver() {
        let file: FragmentFile = serde_json::from_value(serde_json::json!({
            "language": "Go",
            "keywords": [
                { "key": "class-skeleton", "template": "type {name} struct {\n{body}\n}\n\n{methods}" },
                { "key": "custom-function", "template": "func {name}({params}) {return_type}" },
                { "key": "integer", "template": "int" }
            ]
        }))
        .unwrap();
        let catalog = FragmentCatalog::from_files([&file]).unwrap();
        let spec = ClassSpec::new("Cache", "Go")
            .with_function(CustomFunctionSpec::new("Get", "integer").with_params("k int"))
            .with_function(CustomFunctionSpec::new("Size", "integer"));
        let mut ctx = EmitContext::new(IndentStyle::Spaces(2));

        let artifacts = TextEmitter
            .emit_class(&spec, catalog.language("Go").unwrap(), &mut ctx)
            .unwrap();
        let content = &artifacts[0].content;
        assert!(content.contains("  func Get(k int) int\n"));
        assert!(content.contains("  func Size() int\n"));
        assert!(!content.contains("self"));
    }

    #[test]
    fn test_missing_constructor_fragment_is_skipped() {
        let file: FragmentFile = serde_json::from_value(serde_json::json!({
            "language": "Kotlin",
            "keywords": [ { "key": "class-skeleton", "template": "class {name} {\n{body}\n}" } ]
        }))
        .unwrap();
        let catalog = FragmentCatalog::from_files([&file]).unwrap();
        let mut ctx = EmitContext::new(IndentStyle::Spaces(2));

        let artifacts = TextEmitter
            .emit_class(
                &ClassSpec::new("Empty", "Kotlin"),
                catalog.language("Kotlin").unwrap(),
                &mut ctx,
            )
            .unwrap();
        assert_eq!(artifacts[0].content, "class Empty {\n\n}\n");
        assert!(ctx.warnings().contains(&GenerationWarning::MissingFragment {
            language: "Kotlin".to_string(),
            key: "constructor".to_string(),
        }));
    }
}
