use stencil_spec::catalog::LanguageFragments;
use stencil_spec::types::class::{ClassSpec, FieldSpec};
use stencil_spec::types::common::{EmitterKind, ValueType};
use stencil_spec::types::fragment::{keys, FragmentKind};

use super::{finish_file, join_blocks, optional_fragment, quote_single, require_keyword};
use crate::context::{EmitContext, IndentStyle};
use crate::error::CodegenError;
use crate::generator::Artifact;
use crate::template::{Slot, Slots, Template};
use crate::traits::LanguageEmitter;

/// Python class emitter: one `{Class}.py` with a kwargs initializer.
pub struct PythonEmitter;

impl LanguageEmitter for PythonEmitter {
    fn kind(&self) -> EmitterKind {
        EmitterKind::Structural
    }

    fn file_extension(&self) -> &str {
        "py"
    }

    fn indent_style(&self) -> IndentStyle {
        IndentStyle::Spaces(4)
    }

    fn null_literal(&self) -> &str {
        "None"
    }

    fn emit_default(&self, field: &FieldSpec) -> String {
        match &field.default {
            Some(value) if field.is_string() => quote_single(value),
            Some(value) if field.value_type() == Some(ValueType::Boolean) => {
                match value.trim() {
                    "true" | "True" => "True".to_string(),
                    "false" | "False" => "False".to_string(),
                    other => other.to_string(),
                }
            }
            Some(value) => value.clone(),
            None => self.null_literal().to_string(),
        }
    }

    fn emit_class(
        &self,
        spec: &ClassSpec,
        fragments: &LanguageFragments,
        ctx: &mut EmitContext,
    ) -> Result<Vec<Artifact>, CodegenError> {
        let initializer = kwargs_initializer(self, spec, ctx);
        let content = assemble_structural(self, spec, fragments, initializer, Some("self"), ctx)?;
        Ok(vec![Artifact::new(
            format!("{}.{}", spec.name, self.file_extension()),
            content,
        )])
    }
}

/// `def __init__(self, **kwargs):` with one kwargs lookup per field.
fn kwargs_initializer(emitter: &PythonEmitter, spec: &ClassSpec, ctx: &EmitContext) -> String {
    let unit = ctx.unit();
    let mut lines = vec!["def __init__(self, **kwargs):".to_string()];
    if spec.fields.is_empty() {
        lines.push(format!("{unit}pass"));
    }
    for field in &spec.fields {
        lines.push(format!(
            "{unit}self.{name} = kwargs.get('{name}', {default})",
            name = field.name,
            default = emitter.emit_default(field)
        ));
    }
    lines.join("\n")
}

/// Single-file layout shared by the Python and default emitters.
///
/// The initializer and the canonical method fragments fill the skeleton's
/// `body` slot; custom functions fill its `methods` slot. Both sections
/// are indented one level. When `receiver` is set it leads every custom
/// function's parameter list.
pub(crate) fn assemble_structural(
    emitter: &dyn LanguageEmitter,
    spec: &ClassSpec,
    fragments: &LanguageFragments,
    initializer: String,
    receiver: Option<&str>,
    ctx: &mut EmitContext,
) -> Result<String, CodegenError> {
    let skeleton = require_keyword(fragments, keys::CLASS_SKELETON)?;
    let class_slots = Slots::new()
        .with(Slot::ClassName, &spec.name)
        .with(Slot::Scope, "");

    let mut members = vec![initializer];
    for (_, template) in fragments.canonical_methods() {
        members.push(Template::parse(template).render(&class_slots));
    }

    let mut functions = Vec::new();
    if !spec.functions.is_empty() {
        if let Some(template) =
            optional_fragment(fragments, FragmentKind::Keyword, keys::CUSTOM_FUNCTION, ctx)
        {
            for function in &spec.functions {
                let params = match (receiver, function.params.trim()) {
                    (Some(receiver), "") => receiver.to_string(),
                    (Some(receiver), extra) => format!("{receiver}, {extra}"),
                    (None, extra) => extra.to_string(),
                };
                let return_type = emitter.emit_type(&function.return_type, fragments, ctx);
                let slots = class_slots
                    .clone()
                    .with(Slot::Name, &function.name)
                    .with(Slot::Params, params)
                    .with(Slot::ReturnType, return_type)
                    .with(Slot::Visibility, "")
                    .with(Slot::Body, "");
                functions.push(template.render(&slots));
            }
        }
    }

    ctx.push_indent();
    let body = ctx.indent_block(&join_blocks(&members));
    let methods = ctx.indent_block(&join_blocks(&functions));
    ctx.pop_indent();

    let slots = Slots::new()
        .with(Slot::Name, &spec.name)
        .with(Slot::ClassName, &spec.name)
        .with(Slot::Variables, "")
        .with(Slot::Body, body)
        .with(Slot::Methods, methods);
    Ok(finish_file(&skeleton.render(&slots)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stencil_spec::builtin;
    use stencil_spec::types::class::CustomFunctionSpec;

    fn emit(spec: &ClassSpec) -> (String, EmitContext) {
        let catalog = builtin::catalog();
        let fragments = catalog.language("Python").unwrap();
        let mut ctx = EmitContext::new(IndentStyle::Spaces(4));
        let artifacts = PythonEmitter.emit_class(spec, fragments, &mut ctx).unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].filename, format!("{}.py", spec.name));
        (artifacts[0].content.clone(), ctx)
    }

    #[test]
    fn test_emit_defaults() {
        let emitter = PythonEmitter;
        assert_eq!(emitter.emit_default(&FieldSpec::new("x", "integer")), "None");
        assert_eq!(
            emitter.emit_default(&FieldSpec::new("x", "integer").with_default("3")),
            "3"
        );
        assert_eq!(
            emitter.emit_default(&FieldSpec::new("s", "string").with_default("it's")),
            r"'it\'s'"
        );
        assert_eq!(
            emitter.emit_default(&FieldSpec::new("b", "boolean").with_default("true")),
            "True"
        );
    }

    #[test]
    fn test_initializer_per_field() {
        let spec = ClassSpec::new("Point", "Python")
            .with_field(FieldSpec::new("x", "integer"))
            .with_field(FieldSpec::new("label", "string").with_default("origin"));
        let (code, ctx) = emit(&spec);
        assert!(code.starts_with("class Point(object):\n    def __init__(self, **kwargs):\n"));
        assert!(code.contains("        self.x = kwargs.get('x', None)\n"));
        assert!(code.contains("        self.label = kwargs.get('label', 'origin')\n"));
        assert!(ctx.warnings().is_empty());
    }

    #[test]
    fn test_custom_function_gets_self() {
        let spec = ClassSpec::new("Point", "Python")
            .with_function(CustomFunctionSpec::new("length", "real"))
            .with_function(CustomFunctionSpec::new("scale", "void").with_params("k"));
        let (code, ctx) = emit(&spec);
        assert!(code.contains("    def length(self) -> float:\n        pass\n"));
        assert!(code.contains("    def scale(self, k) -> void:\n"));
        // `void` has no Python mapping
        assert_eq!(ctx.warnings().len(), 1);
    }

    #[test]
    fn test_empty_class() {
        let (code, _) = emit(&ClassSpec::new("Empty", "Python"));
        assert!(code.starts_with(
            "class Empty(object):\n    def __init__(self, **kwargs):\n        pass\n\n    def __add__"
        ));
        assert!(code.ends_with("return NotImplemented\n"));
    }
}
