use stencil_spec::catalog::LanguageFragments;
use stencil_spec::types::class::{ClassSpec, FieldSpec};
use stencil_spec::types::common::EmitterKind;
use stencil_spec::types::fragment::{keys, FragmentKind};

use super::{finish_file, join_blocks, optional_fragment, require_keyword};
use crate::context::{EmitContext, IndentStyle};
use crate::error::CodegenError;
use crate::generator::Artifact;
use crate::template::{Slot, Slots, Template};
use crate::traits::LanguageEmitter;

/// C# emitter: one `{Class}.cs` with auto-properties.
pub struct CSharpEmitter;

impl LanguageEmitter for CSharpEmitter {
    fn kind(&self) -> EmitterKind {
        EmitterKind::SingleFileOop
    }

    fn file_extension(&self) -> &str {
        "cs"
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
        let skeleton = require_keyword(fragments, keys::CLASS_SKELETON)?;
        let class_slots = Slots::new()
            .with(Slot::ClassName, &spec.name)
            .with(Slot::Scope, "");

        let properties = spec
            .fields
            .iter()
            .map(|f| {
                format!(
                    "public {} {} {{ get; set; }}",
                    self.emit_type(&f.type_tag, fragments, ctx),
                    f.capitalized()
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let mut members = vec![self.constructor(spec, fragments, ctx)];
        for (_, template) in fragments.canonical_methods() {
            members.push(Template::parse(template).render(&class_slots));
        }

        let mut functions = Vec::new();
        if !spec.functions.is_empty() {
            if let Some(template) =
                optional_fragment(fragments, FragmentKind::Keyword, keys::CUSTOM_FUNCTION, ctx)
            {
                for function in &spec.functions {
                    let visibility = if function.friend { "internal " } else { "public " };
                    let slots = class_slots
                        .clone()
                        .with(Slot::Visibility, visibility)
                        .with(
                            Slot::ReturnType,
                            self.emit_type(&function.return_type, fragments, ctx),
                        )
                        .with(Slot::Name, &function.name)
                        .with(Slot::Params, function.params.trim())
                        .with(Slot::Body, "");
                    functions.push(template.render(&slots));
                }
            }
        }

        ctx.push_indent();
        let variables = ctx.indent_block(&properties);
        let body = ctx.indent_block(&join_blocks(&members));
        let methods = ctx.indent_block(&join_blocks(&functions));
        ctx.pop_indent();

        let content = skeleton.render(
            &Slots::new()
                .with(Slot::Name, &spec.name)
                .with(Slot::ClassName, &spec.name)
                .with(Slot::Variables, variables)
                .with(Slot::Body, body)
                .with(Slot::Methods, methods),
        );

        Ok(vec![Artifact::new(
            format!("{}.{}", spec.name, self.file_extension()),
            finish_file(&content),
        )])
    }
}

impl CSharpEmitter {
    /// Constructor taking one lower-cased parameter per field, in declared order.
    fn constructor(
        &self,
        spec: &ClassSpec,
        fragments: &LanguageFragments,
        ctx: &mut EmitContext,
    ) -> String {
        let unit = ctx.unit();
        let params = spec
            .fields
            .iter()
            .map(|f| format!("{} {}", self.emit_type(&f.type_tag, fragments, ctx), parameter_name(f)))
            .collect::<Vec<_>>()
            .join(", ");

        let mut lines = vec![format!("public {}({params})", spec.name), "{".to_string()];
        for field in &spec.fields {
            lines.push(format!(
                "{unit}this.{} = {};",
                field.capitalized(),
                parameter_name(field)
            ));
        }
        lines.push("}".to_string());
        lines.join("\n")
    }
}

/// Field name with its first character lower-cased.
fn parameter_name(field: &FieldSpec) -> String {
    let mut chars = field.name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stencil_spec::builtin;
    use stencil_spec::types::class::CustomFunctionSpec;

    fn emit(spec: &ClassSpec) -> String {
        let catalog = builtin::catalog();
        let mut ctx = EmitContext::new(IndentStyle::Spaces(2));
        let artifacts = CSharpEmitter
            .emit_class(spec, catalog.language("C#").unwrap(), &mut ctx)
            .unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].filename, format!("{}.cs", spec.name));
        artifacts[0].content.clone()
    }

    #[test]
    fn test_properties_and_constructor() {
        let spec = ClassSpec::new("Account", "C#")
            .with_field(FieldSpec::new("owner", "string"))
            .with_field(FieldSpec::new("Balance", "real"));
        let code = emit(&spec);
        assert!(code.starts_with("using System;\n\npublic class Account\n{\n"));
        assert!(code.contains(
            "  public string Owner { get; set; }\n  public double Balance { get; set; }\n"
        ));
        assert!(code.contains(
            "  public Account(string owner, double balance)\n  {\n    this.Owner = owner;\n    this.Balance = balance;\n  }\n"
        ));
    }

    #[test]
    fn test_operators_follow_constructor() {
        let code = emit(&ClassSpec::new("Point", "C#"));
        let ctor = code.find("public Point()").unwrap();
        let add = code.find("operator +(Point left, Point right)").unwrap();
        let eq = code.find("operator ==(Point left, Point right)").unwrap();
        assert!(ctor < add && add < eq);
    }

    #[test]
    fn test_custom_function_visibility() {
        let spec = ClassSpec::new("Point", "C#")
            .with_function(CustomFunctionSpec::new("Length", "real"))
            .with_function(CustomFunctionSpec::new("Reset", "void").as_friend());
        let code = emit(&spec);
        assert!(code.contains("  public double Length()\n  {\n    throw new NotImplementedException();\n  }\n"));
        assert!(code.contains("  internal void Reset()\n"));
        assert!(code.ends_with("  }\n}\n"));
    }
}
