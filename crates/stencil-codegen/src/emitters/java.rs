use stencil_spec::catalog::LanguageFragments;
use stencil_spec::types::class::{ClassSpec, FieldSpec};
use stencil_spec::types::common::{EmitterKind, ValueType};
use stencil_spec::types::fragment::{keys, FragmentKind};

use super::{finish_file, join_blocks, optional_fragment, quote_double, require_keyword};
use crate::context::{EmitContext, IndentStyle};
use crate::error::CodegenError;
use crate::generator::Artifact;
use crate::template::{Slot, Slots, Template};
use crate::traits::LanguageEmitter;

/// Java emitter: one `{Class}.java` with explicit accessors and a `main`.
///
/// The constructor and the `main` instantiation list fields in reverse
/// declared order; existing generated code depends on that ordering.
pub struct JavaEmitter;

impl LanguageEmitter for JavaEmitter {
    fn kind(&self) -> EmitterKind {
        EmitterKind::VerboseOop
    }

    fn file_extension(&self) -> &str {
        "java"
    }

    fn indent_style(&self) -> IndentStyle {
        IndentStyle::Spaces(2)
    }

    fn null_literal(&self) -> &str {
        "null"
    }

    /// Stored defaults as literals; otherwise the value type's zero value.
    fn emit_default(&self, field: &FieldSpec) -> String {
        match (&field.default, field.value_type()) {
            (Some(value), Some(ValueType::String)) => quote_double(value),
            (Some(value), Some(ValueType::Boolean)) => match value.trim() {
                "true" | "True" => "true".to_string(),
                "false" | "False" => "false".to_string(),
                other => other.to_string(),
            },
            (Some(value), _) => value.clone(),
            (None, Some(ValueType::Integer)) => "0".to_string(),
            (None, Some(ValueType::Real)) => "0.0".to_string(),
            (None, Some(ValueType::Boolean)) => "false".to_string(),
            (None, _) => self.null_literal().to_string(),
        }
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

        let variables = spec
            .fields
            .iter()
            .map(|f| format!("private {} {};", self.emit_type(&f.type_tag, fragments, ctx), f.name))
            .collect::<Vec<_>>()
            .join("\n");

        let mut members = vec![self.constructor(spec, fragments, ctx)];
        members.extend(self.accessors(spec, fragments, &class_slots, ctx));
        for (_, template) in fragments.canonical_methods() {
            members.push(Template::parse(template).render(&class_slots));
        }

        let mut functions = Vec::new();
        if !spec.functions.is_empty() {
            if let Some(template) =
                optional_fragment(fragments, FragmentKind::Keyword, keys::CUSTOM_FUNCTION, ctx)
            {
                for function in &spec.functions {
                    // friend maps to package-private
                    let visibility = if function.friend { "" } else { "public " };
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
        functions.push(self.main(spec, ctx));

        ctx.push_indent();
        let variables = ctx.indent_block(&variables);
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

impl JavaEmitter {
    /// Single constructor; parameters and assignments in reverse field order.
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
            .rev()
            .map(|f| format!("{} {}", self.emit_type(&f.type_tag, fragments, ctx), f.name))
            .collect::<Vec<_>>()
            .join(", ");

        let mut lines = vec![format!("public {}({params}) {{", spec.name)];
        for field in spec.fields.iter().rev() {
            lines.push(format!("{unit}this.{0} = {0};", field.name));
        }
        lines.push("}".to_string());
        lines.join("\n")
    }

    /// Getter and setter per field in declared order. Both fragments are
    /// needed; if either is missing the section is dropped.
    fn accessors(
        &self,
        spec: &ClassSpec,
        fragments: &LanguageFragments,
        class_slots: &Slots,
        ctx: &mut EmitContext,
    ) -> Vec<String> {
        if spec.fields.is_empty() {
            return Vec::new();
        }
        let getter = optional_fragment(fragments, FragmentKind::Keyword, keys::GETTER, ctx);
        let setter = optional_fragment(fragments, FragmentKind::Keyword, keys::SETTER, ctx);
        let (Some(getter), Some(setter)) = (getter, setter) else {
            return Vec::new();
        };

        let mut out = Vec::with_capacity(spec.fields.len() * 2);
        for field in &spec.fields {
            let slots = class_slots
                .clone()
                .with(Slot::Type, self.emit_type(&field.type_tag, fragments, ctx))
                .with(Slot::Field, &field.name)
                .with(Slot::FieldCap, field.capitalized())
                .with(Slot::Body, "");
            out.push(getter.render(&slots));
            out.push(setter.render(&slots));
        }
        out
    }

    /// `main` instantiating the class with every field's default, reversed.
    fn main(&self, spec: &ClassSpec, ctx: &EmitContext) -> String {
        let unit = ctx.unit();
        let args = spec
            .fields
            .iter()
            .rev()
            .map(|f| self.emit_default(f))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "public static void main(String[] args) {{\n{unit}{class} instance = new {class}({args});\n}}",
            class = spec.name
        )
    }
}
