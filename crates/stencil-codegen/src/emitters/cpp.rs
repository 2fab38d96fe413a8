use stencil_spec::catalog::LanguageFragments;
use stencil_spec::types::class::{ClassSpec, FieldSpec};
use stencil_spec::types::common::EmitterKind;
use stencil_spec::types::fragment::{keys, FragmentKind, Operator};

use super::{finish_file, optional_fragment, require_keyword};
use crate::context::{EmitContext, IndentStyle};
use crate::error::CodegenError;
use crate::generator::Artifact;
use crate::template::{Slot, Slots, Template};
use crate::traits::LanguageEmitter;

const STANDARD_INCLUDES: [&str; 4] = ["iostream", "iomanip", "string", "tuple"];

/// C++ emitter: `main.cpp`, `{Class}.h` and `{Class}.cpp`.
///
/// Header declarations and implementation definitions come from the same
/// member list, so both files always agree on signatures.
pub struct CppEmitter;

impl LanguageEmitter for CppEmitter {
    fn kind(&self) -> EmitterKind {
        EmitterKind::HeaderSourcePair
    }

    fn file_extension(&self) -> &str {
        "cpp"
    }

    fn indent_style(&self) -> IndentStyle {
        IndentStyle::Spaces(2)
    }

    fn null_literal(&self) -> &str {
        "nullptr"
    }

    fn emit_class(
        &self,
        spec: &ClassSpec,
        fragments: &LanguageFragments,
        ctx: &mut EmitContext,
    ) -> Result<Vec<Artifact>, CodegenError> {
        let skeleton = require_keyword(fragments, keys::CLASS_SKELETON)?;
        let members = self.members(spec, fragments, ctx);

        let header = self.emit_header(spec, fragments, &skeleton, &members, ctx);
        let implementation = emit_implementation(spec, &members, ctx);
        let main = emit_main(spec, ctx);

        Ok(vec![
            Artifact::new("main.cpp", main),
            Artifact::new(format!("{}.h", spec.name), header),
            Artifact::new(format!("{}.{}", spec.name, self.file_extension()), implementation),
        ])
    }
}

impl CppEmitter {
    /// Every class member in declaration order: constructors, destructor,
    /// canonical operators, accessor pairs, custom functions.
    fn members(
        &self,
        spec: &ClassSpec,
        fragments: &LanguageFragments,
        ctx: &mut EmitContext,
    ) -> Vec<Member> {
        let class = spec.name.as_str();
        let class_slots = Slots::new().with(Slot::ClassName, class);
        let mut members = Vec::new();

        if let Some(ctor) = optional_fragment(fragments, FragmentKind::Method, keys::CONSTRUCTOR, ctx) {
            members.push(Member::new(
                &ctor,
                class_slots.clone().with(Slot::Params, ""),
                Vec::new(),
            ));
            members.push(Member::new(
                &ctor,
                class_slots
                    .clone()
                    .with(Slot::Params, format!("const {class}& object")),
                spec.fields.iter().map(copy_from_object).collect(),
            ));
            // A field constructor without fields would redeclare the default one
            if !spec.fields.is_empty() {
                let params = spec
                    .fields
                    .iter()
                    .map(|f| format!("{} {}", self.emit_type(&f.type_tag, fragments, ctx), f.name))
                    .collect::<Vec<_>>()
                    .join(", ");
                members.push(Member::new(
                    &ctor,
                    class_slots.clone().with(Slot::Params, params),
                    spec.fields
                        .iter()
                        .map(|f| format!("this->{0}={0};", f.name))
                        .collect(),
                ));
            }
        }

        if let Some(dtor) = optional_fragment(fragments, FragmentKind::Method, keys::DESTRUCTOR, ctx) {
            members.push(Member::new(&dtor, class_slots.clone(), Vec::new()));
        }

        for (op, template) in fragments.canonical_methods() {
            members.push(Member::new(
                &Template::parse(template),
                class_slots.clone(),
                operator_statements(op, class, &spec.fields),
            ));
        }

        if !spec.fields.is_empty() {
            let getter = optional_fragment(fragments, FragmentKind::Keyword, keys::GETTER, ctx);
            let setter = optional_fragment(fragments, FragmentKind::Keyword, keys::SETTER, ctx);
            if let (Some(getter), Some(setter)) = (getter, setter) {
                for field in &spec.fields {
                    let slots = class_slots
                        .clone()
                        .with(Slot::Type, self.emit_type(&field.type_tag, fragments, ctx))
                        .with(Slot::Field, &field.name)
                        .with(Slot::FieldCap, field.capitalized());
                    members.push(Member::new(
                        &getter,
                        slots.clone(),
                        vec![format!("return this->{};", field.name)],
                    ));
                    members.push(Member::new(
                        &setter,
                        slots,
                        vec![format!("this->{0}={0};", field.name)],
                    ));
                }
            }
        }

        if !spec.functions.is_empty() {
            if let Some(template) =
                optional_fragment(fragments, FragmentKind::Keyword, keys::CUSTOM_FUNCTION, ctx)
            {
                for function in &spec.functions {
                    let slots = class_slots
                        .clone()
                        .with(Slot::Name, &function.name)
                        .with(Slot::Params, function.params.trim())
                        .with(
                            Slot::ReturnType,
                            self.emit_type(&function.return_type, fragments, ctx),
                        )
                        .with(Slot::Visibility, "");
                    let mut member = Member::new(&template, slots, Vec::new());
                    member.friend = function.friend;
                    members.push(member);
                }
            }
        }

        members
    }

    fn emit_header(
        &self,
        spec: &ClassSpec,
        fragments: &LanguageFragments,
        skeleton: &Template,
        members: &[Member],
        ctx: &mut EmitContext,
    ) -> String {
        let guard = format!("{}_H", spec.name.to_uppercase());
        let renderer = MemberRenderer::new(&spec.name, BodyPolicy::Declaration, ctx.unit());

        let variables = spec
            .fields
            .iter()
            .map(|f| format!("{} {};", self.emit_type(&f.type_tag, fragments, ctx), f.name))
            .collect::<Vec<_>>()
            .join("\n");
        let declarations = members
            .iter()
            .map(|m| renderer.render(m))
            .collect::<Vec<_>>()
            .join("\n");

        // members sit under the skeleton's access labels
        ctx.push_indent();
        ctx.push_indent();
        let variables = ctx.indent_block(&variables);
        let declarations = ctx.indent_block(&declarations);
        ctx.pop_indent();
        ctx.pop_indent();

        let class_text = skeleton.render(
            &Slots::new()
                .with(Slot::Name, &spec.name)
                .with(Slot::ClassName, &spec.name)
                .with(Slot::Variables, variables)
                .with(Slot::Body, declarations)
                .with(Slot::Methods, ""),
        );

        let includes = STANDARD_INCLUDES
            .iter()
            .map(|name| format!("#include <{name}>"))
            .collect::<Vec<_>>()
            .join("\n");

        finish_file(&format!(
            "#ifndef {guard}\n#define {guard}\n\n{includes}\n\nusing namespace std;\n\n{class_text}\n\n#endif // {guard}\n"
        ))
    }
}

fn emit_implementation(spec: &ClassSpec, members: &[Member], ctx: &EmitContext) -> String {
    let renderer = MemberRenderer::new(&spec.name, BodyPolicy::Definition, ctx.unit());
    let definitions = members
        .iter()
        .map(|m| renderer.render(m))
        .collect::<Vec<_>>()
        .join("\n\n");
    finish_file(&format!("#include \"{}.h\"\n\n{definitions}\n", spec.name))
}

fn emit_main(spec: &ClassSpec, ctx: &EmitContext) -> String {
    let unit = ctx.unit();
    let class = &spec.name;
    finish_file(&format!(
        "#include \"{class}.h\"\n\nint main() {{\n{unit}{class}* instance = new {class}();\n{unit}delete instance;\n{unit}return 0;\n}}\n"
    ))
}

/// Whether members render as header declarations or out-of-class definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyPolicy {
    Declaration,
    Definition,
}

/// One class member: its fragment, bound slots and definition statements.
#[derive(Debug, Clone)]
struct Member {
    template: Template,
    slots: Slots,
    statements: Vec<String>,
    friend: bool,
}

impl Member {
    fn new(template: &Template, slots: Slots, statements: Vec<String>) -> Self {
        Self {
            template: template.clone(),
            slots,
            statements,
            friend: false,
        }
    }
}

/// Renders members for one side of the header/implementation split.
struct MemberRenderer {
    scope: String,
    policy: BodyPolicy,
    unit: String,
}

impl MemberRenderer {
    fn new(class_name: &str, policy: BodyPolicy, unit: String) -> Self {
        let scope = match policy {
            BodyPolicy::Declaration => String::new(),
            BodyPolicy::Definition => format!("{class_name}::"),
        };
        Self { scope, policy, unit }
    }

    fn render(&self, member: &Member) -> String {
        // friends are free functions: no class scope on the definition
        let scope = if member.friend { "" } else { self.scope.as_str() };
        let slots = member
            .slots
            .clone()
            .with(Slot::Scope, scope)
            .with(Slot::Body, self.body(member));
        let text = member.template.render(&slots);
        if member.friend && self.policy == BodyPolicy::Declaration {
            format!("friend {text}")
        } else {
            text
        }
    }

    fn body(&self, member: &Member) -> String {
        match self.policy {
            BodyPolicy::Declaration => ";".to_string(),
            BodyPolicy::Definition => {
                let mut body = String::from(" {\n");
                for statement in &member.statements {
                    body.push_str(&self.unit);
                    body.push_str(statement);
                    body.push('\n');
                }
                body.push('}');
                body
            }
        }
    }
}

fn copy_from_object(field: &FieldSpec) -> String {
    format!("this->{0}=object.{0};", field.name)
}

/// Statements synthesized for an operator definition.
fn operator_statements(op: Operator, class: &str, fields: &[FieldSpec]) -> Vec<String> {
    match op {
        Operator::Assignment => fields
            .iter()
            .map(copy_from_object)
            .chain(std::iter::once("return *this;".to_string()))
            .collect(),
        Operator::Add | Operator::Subtract | Operator::Multiply | Operator::Divide => vec![
            format!("{class} result(*this);"),
            "return result;".to_string(),
        ],
        Operator::AddAssign
        | Operator::SubtractAssign
        | Operator::MultiplyAssign
        | Operator::DivideAssign
        | Operator::PrefixIncrement
        | Operator::PrefixDecrement => vec!["return *this;".to_string()],
        Operator::PostfixIncrement | Operator::PostfixDecrement => vec![
            format!("{class} previous(*this);"),
            "return previous;".to_string(),
        ],
        Operator::LessThan
        | Operator::LessOrEqual
        | Operator::GreaterThan
        | Operator::GreaterOrEqual
        | Operator::NotEqual
        | Operator::Equal => {
            let this_fields = fields
                .iter()
                .map(|f| format!("this->{}", f.name))
                .collect::<Vec<_>>()
                .join(", ");
            let object_fields = fields
                .iter()
                .map(|f| format!("object.{}", f.name))
                .collect::<Vec<_>>()
                .join(", ");
            vec![format!(
                "return std::tie({this_fields}) {} std::tie({object_fields});",
                comparison_symbol(op)
            )]
        }
    }
}

fn comparison_symbol(op: Operator) -> &'static str {
    match op {
        Operator::LessThan => "<",
        Operator::LessOrEqual => "<=",
        Operator::GreaterThan => ">",
        Operator::GreaterOrEqual => ">=",
        Operator::NotEqual => "!=",
        _ => "==",
    }
}
