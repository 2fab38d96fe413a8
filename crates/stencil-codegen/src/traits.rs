use stencil_spec::catalog::LanguageFragments;
use stencil_spec::types::class::{ClassSpec, FieldSpec};
use stencil_spec::types::common::EmitterKind;

use crate::context::{EmitContext, IndentStyle};
use crate::emitters::quote_double;
use crate::error::{CodegenError, GenerationWarning};
use crate::generator::Artifact;

/// Language-specific class emitter.
///
/// Each emitter family implements this trait to turn a class spec plus the
/// target language's fragments into complete source files. Emitters hold no
/// state; everything per-call lives in the [`EmitContext`].
pub trait LanguageEmitter {
    /// Which emitter family this is.
    fn kind(&self) -> EmitterKind;

    /// File extension for the main artifact (e.g., "py", "cs").
    fn file_extension(&self) -> &str;

    /// Indentation style used when the catalog sets no override.
    fn indent_style(&self) -> IndentStyle;

    /// Literal for a field with no stored default.
    fn null_literal(&self) -> &str;

    /// Resolve a value-type tag to the language's type token.
    /// Unmapped tags fall back to the raw tag and are recorded.
    fn emit_type(&self, tag: &str, fragments: &LanguageFragments, ctx: &mut EmitContext) -> String {
        match fragments.type_token(tag) {
            Some(token) => token.to_string(),
            None => {
                ctx.warn(GenerationWarning::UnmappedType {
                    language: fragments.language().to_string(),
                    type_tag: tag.to_string(),
                });
                tag.to_string()
            }
        }
    }

    /// Render a field's default value as a source literal.
    fn emit_default(&self, field: &FieldSpec) -> String {
        match &field.default {
            Some(value) if field.is_string() => quote_double(value),
            Some(value) => value.clone(),
            None => self.null_literal().to_string(),
        }
    }

    /// Produce the ordered artifacts for one class.
    fn emit_class(
        &self,
        spec: &ClassSpec,
        fragments: &LanguageFragments,
        ctx: &mut EmitContext,
    ) -> Result<Vec<Artifact>, CodegenError>;
}
