pub mod cpp;
pub mod csharp;
pub mod java;
pub mod python;
pub mod text;

use std::fmt::Write;

use stencil_spec::catalog::LanguageFragments;
use stencil_spec::types::common::EmitterKind;
use stencil_spec::types::fragment::FragmentKind;

use crate::context::EmitContext;
use crate::error::{CodegenError, GenerationWarning};
use crate::template::Template;
use crate::traits::LanguageEmitter;

/// Create the emitter for the given emitter family.
pub fn create_emitter(kind: EmitterKind) -> Box<dyn LanguageEmitter> {
    match kind {
        EmitterKind::Structural => Box::new(python::PythonEmitter),
        EmitterKind::HeaderSourcePair => Box::new(cpp::CppEmitter),
        EmitterKind::SingleFileOop => Box::new(csharp::CSharpEmitter),
        EmitterKind::VerboseOop => Box::new(java::JavaEmitter),
        EmitterKind::Default => Box::new(text::TextEmitter),
    }
}

/// A keyword fragment generation cannot do without.
pub(crate) fn require_keyword(
    fragments: &LanguageFragments,
    key: &str,
) -> Result<Template, CodegenError> {
    fragments
        .keyword(key)
        .map(Template::parse)
        .ok_or_else(|| CodegenError::MissingTemplate {
            language: fragments.language().to_string(),
            key: key.to_string(),
        })
}

/// A fragment whose section is skipped when absent.
pub(crate) fn optional_fragment(
    fragments: &LanguageFragments,
    kind: FragmentKind,
    key: &str,
    ctx: &mut EmitContext,
) -> Option<Template> {
    let template = fragments.get(kind, key).map(Template::parse);
    if template.is_none() {
        ctx.warn(GenerationWarning::MissingFragment {
            language: fragments.language().to_string(),
            key: key.to_string(),
        });
    }
    template
}

/// Join rendered blocks with one blank line between them.
pub(crate) fn join_blocks(blocks: &[String]) -> String {
    blocks
        .iter()
        .filter(|b| !b.trim().is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Normalize a rendered file: no trailing whitespace, no leading or
/// repeated blank lines, exactly one final newline.
pub(crate) fn finish_file(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = true;
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            if !blank_run {
                out.push('\n');
            }
            blank_run = true;
        } else {
            out.push_str(line);
            out.push('\n');
            blank_run = false;
        }
    }
    while out.ends_with("\n\n") {
        out.pop();
    }
    if out.is_empty() {
        out.push('\n');
    }
    out
}

/// Double-quoted string literal (C-family escaping).
pub(crate) fn quote_double(value: &str) -> String {
    format!("\"{}\"", escape(value, '"'))
}

/// Single-quoted string literal (Python escaping).
pub(crate) fn quote_single(value: &str) -> String {
    format!("'{}'", escape(value, '\''))
}

/// Backslash escaping shared by every target language. Control characters
/// without a short form become `\uXXXX`.
fn escape(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_finish_file() {
        assert_eq!(
            finish_file("\n\nclass A {  \n\n\n\n  int x;\n}\n\n\n"),
            "class A {\n\n  int x;\n}\n"
        );
        assert_eq!(finish_file(""), "\n");
    }

    #[test]
    fn test_join_blocks_skips_empty() {
        let blocks = vec!["a".to_string(), String::new(), "b\nc".to_string()];
        assert_eq!(join_blocks(&blocks), "a\n\nb\nc");
    }

    #[test]
    fn test_quoting() {
        assert_eq!(quote_double(r#"say "hi"\"#), r#""say \"hi\"\\""#);
        assert_eq!(quote_single("it's"), r"'it\'s'");
    }

    #[test]
    fn test_quoting_escapes_control_characters() {
        assert_eq!(quote_double("a\nb\tc\r"), r#""a\nb\tc\r""#);
        assert_eq!(quote_single("line\nnext"), r"'line\nnext'");
        assert_eq!(quote_double("bell\u{7}"), r#""bell\u0007""#);
        // the other quote style passes through
        assert_eq!(quote_single(r#"say "hi""#), r#"'say "hi"'"#);
        assert_eq!(quote_double("it's"), r#""it's""#);
    }

    #[test]
    fn test_every_kind_has_an_emitter() {
        for kind in [
            EmitterKind::Structural,
            EmitterKind::HeaderSourcePair,
            EmitterKind::SingleFileOop,
            EmitterKind::VerboseOop,
            EmitterKind::Default,
        ] {
            assert_eq!(create_emitter(kind).kind(), kind);
        }
    }
}
