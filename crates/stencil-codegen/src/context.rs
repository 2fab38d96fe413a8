use indexmap::IndexSet;

use crate::error::GenerationWarning;

/// Tracks state during code emission: indentation and recovered warnings.
#[derive(Debug, Clone)]
pub struct EmitContext {
    /// Current indentation level
    indent_level: usize,
    /// Characters per indent (e.g., 2 spaces)
    indent_width: usize,
    /// Whether to use tabs
    use_tabs: bool,
    /// Recovered conditions (deduped, insertion-ordered)
    warnings: IndexSet<GenerationWarning>,
}

/// Indentation style configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    Spaces(usize),
    Tabs,
}

impl EmitContext {
    pub fn new(style: IndentStyle) -> Self {
        let (use_tabs, indent_width) = match style {
            IndentStyle::Spaces(n) => (false, n),
            IndentStyle::Tabs => (true, 1),
        };
        Self {
            indent_level: 0,
            indent_width,
            use_tabs,
            warnings: IndexSet::new(),
        }
    }

    /// Get the current indentation string.
    pub fn indent(&self) -> String {
        self.unit().repeat(self.indent_level)
    }

    /// One level of indentation.
    pub fn unit(&self) -> String {
        if self.use_tabs {
            "\t".to_string()
        } else {
            " ".repeat(self.indent_width)
        }
    }

    /// Increase indentation by one level.
    pub fn push_indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indentation by one level.
    pub fn pop_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Prefix every non-empty line of `text` with the current indentation.
    pub fn indent_block(&self, text: &str) -> String {
        let indent = self.indent();
        text.lines()
            .map(|line| {
                if line.trim().is_empty() {
                    String::new()
                } else {
                    format!("{indent}{line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Record a recovered condition (deduped).
    pub fn warn(&mut self, warning: GenerationWarning) {
        self.warnings.insert(warning);
    }

    pub fn warnings(&self) -> &IndexSet<GenerationWarning> {
        &self.warnings
    }

    /// Drain and return all recorded warnings.
    pub fn take_warnings(&mut self) -> IndexSet<GenerationWarning> {
        std::mem::take(&mut self.warnings)
    }

    /// Current indent level.
    pub fn indent_level(&self) -> usize {
        self.indent_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_spaces() {
        let mut ctx = EmitContext::new(IndentStyle::Spaces(2));
        assert_eq!(ctx.indent(), "");
        ctx.push_indent();
        assert_eq!(ctx.indent(), "  ");
        ctx.push_indent();
        assert_eq!(ctx.indent(), "    ");
        ctx.pop_indent();
        assert_eq!(ctx.indent(), "  ");
    }

    #[test]
    fn test_indent_tabs() {
        let mut ctx = EmitContext::new(IndentStyle::Tabs);
        ctx.push_indent();
        assert_eq!(ctx.indent(), "\t");
        ctx.push_indent();
        assert_eq!(ctx.indent(), "\t\t");
        assert_eq!(ctx.unit(), "\t");
    }

    #[test]
    fn test_indent_block_skips_blank_lines() {
        let mut ctx = EmitContext::new(IndentStyle::Spaces(4));
        ctx.push_indent();
        assert_eq!(
            ctx.indent_block("def f(self):\n    pass\n\ndef g(self):\n  \n    pass"),
            "    def f(self):\n        pass\n\n    def g(self):\n\n        pass"
        );
    }

    #[test]
    fn test_warnings_dedup() {
        let mut ctx = EmitContext::new(IndentStyle::Spaces(2));
        let warning = GenerationWarning::UnknownLanguage {
            language: "Go".to_string(),
        };
        ctx.warn(warning.clone());
        ctx.warn(warning);
        assert_eq!(ctx.warnings().len(), 1);
        let taken = ctx.take_warnings();
        assert_eq!(taken.len(), 1);
        assert!(ctx.warnings().is_empty());
    }
}
