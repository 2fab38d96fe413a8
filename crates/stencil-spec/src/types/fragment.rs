use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Well-known structural fragment keys.
pub mod keys {
    /// Class skeleton (keyword). Required for every language.
    pub const CLASS_SKELETON: &str = "class-skeleton";
    /// Accessor returning a field (keyword)
    pub const GETTER: &str = "getter";
    /// Accessor assigning a field (keyword)
    pub const SETTER: &str = "setter";
    /// Shape of a user-declared function (keyword)
    pub const CUSTOM_FUNCTION: &str = "custom-function";
    /// Constructor signature (method)
    pub const CONSTRUCTOR: &str = "constructor";
    /// Destructor signature (method)
    pub const DESTRUCTOR: &str = "destructor";

    /// Keyword keys holding layout templates rather than type tokens.
    pub const STRUCTURAL: [&str; 4] = [CLASS_SKELETON, GETTER, SETTER, CUSTOM_FUNCTION];

    pub fn is_structural(key: &str) -> bool {
        STRUCTURAL.contains(&key)
    }
}

/// The two fragment tables a language owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    /// Structural templates and type-token mappings
    Keyword,
    /// Operator and basic-method templates
    Method,
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FragmentKind::Keyword => f.write_str("keyword"),
            FragmentKind::Method => f.write_str("method"),
        }
    }
}

/// A single syntax fragment owned by one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxFragment {
    pub language: String,
    pub kind: FragmentKind,
    pub key: String,
    pub name: String,
    pub template: String,
}

/// One entry of a fragment file table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FragmentEntry {
    /// Operation key (e.g., "add", "class-skeleton", "integer")
    pub key: String,

    /// Human-readable label
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Template text with `{slot}` placeholders
    pub template: String,
}

/// A fragment library file (*.fragments.json)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FragmentFile {
    /// JSON Schema reference
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Language these fragments belong to
    pub language: String,

    /// Indent width override for this language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent: Option<usize>,

    #[serde(default)]
    pub keywords: Vec<FragmentEntry>,

    #[serde(default)]
    pub methods: Vec<FragmentEntry>,
}

impl FragmentFile {
    /// Flatten both tables into fragments tagged with this file's language.
    pub fn fragments(&self) -> impl Iterator<Item = SyntaxFragment> + '_ {
        let keywords = self.keywords.iter().map(|e| (FragmentKind::Keyword, e));
        let methods = self.methods.iter().map(|e| (FragmentKind::Method, e));
        keywords.chain(methods).map(|(kind, entry)| SyntaxFragment {
            language: self.language.clone(),
            kind,
            key: entry.key.clone(),
            name: entry.name.clone(),
            template: entry.template.clone(),
        })
    }
}

/// Canonical operator methods, declared in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    Assignment,
    Add,
    AddAssign,
    Subtract,
    SubtractAssign,
    Multiply,
    MultiplyAssign,
    Divide,
    DivideAssign,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    NotEqual,
    Equal,
    PrefixIncrement,
    PostfixIncrement,
    PrefixDecrement,
    PostfixDecrement,
}

impl Operator {
    /// Canonical emission order.
    pub const CANONICAL: [Operator; 19] = [
        Operator::Assignment,
        Operator::Add,
        Operator::AddAssign,
        Operator::Subtract,
        Operator::SubtractAssign,
        Operator::Multiply,
        Operator::MultiplyAssign,
        Operator::Divide,
        Operator::DivideAssign,
        Operator::LessThan,
        Operator::LessOrEqual,
        Operator::GreaterThan,
        Operator::GreaterOrEqual,
        Operator::NotEqual,
        Operator::Equal,
        Operator::PrefixIncrement,
        Operator::PostfixIncrement,
        Operator::PrefixDecrement,
        Operator::PostfixDecrement,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Operator::Assignment => "assignment",
            Operator::Add => "add",
            Operator::AddAssign => "add-assign",
            Operator::Subtract => "subtract",
            Operator::SubtractAssign => "subtract-assign",
            Operator::Multiply => "multiply",
            Operator::MultiplyAssign => "multiply-assign",
            Operator::Divide => "divide",
            Operator::DivideAssign => "divide-assign",
            Operator::LessThan => "less-than",
            Operator::LessOrEqual => "less-or-equal",
            Operator::GreaterThan => "greater-than",
            Operator::GreaterOrEqual => "greater-or-equal",
            Operator::NotEqual => "not-equal",
            Operator::Equal => "equal",
            Operator::PrefixIncrement => "prefix-increment",
            Operator::PostfixIncrement => "postfix-increment",
            Operator::PrefixDecrement => "prefix-decrement",
            Operator::PostfixDecrement => "postfix-decrement",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::CANONICAL.into_iter().find(|op| op.key() == key)
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Operator::LessThan
                | Operator::LessOrEqual
                | Operator::GreaterThan
                | Operator::GreaterOrEqual
                | Operator::NotEqual
                | Operator::Equal
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_operator_keys_round_trip() {
        for op in Operator::CANONICAL {
            assert_eq!(Operator::from_key(op.key()), Some(op));
        }
        assert_eq!(Operator::from_key("class-skeleton"), None);
    }

    #[test]
    fn test_canonical_order_matches_declaration() {
        let mut sorted = Operator::CANONICAL;
        sorted.sort();
        assert_eq!(sorted, Operator::CANONICAL);
    }

    #[test]
    fn test_fragment_file_flattens_tables() {
        let json = serde_json::json!({
            "language": "Python",
            "indent": 4,
            "keywords": [ { "key": "class-skeleton", "template": "class {name}:" } ],
            "methods": [ { "key": "add", "name": "Addition", "template": "def __add__(self, other):" } ]
        });
        let file: FragmentFile = serde_json::from_value(json).unwrap();
        let fragments: Vec<_> = file.fragments().collect();

        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].kind, FragmentKind::Keyword);
        assert_eq!(fragments[0].name, "");
        assert_eq!(fragments[1].kind, FragmentKind::Method);
        assert_eq!(fragments[1].language, "Python");
        assert_eq!(fragments[1].name, "Addition");
    }
}
