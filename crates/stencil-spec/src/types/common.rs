use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Error/warning severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// The closed set of value types a field may declare.
///
/// Field specs carry their type as a free-form tag so that custom types
/// survive loading; this enum recognizes the tags every emitter knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Integer,
    Real,
    String,
    Boolean,
}

impl ValueType {
    pub const ALL: [ValueType; 4] = [
        ValueType::Integer,
        ValueType::Real,
        ValueType::String,
        ValueType::Boolean,
    ];

    /// Recognize a type tag (exact, lowercase).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "integer" => Some(ValueType::Integer),
            "real" => Some(ValueType::Real),
            "string" => Some(ValueType::String),
            "boolean" => Some(ValueType::Boolean),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            ValueType::Integer => "integer",
            ValueType::Real => "real",
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
        }
    }
}

/// Which emitter family renders a language.
///
/// Language names are free text in the catalog; this closed set is what
/// the generator dispatches on. Anything unrecognized maps to `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmitterKind {
    /// Dynamically typed, single file, no headers (Python)
    Structural,
    /// Header + implementation split with an entry point (C++)
    HeaderSourcePair,
    /// Single file with auto-properties (C#)
    SingleFileOop,
    /// Single file with explicit accessors and a `main` (Java)
    VerboseOop,
    /// Fallback for languages without a dedicated emitter
    Default,
}

impl EmitterKind {
    /// Resolve a language name (case-insensitive, common aliases accepted).
    pub fn for_language(language: &str) -> Self {
        match language.trim().to_ascii_lowercase().as_str() {
            "python" | "py" => EmitterKind::Structural,
            "c++" | "cpp" | "cxx" => EmitterKind::HeaderSourcePair,
            "c#" | "csharp" | "cs" => EmitterKind::SingleFileOop,
            "java" => EmitterKind::VerboseOop,
            _ => EmitterKind::Default,
        }
    }

    pub fn is_default(self) -> bool {
        self == EmitterKind::Default
    }

    /// The catalog language name the built-in fragments use for this kind.
    pub fn catalog_language(self) -> Option<&'static str> {
        match self {
            EmitterKind::Structural => Some("Python"),
            EmitterKind::HeaderSourcePair => Some("C++"),
            EmitterKind::SingleFileOop => Some("C#"),
            EmitterKind::VerboseOop => Some("Java"),
            EmitterKind::Default => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_serialization() {
        assert_eq!(serde_json::to_value(Severity::Error).unwrap(), "error");
        assert_eq!(serde_json::to_value(Severity::Warning).unwrap(), "warning");
    }

    #[test]
    fn test_value_type_tags() {
        for vt in ValueType::ALL {
            assert_eq!(ValueType::from_tag(vt.tag()), Some(vt));
        }
        assert_eq!(ValueType::from_tag("Decimal"), None);
        assert_eq!(ValueType::from_tag("Integer"), None);
    }

    #[test]
    fn test_emitter_kind_for_language() {
        assert_eq!(EmitterKind::for_language("Python"), EmitterKind::Structural);
        assert_eq!(EmitterKind::for_language("C++"), EmitterKind::HeaderSourcePair);
        assert_eq!(EmitterKind::for_language("cpp"), EmitterKind::HeaderSourcePair);
        assert_eq!(EmitterKind::for_language("C#"), EmitterKind::SingleFileOop);
        assert_eq!(EmitterKind::for_language(" JAVA "), EmitterKind::VerboseOop);
        assert_eq!(EmitterKind::for_language("Ruby"), EmitterKind::Default);
        assert!(EmitterKind::for_language("").is_default());
    }
}
