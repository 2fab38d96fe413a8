use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::ValueType;

/// A typed field declared on a class (*.class.json `fields[]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldSpec {
    /// Field name as it appears in generated code
    pub name: String,

    /// Value-type tag (`integer`, `real`, `string`, `boolean` or a custom tag)
    #[serde(rename = "type")]
    pub type_tag: String,

    /// Default literal, unquoted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// The recognized value type, if the tag is one of the closed set.
    pub fn value_type(&self) -> Option<ValueType> {
        ValueType::from_tag(&self.type_tag)
    }

    pub fn is_string(&self) -> bool {
        self.value_type() == Some(ValueType::String)
    }

    /// Name with its first character uppercased, used for accessor and
    /// property names (`count` -> `Count`).
    pub fn capitalized(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// A user-declared function appended to the class (*.class.json `functions[]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomFunctionSpec {
    pub name: String,

    /// Return-type tag, resolved through the catalog like field types
    pub return_type: String,

    /// Parameter list, inserted verbatim
    #[serde(default)]
    pub params: String,

    /// Friend (C++) / reduced-visibility function
    #[serde(default)]
    pub friend: bool,
}

impl CustomFunctionSpec {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            params: String::new(),
            friend: false,
        }
    }

    pub fn with_params(mut self, params: impl Into<String>) -> Self {
        self.params = params.into();
        self
    }

    pub fn as_friend(mut self) -> Self {
        self.friend = true;
        self
    }
}

/// A code template: one class to generate (*.class.json)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClassSpec {
    /// JSON Schema reference
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Class name
    pub name: String,

    /// Target language name, matched against the fragment catalog
    pub language: String,

    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldSpec>,

    /// Custom functions in declaration order
    #[serde(default)]
    pub functions: Vec<CustomFunctionSpec>,
}

impl ClassSpec {
    pub fn new(name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
            language: language.into(),
            fields: Vec::new(),
            functions: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_function(mut self, function: CustomFunctionSpec) -> Self {
        self.functions.push(function);
        self
    }
}
