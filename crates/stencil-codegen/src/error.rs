use std::fmt;

use serde::Serialize;
use stencil_spec::types::error::{W_MISSING_FRAGMENT, W_UNKNOWN_LANGUAGE, W_UNMAPPED_TYPE};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("missing template: language '{language}' has no '{key}' fragment")]
    MissingTemplate { language: String, key: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A condition generation recovered from. The output is still produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GenerationWarning {
    /// No type token for the tag; the raw tag was emitted.
    UnmappedType {
        language: String,
        #[serde(rename = "typeTag")]
        type_tag: String,
    },
    /// No dedicated emitter; the default emitter was used.
    UnknownLanguage { language: String },
    /// An optional fragment was absent and its section skipped.
    MissingFragment { language: String, key: String },
}

impl GenerationWarning {
    /// Stable warning code shared with validation reports.
    pub fn code(&self) -> &'static str {
        match self {
            GenerationWarning::UnmappedType { .. } => W_UNMAPPED_TYPE,
            GenerationWarning::UnknownLanguage { .. } => W_UNKNOWN_LANGUAGE,
            GenerationWarning::MissingFragment { .. } => W_MISSING_FRAGMENT,
        }
    }
}

impl fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationWarning::UnmappedType { language, type_tag } => {
                write!(f, "type '{type_tag}' has no {language} mapping; emitted verbatim")
            }
            GenerationWarning::UnknownLanguage { language } => {
                write!(f, "no dedicated emitter for '{language}'; used the default emitter")
            }
            GenerationWarning::MissingFragment { language, key } => {
                write!(f, "{language} has no '{key}' fragment; section skipped")
            }
        }
    }
}
