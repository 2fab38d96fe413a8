//! The seed fragment library shipped with Stencil.
//!
//! Covers Python, C++, C# and Java. Projects may layer their own
//! `*.fragments.json` files on top (see [`crate::loader`]).

use crate::catalog::FragmentCatalog;
use crate::types::fragment::FragmentFile;

/// Embedded fragment files as `(file name, contents)`.
pub const SOURCES: &[(&str, &str)] = &[
    (
        "python.fragments.json",
        include_str!("../catalog/python.fragments.json"),
    ),
    ("cpp.fragments.json", include_str!("../catalog/cpp.fragments.json")),
    (
        "csharp.fragments.json",
        include_str!("../catalog/csharp.fragments.json"),
    ),
    ("java.fragments.json", include_str!("../catalog/java.fragments.json")),
];

/// Parse the embedded fragment files.
pub fn files() -> Vec<FragmentFile> {
    SOURCES
        .iter()
        .map(|(name, content)| {
            serde_json::from_str(content)
                .unwrap_or_else(|e| panic!("built-in fragment file {name} is malformed: {e}"))
        })
        .collect()
}

/// A fresh catalog holding the built-in fragments.
pub fn catalog() -> FragmentCatalog {
    let files = files();
    FragmentCatalog::from_files(&files).expect("built-in fragment files must not collide")
}
