use std::collections::HashMap;

use indexmap::IndexMap;

use crate::types::common::EmitterKind;
use crate::types::fragment::{keys, FragmentFile, FragmentKind, Operator, SyntaxFragment};

/// Fragments owned by a single language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageFragments {
    /// Language name as first registered
    language: String,
    /// Indent width override
    indent: Option<usize>,
    keywords: IndexMap<String, String>,
    methods: IndexMap<String, String>,
}

impl LanguageFragments {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn indent(&self) -> Option<usize> {
        self.indent
    }

    /// Exact lookup by kind and operation key.
    pub fn get(&self, kind: FragmentKind, key: &str) -> Option<&str> {
        self.table(kind).get(key).map(String::as_str)
    }

    pub fn keyword(&self, key: &str) -> Option<&str> {
        self.get(FragmentKind::Keyword, key)
    }

    pub fn method(&self, key: &str) -> Option<&str> {
        self.get(FragmentKind::Method, key)
    }

    /// The language's type token for a value-type tag, if mapped.
    /// Structural keyword keys never resolve as types.
    pub fn type_token(&self, tag: &str) -> Option<&str> {
        if keys::is_structural(tag) {
            return None;
        }
        self.keyword(tag)
    }

    pub fn has_skeleton(&self) -> bool {
        self.keyword(keys::CLASS_SKELETON).is_some()
    }

    /// Method fragments restricted to the canonical operators, in canonical
    /// order regardless of how they were stored. Absent operators are skipped.
    pub fn canonical_methods(&self) -> Vec<(Operator, &str)> {
        let ranks = canonical_ranks();
        let mut found: Vec<(usize, Operator, &str)> = self
            .methods
            .iter()
            .filter_map(|(key, template)| {
                let rank = *ranks.get(key.as_str())?;
                Some((rank, Operator::CANONICAL[rank], template.as_str()))
            })
            .collect();
        found.sort_by_key(|(rank, _, _)| *rank);
        found.into_iter().map(|(_, op, t)| (op, t)).collect()
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    fn table(&self, kind: FragmentKind) -> &IndexMap<String, String> {
        match kind {
            FragmentKind::Keyword => &self.keywords,
            FragmentKind::Method => &self.methods,
        }
    }

    fn table_mut(&mut self, kind: FragmentKind) -> &mut IndexMap<String, String> {
        match kind {
            FragmentKind::Keyword => &mut self.keywords,
            FragmentKind::Method => &mut self.methods,
        }
    }
}

/// Rank of each canonical operator key.
fn canonical_ranks() -> HashMap<&'static str, usize> {
    Operator::CANONICAL
        .iter()
        .enumerate()
        .map(|(rank, op)| (op.key(), rank))
        .collect()
}

/// Every language's fragment library.
///
/// Built once before generation and only read afterwards; emitters borrow
/// it shared, so independent generations can run concurrently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentCatalog {
    /// Keyed by lowercased language name
    languages: IndexMap<String, LanguageFragments>,
}

impl FragmentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, rejecting duplicate (language, kind, key) triples.
    pub fn from_fragments(
        fragments: impl IntoIterator<Item = SyntaxFragment>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for fragment in fragments {
            catalog.insert(fragment)?;
        }
        Ok(catalog)
    }

    /// Build a catalog from parsed fragment files.
    pub fn from_files<'a>(
        files: impl IntoIterator<Item = &'a FragmentFile>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for file in files {
            catalog.add_file(file)?;
        }
        Ok(catalog)
    }

    /// Register every fragment of a file plus its indent override.
    pub fn add_file(&mut self, file: &FragmentFile) -> Result<(), CatalogError> {
        let lang = self.language_entry(&file.language);
        if file.indent.is_some() {
            lang.indent = file.indent;
        }
        for fragment in file.fragments() {
            self.insert(fragment)?;
        }
        Ok(())
    }

    /// Set a language's indent width override.
    pub fn set_indent(&mut self, language: &str, indent: usize) {
        self.language_entry(language).indent = Some(indent);
    }

    /// Register a fragment. A second fragment for the same
    /// (language, kind, key) is rejected.
    pub fn insert(&mut self, fragment: SyntaxFragment) -> Result<(), CatalogError> {
        let lang = self.language_entry(&fragment.language);
        let table = lang.table_mut(fragment.kind);
        if table.contains_key(&fragment.key) {
            return Err(CatalogError::DuplicateFragment {
                language: fragment.language,
                kind: fragment.kind,
                key: fragment.key,
            });
        }
        table.insert(fragment.key, fragment.template);
        Ok(())
    }

    /// Register a fragment, replacing any existing one for the same key.
    /// Returns the replaced template.
    pub fn upsert(&mut self, fragment: SyntaxFragment) -> Option<String> {
        let lang = self.language_entry(&fragment.language);
        lang.table_mut(fragment.kind)
            .insert(fragment.key, fragment.template)
    }

    /// Layer another catalog on top of this one; its fragments win.
    pub fn overlay(&mut self, other: FragmentCatalog) {
        for (_, fragments) in other.languages {
            let lang = self.language_entry(&fragments.language);
            if fragments.indent.is_some() {
                lang.indent = fragments.indent;
            }
            for (key, template) in fragments.keywords {
                lang.keywords.insert(key, template);
            }
            for (key, template) in fragments.methods {
                lang.methods.insert(key, template);
            }
        }
    }

    /// Fragments for a language (case-insensitive name match).
    pub fn language(&self, name: &str) -> Option<&LanguageFragments> {
        self.languages.get(&canonical_language(name))
    }

    /// Fragments for a class language, falling back to the catalog name of
    /// its emitter kind so aliases such as `cpp` find the `C++` library.
    pub fn resolve(&self, name: &str) -> Option<&LanguageFragments> {
        self.language(name).or_else(|| {
            EmitterKind::for_language(name)
                .catalog_language()
                .and_then(|canonical| self.language(canonical))
        })
    }

    pub fn lookup(&self, language: &str, kind: FragmentKind, key: &str) -> Option<&str> {
        self.language(language)?.get(kind, key)
    }

    /// Language names in registration order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.values().map(|l| l.language())
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    fn language_entry(&mut self, name: &str) -> &mut LanguageFragments {
        self.languages
            .entry(canonical_language(name))
            .or_insert_with(|| LanguageFragments::new(name.trim()))
    }
}

fn canonical_language(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Errors raised while building a catalog
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate {kind} fragment '{key}' for language '{language}'")]
    DuplicateFragment {
        language: String,
        kind: FragmentKind,
        key: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fragment(kind: FragmentKind, key: &str, template: &str) -> SyntaxFragment {
        SyntaxFragment {
            language: "C++".to_string(),
            kind,
            key: key.to_string(),
            name: String::new(),
            template: template.to_string(),
        }
    }

    #[test]
    fn test_lookup_by_kind_and_key() {
        let catalog = FragmentCatalog::from_fragments([
            fragment(FragmentKind::Keyword, "class-skeleton", "class {name} {};"),
            fragment(FragmentKind::Keyword, "integer", "int"),
            fragment(FragmentKind::Method, "add", "operator+"),
        ])
        .unwrap();

        assert_eq!(
            catalog.lookup("C++", FragmentKind::Keyword, "integer"),
            Some("int")
        );
        assert_eq!(catalog.lookup("c++", FragmentKind::Method, "add"), Some("operator+"));
        assert_eq!(catalog.lookup("C++", FragmentKind::Method, "integer"), None);
        assert_eq!(catalog.lookup("Java", FragmentKind::Keyword, "integer"), None);
        assert!(catalog.language("C++").unwrap().has_skeleton());
    }

    #[test]
    fn test_structural_keys_are_not_type_tokens() {
        let catalog = FragmentCatalog::from_fragments([
            fragment(FragmentKind::Keyword, "class-skeleton", "class {name} {};"),
            fragment(FragmentKind::Keyword, "getter", "{type} get{field_cap}();"),
            fragment(FragmentKind::Keyword, "integer", "int"),
        ])
        .unwrap();
        let cpp = catalog.language("C++").unwrap();

        assert_eq!(cpp.type_token("integer"), Some("int"));
        assert_eq!(cpp.type_token("class-skeleton"), None);
        assert_eq!(cpp.type_token("getter"), None);
        assert_eq!(cpp.keyword("getter"), Some("{type} get{field_cap}();"));
    }

    #[test]
    fn test_duplicate_fragment_rejected() {
        let err = FragmentCatalog::from_fragments([
            fragment(FragmentKind::Method, "add", "a"),
            fragment(FragmentKind::Method, "add", "b"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateFragment {
                language: "C++".to_string(),
                kind: FragmentKind::Method,
                key: "add".to_string(),
            }
        );
    }

    #[test]
    fn test_same_key_in_both_tables_is_allowed() {
        let catalog = FragmentCatalog::from_fragments([
            fragment(FragmentKind::Keyword, "constructor", "k"),
            fragment(FragmentKind::Method, "constructor", "m"),
        ]);
        assert!(catalog.is_ok());
    }

    #[test]
    fn test_canonical_methods_ignore_storage_order() {
        let catalog = FragmentCatalog::from_fragments([
            fragment(FragmentKind::Method, "postfix-decrement", "pd"),
            fragment(FragmentKind::Method, "equal", "eq"),
            fragment(FragmentKind::Method, "constructor", "ctor"),
            fragment(FragmentKind::Method, "add", "add"),
            fragment(FragmentKind::Method, "assignment", "assign"),
            fragment(FragmentKind::Method, "less-than", "lt"),
        ])
        .unwrap();

        let ordered: Vec<_> = catalog
            .language("C++")
            .unwrap()
            .canonical_methods()
            .into_iter()
            .map(|(op, _)| op)
            .collect();
        assert_eq!(
            ordered,
            vec![
                Operator::Assignment,
                Operator::Add,
                Operator::LessThan,
                Operator::Equal,
                Operator::PostfixDecrement,
            ]
        );
    }

    #[test]
    fn test_overlay_replaces_and_extends() {
        let mut base = FragmentCatalog::from_fragments([
            fragment(FragmentKind::Keyword, "integer", "int"),
            fragment(FragmentKind::Keyword, "real", "double"),
        ])
        .unwrap();
        let project = FragmentCatalog::from_fragments([
            fragment(FragmentKind::Keyword, "integer", "long"),
            fragment(FragmentKind::Keyword, "Money", "Decimal"),
        ])
        .unwrap();

        base.overlay(project);
        let cpp = base.language("C++").unwrap();
        assert_eq!(cpp.type_token("integer"), Some("long"));
        assert_eq!(cpp.type_token("real"), Some("double"));
        assert_eq!(cpp.type_token("Money"), Some("Decimal"));
    }

    #[test]
    fn test_add_file_records_indent() {
        let file: FragmentFile = serde_json::from_value(serde_json::json!({
            "language": "Python",
            "indent": 4,
            "keywords": [ { "key": "class-skeleton", "template": "class {name}:" } ]
        }))
        .unwrap();
        let catalog = FragmentCatalog::from_files([&file]).unwrap();
        let python = catalog.language("python").unwrap();
        assert_eq!(python.indent(), Some(4));
        assert_eq!(python.language(), "Python");
        assert_eq!(catalog.languages().collect::<Vec<_>>(), vec!["Python"]);
    }

    #[test]
    fn test_resolve_accepts_aliases() {
        let catalog =
            FragmentCatalog::from_fragments([fragment(FragmentKind::Keyword, "integer", "int")])
                .unwrap();
        assert!(catalog.language("cpp").is_none());
        assert_eq!(catalog.resolve("cpp").unwrap().language(), "C++");
        assert!(catalog.resolve("Rust").is_none());
    }

    #[test]
    fn test_upsert_returns_previous() {
        let mut catalog = FragmentCatalog::new();
        assert_eq!(catalog.upsert(fragment(FragmentKind::Keyword, "integer", "int")), None);
        assert_eq!(
            catalog.upsert(fragment(FragmentKind::Keyword, "integer", "long")),
            Some("int".to_string())
        );
    }
}
