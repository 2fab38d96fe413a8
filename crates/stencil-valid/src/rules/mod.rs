pub mod duplicates;
pub mod identifiers;
pub mod required_fields;
pub mod template_presence;
pub mod type_mapping;
pub mod version_check;
