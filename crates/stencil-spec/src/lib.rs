pub mod builtin;
pub mod catalog;
pub mod loader;
pub mod parser;
pub mod schema_def;
pub mod types;

pub use catalog::{CatalogError, FragmentCatalog, LanguageFragments};
pub use loader::{load_project, LoadError, LoadedProject};
