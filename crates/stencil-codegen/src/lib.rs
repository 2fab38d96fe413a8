pub mod context;
pub mod error;
pub mod generator;
pub mod template;
pub mod traits;

// Language emitters
pub mod emitters;

// Re-exports
pub use context::{EmitContext, IndentStyle};
pub use error::{CodegenError, GenerationWarning};
pub use generator::{generate, Artifact, CodeGenerator, GeneratedProject};
pub use template::{Slot, Slots, Template};
pub use traits::LanguageEmitter;
