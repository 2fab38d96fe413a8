pub mod rules;
pub mod validator;

pub use validator::{validate, validate_class};
