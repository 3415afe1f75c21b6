// File: src/error.rs
// Purpose: Configuration errors raised while assembling a form

use thiserror::Error;

/// A form was assembled from descriptors that do not fit its schema.
///
/// These are programmer errors: they surface once, when the form is built,
/// never while a user is editing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("field '{name}' is not declared by the schema")]
    UnknownField { name: String },

    #[error("field '{name}' is described more than once")]
    DuplicateField { name: String },

    #[error("field '{name}' of kind '{kind}' cannot carry options; only select fields may")]
    OptionsOnNonSelect { name: String, kind: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
