//! # formbody
//!
//! Schema-driven forms rendered with Maud and driven by htmx.
//!
//! A form is built from a [`Schema`] (what valid data looks like) and an
//! ordered list of [`FieldDescriptor`]s (which widget to show for each
//! field). The [`FormController`] keeps the live values and errors, runs the
//! schema on submit and hands validated data to an async callback, ignoring
//! repeat submits while one is in flight.
//!
//! ```rust,ignore
//! use formbody::{FieldDescriptor, FieldSchema, FormController, FormOptions, Schema};
//!
//! let schema = Schema::new().field(
//!     "introduction",
//!     FieldSchema::string().min_length(1).message("Introduction is required"),
//! );
//!
//! let form = FormController::new(
//!     FormOptions::new(schema, vec![FieldDescriptor::textarea("introduction", "Introduction")])
//!         .on_submit(|data| async move {
//!             tracing::info!(?data, "saved");
//!             Ok(())
//!         }),
//! )?;
//!
//! form.edit("introduction", "hi")?;
//! let outcome = form.submit().await;
//! ```

pub mod config;
pub mod controller;
pub mod descriptor;
pub mod dialog;
pub mod error;
pub mod renderer;
pub mod rules;
pub mod schema;
pub mod state;
pub mod value;

pub use config::{Config, FormSettings, ServerConfig};
pub use controller::{CancelHandler, FormController, FormOptions, SubmitHandler, SubmitOutcome};
pub use descriptor::{FieldDescriptor, FieldKind, SelectOption};
pub use dialog::FormDialog;
pub use error::{ConfigError, ConfigResult};
pub use renderer::{FieldRenderer, Widget};
pub use schema::{FieldSchema, FieldType, Issue, Schema, Transform, Validation, Validator};
pub use state::{FormState, FormStatus};
pub use value::{FormValues, Value};

// Re-export Maud for callers composing pages around rendered forms
pub use maud::{html, Markup, PreEscaped, DOCTYPE};
