// File: src/controller.rs
// Purpose: Form controller: edits, validation on submit, guarded dispatch, reset and cancel

use crate::config::FormSettings;
use crate::descriptor::FieldDescriptor;
use crate::error::{ConfigError, ConfigResult};
use crate::renderer::{FieldRenderer, Widget};
use crate::schema::{Issue, Schema, Validator};
use crate::state::{FormState, FormStatus};
use crate::value::{FormValues, Value};
use futures::future::BoxFuture;
use maud::{html, Markup};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Completion callback for validated data
pub type SubmitHandler =
    Arc<dyn Fn(FormValues) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// Invoked when the user asks to cancel
pub type CancelHandler = Arc<dyn Fn() + Send + Sync>;

/// Everything a form is constructed from
pub struct FormOptions<V: Validator = Schema> {
    pub schema: Arc<V>,
    pub fields: Vec<FieldDescriptor>,
    pub initial_data: FormValues,
    pub on_submit: Option<SubmitHandler>,
    pub on_cancel: Option<CancelHandler>,
    /// Overrides [`FormSettings::submit_label`]
    pub submit_label: Option<String>,
}

impl<V: Validator> FormOptions<V> {
    pub fn new(schema: V, fields: Vec<FieldDescriptor>) -> Self {
        Self::shared(Arc::new(schema), fields)
    }

    /// Build from a schema that other forms also use
    pub fn shared(schema: Arc<V>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            schema,
            fields,
            initial_data: FormValues::new(),
            on_submit: None,
            on_cancel: None,
            submit_label: None,
        }
    }

    pub fn initial_data(mut self, initial: FormValues) -> Self {
        self.initial_data = initial;
        self
    }

    /// Add one starting value
    pub fn initial(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.initial_data.insert(name.into(), value.into());
        self
    }

    pub fn on_submit<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(FormValues) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let handler: SubmitHandler =
            Arc::new(move |data| -> BoxFuture<'static, anyhow::Result<()>> {
                Box::pin(handler(data))
            });
        self.on_submit = Some(handler);
        self
    }

    pub fn on_cancel<F>(mut self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_cancel = Some(Arc::new(handler));
        self
    }

    pub fn submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = Some(label.into());
        self
    }
}

/// What a call to [`FormController::submit`] did
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation passed; `result` is whatever the completion callback returned
    Submitted {
        data: FormValues,
        result: anyhow::Result<()>,
    },
    /// Validation failed; one message per failing field
    Invalid(HashMap<String, String>),
    /// A submission was already in flight; nothing was validated or dispatched
    AlreadySubmitting,
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted { .. })
    }
}

/// One mounted form.
///
/// Shared behind an `Arc`; state lives behind a mutex that is never held
/// across the awaited completion callback.
pub struct FormController<V: Validator = Schema> {
    schema: Arc<V>,
    fields: Vec<FieldDescriptor>,
    settings: FormSettings,
    on_submit: Option<SubmitHandler>,
    on_cancel: Option<CancelHandler>,
    state: Mutex<FormState>,
}

impl<V: Validator> FormController<V> {
    pub fn new(options: FormOptions<V>) -> ConfigResult<Self> {
        Self::with_settings(options, FormSettings::default())
    }

    /// Build a form, checking every descriptor against the schema
    pub fn with_settings(
        options: FormOptions<V>,
        mut settings: FormSettings,
    ) -> ConfigResult<Self> {
        let mut seen = HashSet::new();
        for field in &options.fields {
            if !options.schema.declares(&field.name) {
                return Err(ConfigError::UnknownField {
                    name: field.name.clone(),
                });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(ConfigError::DuplicateField {
                    name: field.name.clone(),
                });
            }
        }

        if let Some(label) = options.submit_label {
            settings.submit_label = label;
        }

        debug!(
            form = %settings.form_id,
            fields = options.fields.len(),
            "form mounted"
        );

        Ok(Self {
            schema: options.schema,
            fields: options.fields,
            settings,
            on_submit: options.on_submit,
            on_cancel: options.on_cancel,
            state: Mutex::new(FormState::new(options.initial_data)),
        })
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn schema(&self) -> &V {
        &self.schema
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    pub fn has_cancel(&self) -> bool {
        self.on_cancel.is_some()
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> FormState {
        self.lock().clone()
    }

    pub fn value(&self, name: &str) -> Option<Value> {
        self.lock().value(name).cloned()
    }

    pub fn error(&self, name: &str) -> Option<String> {
        self.lock().error(name).map(str::to_string)
    }

    pub fn status(&self) -> FormStatus {
        self.lock().status()
    }

    fn ensure_declared(&self, name: &str) -> ConfigResult<()> {
        if self.schema.declares(name) {
            Ok(())
        } else {
            Err(ConfigError::UnknownField {
                name: name.to_string(),
            })
        }
    }

    /// Update one field. Other fields are not revalidated.
    pub fn edit(&self, name: &str, value: impl Into<Value>) -> ConfigResult<()> {
        self.ensure_declared(name)?;
        let value = value.into();
        debug!(field = %name, "field edited");
        self.lock().set_value(name, value);
        Ok(())
    }

    /// Apply a raw browser submission through each field's widget.
    ///
    /// Disabled fields are skipped since browsers never submit them.
    pub fn apply_input(&self, raw: &HashMap<String, String>) {
        let mut state = self.lock();
        for field in self.fields.iter().filter(|f| !f.disabled) {
            let widget = Widget::for_field(field);
            if let Some(value) = widget.decode(raw.get(widget.name()).map(String::as_str)) {
                state.set_value(widget.name(), value);
            }
        }
    }

    /// Validate the current state and, when it passes, dispatch the
    /// completion callback with the validated data.
    pub async fn submit(&self) -> SubmitOutcome {
        let (values, _submitting) = {
            let mut state = self.lock();
            if state.is_submitting() {
                debug!(
                    form = %self.settings.form_id,
                    "submit ignored while a submission is in flight"
                );
                return SubmitOutcome::AlreadySubmitting;
            }
            state.set_status(FormStatus::Submitting);
            (state.values().clone(), SubmittingGuard { state: &self.state })
        };

        let data = match self.schema.validate(&values) {
            Ok(data) => data,
            Err(issues) => {
                let errors = first_issue_per_field(issues);
                warn!(
                    form = %self.settings.form_id,
                    failed = errors.len(),
                    "submission rejected by validation"
                );
                self.lock().set_errors(errors.clone());
                return SubmitOutcome::Invalid(errors);
            }
        };

        self.lock().clear_errors();

        if self.settings.log_submissions {
            let mut keys: Vec<&str> = data.keys().map(String::as_str).collect();
            keys.sort_unstable();
            info!(form = %self.settings.form_id, fields = ?keys, "form submitted");
        }

        let result = match &self.on_submit {
            Some(handler) => handler(data.clone()).await,
            None => Ok(()),
        };

        SubmitOutcome::Submitted { data, result }
    }

    /// Restore one field to its initial value and clear its error
    pub fn reset(&self, name: &str) -> ConfigResult<()> {
        self.ensure_declared(name)?;
        debug!(field = %name, "field reset");
        self.lock().reset(name);
        Ok(())
    }

    /// Invoke the cancel callback; returns whether one was supplied
    pub fn cancel(&self) -> bool {
        match &self.on_cancel {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    /// The form wrapped in a host element that cancel requests replace
    pub fn render(&self) -> Markup {
        html! {
            div.form-host data-form-host {
                (self.render_form())
            }
        }
    }

    /// The `<form>` element: every field in order, then the action buttons
    pub fn render_form(&self) -> Markup {
        let state = self.snapshot();
        let renderer = FieldRenderer::new(&self.settings);
        let submitting = state.is_submitting();

        html! {
            form.form-body id=(self.settings.form_id)
                hx-post=(self.settings.submit_url())
                hx-target="this"
                hx-swap="outerHTML"
                aria-busy=[submitting.then_some("true")] {
                div.fields {
                    @for field in &self.fields {
                        (renderer.render(field, state.value(&field.name), state.error(&field.name)))
                    }
                }
                div.actions {
                    button.submit type="submit" disabled[submitting] {
                        @if submitting {
                            (self.settings.loading_label)
                        } @else {
                            (self.settings.submit_label)
                        }
                    }
                    @if self.has_cancel() {
                        button.secondary type="button"
                            hx-post=(self.settings.cancel_url())
                            hx-target="closest [data-form-host]"
                            hx-swap="outerHTML" {
                            (self.settings.cancel_label)
                        }
                    }
                }
            }
        }
    }
}

/// Returns the form to `Idle` on every exit from `submit`, dropped futures included
struct SubmittingGuard<'a> {
    state: &'a Mutex<FormState>,
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_status(FormStatus::Idle);
    }
}

/// Keep the first issue reported for each field
fn first_issue_per_field(issues: Vec<Issue>) -> HashMap<String, String> {
    let mut errors = HashMap::new();
    for issue in issues {
        errors.entry(issue.path).or_insert(issue.message);
    }
    errors
}
