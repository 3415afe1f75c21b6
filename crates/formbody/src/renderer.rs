// File: src/renderer.rs
// Purpose: Field renderer: one bound widget per field descriptor

use crate::config::FormSettings;
use crate::descriptor::{FieldDescriptor, FieldKind, SelectOption};
use crate::value::Value;
use chrono::NaiveDate;
use maud::{html, Markup};
use tracing::debug;

/// The binding between a descriptor and its submitted input.
///
/// Rendering writes the current value into the widget under the field's
/// name; [`decode`](Widget::decode) reads the browser's submission of that
/// same widget back into a typed value.
#[derive(Debug, Clone, Copy)]
pub struct Widget<'a> {
    field: &'a FieldDescriptor,
}

impl<'a> Widget<'a> {
    pub fn for_field(field: &'a FieldDescriptor) -> Self {
        Self { field }
    }

    pub fn name(&self) -> &str {
        &self.field.name
    }

    /// Turn the raw submitted string into the value this widget edits.
    ///
    /// `None` means the submission carries no edit for this field. Checkbox
    /// and switch are the exception: browsers omit unchecked boxes, so
    /// absence decodes to `false`.
    pub fn decode(&self, raw: Option<&str>) -> Option<Value> {
        match &self.field.kind {
            FieldKind::Text | FieldKind::Email | FieldKind::Password | FieldKind::Textarea => {
                raw.map(Value::from)
            }
            FieldKind::Number => raw.map(|raw| match raw.trim() {
                "" => Value::Null,
                trimmed => trimmed
                    .parse::<f64>()
                    .map(Value::Number)
                    .unwrap_or_else(|_| Value::from(raw)),
            }),
            FieldKind::Select { options } => raw.map(|raw| decode_option(options, raw)),
            FieldKind::Checkbox | FieldKind::Switch => Some(Value::Bool(
                raw.is_some_and(|raw| !matches!(raw, "false" | "off")),
            )),
            FieldKind::Date => raw.map(|raw| match raw.trim() {
                "" => Value::Null,
                trimmed => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                    .map(Value::Date)
                    .unwrap_or_else(|_| Value::from(raw)),
            }),
            FieldKind::Unsupported(_) => None,
        }
    }
}

fn decode_option(options: &[SelectOption], raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    options
        .iter()
        .find(|option| option.value.to_string() == raw)
        .map(|option| option.value.clone())
        .unwrap_or_else(|| Value::from(raw))
}

/// Renders descriptors into Maud markup
#[derive(Debug, Clone, Copy)]
pub struct FieldRenderer<'a> {
    settings: &'a FormSettings,
}

impl<'a> FieldRenderer<'a> {
    pub fn new(settings: &'a FormSettings) -> Self {
        Self { settings }
    }

    /// Render one field: label, reset control, bound widget and error message.
    ///
    /// Unsupported kinds render nothing.
    pub fn render(
        &self,
        field: &FieldDescriptor,
        value: Option<&Value>,
        error: Option<&str>,
    ) -> Markup {
        let Some(control) = self.control(field, value, error) else {
            debug!(
                field = %field.name,
                kind = %field.kind.tag(),
                "skipping field of unsupported kind"
            );
            return html! {};
        };

        let inline = matches!(field.kind, FieldKind::Checkbox | FieldKind::Switch);

        html! {
            div.form-item.inline[inline] data-field=(field.name) {
                @if inline {
                    (control)
                }
                div.form-item-header {
                    (self.label(field))
                    (self.reset_button(field))
                }
                @if !inline {
                    (control)
                }
                @if let Some(message) = error {
                    p.form-message id=(self.error_id(field)) role="alert" { (message) }
                }
            }
        }
    }

    fn label(&self, field: &FieldDescriptor) -> Markup {
        html! {
            label for=(self.settings.field_id(&field.name)) {
                (field.label)
                @if field.required {
                    span.required aria-hidden="true" { " *" }
                }
            }
        }
    }

    fn reset_button(&self, field: &FieldDescriptor) -> Markup {
        html! {
            button.reset type="button"
                hx-post=(self.settings.reset_url(&field.name))
                hx-target=(format!("#{}", self.settings.form_id))
                hx-swap="outerHTML" {
                (self.settings.reset_label)
            }
        }
    }

    fn error_id(&self, field: &FieldDescriptor) -> String {
        format!("{}-error", self.settings.field_id(&field.name))
    }

    fn control(
        &self,
        field: &FieldDescriptor,
        value: Option<&Value>,
        error: Option<&str>,
    ) -> Option<Markup> {
        let id = self.settings.field_id(&field.name);
        let edit_url = self.settings.edit_url();
        let invalid = error.map(|_| "true");
        let described_by = error.map(|_| self.error_id(field));
        let text = value.filter(|v| !v.is_empty()).map(|v| v.to_string());

        let markup = match &field.kind {
            FieldKind::Text | FieldKind::Number | FieldKind::Email | FieldKind::Password => {
                html! {
                    input type=(field.kind.tag()) id=(id) name=(field.name)
                        value=[text]
                        placeholder=[field.placeholder.as_deref()]
                        disabled[field.disabled]
                        required[field.required]
                        aria-invalid=[invalid]
                        aria-describedby=[described_by]
                        hx-post=(edit_url) hx-trigger="change"
                        hx-include="closest form" hx-swap="none";
                }
            }
            FieldKind::Textarea => html! {
                textarea id=(id) name=(field.name)
                    placeholder=[field.placeholder.as_deref()]
                    disabled[field.disabled]
                    required[field.required]
                    aria-invalid=[invalid]
                    aria-describedby=[described_by]
                    hx-post=(edit_url) hx-trigger="change"
                    hx-include="closest form" hx-swap="none" {
                    @if let Some(text) = &text { (text) }
                }
            },
            FieldKind::Select { options } => html! {
                select id=(id) name=(field.name)
                    disabled[field.disabled]
                    required[field.required]
                    aria-invalid=[invalid]
                    aria-describedby=[described_by]
                    hx-post=(edit_url) hx-trigger="change"
                    hx-include="closest form" hx-swap="none" {
                    option value="" selected[text.is_none()] {
                        (field.placeholder.as_deref().unwrap_or(""))
                    }
                    @for option in options {
                        @let option_value = option.value.to_string();
                        option value=(option_value)
                            selected[text.as_deref() == Some(option_value.as_str())] {
                            (option.label)
                        }
                    }
                }
            },
            FieldKind::Checkbox | FieldKind::Switch => {
                let checked = value.and_then(Value::as_bool).unwrap_or(false);
                let role = matches!(field.kind, FieldKind::Switch).then_some("switch");
                html! {
                    input type="checkbox" id=(id) name=(field.name) value="true"
                        role=[role]
                        checked[checked]
                        disabled[field.disabled]
                        aria-invalid=[invalid]
                        aria-describedby=[described_by]
                        hx-post=(edit_url) hx-trigger="change"
                        hx-include="closest form" hx-swap="none";
                }
            }
            FieldKind::Date => {
                let date = value
                    .and_then(Value::as_date)
                    .map(|d| d.format("%Y-%m-%d").to_string());
                let placeholder = field
                    .placeholder
                    .as_deref()
                    .unwrap_or(&self.settings.date_placeholder);
                html! {
                    input type="date" id=(id) name=(field.name)
                        value=[date]
                        placeholder=(placeholder)
                        aria-label=(placeholder)
                        disabled[field.disabled]
                        required[field.required]
                        aria-invalid=[invalid]
                        aria-describedby=[described_by]
                        hx-post=(edit_url) hx-trigger="change"
                        hx-include="closest form" hx-swap="none";
                }
            }
            FieldKind::Unsupported(_) => return None,
        };

        Some(markup)
    }
}
