// File: src/descriptor.rs
// Purpose: Field descriptors: what to render for each named schema field

use crate::error::ConfigError;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// One selectable entry of a select field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawOption")]
pub struct SelectOption {
    pub value: Value,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Options may be written as bare values (`["KG", "LB"]`) or as
/// `{ value, label }` tables.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawOption {
    Labeled { value: Value, label: String },
    Bare(Value),
}

impl From<RawOption> for SelectOption {
    fn from(raw: RawOption) -> Self {
        match raw {
            RawOption::Labeled { value, label } => Self { value, label },
            RawOption::Bare(value) => Self {
                label: value.to_string(),
                value,
            },
        }
    }
}

/// Closed set of widget kinds.
///
/// Options belong to `Select` only, so no other kind can carry them.
/// `Unsupported` keeps the tag of a kind read from configuration that this
/// crate does not know; such fields render nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Number,
    Email,
    Password,
    Textarea,
    Select { options: Vec<SelectOption> },
    Checkbox,
    Switch,
    Date,
    Unsupported(String),
}

impl FieldKind {
    /// The configuration tag for this kind
    pub fn tag(&self) -> &str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Email => "email",
            FieldKind::Password => "password",
            FieldKind::Textarea => "textarea",
            FieldKind::Select { .. } => "select",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Switch => "switch",
            FieldKind::Date => "date",
            FieldKind::Unsupported(tag) => tag,
        }
    }

    /// Returns `None` when options are supplied for a kind other than select
    fn from_tag(tag: &str, options: Option<Vec<SelectOption>>) -> Option<Self> {
        let kind = match tag {
            "text" => FieldKind::Text,
            "number" => FieldKind::Number,
            "email" => FieldKind::Email,
            "password" => FieldKind::Password,
            "textarea" => FieldKind::Textarea,
            "select" => {
                return Some(FieldKind::Select {
                    options: options.unwrap_or_default(),
                })
            }
            "checkbox" => FieldKind::Checkbox,
            "switch" => FieldKind::Switch,
            "date" => FieldKind::Date,
            other => FieldKind::Unsupported(other.to_string()),
        };
        options.is_none().then_some(kind)
    }
}

/// Configuration entry describing one renderable input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDescriptor", into = "RawDescriptor")]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub label: String,
    pub placeholder: Option<String>,
    pub required: bool,
    pub disabled: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            label: label.into(),
            placeholder: None,
            required: false,
            disabled: false,
        }
    }

    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text, label)
    }

    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number, label)
    }

    pub fn email(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Email, label)
    }

    pub fn password(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Password, label)
    }

    pub fn textarea(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Textarea, label)
    }

    pub fn select(
        name: impl Into<String>,
        label: impl Into<String>,
        options: impl IntoIterator<Item = SelectOption>,
    ) -> Self {
        Self::new(
            name,
            FieldKind::Select {
                options: options.into_iter().collect(),
            },
            label,
        )
    }

    pub fn checkbox(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Checkbox, label)
    }

    pub fn switch(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Switch, label)
    }

    pub fn date(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date, label)
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Wire shape of a descriptor in TOML/JSON configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawDescriptor {
    name: String,
    #[serde(rename = "type", alias = "kind")]
    kind: String,
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<SelectOption>>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    disabled: bool,
}

impl TryFrom<RawDescriptor> for FieldDescriptor {
    type Error = ConfigError;

    fn try_from(raw: RawDescriptor) -> Result<Self, Self::Error> {
        let kind = FieldKind::from_tag(&raw.kind, raw.options).ok_or_else(|| {
            ConfigError::OptionsOnNonSelect {
                name: raw.name.clone(),
                kind: raw.kind.clone(),
            }
        })?;

        Ok(Self {
            name: raw.name,
            kind,
            label: raw.label,
            placeholder: raw.placeholder,
            required: raw.required,
            disabled: raw.disabled,
        })
    }
}

impl From<FieldDescriptor> for RawDescriptor {
    fn from(field: FieldDescriptor) -> Self {
        let kind = field.kind.tag().to_string();
        let options = match field.kind {
            FieldKind::Select { options } => Some(options),
            _ => None,
        };
        Self {
            name: field.name,
            kind,
            label: field.label,
            placeholder: field.placeholder,
            options,
            required: field.required,
            disabled: field.disabled,
        }
    }
}
