// File: src/schema.rs
// Purpose: Declarative per-field validation and transformation rules

use crate::rules;
use crate::value::{FormValues, Value};
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

/// One failed check, reported against a field name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub path: String,
    pub message: String,
}

impl Issue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Validated (and transformed) data, or every issue found
pub type Validation = Result<FormValues, Vec<Issue>>;

/// The validation capability a form is built against.
///
/// [`Schema`] is the provided implementation; anything that can name its
/// fields and turn raw form values into validated values can stand in.
pub trait Validator: Send + Sync {
    /// Whether `name` is a declared property
    fn declares(&self, name: &str) -> bool;

    /// Declared property names, in declaration order
    fn field_names(&self) -> Vec<&str>;

    fn validate(&self, data: &FormValues) -> Validation;
}

/// Expected type of a field's value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Date,
    /// One of a fixed list of strings
    Enum(Vec<String>),
}

#[derive(Debug, Clone)]
enum Check {
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
    Email,
    Pattern(Regex),
}

#[derive(Debug, Clone)]
struct Rule {
    check: Check,
    message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Trim,
    Lowercase,
}

/// Rules for a single field
///
/// Fields are required unless marked [`optional`](FieldSchema::optional).
/// For string fields an empty string counts as present, so use
/// `min_length(1)` to reject it.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    ty: FieldType,
    optional: bool,
    default: Option<Value>,
    rules: Vec<Rule>,
    transforms: Vec<Transform>,
    required_message: Option<String>,
}

impl FieldSchema {
    pub fn new(ty: FieldType) -> Self {
        Self {
            ty,
            optional: false,
            default: None,
            rules: Vec::new(),
            transforms: Vec::new(),
            required_message: None,
        }
    }

    pub fn string() -> Self {
        Self::new(FieldType::String)
    }

    pub fn number() -> Self {
        Self::new(FieldType::Number)
    }

    pub fn boolean() -> Self {
        Self::new(FieldType::Boolean)
    }

    pub fn date() -> Self {
        Self::new(FieldType::Date)
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(FieldType::Enum(values.into_iter().map(Into::into).collect()))
    }

    pub fn field_type(&self) -> &FieldType {
        &self.ty
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Value used when the field is missing
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn min_length(self, min: usize) -> Self {
        self.check(Check::MinLength(min))
    }

    pub fn max_length(self, max: usize) -> Self {
        self.check(Check::MaxLength(max))
    }

    pub fn min(self, min: f64) -> Self {
        self.check(Check::Min(min))
    }

    pub fn max(self, max: f64) -> Self {
        self.check(Check::Max(max))
    }

    pub fn email(self) -> Self {
        self.check(Check::Email)
    }

    pub fn pattern(self, pattern: Regex) -> Self {
        self.check(Check::Pattern(pattern))
    }

    pub fn trim(mut self) -> Self {
        self.transforms.push(Transform::Trim);
        self
    }

    pub fn lowercase(mut self) -> Self {
        self.transforms.push(Transform::Lowercase);
        self
    }

    /// Override the message of the most recently added check.
    ///
    /// With no checks yet, overrides the "Required" message instead.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        match self.rules.last_mut() {
            Some(rule) => rule.message = Some(message.into()),
            None => self.required_message = Some(message.into()),
        }
        self
    }

    pub fn required_message(mut self, message: impl Into<String>) -> Self {
        self.required_message = Some(message.into());
        self
    }

    fn check(mut self, check: Check) -> Self {
        self.rules.push(Rule {
            check,
            message: None,
        });
        self
    }

    /// Validate one raw value; an absent optional field yields `Value::Null`
    fn parse(&self, raw: Option<&Value>) -> Result<Value, Vec<String>> {
        let missing = match (raw, &self.ty) {
            (None | Some(Value::Null), _) => true,
            // Blank inputs for non-text types come from untouched widgets
            (Some(Value::String(s)), ty) if *ty != FieldType::String => s.trim().is_empty(),
            _ => false,
        };

        if missing {
            if let Some(default) = &self.default {
                return Ok(default.clone());
            }
            if self.optional {
                return Ok(Value::Null);
            }
            let message = self
                .required_message
                .clone()
                .unwrap_or_else(|| "Required".to_string());
            return Err(vec![message]);
        }

        let raw = raw.cloned().unwrap_or_default();
        let value = self.coerce(self.apply_transforms(raw)).map_err(|e| vec![e])?;

        let issues: Vec<String> = self
            .rules
            .iter()
            .filter_map(|rule| {
                run_check(&rule.check, &value)
                    .err()
                    .map(|default_message| rule.message.clone().unwrap_or(default_message))
            })
            .collect();

        if issues.is_empty() {
            Ok(value)
        } else {
            Err(issues)
        }
    }

    fn apply_transforms(&self, value: Value) -> Value {
        match value {
            Value::String(s) => Value::String(self.transforms.iter().fold(s, |s, t| match t {
                Transform::Trim => s.trim().to_string(),
                Transform::Lowercase => s.to_lowercase(),
            })),
            other => other,
        }
    }

    fn coerce(&self, value: Value) -> Result<Value, String> {
        match (&self.ty, value) {
            (FieldType::String, Value::String(s)) => Ok(Value::String(s)),
            (FieldType::Number, Value::Number(n)) => Ok(Value::Number(n)),
            (FieldType::Number, Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Value::Number)
                .ok_or_else(|| "Expected number, received string".to_string()),
            (FieldType::Boolean, Value::Bool(b)) => Ok(Value::Bool(b)),
            (FieldType::Boolean, Value::String(s)) => match s.as_str() {
                "true" | "on" => Ok(Value::Bool(true)),
                "false" | "off" => Ok(Value::Bool(false)),
                _ => Err("Expected boolean, received string".to_string()),
            },
            (FieldType::Date, Value::Date(d)) => Ok(Value::Date(d)),
            (FieldType::Date, Value::String(s)) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map(Value::Date)
                .map_err(|_| "Invalid date".to_string()),
            (FieldType::Enum(allowed), Value::String(s)) => {
                if allowed.iter().any(|a| *a == s) {
                    Ok(Value::String(s))
                } else {
                    Err(enum_message(allowed, &s))
                }
            }
            (FieldType::Enum(allowed), other) => Err(enum_message(allowed, &other.to_string())),
            (ty, other) => Err(format!(
                "Expected {}, received {}",
                expected_name(ty),
                other.type_name()
            )),
        }
    }
}

fn expected_name(ty: &FieldType) -> &'static str {
    match ty {
        FieldType::String => "string",
        FieldType::Number => "number",
        FieldType::Boolean => "boolean",
        FieldType::Date => "date",
        FieldType::Enum(_) => "enum",
    }
}

fn enum_message(allowed: &[String], received: &str) -> String {
    let expected = allowed
        .iter()
        .map(|a| format!("'{}'", a))
        .collect::<Vec<_>>()
        .join(" | ");
    format!("Invalid enum value. Expected {}, received '{}'", expected, received)
}

fn run_check(check: &Check, value: &Value) -> Result<(), String> {
    match (check, value) {
        (Check::MinLength(n), Value::String(s)) => rules::validate_min_length(s, *n),
        (Check::MaxLength(n), Value::String(s)) => rules::validate_max_length(s, *n),
        (Check::Min(n), Value::Number(v)) => rules::validate_min(*v, *n),
        (Check::Max(n), Value::Number(v)) => rules::validate_max(*v, *n),
        (Check::Email, Value::String(s)) => rules::validate_email(s),
        (Check::Pattern(re), Value::String(s)) => rules::validate_pattern(s, re),
        // Checks that do not apply to the coerced type are skipped
        _ => Ok(()),
    }
}

/// A named, ordered set of field rules
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, FieldSchema)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field; redeclaring a name replaces its rules
    pub fn field(mut self, name: impl Into<String>, rules: FieldSchema) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = rules,
            None => self.fields.push((name, rules)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Validator for Schema {
    fn declares(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Undeclared keys in `data` are dropped from the output
    fn validate(&self, data: &FormValues) -> Validation {
        let mut output = FormValues::with_capacity(self.fields.len());
        let mut issues = Vec::new();

        for (name, rules) in &self.fields {
            match rules.parse(data.get(name)) {
                Ok(value) => {
                    output.insert(name.clone(), value);
                }
                Err(messages) => {
                    issues.extend(messages.into_iter().map(|m| Issue::new(name.clone(), m)));
                }
            }
        }

        if issues.is_empty() {
            Ok(output)
        } else {
            Err(issues)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, Value)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_empty_string_hits_min_length_message() {
        let schema = Schema::new().field(
            "introduction",
            FieldSchema::string()
                .min_length(1)
                .message("Introduction is required"),
        );

        let issues = schema
            .validate(&values(&[("introduction", Value::from(""))]))
            .unwrap_err();
        assert_eq!(
            issues,
            vec![Issue::new("introduction", "Introduction is required")]
        );
    }

    #[test]
    fn test_missing_required_field() {
        let schema = Schema::new().field("date", FieldSchema::date());
        let issues = schema.validate(&FormValues::new()).unwrap_err();
        assert_eq!(issues, vec![Issue::new("date", "Required")]);
    }

    #[test]
    fn test_optional_and_default_fill_output() {
        let schema = Schema::new()
            .field("nickname", FieldSchema::string().optional())
            .field("unit", FieldSchema::one_of(["KG", "LB"]).default_value("KG"));

        let data = schema.validate(&FormValues::new()).unwrap();
        assert_eq!(data.get("nickname"), Some(&Value::Null));
        assert_eq!(data.get("unit"), Some(&Value::from("KG")));
    }

    #[test]
    fn test_coercion_and_transforms() {
        let schema = Schema::new()
            .field("age", FieldSchema::number().min(18.0))
            .field("email", FieldSchema::string().trim().lowercase().email())
            .field("born", FieldSchema::date())
            .field("active", FieldSchema::boolean());

        let data = schema
            .validate(&values(&[
                ("age", Value::from("42")),
                ("email", Value::from("  Ada@Example.COM ")),
                ("born", Value::from("1990-05-17")),
                ("active", Value::from("on")),
                ("ignored", Value::from("x")),
            ]))
            .unwrap();

        assert_eq!(data.get("age"), Some(&Value::Number(42.0)));
        assert_eq!(data.get("email"), Some(&Value::from("ada@example.com")));
        assert_eq!(
            data.get("born"),
            Some(&Value::Date(NaiveDate::from_ymd_opt(1990, 5, 17).unwrap()))
        );
        assert_eq!(data.get("active"), Some(&Value::Bool(true)));
        assert!(!data.contains_key("ignored"));
    }

    #[test]
    fn test_collects_every_failed_check() {
        let schema = Schema::new().field(
            "code",
            FieldSchema::string()
                .min_length(5)
                .pattern(Regex::new(r"^\d+$").unwrap())
                .message("Digits only"),
        );

        let issues = schema
            .validate(&values(&[("code", Value::from("ab"))]))
            .unwrap_err();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].message, "String must contain at least 5 character(s)");
        assert_eq!(issues[1].message, "Digits only");
    }

    #[test]
    fn test_type_mismatch_and_enum() {
        let schema = Schema::new()
            .field("age", FieldSchema::number())
            .field("item", FieldSchema::one_of(["KG", "LB"]));

        let issues = schema
            .validate(&values(&[
                ("age", Value::from("abc")),
                ("item", Value::from("OZ")),
            ]))
            .unwrap_err();
        assert_eq!(issues[0], Issue::new("age", "Expected number, received string"));
        assert_eq!(
            issues[1],
            Issue::new("item", "Invalid enum value. Expected 'KG' | 'LB', received 'OZ'")
        );
    }

    #[test]
    fn test_blank_number_input_counts_as_missing() {
        let schema = Schema::new().field("age", FieldSchema::number().optional());
        let data = schema
            .validate(&values(&[("age", Value::from("  "))]))
            .unwrap();
        assert_eq!(data.get("age"), Some(&Value::Null));
    }

    #[test]
    fn test_declares_and_order() {
        let schema = Schema::new()
            .field("b", FieldSchema::string())
            .field("a", FieldSchema::string());
        assert!(schema.declares("a"));
        assert!(!schema.declares("c"));
        assert_eq!(schema.field_names(), vec!["b", "a"]);
        assert_eq!(schema.len(), 2);
    }
}
