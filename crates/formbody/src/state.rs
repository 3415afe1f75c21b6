// File: src/state.rs
// Purpose: Live values and errors of one mounted form

use crate::value::{FormValues, Value};
use std::collections::HashMap;

/// Where a form is in its submit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
}

/// Field values, per-field error messages and the submitting flag
#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: FormValues,
    errors: HashMap<String, String>,
    initial: FormValues,
    status: FormStatus,
}

impl FormState {
    /// Start from initial values; they are also what [`reset`](Self::reset) restores
    pub fn new(initial: FormValues) -> Self {
        Self {
            values: initial.clone(),
            errors: HashMap::new(),
            initial,
            status: FormStatus::Idle,
        }
    }

    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn set_value(&mut self, field: impl Into<String>, value: Value) {
        self.values.insert(field.into(), value);
    }

    pub fn initial_value(&self, field: &str) -> Option<&Value> {
        self.initial.get(field)
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(|s| s.as_str())
    }

    pub fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Replace the whole error map with the outcome of a validation pass
    pub fn set_errors(&mut self, errors: HashMap<String, String>) {
        self.errors = errors;
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Restore one field to its initial value and drop its error
    pub fn reset(&mut self, field: &str) {
        match self.initial.get(field) {
            Some(initial) => {
                self.values.insert(field.to_string(), initial.clone());
            }
            None => {
                self.values.remove(field);
            }
        }
        self.errors.remove(field);
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    pub(crate) fn set_status(&mut self, status: FormStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initial() -> FormValues {
        let mut values = FormValues::new();
        values.insert("item".to_string(), Value::from("KG"));
        values.insert("is_active".to_string(), Value::from(true));
        values
    }

    #[test]
    fn test_starts_from_initial_values() {
        let state = FormState::new(initial());
        assert_eq!(state.value("item"), Some(&Value::from("KG")));
        assert!(state.value("introduction").is_none());
        assert_eq!(state.status(), FormStatus::Idle);
        assert!(!state.has_errors());
    }

    #[test]
    fn test_reset_restores_one_field() {
        let mut state = FormState::new(initial());
        state.set_value("item", Value::from("LB"));
        state.set_value("is_active", Value::from(false));
        state.set_value("introduction", Value::from("hello"));

        let mut errors = HashMap::new();
        errors.insert("item".to_string(), "bad".to_string());
        errors.insert("introduction".to_string(), "too short".to_string());
        state.set_errors(errors);

        state.reset("item");
        assert_eq!(state.value("item"), Some(&Value::from("KG")));
        assert!(!state.has_error("item"));
        assert_eq!(state.value("is_active"), Some(&Value::from(false)));
        assert_eq!(state.error("introduction"), Some("too short"));

        state.reset("introduction");
        assert!(state.value("introduction").is_none());
        assert!(!state.has_errors());
    }
}
