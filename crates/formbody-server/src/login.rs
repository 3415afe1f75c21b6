// File: src/login.rs
// Purpose: The demo "Login Form": schema, default descriptors and starting values

use chrono::Local;
use formbody::{FieldDescriptor, FieldSchema, FormValues, Schema, SelectOption, Value};

pub const TITLE: &str = "Login Form";

pub fn schema() -> Schema {
    Schema::new()
        .field(
            "introduction",
            FieldSchema::string()
                .min_length(1)
                .message("Introduction is required"),
        )
        .field("date", FieldSchema::date())
        .field("item", FieldSchema::one_of(["KG", "LB"]))
        .field("is_active", FieldSchema::boolean())
}

pub fn fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::textarea("introduction", "Introduction")
            .placeholder("Enter your introduction")
            .required(true),
        FieldDescriptor::date("date", "Date").placeholder("Select a date"),
        FieldDescriptor::select(
            "item",
            "Item",
            [SelectOption::new("KG", "KG"), SelectOption::new("LB", "LB")],
        ),
        FieldDescriptor::checkbox("is_active", "Is Active").placeholder("Toggle active state"),
    ]
}

pub fn initial_data() -> FormValues {
    let mut initial = FormValues::new();
    initial.insert("date".to_string(), Value::from(Local::now().date_naive()));
    initial.insert("item".to_string(), Value::from("KG"));
    initial.insert("is_active".to_string(), Value::from(true));
    initial
}

#[cfg(test)]
mod tests {
    use super::*;
    use formbody::Validator;

    #[test]
    fn test_every_field_is_declared() {
        let schema = schema();
        for field in fields() {
            assert!(schema.declares(&field.name), "{} not declared", field.name);
        }
    }

    #[test]
    fn test_initial_data_needs_only_an_introduction() {
        let mut data = initial_data();
        let issues = schema().validate(&data).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "introduction");
        assert_eq!(issues[0].message, "Required");

        data.insert("introduction".to_string(), Value::from(""));
        let issues = schema().validate(&data).unwrap_err();
        assert_eq!(issues[0].message, "Introduction is required");

        data.insert("introduction".to_string(), Value::from("hi"));
        assert!(schema().validate(&data).is_ok());
    }
}
