//! Request schema for `POST /authors`.
//!
//! The body is walked as a `serde_json::Value` so that every field problem
//! (missing, wrong type, empty, too long) is reported at once, keyed by field.

use authors_types::domain::author::{NewAuthor, NAME_MAX_LEN, SPECIALISATION_MAX_LEN};
use authors_types::domain::validation::{
    text_errors, ValidationErrors, INVALID_INPUT, MISSING_FIELD, NOT_A_STRING, SCHEMA_KEY,
};
use serde_json::{Map, Value};

pub fn parse_create_author(body: &Value) -> Result<NewAuthor, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let Some(obj) = body.as_object() else {
        errors.add(SCHEMA_KEY, INVALID_INPUT);
        return Err(errors);
    };

    let name = required_text(obj, "name", NAME_MAX_LEN, &mut errors);
    let specialisation = required_text(obj, "specialisation", SPECIALISATION_MAX_LEN, &mut errors);

    match (name, specialisation) {
        (Some(name), Some(specialisation)) if errors.is_empty() => {
            NewAuthor::new(name.to_string(), specialisation.to_string())
        }
        _ => Err(errors),
    }
}

fn required_text<'a>(
    obj: &'a Map<String, Value>,
    field: &str,
    max_len: usize,
    errors: &mut ValidationErrors,
) -> Option<&'a str> {
    match obj.get(field) {
        None | Some(Value::Null) => {
            errors.add(field, MISSING_FIELD);
            None
        }
        Some(Value::String(s)) => {
            errors.extend(field, text_errors(s, max_len));
            Some(s.as_str())
        }
        Some(_) => {
            errors.add(field, NOT_A_STRING);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authors_types::domain::validation::{CONTROL_CHARACTERS, EMPTY_FIELD};
    use serde_json::json;

    #[test]
    fn accepts_valid_payload() {
        let new = parse_create_author(&json!({ "name": "Ada", "specialisation": "Math" })).unwrap();
        assert_eq!(new.name(), "Ada");
        assert_eq!(new.specialisation(), "Math");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let new = parse_create_author(&json!({
            "name": "Ada",
            "specialisation": "Math",
            "id": 99
        }));
        assert!(new.is_ok());
    }

    #[test]
    fn reports_every_field() {
        let errors = parse_create_author(&json!({ "specialisation": 42 })).unwrap_err();
        assert_eq!(errors.field("name").unwrap(), &[MISSING_FIELD.to_string()]);
        assert_eq!(
            errors.field("specialisation").unwrap(),
            &[NOT_A_STRING.to_string()]
        );
    }

    #[test]
    fn null_counts_as_missing() {
        let errors =
            parse_create_author(&json!({ "name": null, "specialisation": "Math" })).unwrap_err();
        assert_eq!(errors.field("name").unwrap(), &[MISSING_FIELD.to_string()]);
        assert!(errors.field("specialisation").is_none());
    }

    #[test]
    fn length_and_emptiness() {
        let errors = parse_create_author(&json!({
            "name": "x".repeat(NAME_MAX_LEN + 1),
            "specialisation": "  "
        }))
        .unwrap_err();
        assert_eq!(
            errors.field("name").unwrap(),
            &["Longer than maximum length 20.".to_string()]
        );
        assert_eq!(
            errors.field("specialisation").unwrap(),
            &[EMPTY_FIELD.to_string()]
        );
    }

    #[test]
    fn nul_is_a_field_error() {
        let errors =
            parse_create_author(&json!({ "name": "\u{0}", "specialisation": "Math" }))
                .unwrap_err();
        assert_eq!(
            errors.field("name").unwrap(),
            &[CONTROL_CHARACTERS.to_string()]
        );
    }

    #[test]
    fn non_object_body() {
        let errors = parse_create_author(&json!(["Ada", "Math"])).unwrap_err();
        assert_eq!(errors.field(SCHEMA_KEY).unwrap(), &[INVALID_INPUT.to_string()]);
    }
}
