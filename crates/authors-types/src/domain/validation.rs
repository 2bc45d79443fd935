use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub const MISSING_FIELD: &str = "Missing data for required field.";
pub const NOT_A_STRING: &str = "Not a valid string.";
pub const EMPTY_FIELD: &str = "Field may not be empty.";
pub const INVALID_INPUT: &str = "Invalid input type.";
pub const CONTROL_CHARACTERS: &str = "May not contain control characters.";

/// Key used for errors that concern the payload as a whole.
pub const SCHEMA_KEY: &str = "_schema";

/// Field-level validation failures, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn extend(&mut self, field: &str, messages: impl IntoIterator<Item = String>) {
        for m in messages {
            self.add(field, m);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for m in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {m}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Checks a required text value against the non-empty, printable and length
/// rules. Length is counted in characters, like `VARCHAR(n)`.
pub fn text_errors(value: &str, max_len: usize) -> Vec<String> {
    let mut out = Vec::new();
    if value.trim().is_empty() {
        out.push(EMPTY_FIELD.to_string());
    }
    // Postgres refuses NUL in text columns.
    if value.chars().any(char::is_control) {
        out.push(CONTROL_CHARACTERS.to_string());
    }
    if value.chars().count() > max_len {
        out.push(format!("Longer than maximum length {max_len}."));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_rules() {
        assert!(text_errors("Ada", 20).is_empty());
        assert_eq!(text_errors("   ", 20), vec![EMPTY_FIELD.to_string()]);
        assert_eq!(
            text_errors(&"x".repeat(21), 20),
            vec!["Longer than maximum length 20.".to_string()]
        );
        // multi-byte characters count once
        assert!(text_errors(&"é".repeat(20), 20).is_empty());
    }

    #[test]
    fn control_characters_are_rejected() {
        assert_eq!(
            text_errors("\u{0}", 20),
            vec![CONTROL_CHARACTERS.to_string()]
        );
        assert_eq!(
            text_errors("Ada\nLovelace", 20),
            vec![CONTROL_CHARACTERS.to_string()]
        );
        assert!(text_errors("Ada Lovelace", 20).is_empty());
    }

    #[test]
    fn collects_messages_per_field() {
        let mut errors = ValidationErrors::new();
        assert!(errors.clone().into_result(()).is_ok());

        errors.add("name", MISSING_FIELD);
        errors.add("specialisation", NOT_A_STRING);
        errors.add("name", EMPTY_FIELD);

        assert_eq!(
            errors.field("name").unwrap(),
            &[MISSING_FIELD.to_string(), EMPTY_FIELD.to_string()]
        );
        assert_eq!(
            errors.to_string(),
            "name: Missing data for required field.; name: Field may not be empty.; \
             specialisation: Not a valid string."
        );

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["specialisation"][0], NOT_A_STRING);
    }
}
