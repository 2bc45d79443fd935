use super::validation::{text_errors, ValidationErrors};

pub const NAME_MAX_LEN: usize = 20;
pub const SPECIALISATION_MAX_LEN: usize = 50;

/// A persisted author row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub specialisation: String,
}

/// An author that passed validation but has no identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    name: String,
    specialisation: String,
}

impl NewAuthor {
    pub fn new(name: String, specialisation: String) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.extend("name", text_errors(&name, NAME_MAX_LEN));
        errors.extend(
            "specialisation",
            text_errors(&specialisation, SPECIALISATION_MAX_LEN),
        );
        errors.into_result(Self {
            name,
            specialisation,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn specialisation(&self) -> &str {
        &self.specialisation
    }

    /// Attaches the identifier assigned by the store.
    pub fn into_author(self, id: i64) -> Author {
        Author {
            id,
            name: self.name,
            specialisation: self.specialisation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::EMPTY_FIELD;

    #[test]
    fn new_author_accepts_valid_values() {
        let new = NewAuthor::new("Ada".into(), "Math".into()).unwrap();
        let author = new.into_author(7);
        assert_eq!(
            author,
            Author {
                id: 7,
                name: "Ada".into(),
                specialisation: "Math".into(),
            }
        );
    }

    #[test]
    fn validation_errors() {
        let errors = NewAuthor::new("".into(), "x".repeat(51)).unwrap_err();
        assert_eq!(errors.field("name").unwrap(), &[EMPTY_FIELD.to_string()]);
        assert_eq!(
            errors.field("specialisation").unwrap(),
            &["Longer than maximum length 50.".to_string()]
        );

        let too_long_name = NewAuthor::new("x".repeat(21), "Math".into());
        assert!(too_long_name.is_err());

        let at_limit = NewAuthor::new("x".repeat(20), "y".repeat(50));
        assert!(at_limit.is_ok());
    }
}
