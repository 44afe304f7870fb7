//! Request validation helpers shared by the DTOs in `sigil_db::models`.
//!
//! DTOs derive [`validator::Validate`]; [`validate_input`] runs the derive and
//! folds every failure into a single [`CoreError::InvalidFields`] so callers
//! see all offending fields at once rather than only the first.

use std::collections::BTreeMap;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;

/// Field name -> human-readable messages, ordered by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Skill attribute abbreviations, one per ability score.
pub const SKILL_ATTRIBUTES: [&str; 5] = ["AGI", "INT", "VIG", "PRE", "FOR"];

/// Run the `Validate` derive on `input`, mapping failures to [`CoreError`].
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::InvalidFields(collect_field_errors(&errors)))
}

/// Flatten `validator`'s error tree into a field -> messages map.
pub fn collect_field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    for (field, field_errors) in errors.field_errors() {
        let messages = field_errors.iter().map(describe).collect();
        out.insert(field.to_string(), messages);
    }
    out
}

fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    match error.code.as_ref() {
        "range" => match (error.params.get("min"), error.params.get("max")) {
            (Some(min), Some(max)) => format!("must be between {min} and {max}"),
            (Some(min), None) => format!("must be at least {min}"),
            (None, Some(max)) => format!("must be at most {max}"),
            (None, None) => "is out of range".to_string(),
        },
        "length" => match (error.params.get("min"), error.params.get("max")) {
            (Some(min), Some(max)) => format!("length must be between {min} and {max}"),
            (Some(min), None) => format!("length must be at least {min}"),
            (None, Some(max)) => format!("length must be at most {max}"),
            (None, None) => "has an invalid length".to_string(),
        },
        "email" => "must be a valid email address".to_string(),
        other => format!("failed check `{other}`"),
    }
}

/// Reject strings that are empty once surrounding whitespace is removed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Accept only the abbreviations in [`SKILL_ATTRIBUTES`].
pub fn validate_skill_attribute(value: &str) -> Result<(), ValidationError> {
    if !SKILL_ATTRIBUTES.contains(&value) {
        let mut error = ValidationError::new("skill_attribute");
        error.message = Some(format!("must be one of {}", SKILL_ATTRIBUTES.join(", ")).into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct SampleInput {
        #[validate(range(min = 0, max = 5))]
        score: i32,
        #[validate(length(min = 1, max = 4))]
        name: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn reports_every_offending_field() {
        let input = SampleInput {
            score: 9,
            name: String::new(),
            email: "nope".to_string(),
        };
        let err = validate_input(&input).unwrap_err();
        let CoreError::InvalidFields(fields) = err else {
            panic!("expected InvalidFields, got {err:?}");
        };
        assert_eq!(fields.len(), 3);
        assert!(fields["score"][0].starts_with("must be between"));
        assert_eq!(fields["email"], vec!["must be a valid email address".to_string()]);
        assert!(fields["name"][0].starts_with("length must be between"));
    }

    #[test]
    fn valid_input_passes() {
        let input = SampleInput {
            score: 3,
            name: "Kai".to_string(),
            email: "kai@example.com".to_string(),
        };
        assert!(validate_input(&input).is_ok());
    }

    #[test]
    fn blank_strings_rejected() {
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank(" Arthur ").is_ok());
    }

    #[test]
    fn skill_attribute_must_be_known() {
        for attr in SKILL_ATTRIBUTES {
            assert!(validate_skill_attribute(attr).is_ok());
        }
        assert!(validate_skill_attribute("agi").is_err());
        assert!(validate_skill_attribute("LUCK").is_err());
    }
}
