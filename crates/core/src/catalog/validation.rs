//! Field validation for book payloads.

use serde::Serialize;

use super::requests::BookPayload;

/// Maximum title length, in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum cover text length, in characters.
pub const MAX_COVER_TEXT_LENGTH: usize = 10_000;

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub property_path: String,
    pub message: String,
}

impl Violation {
    pub fn new(property_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property_path: property_path.into(),
            message: message.into(),
        }
    }
}

/// A non-empty list of violations, rendered as the 400 response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("validation failed with {} violation(s)", .violations.len())]
pub struct ValidationErrors {
    title: &'static str,
    pub violations: Vec<Violation>,
}

impl ValidationErrors {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self {
            title: "Validation Failed",
            violations,
        }
    }

    /// Shortcut for a single violation.
    pub fn single(property_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![Violation::new(property_path, message)])
    }

    /// Returns true if a violation was reported for the given property.
    pub fn has_violation(&self, property_path: &str) -> bool {
        self.violations
            .iter()
            .any(|v| v.property_path == property_path)
    }
}

/// Checks the payload constraints. Returns every violation, not just the first.
pub fn validate_book(payload: &BookPayload) -> Result<(), ValidationErrors> {
    let mut violations = Vec::new();

    match payload.title.as_deref() {
        None => violations.push(Violation::new("title", "This value should not be blank.")),
        Some(title) if title.trim().is_empty() => {
            violations.push(Violation::new("title", "This value should not be blank."))
        }
        Some(title) if title.chars().count() > MAX_TITLE_LENGTH => {
            violations.push(Violation::new(
                "title",
                format!("This value is too long. It should have {MAX_TITLE_LENGTH} characters or less."),
            ))
        }
        Some(_) => {}
    }

    if let Some(cover_text) = payload.cover_text.as_deref() {
        if cover_text.chars().count() > MAX_COVER_TEXT_LENGTH {
            violations.push(Violation::new(
                "coverText",
                format!(
                    "This value is too long. It should have {MAX_COVER_TEXT_LENGTH} characters or less."
                ),
            ));
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors::new(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_payload_passes() {
        let payload = BookPayload::new("Dune").with_cover_text("Spice");
        assert!(validate_book(&payload).is_ok());
    }

    #[test]
    fn test_missing_title_is_rejected() {
        let errors = validate_book(&BookPayload::default()).unwrap_err();
        assert!(errors.has_violation("title"));
        assert_eq!(errors.violations.len(), 1);
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let errors = validate_book(&BookPayload::new("   ")).unwrap_err();
        assert!(errors.has_violation("title"));
    }

    #[test]
    fn test_title_length_boundary() {
        let at_limit = "a".repeat(MAX_TITLE_LENGTH);
        assert!(validate_book(&BookPayload::new(at_limit)).is_ok());

        let over_limit = "a".repeat(MAX_TITLE_LENGTH + 1);
        let errors = validate_book(&BookPayload::new(over_limit)).unwrap_err();
        assert!(errors.has_violation("title"));
    }

    #[test]
    fn test_title_length_counts_characters_not_bytes() {
        let title = "é".repeat(MAX_TITLE_LENGTH);
        assert!(validate_book(&BookPayload::new(title)).is_ok());
    }

    #[test]
    fn test_cover_text_too_long() {
        let payload =
            BookPayload::new("Dune").with_cover_text("x".repeat(MAX_COVER_TEXT_LENGTH + 1));
        let errors = validate_book(&payload).unwrap_err();
        assert!(errors.has_violation("coverText"));
        assert!(!errors.has_violation("title"));
    }

    #[test]
    fn test_reports_all_violations() {
        let payload = BookPayload {
            title: None,
            cover_text: Some("x".repeat(MAX_COVER_TEXT_LENGTH + 1)),
            ..Default::default()
        };
        let errors = validate_book(&payload).unwrap_err();
        assert_eq!(errors.violations.len(), 2);
    }

    #[test]
    fn test_validation_errors_json_shape() {
        let errors = ValidationErrors::single("title", "This value should not be blank.");
        let json = serde_json::to_value(&errors).unwrap();

        assert_eq!(json["title"], "Validation Failed");
        assert_eq!(json["violations"][0]["propertyPath"], "title");
        assert_eq!(
            json["violations"][0]["message"],
            "This value should not be blank."
        );
    }
}
