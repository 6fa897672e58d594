//! Field checks shared by the request payloads.

use std::collections::HashMap;

use crate::error::ApiError;

/// Collects per-field failures so a request reports all of them at once.
#[derive(Debug, Default)]
pub struct FieldErrors(HashMap<String, String>);

impl FieldErrors {
    /// Returns `None` (and records the field) when the value is missing.
    pub fn require<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.0.insert(field.to_string(), "This field is required".to_string());
        }
        value
    }

    /// Like [`require`](Self::require) but also rejects blank strings.
    pub fn require_text(&mut self, field: &str, value: Option<String>) -> Option<String> {
        match self.require(field, value) {
            Some(text) if text.trim().is_empty() => {
                self.0.insert(field.to_string(), "This field must not be empty".to_string());
                None
            }
            other => other,
        }
    }

    /// Optional field that, when given, must not be blank.
    pub fn optional_text(&mut self, field: &str, value: Option<String>) -> Option<String> {
        match value {
            Some(text) if text.trim().is_empty() => {
                self.0.insert(field.to_string(), "This field must not be empty".to_string());
                None
            }
            other => other,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_error(self) -> ApiError {
        ApiError::validation_error("Missing or invalid fields", self.0)
    }
}
