use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Field-level validation failures, keyed by field name.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an error set holding one message.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// First message, suffixed with the count of the remaining ones.
    pub fn summary(&self) -> String {
        let mut messages = self.0.values().flatten();
        let Some(first) = messages.next() else {
            return "The given data was invalid.".to_string();
        };

        match messages.count() {
            0 => first.clone(),
            1 => format!("{} (and 1 more error)", first),
            n => format!("{} (and {} more errors)", first, n),
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Serialize)]
struct ValidationErrorBody<'a> {
    message: String,
    errors: &'a BTreeMap<String, Vec<String>>,
}

impl IntoResponse for ValidationErrors {
    fn into_response(self) -> Response {
        let body = ValidationErrorBody {
            message: self.summary(),
            errors: &self.0,
        };

        (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests the summary message for several errors.
    ///
    /// Expected: first message plus a count of the others
    #[test]
    fn summary_counts_remaining_errors() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "The email field is required.");
        errors.add("name", "The name field is required.");
        errors.add("name", "The name field must be a string.");

        assert_eq!(
            errors.summary(),
            "The email field is required. (and 2 more errors)"
        );
    }

    /// Tests that an empty set converts to `Ok`.
    ///
    /// Expected: Ok(())
    #[test]
    fn empty_set_is_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }
}
