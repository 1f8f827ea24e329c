//! Declarative request validation.
//!
//! `Validator` accumulates field-level messages rule by rule and is converted into
//! `ValidationErrors` (422) once every rule has run.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::metadata::Metadata,
    server::{error::validation::ValidationErrors, util::parse::parse_datetime},
};

/// Maximum length of string fields and metadata values.
pub const MAX_STRING: usize = 255;

#[derive(Default)]
pub struct Validator {
    errors: ValidationErrors,
}

fn label(field: &str) -> String {
    field.replace('_', " ")
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an arbitrary message for `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) -> &mut Self {
        self.errors.add(field, message);
        self
    }

    /// Requires a non-blank string and returns it trimmed.
    pub fn required<'v>(&mut self, field: &str, value: Option<&'v str>) -> Option<&'v str> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => Some(v),
            None => {
                self.add(field, format!("The {} field is required.", label(field)));
                None
            }
        }
    }

    /// Requires a value to be present.
    pub fn present<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.add(field, format!("The {} field is required.", label(field)));
        }
        value
    }

    pub fn max_chars(&mut self, field: &str, value: Option<&str>, max: usize) -> &mut Self {
        if value.is_some_and(|v| v.chars().count() > max) {
            let message = format!(
                "The {} field must not be greater than {} characters.",
                label(field),
                max
            );
            self.add(field, message);
        }
        self
    }

    pub fn min_chars(&mut self, field: &str, value: Option<&str>, min: usize) -> &mut Self {
        if value.is_some_and(|v| v.chars().count() < min) {
            let message = format!("The {} field must be at least {} characters.", label(field), min);
            self.add(field, message);
        }
        self
    }

    pub fn email(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        let valid = |v: &str| {
            let mut parts = v.splitn(2, '@');
            let local = parts.next().unwrap_or_default();
            let domain = parts.next().unwrap_or_default();
            !local.is_empty()
                && !domain.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !v.chars().any(char::is_whitespace)
        };

        if value.is_some_and(|v| !valid(v)) {
            let message = format!("The {} field must be a valid email address.", label(field));
            self.add(field, message);
        }
        self
    }

    /// Parses an optional date; a present but unparsable value is an error.
    pub fn date(&mut self, field: &str, value: Option<&str>) -> Option<DateTime<Utc>> {
        let value = value.map(str::trim).filter(|v| !v.is_empty())?;

        let parsed = parse_datetime(value);
        if parsed.is_none() {
            let message = format!("The {} field must be a valid date.", label(field));
            self.add(field, message);
        }
        parsed
    }

    /// Parses an optional UUID; a present but malformed value is an error.
    pub fn uuid(&mut self, field: &str, value: Option<&str>) -> Option<Uuid> {
        let value = value.map(str::trim).filter(|v| !v.is_empty())?;

        match Uuid::parse_str(value) {
            Ok(id) => Some(id),
            Err(_) => {
                let message = format!("The {} field must be a valid UUID.", label(field));
                self.add(field, message);
                None
            }
        }
    }

    /// Requires `value` to equal its `<field>_confirmation` companion.
    pub fn confirmed(
        &mut self,
        field: &str,
        value: Option<&str>,
        confirmation: Option<&str>,
    ) -> &mut Self {
        if value.is_some() && value != confirmation {
            let message = format!("The {} field confirmation does not match.", label(field));
            self.add(field, message);
        }
        self
    }

    /// Every metadata value must be at most 255 characters.
    pub fn metadata(&mut self, field: &str, metadata: &Metadata) -> &mut Self {
        for (key, value) in metadata.iter() {
            if value.chars().count() > MAX_STRING {
                let path = format!("{}.{}", field, key);
                let message = format!(
                    "The {} field must not be greater than {} characters.",
                    path, MAX_STRING
                );
                self.add(&path, message);
            }
        }
        self
    }

    /// Checks an uploaded file's extension and, optionally, its size in kilobytes.
    pub fn file(
        &mut self,
        field: &str,
        file_name: &str,
        size_bytes: usize,
        extensions: &[&str],
        size_kb: Option<(usize, usize)>,
    ) -> &mut Self {
        let extension = std::path::Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        if !extensions.contains(&extension.as_str()) {
            let message = format!(
                "The {} field must be a file of type: {}.",
                label(field),
                extensions.join(", ")
            );
            self.add(field, message);
        }

        if let Some((min, max)) = size_kb {
            let kb = size_bytes / 1024;
            if kb < min || kb > max {
                let message = format!(
                    "The {} field must be between {} and {} kilobytes.",
                    label(field),
                    min,
                    max
                );
                self.add(field, message);
            }
        }
        self
    }

    /// Finishes validation.
    ///
    /// # Returns
    /// - `Ok(())` - Every rule passed
    /// - `Err(ValidationErrors)` - One or more fields failed
    pub fn finish(self) -> Result<(), ValidationErrors> {
        self.errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests required/max/email rules together.
    ///
    /// Expected: one message per failing field, in Laravel wording
    #[test]
    fn collects_field_messages() {
        let long = "x".repeat(256);
        let mut v = Validator::new();

        v.required("title", Some("   "));
        v.max_chars("name", Some(&long), MAX_STRING);
        v.email("email", Some("not-an-email"));

        let errors = v.finish().unwrap_err();
        assert_eq!(
            errors.get("title"),
            Some(&["The title field is required.".to_string()][..])
        );
        assert!(errors.has("name"));
        assert_eq!(
            errors.get("email"),
            Some(&["The email field must be a valid email address.".to_string()][..])
        );
    }

    /// Tests password confirmation.
    ///
    /// Expected: mismatch produces an error; match does not
    #[test]
    fn checks_confirmation() {
        let mut v = Validator::new();
        v.confirmed("password", Some("secret123"), Some("secret124"));
        assert!(v.finish().unwrap_err().has("password"));

        let mut v = Validator::new();
        v.confirmed("password", Some("secret123"), Some("secret123"));
        assert!(v.finish().is_ok());
    }

    /// Tests file type and size rules.
    ///
    /// Expected: a 50 KB txt fails both type and size checks
    #[test]
    fn checks_file_rules() {
        let mut v = Validator::new();
        v.file("file_path", "receipt.txt", 50 * 1024, &["pdf"], Some((100, 500)));

        let errors = v.finish().unwrap_err();
        assert_eq!(errors.get("file_path").map(<[String]>::len), Some(2));
    }

    /// Tests metadata value length.
    ///
    /// Expected: error keyed by `field.key`
    #[test]
    fn checks_metadata_values() {
        let mut metadata = Metadata::default();
        metadata.insert("note", "y".repeat(300));

        let mut v = Validator::new();
        v.metadata("additional_info", &metadata);

        assert!(v.finish().unwrap_err().has("additional_info.note"));
    }
}
