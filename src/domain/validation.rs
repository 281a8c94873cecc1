use crate::errors::{AppError, FieldError};

/// Collecting rule runner for write requests. Rules execute in call order
/// and every failure is kept, so a single response carries the complete
/// ordered list of field errors instead of stopping at the first one.
/// Uniqueness failures found by async lookups are pushed into the same
/// collector before `finish` is called.
#[derive(Debug, Default)]
pub struct FormValidator {
    errors: Vec<FieldError>,
}

impl FormValidator {
    pub fn new() -> Self {
        FormValidator { errors: Vec::new() }
    }

    /// Presence check. Returns the value so later rules can chain off it;
    /// absent or empty input records an error and yields `None`.
    pub fn required<'a>(
        &mut self,
        field: &str,
        value: Option<&'a str>,
        label: &str,
    ) -> Option<&'a str> {
        match value {
            Some(v) if !v.is_empty() => Some(v),
            _ => {
                self.push(field, format!("{} is required", label));
                None
            }
        }
    }

    /// Length lower bound, skipped when the value is absent (presence is a
    /// separate rule).
    pub fn min_length(&mut self, field: &str, value: Option<&str>, min: usize, label: &str) {
        if let Some(v) = value {
            if v.chars().count() < min {
                self.push(
                    field,
                    format!("{} must be at least {} characters long", label, min),
                );
            }
        }
    }

    pub fn max_length(&mut self, field: &str, value: Option<&str>, max: usize, label: &str) {
        if let Some(v) = value {
            if v.chars().count() > max {
                self.push(
                    field,
                    format!("{} must be at most {} characters long", label, max),
                );
            }
        }
    }

    /// http(s) URL shape check for optional link fields.
    pub fn url(&mut self, field: &str, value: Option<&str>, label: &str) {
        if let Some(v) = value {
            let ok = matches!(
                url::Url::parse(v),
                Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https"
            );
            if !ok {
                self.push(field, format!("{} must be a valid URL", label));
            }
        }
    }

    /// Numeric shape check; returns the parsed id for follow-up existence
    /// lookups.
    pub fn numeric(&mut self, field: &str, value: Option<&str>, label: &str) -> Option<i64> {
        let v = value?;
        match v.parse::<i64>() {
            Ok(n) => Some(n),
            Err(_) => {
                self.push(field, format!("{} must be a number", label));
                None
            }
        }
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn finish(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationError(self.errors))
        }
    }
}

/// Splits a comma-delimited tag string into names, deduplicated by exact
/// match with first-seen order preserved. `"go,go,rust"` yields two names.
pub fn parse_tag_names(raw: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for name in raw.split(',') {
        if name.is_empty() {
            continue;
        }
        if !seen.iter().any(|s: &String| s == name) {
            seen.push(name.to_string());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_all_failures_in_rule_order() {
        let mut v = FormValidator::new();
        let title = v.required("title", Some(""), "Title");
        v.min_length("title", title, 2, "Title");
        v.required("content", None, "Content");
        v.push("title", "Title already exists");

        let err = v.finish().unwrap_err();
        match err {
            AppError::ValidationError(errors) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["title", "content", "title"]);
            }
            other => panic!("expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn min_length_skips_absent_values() {
        let mut v = FormValidator::new();
        v.min_length("title", None, 2, "Title");
        assert!(v.finish().is_ok());
    }

    #[test]
    fn short_title_fails_min_length() {
        let mut v = FormValidator::new();
        let title = v.required("title", Some("x"), "Title");
        v.min_length("title", title, 2, "Title");
        let err = v.finish().unwrap_err();
        match err {
            AppError::ValidationError(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "title");
                assert!(errors[0].message.contains("at least 2"));
            }
            other => panic!("expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn rejects_non_http_urls() {
        let mut v = FormValidator::new();
        v.url("url", Some("ftp://example.com"), "URL");
        v.url("link_github", Some("https://github.com/x"), "Github link");
        let err = v.finish().unwrap_err();
        match err {
            AppError::ValidationError(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "url");
            }
            other => panic!("expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn numeric_parses_or_records_error() {
        let mut v = FormValidator::new();
        assert_eq!(v.numeric("project_category_id", Some("42"), "Project category id"), Some(42));
        assert_eq!(v.numeric("project_category_id", Some("abc"), "Project category id"), None);
        assert!(!v.is_valid());
    }

    #[test]
    fn tag_names_deduplicate_exact_matches() {
        assert_eq!(parse_tag_names("go,go,rust"), vec!["go", "rust"]);
    }

    #[test]
    fn tag_names_are_case_sensitive_and_keep_order() {
        assert_eq!(parse_tag_names("Go,go"), vec!["Go", "go"]);
        assert_eq!(parse_tag_names("rust,,go"), vec!["rust", "go"]);
    }
}
