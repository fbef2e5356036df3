use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::shared::text::slugify;

lazy_static! {
    /// Regex for validating slugs used in document URLs
    /// Must be lowercase alphanumeric with single hyphens between words
    /// - Valid: "minecraft", "server-setup", "v2-guide"
    /// - Invalid: "-guide", "guide-", "server--setup", "Guide", "server_setup"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();

    /// Regex for validating username fields
    /// Must start with letter or underscore and contain only alphanumeric characters and underscores
    /// - Valid: "john_doe", "user123", "_admin", "JohnDoe"
    /// - Invalid: "123user", "-user", "user-name", "user name"
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap();

    /// Regex for setting keys ("logo", "landing_markdown", ...)
    pub static ref SETTING_KEY_REGEX: Regex = Regex::new(r"^[a-z][a-z0-9_]*$").unwrap();
}

pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if SLUG_REGEX.is_match(slug) {
        Ok(())
    } else {
        let mut err = ValidationError::new("slug");
        err.message =
            Some("Slug must be lowercase letters, digits and single hyphens".into());
        Err(err)
    }
}

/// Use the provided slug or derive one from `source` when it is absent or blank
pub fn resolve_slug(provided: Option<&str>, source: &str) -> Result<String, ValidationError> {
    let slug = match provided.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => slug.to_string(),
        None => slugify(source),
    };
    validate_slug(&slug)?;
    Ok(slug)
}
