use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::models::DesiredSpec;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+$").expect("static pattern compiles"));

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 24;

/// Check a desired spec for well-formedness. Runs before any remote call.
pub fn validate(spec: &DesiredSpec) -> Result<(), ValidationError> {
    if !NAME_PATTERN.is_match(&spec.name) {
        return Err(ValidationError::NamePattern);
    }

    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&spec.name.len()) {
        return Err(ValidationError::NameLength);
    }

    if let Some(domain) = &spec.custom_domain {
        domain.resolve()?;
    }

    Ok(())
}
