//! DTO validation performed before a request leaves the client.

use crate::error::{DomainError, DomainResult};

/// Field rules for a create/update payload.
pub trait Validate {
    fn validate(&self) -> DomainResult<()>;
}

impl Validate for () {
    fn validate(&self) -> DomainResult<()> {
        Ok(())
    }
}

/// Implement [`Validate`] for a list filter whose only rules live in its
/// flattened `page` field.
#[macro_export]
macro_rules! impl_page_filter {
    ($($t:ty),+ $(,)?) => {
        $(
            impl $crate::Validate for $t {
                fn validate(&self) -> $crate::DomainResult<()> {
                    self.page.check()
                }
            }
        )+
    };
}

pub fn require_non_empty(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        Err(DomainError::validation(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

/// Like [`require_non_empty`] but only when the field is being changed.
pub fn optional_non_empty(field: &str, value: Option<&str>) -> DomainResult<()> {
    match value {
        Some(v) => require_non_empty(field, v),
        None => Ok(()),
    }
}

pub fn require_positive(field: &str, value: i64) -> DomainResult<()> {
    if value > 0 {
        Ok(())
    } else {
        Err(DomainError::validation(format!("{field} must be greater than 0")))
    }
}

pub fn require_non_negative(field: &str, value: i64) -> DomainResult<()> {
    if value >= 0 {
        Ok(())
    } else {
        Err(DomainError::validation(format!("{field} must not be negative")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strings_are_rejected() {
        assert!(require_non_empty("name", "   ").is_err());
        assert!(require_non_empty("name", "Gula").is_ok());
        assert!(optional_non_empty("name", None).is_ok());
        assert!(optional_non_empty("name", Some("")).is_err());
    }

    #[test]
    fn numeric_rules() {
        assert!(require_positive("amount", 0).is_err());
        assert!(require_non_negative("price", 0).is_ok());
        assert!(require_non_negative("price", -1).is_err());
    }
}
