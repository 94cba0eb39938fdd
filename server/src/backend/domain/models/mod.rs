pub mod bill;
pub mod budget;
pub mod pot;
pub mod transaction;

use super::errors::{DomainError, DomainResult};

pub const MAX_TEXT_LENGTH: usize = 256;

/// Reject empty (after trimming) or overlong text fields
pub(crate) fn require_text(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{} cannot be empty", field)));
    }
    if value.chars().count() > MAX_TEXT_LENGTH {
        return Err(DomainError::validation(format!(
            "{} must be at most {} characters",
            field, MAX_TEXT_LENGTH
        )));
    }
    Ok(())
}

/// Reject zero, negative and non-finite amounts
pub(crate) fn require_positive(field: &str, amount: f64) -> DomainResult<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(DomainError::validation(format!("{} must be positive", field)));
    }
    Ok(())
}

pub(crate) fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
