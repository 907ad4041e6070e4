//! Rules gating every add and update before the gateway is called.

use thiserror::Error;

use crate::model::ProductDraft;

/// Why a candidate record was rejected. The display text is what the user sees.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid product.")]
    Missing,

    #[error("Error: name must not be empty.")]
    EmptyName,

    #[error("Error: price must be greater than zero.")]
    InvalidPrice,

    #[error("Error: quantity must be greater than zero.")]
    InvalidQuantity,
}

/// Checks a candidate record, stopping at the first failed rule.
///
/// Rules, in order: the record is present, the name is non-empty, the price
/// is a finite number above zero, the quantity is a finite number above zero.
pub fn validate(candidate: Option<&ProductDraft>) -> Result<(), ValidationError> {
    let draft = candidate.ok_or(ValidationError::Missing)?;
    if draft.name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !is_positive(draft.price) {
        return Err(ValidationError::InvalidPrice);
    }
    if !is_positive(draft.quantity) {
        return Err(ValidationError::InvalidQuantity);
    }
    Ok(())
}

// NaN compares false against everything, so it fails here too.
fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
