use crate::classify::Classification;
use crate::error::{Error, Result};

/// Unwrap a resolved value an operation depends on, or fail with an error
/// naming the operation and the update it was attempted on.
pub fn assert_present<T>(
    value: Option<T>,
    operation: &'static str,
    classification: &Classification,
) -> Result<T> {
    value.ok_or_else(|| Error::Unavailable {
        operation,
        classification: classification.clone(),
    })
}
