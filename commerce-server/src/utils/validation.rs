//! Request payload validation
//!
//! Validation runs at the API boundary, before any core logic or store
//! access.

use shared::error::{ApiError, ApiResult};
use validator::Validate;

/// Validate a request payload, mapping field errors to a 400
pub fn validate_payload<T: Validate>(payload: &T) -> ApiResult<()> {
    payload.validate().map_err(ApiError::from)
}
