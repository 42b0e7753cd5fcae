//! Shared types for the commerce platform
//!
//! Domain models, error taxonomy and event definitions used by both the
//! service host (`commerce-server`) and the API gateway (`gateway`):
//!
//! - **`models`** - entities and request payloads per service
//! - **`error`** - unified API error type with HTTP status mapping
//! - **`events`** - domain event topics and payload types
//! - **`util`** - timestamps and business-number generation

pub mod error;
pub mod events;
pub mod models;
pub mod util;

// Re-export common types
pub use error::{ApiError, ApiErrorCode, ApiResult, ErrorBody};
pub use events::DomainEvent;
