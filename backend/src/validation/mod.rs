//! Validation of business-date query parameters.
//!
//! Rules return `validator::ValidationError`s carrying a caller-facing
//! message; the HTTP layer turns them into `InvalidParameters` responses.

pub mod rules;
