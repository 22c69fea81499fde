//! Error handling utilities for MCP server

use rmcp::ErrorData;
use sprout_core::JourneyError;

/// Converts a tracker error into an MCP error.
///
/// Errors the caller can act on become `invalid_params`; storage and backend
/// failures are internal errors.
pub fn to_mcp_error(message: &str, error: &JourneyError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        JourneyError::InvalidInput { .. }
        | JourneyError::InvalidState { .. }
        | JourneyError::NoActiveJourney
        | JourneyError::CropNotFound { .. }
        | JourneyError::Unauthorized
        | JourneyError::Forbidden { .. }
        | JourneyError::AccountBlocked { .. }
        | JourneyError::UserNotFound { .. } => ErrorData::invalid_params(text, None),
        _ => ErrorData::internal_error(text, None),
    }
}
