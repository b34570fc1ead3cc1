//! Catalog request failures.

use thiserror::Error;

const TRANSPORT_MESSAGE: &str = "Unable to reach the catalog service";
const DECODE_MESSAGE: &str = "The catalog service sent an unreadable response";
const SERVICE_FALLBACK_MESSAGE: &str = "The catalog service could not complete the request";

/// Errors produced while querying the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
	/// The request never reached the server or no response came back.
	#[error("catalog transport error: {0}")]
	Transport(String),

	/// The server answered but reported failure.
	#[error("catalog service error (status {status:?}): {}", .message.as_deref().unwrap_or("no message"))]
	Service {
		/// HTTP status, when the failure came from a non-2xx response.
		status: Option<u16>,
		/// Server-supplied message.
		message: Option<String>,
	},

	/// The response body did not match the catalog envelope.
	#[error("catalog response could not be decoded: {0}")]
	Decode(String),

	/// An endpoint path could not be resolved against the base URL.
	#[error("invalid catalog endpoint {path:?}: {reason}")]
	InvalidEndpoint { path: String, reason: String },

	/// The HTTP client could not be constructed.
	#[error("failed to build HTTP client: {0}")]
	ClientBuild(String),
}

impl CatalogError {
	/// Service failure carrying an optional server message.
	pub fn service(message: Option<String>) -> Self {
		Self::Service { status: None, message }
	}

	/// Message suitable for display in place of results.
	///
	/// Server-supplied messages are passed through; everything else maps to a
	/// generic description.
	pub fn user_message(&self) -> String {
		match self {
			Self::Service {
				message: Some(message), ..
			} if !message.trim().is_empty() => message.clone(),
			Self::Service { .. } => SERVICE_FALLBACK_MESSAGE.to_string(),
			Self::Decode(_) => DECODE_MESSAGE.to_string(),
			Self::Transport(_) | Self::InvalidEndpoint { .. } | Self::ClientBuild(_) => TRANSPORT_MESSAGE.to_string(),
		}
	}
}

impl From<reqwest::Error> for CatalogError {
	fn from(error: reqwest::Error) -> Self {
		if error.is_decode() {
			Self::Decode(error.to_string())
		} else {
			Self::Transport(error.to_string())
		}
	}
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_message_prefers_server_text() {
		let err = CatalogError::service(Some("Category not found".into()));
		assert_eq!(err.user_message(), "Category not found");
	}

	#[test]
	fn user_message_falls_back_for_blank_or_missing_text() {
		assert_eq!(CatalogError::service(None).user_message(), SERVICE_FALLBACK_MESSAGE);
		assert_eq!(CatalogError::service(Some("  ".into())).user_message(), SERVICE_FALLBACK_MESSAGE);
		assert_eq!(CatalogError::Transport("connection refused".into()).user_message(), TRANSPORT_MESSAGE);
	}
}
