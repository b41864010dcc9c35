//! Relay-level error types shared by the relay, its transports, and configuration loading.

// std
use std::path::PathBuf;
// self
use crate::{_prelude::*, endpoint::EndpointError, relay::Payload};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs that mix configuration and forwarding.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Upstream call failed; see [`UpstreamError`].
	#[error(transparent)]
	Upstream(#[from] UpstreamError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

/// The single failure kind surfaced by relay operations.
///
/// Both variants carry what the upstream (or its transport) produced without rewriting it, so the
/// dispatcher can translate it into a caller-facing response.
#[derive(Debug, ThisError)]
pub enum UpstreamError {
	/// Upstream answered with a non-2xx status.
	#[error("Upstream responded with HTTP {status}.")]
	Response {
		/// HTTP status code returned by the upstream.
		status: u16,
		/// Decoded upstream body, untouched.
		payload: Payload,
	},
	/// The request never produced an upstream response (connect, timeout, IO).
	#[error("Transport failure while calling the upstream: {message}.")]
	Transport {
		/// Short description of the failure.
		message: String,
		/// HTTP status code, when the transport observed one.
		status: Option<u16>,
		/// Transport-specific failure.
		#[source]
		source: BoxError,
	},
}
impl UpstreamError {
	/// Wraps a transport-specific failure.
	pub fn transport(
		message: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Transport { message: message.into(), status: None, source: Box::new(src) }
	}

	/// Returns the upstream status code, if one was observed.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Response { status, .. } => Some(*status),
			Self::Transport { status, .. } => *status,
		}
	}

	/// Returns the upstream payload for application-level failures.
	pub fn payload(&self) -> Option<&Payload> {
		match self {
			Self::Response { payload, .. } => Some(payload),
			Self::Transport { .. } => None,
		}
	}

	/// Whether the failure happened below the HTTP layer.
	pub fn is_transport(&self) -> bool {
		matches!(self, Self::Transport { .. })
	}
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Upstream endpoint settings are invalid.
	#[error(transparent)]
	Endpoint(#[from] EndpointError),
	/// Configuration file could not be read.
	#[error("Unable to read relay configuration from `{}`.", path.display())]
	Read {
		/// Path that failed to load.
		path: PathBuf,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// Configuration document is not valid TOML or has mistyped fields.
	#[error("Relay configuration is invalid at `{}`.", source.path())]
	Parse {
		/// Structured parsing failure including the offending field path.
		#[source]
		source: serde_path_to_error::Error<toml::de::Error>,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
impl From<serde_path_to_error::Error<toml::de::Error>> for ConfigError {
	fn from(source: serde_path_to_error::Error<toml::de::Error>) -> Self {
		Self::Parse { source }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[derive(Debug)]
	struct Refused;
	impl Display for Refused {
		fn fmt(&self, f: &mut Formatter) -> FmtResult {
			f.write_str("connection refused")
		}
	}
	impl StdError for Refused {}

	#[test]
	fn response_error_exposes_status_and_payload() {
		let err = UpstreamError::Response {
			status: 503,
			payload: serde_json::json!({ "error": "unavailable" }),
		};

		assert_eq!(err.status(), Some(503));
		assert_eq!(err.payload(), Some(&serde_json::json!({ "error": "unavailable" })));
		assert!(!err.is_transport());
		assert_eq!(err.to_string(), "Upstream responded with HTTP 503.");
	}

	#[test]
	fn transport_error_keeps_source() {
		let err = UpstreamError::transport("connection refused", Refused);

		assert!(err.is_transport());
		assert_eq!(err.status(), None);
		assert!(err.payload().is_none());
		assert_eq!(
			err.source().map(ToString::to_string).as_deref(),
			Some("connection refused"),
		);
	}
}
