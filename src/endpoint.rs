//! Validated description of the upstream the relay talks to.
//!
//! [`UpstreamEndpoint`] carries the base URL every inbound path is appended to, the credential
//! presented to the upstream, the header used to forward the acting user, and the transport
//! timeouts. Timeouts live here rather than on the relay because cancellation is a property of
//! the transport.

// std
use std::time::Duration as StdDuration;
// self
use crate::{_prelude::*, auth::UpstreamAuth};

/// Header the acting user is forwarded in unless configured otherwise.
pub const DEFAULT_ACTING_USER_HEADER: &str = "cp-user";

/// Errors raised while constructing or validating endpoints.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum EndpointError {
	/// Base URL is mandatory.
	#[error("Missing upstream base URL.")]
	MissingBaseUrl,
	/// Only HTTP(S) upstreams are supported.
	#[error("The upstream base URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// URL that failed validation.
		url: String,
	},
	/// Query strings and fragments belong to the forwarded path, not the base.
	#[error("The upstream base URL must not carry a query or fragment: {url}.")]
	BaseUrlHasQuery {
		/// URL that failed validation.
		url: String,
	},
	/// Header names must be RFC 9110 tokens.
	#[error("Acting-user header `{header}` is not a valid HTTP header name.")]
	InvalidHeaderName {
		/// Rejected header name.
		header: String,
	},
	/// Configured credential has a blank part.
	#[error("The upstream {kind} credential must not be blank.")]
	IncompleteCredential {
		/// Credential kind, as in [`UpstreamAuth::as_str`].
		kind: &'static str,
	},
	/// Zero timeouts would fail every call.
	#[error("The {which} timeout must be greater than zero.")]
	ZeroTimeout {
		/// Which timeout was rejected.
		which: &'static str,
	},
}

/// Immutable upstream description consumed by transports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpstreamEndpoint {
	/// Base URL inbound paths are appended to.
	pub base_url: Url,
	/// Credential presented on every call.
	pub auth: UpstreamAuth,
	/// Header carrying the acting user.
	pub acting_user_header: String,
	/// Total request timeout, if any.
	pub timeout: Option<StdDuration>,
	/// Connect timeout, if any.
	pub connect_timeout: Option<StdDuration>,
}
impl UpstreamEndpoint {
	/// Creates a new builder.
	pub fn builder() -> UpstreamEndpointBuilder {
		UpstreamEndpointBuilder::default()
	}

	/// Appends an upstream-relative path to the base URL.
	///
	/// The path is copied verbatim, query string included. A single `/` is inserted only when
	/// neither side provides one.
	pub fn url_for(&self, path: &str) -> String {
		let base = self.base_url.as_str().trim_end_matches('/');

		if path.starts_with('/') { format!("{base}{path}") } else { format!("{base}/{path}") }
	}

	fn validate(&self) -> Result<(), EndpointError> {
		match self.base_url.scheme() {
			"http" | "https" => {},
			_ =>
				return Err(EndpointError::UnsupportedScheme { url: self.base_url.to_string() }),
		}

		if self.base_url.query().is_some() || self.base_url.fragment().is_some() {
			return Err(EndpointError::BaseUrlHasQuery { url: self.base_url.to_string() });
		}
		if !is_header_token(&self.acting_user_header) {
			return Err(EndpointError::InvalidHeaderName {
				header: self.acting_user_header.clone(),
			});
		}
		if !self.auth.is_complete() {
			return Err(EndpointError::IncompleteCredential { kind: self.auth.as_str() });
		}
		if self.timeout.is_some_and(|value| value.is_zero()) {
			return Err(EndpointError::ZeroTimeout { which: "request" });
		}
		if self.connect_timeout.is_some_and(|value| value.is_zero()) {
			return Err(EndpointError::ZeroTimeout { which: "connect" });
		}

		Ok(())
	}
}

/// Builder for [`UpstreamEndpoint`] values.
#[derive(Debug)]
pub struct UpstreamEndpointBuilder {
	/// Base URL inbound paths are appended to.
	pub base_url: Option<Url>,
	/// Credential presented on every call.
	pub auth: UpstreamAuth,
	/// Header carrying the acting user.
	pub acting_user_header: String,
	/// Total request timeout, if any.
	pub timeout: Option<StdDuration>,
	/// Connect timeout, if any.
	pub connect_timeout: Option<StdDuration>,
}
impl UpstreamEndpointBuilder {
	/// Sets the base URL.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Sets the upstream credential.
	pub fn auth(mut self, auth: UpstreamAuth) -> Self {
		self.auth = auth;

		self
	}

	/// Overrides the acting-user header name.
	pub fn acting_user_header(mut self, header: impl Into<String>) -> Self {
		self.acting_user_header = header.into();

		self
	}

	/// Sets the total request timeout.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Sets the connect timeout.
	pub fn connect_timeout(mut self, timeout: StdDuration) -> Self {
		self.connect_timeout = Some(timeout);

		self
	}

	/// Consumes the builder and validates the resulting endpoint.
	pub fn build(self) -> Result<UpstreamEndpoint, EndpointError> {
		let base_url = self.base_url.ok_or(EndpointError::MissingBaseUrl)?;
		let endpoint = UpstreamEndpoint {
			base_url,
			auth: self.auth,
			acting_user_header: self.acting_user_header,
			timeout: self.timeout,
			connect_timeout: self.connect_timeout,
		};

		endpoint.validate()?;

		Ok(endpoint)
	}
}
impl Default for UpstreamEndpointBuilder {
	fn default() -> Self {
		Self {
			base_url: None,
			auth: UpstreamAuth::default(),
			acting_user_header: DEFAULT_ACTING_USER_HEADER.into(),
			timeout: None,
			connect_timeout: None,
		}
	}
}

fn is_header_token(name: &str) -> bool {
	const SPECIALS: &[u8] = b"!#$%&'*+-.^_`|~";

	!name.is_empty()
		&& name.bytes().all(|byte| byte.is_ascii_alphanumeric() || SPECIALS.contains(&byte))
}
