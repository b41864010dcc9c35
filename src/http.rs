//! Transport primitives for upstream calls.
//!
//! [`UpstreamHttpClient`] is the relay's only dependency on an HTTP stack. The relay hands it a
//! [`RequestDescriptor`] and expects a [`RawResponse`] (any status) or a transport error back;
//! decoding and success classification stay in the relay so every transport behaves the same.
//! Timeouts, connection pooling, and cancellation are properties of the implementation.

// self
use crate::{_prelude::*, relay::RequestDescriptor};
#[cfg(feature = "reqwest")]
use crate::{auth::UpstreamAuth, endpoint::UpstreamEndpoint, error::ConfigError};

/// Boxed future returned by [`UpstreamHttpClient::execute`].
pub type UpstreamFuture<'a, E> = Pin<Box<dyn Future<Output = Result<RawResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports able to reach the upstream service.
///
/// Implementations must be `Send + Sync + 'static` so one client can back many concurrent relay
/// calls, and must issue exactly one upstream request per [`execute`](Self::execute) call.
/// Retries, if any, are the transport's own business and must stay invisible to the relay.
pub trait UpstreamHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` to the upstream and returns its raw answer, whatever the status.
	fn execute<'a>(
		&'a self,
		request: &'a RequestDescriptor,
	) -> UpstreamFuture<'a, Self::TransportError>;
}

/// Status and body exactly as the upstream produced them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Undecoded response body.
	pub body: Vec<u8>,
}
impl RawResponse {
	/// Creates a response from its parts.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}
}

/// Reqwest-backed transport bound to one [`UpstreamEndpoint`].
///
/// Every call sends `Accept: application/json`, the endpoint's credential, and, when the
/// descriptor names one, the acting user in the endpoint's acting-user header. `POST` bodies go
/// out untouched with `Content-Type: application/json`.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient {
	client: ReqwestClient,
	endpoint: Arc<UpstreamEndpoint>,
}
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a client honoring the endpoint's timeouts.
	///
	/// Redirects are never followed; a 3xx answer reaches the relay as-is.
	pub fn new(endpoint: UpstreamEndpoint) -> Result<Self, ConfigError> {
		let mut builder = ReqwestClient::builder().redirect(reqwest::redirect::Policy::none());

		if let Some(timeout) = endpoint.timeout {
			builder = builder.timeout(timeout);
		}
		if let Some(timeout) = endpoint.connect_timeout {
			builder = builder.connect_timeout(timeout);
		}

		Ok(Self::with_client(builder.build()?, endpoint))
	}

	/// Wraps an existing reqwest [`ReqwestClient`]; its own timeouts apply.
	///
	/// The client must be built with [`reqwest::redirect::Policy::none`]. A client that follows
	/// redirects turns one forward into several upstream calls and may rewrite `POST` into `GET`.
	pub fn with_client(client: ReqwestClient, endpoint: UpstreamEndpoint) -> Self {
		Self { client, endpoint: Arc::new(endpoint) }
	}

	/// Endpoint every request is sent to.
	pub fn endpoint(&self) -> &UpstreamEndpoint {
		&self.endpoint
	}
}
#[cfg(feature = "reqwest")]
impl UpstreamHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute<'a>(&'a self, request: &'a RequestDescriptor) -> UpstreamFuture<'a, ReqwestError> {
		use reqwest::header::{ACCEPT, CONTENT_TYPE};

		Box::pin(async move {
			let url = self.endpoint.url_for(request.path());

			#[cfg(feature = "tracing")]
			tracing::trace!(auth = self.endpoint.auth.as_str(), %url, "sending upstream request");

			let mut builder = self
				.client
				.request(request.method().as_reqwest(), url)
				.header(ACCEPT, "application/json");

			builder = match &self.endpoint.auth {
				UpstreamAuth::None => builder,
				UpstreamAuth::Basic { username, password } =>
					builder.basic_auth(username, Some(password.expose())),
				UpstreamAuth::Bearer { token } => builder.bearer_auth(token.expose()),
			};

			if let Some(user) = request.acting_user() {
				builder = builder.header(self.endpoint.acting_user_header.as_str(), user.as_ref());
			}
			if let Some(body) = request.body() {
				builder = builder.header(CONTENT_TYPE, "application/json").body(body.to_vec());
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(RawResponse { status, body })
		})
	}
}
