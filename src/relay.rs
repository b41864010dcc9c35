//! The relay: forwards one already-authorized request upstream and hands back the result.
//!
//! [`Relay`] is a transparent forwarder. Each call issues exactly one upstream request with the
//! descriptor's method, path, and body untouched, decodes whatever came back, and returns it:
//! 2xx answers as [`UpstreamResponse`], everything else as [`UpstreamError`]. Nothing is retried,
//! cached, or serialized between calls. While the shared [`DebugFlag`] is on, exactly one
//! [`UpstreamLogRecord`] is handed to the configured [`UpstreamLog`] per call, on success and
//! failure alike, before the result is returned.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;

// self
use crate::{
	_prelude::*,
	config::DebugFlag,
	error::UpstreamError,
	http::UpstreamHttpClient,
	mapper::TransportErrorMapper,
	obs::{self, ForwardOutcome, ForwardSpan, TracingUpstreamLog, UpstreamLog, UpstreamLogRecord},
};
#[cfg(feature = "reqwest")]
use crate::{
	config::RelayConfig, error::ConfigError, http::ReqwestHttpClient,
	mapper::ReqwestTransportErrorMapper,
};

#[cfg(feature = "reqwest")]
/// Relay specialized for the crate's default reqwest transport stack.
pub type ReqwestRelay = Relay<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Forwards requests to one upstream through a pluggable transport.
pub struct Relay<C, M>
where
	C: ?Sized + UpstreamHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client used for every upstream call.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// `debug_proxy` switch, read once per call.
	pub debug: DebugFlag,
	/// Sink for `debug_proxy` records.
	pub log: Arc<dyn UpstreamLog>,
}
impl<C, M> Relay<C, M>
where
	C: ?Sized + UpstreamHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a relay that reuses the caller-provided transport + mapper pair.
	///
	/// Records go to [`TracingUpstreamLog`] until [`with_log`](Self::with_log) says otherwise.
	pub fn with_http_client(
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
		debug: DebugFlag,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			debug,
			log: Arc::new(TracingUpstreamLog),
		}
	}

	/// Replaces the sink that receives `debug_proxy` records.
	pub fn with_log(mut self, log: Arc<dyn UpstreamLog>) -> Self {
		self.log = log;

		self
	}

	/// Forwards a `GET` of `path` and returns the upstream payload.
	pub async fn get(&self, path: impl Into<String>) -> Result<Payload, UpstreamError> {
		self.forward(RequestDescriptor::get(path)).await.map(|response| response.payload)
	}

	/// Forwards a `POST` of `body` to `path` and returns the upstream payload.
	pub async fn post(
		&self,
		path: impl Into<String>,
		body: impl Into<Vec<u8>>,
	) -> Result<Payload, UpstreamError> {
		self.forward(RequestDescriptor::post(path, body)).await.map(|response| response.payload)
	}

	/// Forwards a `DELETE` of `path` and returns the upstream payload.
	pub async fn delete(&self, path: impl Into<String>) -> Result<Payload, UpstreamError> {
		self.forward(RequestDescriptor::delete(path)).await.map(|response| response.payload)
	}

	/// Forwards any descriptor and returns the upstream status alongside the payload.
	///
	/// Dropping the returned future abandons the upstream call. The `attempt` counter has then
	/// been recorded with no matching `success` or `failure`, and no log record is emitted.
	pub async fn forward(
		&self,
		request: RequestDescriptor,
	) -> Result<UpstreamResponse, UpstreamError> {
		let method = request.method();
		let span = ForwardSpan::new(method, request.path());

		obs::record_forward_outcome(method, ForwardOutcome::Attempt);

		let result = span
			.instrument(async {
				let started = OffsetDateTime::now_utc();
				let result = match self.http_client.execute(&request).await {
					Ok(raw) => {
						let payload = decode_payload(&raw.body);

						if is_success(raw.status) {
							Ok(UpstreamResponse { status: raw.status, payload })
						} else {
							Err(UpstreamError::Response { status: raw.status, payload })
						}
					},
					Err(e) => Err(self.transport_mapper.map_transport_error(&request, e)),
				};

				if self.debug.is_enabled() {
					self.log.record(log_record(&request, &result, started));
				}

				result
			})
			.await;

		match &result {
			Ok(response) => {
				obs::record_forward_outcome(method, ForwardOutcome::Success);
				obs::record_upstream_status(method, Some(response.status));
			},
			Err(e) => {
				obs::record_forward_outcome(method, ForwardOutcome::Failure);
				obs::record_upstream_status(method, e.status());
			},
		}

		result
	}
}
#[cfg(feature = "reqwest")]
impl Relay<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a reqwest-backed relay from a loaded configuration.
	///
	/// The relay gets its own [`DebugFlag`] seeded from `debug_proxy`; clone [`Relay::debug`]
	/// before handing the relay off to keep a reload handle.
	pub fn from_config(config: &RelayConfig) -> Result<Self> {
		let endpoint = config.endpoint().map_err(ConfigError::from)?;
		let http_client = ReqwestHttpClient::new(endpoint)?;

		Ok(Self::with_http_client(http_client, ReqwestTransportErrorMapper, config.debug_flag()))
	}
}
impl<C, M> Clone for Relay<C, M>
where
	C: ?Sized + UpstreamHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			transport_mapper: Arc::clone(&self.transport_mapper),
			debug: self.debug.clone(),
			log: Arc::clone(&self.log),
		}
	}
}
impl<C, M> Debug for Relay<C, M>
where
	C: ?Sized + UpstreamHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Relay").field("debug_proxy", &self.debug.is_enabled()).finish()
	}
}

fn log_record(
	request: &RequestDescriptor,
	result: &Result<UpstreamResponse, UpstreamError>,
	started: OffsetDateTime,
) -> UpstreamLogRecord {
	let (status, outcome, payload, error) = match result {
		Ok(response) =>
			(Some(response.status), ForwardOutcome::Success, Some(response.payload.clone()), None),
		Err(e) => (
			e.status(),
			ForwardOutcome::Failure,
			e.payload().cloned(),
			e.is_transport().then(|| e.to_string()),
		),
	};

	UpstreamLogRecord {
		method: request.method(),
		path: request.path().to_owned(),
		status,
		outcome,
		payload,
		error,
		observed_at: started,
		elapsed: OffsetDateTime::now_utc() - started,
	}
}
