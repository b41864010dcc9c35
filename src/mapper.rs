//! Translation of transport failures into [`UpstreamError`] values.

// self
use crate::{_prelude::*, error::UpstreamError, relay::RequestDescriptor};

/// Maps transport failures into relay [`UpstreamError`] values.
///
/// Mappers may classify the failure in the message but must not retry, swallow, or invent an
/// upstream payload.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an error emitted by the transport for `request` into a relay error.
	fn map_transport_error(&self, request: &RequestDescriptor, error: E) -> UpstreamError;
}

/// Mapper that keeps the transport error's own message without further classification.
#[derive(Clone, Debug, Default)]
pub struct OpaqueTransportErrorMapper;
impl<E> TransportErrorMapper<E> for OpaqueTransportErrorMapper
where
	E: 'static + Send + Sync + StdError,
{
	fn map_transport_error(&self, _request: &RequestDescriptor, error: E) -> UpstreamError {
		UpstreamError::transport(error.to_string(), error)
	}
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, request: &RequestDescriptor, err: ReqwestError) -> UpstreamError {
		let method = request.method();
		let path = request.path();
		let message = if err.is_timeout() {
			format!("{method} {path} timed out")
		} else if err.is_connect() {
			format!("{method} {path} could not connect to the upstream")
		} else if err.is_builder() {
			format!("{method} {path} could not be turned into a valid upstream request")
		} else if err.is_body() || err.is_decode() {
			format!("{method} {path} failed while streaming the upstream body")
		} else {
			format!("{method} {path} failed: {err}")
		};
		let status = err.status().map(|code| code.as_u16());

		UpstreamError::Transport { message, status, source: Box::new(err) }
	}
}
