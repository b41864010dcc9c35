//! Upstream response model and schema-agnostic payload decoding.

// self
use crate::_prelude::*;

/// Opaque upstream payload; its shape is entirely up to the upstream.
pub type Payload = Value;

/// Successful upstream answer.
#[derive(Clone, Debug, PartialEq)]
pub struct UpstreamResponse {
	/// HTTP status code returned by the upstream.
	pub status: u16,
	/// Decoded upstream body.
	pub payload: Payload,
}
impl UpstreamResponse {
	/// Whether the status is in the 2xx range.
	pub fn is_success(&self) -> bool {
		is_success(self.status)
	}
}

pub(crate) fn is_success(status: u16) -> bool {
	(200..300).contains(&status)
}

/// Decodes a raw upstream body without ever failing.
///
/// Empty (or whitespace-only) bodies become `null`, JSON bodies keep their value, and anything
/// else is carried as a JSON string of the lossily decoded text.
pub fn decode_payload(body: &[u8]) -> Payload {
	if body.iter().all(u8::is_ascii_whitespace) {
		return Value::Null;
	}

	serde_json::from_slice(body)
		.unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}
