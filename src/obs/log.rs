//! `debug_proxy` response records and the sinks that receive them.

// self
use crate::{
	_prelude::*,
	obs::ForwardOutcome,
	relay::{Payload, ProxyMethod},
};

/// One upstream response as observed by the relay.
#[derive(Clone, Debug, PartialEq)]
pub struct UpstreamLogRecord {
	/// Forwarded verb.
	pub method: ProxyMethod,
	/// Forwarded path.
	pub path: String,
	/// Upstream status, when the transport got that far.
	pub status: Option<u16>,
	/// [`ForwardOutcome::Success`] or [`ForwardOutcome::Failure`].
	pub outcome: ForwardOutcome,
	/// Payload exactly as it is returned to the caller (success or error payload).
	pub payload: Option<Payload>,
	/// Transport failure description, for calls that never got a response.
	pub error: Option<String>,
	/// Instant the forward started.
	pub observed_at: OffsetDateTime,
	/// Time spent waiting on the upstream.
	pub elapsed: Duration,
}
impl UpstreamLogRecord {
	/// Compact JSON rendering of the payload, `-` when there is none.
	pub fn payload_text(&self) -> String {
		self.payload.as_ref().map_or_else(|| "-".into(), Value::to_string)
	}
}

/// Sink for `debug_proxy` records.
///
/// The relay calls [`record`](Self::record) exactly once per forward while the debug flag is on,
/// and never while it is off.
pub trait UpstreamLog
where
	Self: Send + Sync,
{
	/// Consumes one record.
	fn record(&self, record: UpstreamLogRecord);
}

/// Default sink: one `DEBUG` event per record on the `entitlement_relay::upstream` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingUpstreamLog;
impl UpstreamLog for TracingUpstreamLog {
	fn record(&self, record: UpstreamLogRecord) {
		#[cfg(feature = "tracing")]
		{
			let elapsed_ms =
				i64::try_from(record.elapsed.whole_milliseconds()).unwrap_or(i64::MAX);

			tracing::debug!(
				target: "entitlement_relay::upstream",
				method = record.method.as_str(),
				path = record.path.as_str(),
				status = record.status,
				outcome = record.outcome.as_str(),
				elapsed_ms,
				payload = %record.payload_text(),
				error = record.error.as_deref(),
				"upstream response"
			);
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = record;
		}
	}
}

/// Sink that keeps records in memory, for hosts that surface them elsewhere and for tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryUpstreamLog(Arc<Mutex<Vec<UpstreamLogRecord>>>);
impl MemoryUpstreamLog {
	/// Snapshot of every record captured so far.
	pub fn records(&self) -> Vec<UpstreamLogRecord> {
		self.0.lock().clone()
	}

	/// Number of captured records.
	pub fn len(&self) -> usize {
		self.0.lock().len()
	}

	/// Whether nothing has been captured.
	pub fn is_empty(&self) -> bool {
		self.0.lock().is_empty()
	}

	/// Drains the captured records.
	pub fn take(&self) -> Vec<UpstreamLogRecord> {
		std::mem::take(&mut *self.0.lock())
	}
}
impl UpstreamLog for MemoryUpstreamLog {
	fn record(&self, record: UpstreamLogRecord) {
		self.0.lock().push(record);
	}
}
