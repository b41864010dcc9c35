// self
use crate::{obs::ForwardOutcome, relay::ProxyMethod};

/// Counts a forward stage under `entitlement_relay_forward_total`, labeled by method + outcome.
pub fn record_forward_outcome(method: ProxyMethod, outcome: ForwardOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"entitlement_relay_forward_total",
			"method" => method.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (method, outcome);
	}
}

/// Counts a finished forward under `entitlement_relay_upstream_status_total`, labeled by method
/// and the [`status_class`] of what the upstream answered.
pub fn record_upstream_status(method: ProxyMethod, status: Option<u16>) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"entitlement_relay_upstream_status_total",
			"method" => method.as_str(),
			"class" => status_class(status)
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (method, status);
	}
}

/// Bounded label for an upstream status; `transport` when no response arrived.
pub const fn status_class(status: Option<u16>) -> &'static str {
	match status {
		None => "transport",
		Some(100..=199) => "1xx",
		Some(200..=299) => "2xx",
		Some(300..=399) => "3xx",
		Some(400..=499) => "4xx",
		Some(500..=599) => "5xx",
		Some(_) => "other",
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn status_classes_are_bounded() {
		assert_eq!(status_class(None), "transport");
		assert_eq!(status_class(Some(204)), "2xx");
		assert_eq!(status_class(Some(302)), "3xx");
		assert_eq!(status_class(Some(404)), "4xx");
		assert_eq!(status_class(Some(503)), "5xx");
		assert_eq!(status_class(Some(999)), "other");
	}

	#[test]
	fn recording_without_recorder_is_noop() {
		record_forward_outcome(ProxyMethod::Delete, ForwardOutcome::Failure);
		record_upstream_status(ProxyMethod::Post, Some(201));
	}
}
