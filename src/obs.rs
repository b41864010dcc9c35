//! Observability helpers for relay calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (default) to wrap every forward in a span named `entitlement_relay.forward`
//!   with `method` and `path` fields, and to let [`TracingUpstreamLog`] emit `debug_proxy`
//!   records as `DEBUG` events.
//! - Enable `metrics` to increment the `entitlement_relay_forward_total` counter for every
//!   attempt/success/failure, labeled by `method` + `outcome`, and the
//!   `entitlement_relay_upstream_status_total` counter labeled by `method` + status `class`.

mod log;
mod metrics;
mod tracing;

pub use log::*;
pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForwardOutcome {
	/// Entry to a relay operation.
	Attempt,
	/// Upstream answered with a 2xx status.
	Success,
	/// Upstream answered with a non-2xx status, or the transport failed.
	Failure,
}
impl ForwardOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ForwardOutcome::Attempt => "attempt",
			ForwardOutcome::Success => "success",
			ForwardOutcome::Failure => "failure",
		}
	}
}
impl Display for ForwardOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
