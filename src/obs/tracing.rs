// self
use crate::{_prelude::*, relay::ProxyMethod};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedForward<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedForward<F> = F;

/// Span wrapped around one relay forward.
#[derive(Clone, Debug)]
pub struct ForwardSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl ForwardSpan {
	/// Creates a new span tagged with the forwarded method + path.
	pub fn new(method: ProxyMethod, path: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::debug_span!("entitlement_relay.forward", method = method.as_str(), path);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (method, path);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedForward<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}
