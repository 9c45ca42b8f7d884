// self
use crate::{_prelude::*, obs::CallKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used around every API call.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the call kind, HTTP method, and endpoint path.
	pub fn new(kind: CallKind, method: &str, path: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("sirv_client.call", kind = kind.as_str(), method, path);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, method, path);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
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

/// Emits a debug event when the cached token is replaced.
///
/// `valid_for` is the buffered lifetime; `forced` marks explicit authentication calls.
pub fn trace_token_issued(valid_for: Duration, forced: bool) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(valid_for_secs = valid_for.whole_seconds(), forced, "Issued a new bearer token.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (valid_for, forced);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = CallSpan::new(CallKind::Request, "GET", "/v2/account");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);

		trace_token_issued(Duration::seconds(1_140), false);
	}
}
