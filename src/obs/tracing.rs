// self
use crate::{
	_prelude::*,
	http::{GraphRequest, GraphResponse},
	obs::Operation,
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// A span builder used by client operations.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the provided operation + stage.
	pub fn new(operation: Operation, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"sharepoint_graph.request",
				operation = operation.as_str(),
				stage
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (operation, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
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

/// Emits a `debug` event before a request leaves the client. Headers are never logged.
pub(crate) fn trace_dispatch(request: &GraphRequest) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(
			method = request.method.as_str(),
			url = %request.url,
			has_body = request.body.is_some(),
			"Dispatching Graph request."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = request;
	}
}

/// Emits a `debug` event for a response whose status does not match the expected one.
pub(crate) fn trace_unexpected_status(response: &GraphResponse, expected: u16) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(
			status = response.status,
			expected,
			body_len = response.body.len(),
			"Graph returned an unexpected status."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (response, expected);
	}
}
