//! Client-level error types shared by the transport, request, and decoding layers.

// self
use crate::{_prelude::*, auth::ClaimsError};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Graph answered with a status code other than the one the operation expects.
	#[error(transparent)]
	Api(#[from] GraphApiError),
	/// Local configuration or request-construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Response body could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Transport failure (DNS, TCP, TLS), surfaced without classification.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Access token could not be decoded for inspection.
	#[error(transparent)]
	Claims(#[from] ClaimsError),
}
impl Error {
	/// Returns the Graph API error when the failure came from a non-success status.
	pub fn as_api(&self) -> Option<&GraphApiError> {
		match self {
			Self::Api(e) => Some(e),
			_ => None,
		}
	}
}

/// Non-success Graph response.
///
/// The rendered message always reads `Graph API error: {status} - {body}`.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Graph API error: {status} - {body}")]
pub struct GraphApiError {
	/// HTTP status code returned by Graph.
	pub status: u16,
	/// Raw response body, decoded lossily as UTF-8.
	pub body: String,
	/// Retry-After hint from Graph, if supplied.
	pub retry_after: Option<Duration>,
}
impl GraphApiError {
	/// Creates an error for the provided status and body text.
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self { status, body: body.into(), retry_after: None }
	}

	/// Attaches a Retry-After hint.
	pub fn with_retry_after(mut self, retry_after: Option<Duration>) -> Self {
		self.retry_after = retry_after;

		self
	}

	/// Returns `true` when Graph throttled the request (HTTP 429).
	pub fn is_throttled(&self) -> bool {
		self.status == 429
	}
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL does not use HTTPS and is not a loopback address.
	#[error("The base URL must use HTTPS: {url}.")]
	InsecureBaseUrl {
		/// Base URL that failed validation.
		url: String,
	},
	/// Base URL carries a query string or fragment.
	#[error("The base URL must not carry a query or fragment: {url}.")]
	UnsupportedBaseUrl {
		/// Base URL that failed validation.
		url: String,
	},
	/// SharePoint site URL failed validation.
	#[error("SharePoint site URL `{url}` is invalid: {reason}.")]
	InvalidSiteUrl {
		/// Site URL that failed validation.
		url: String,
		/// Short description of the failed rule.
		reason: &'static str,
	},
	/// Joined request URL cannot be parsed.
	#[error("Request URL `{url}` is invalid.")]
	InvalidRequestUrl {
		/// URL assembled from the base and the relative path.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request payload could not be serialized to JSON.
	#[error("Request payload cannot be serialized to JSON.")]
	InvalidPayload {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
	/// Operation requires a non-empty drive item path.
	#[error("The {operation} operation requires a non-empty item path.")]
	EmptyItemPath {
		/// Operation label.
		operation: &'static str,
	},
	/// Path contains a `.` or `..` segment, which URL parsing would collapse.
	#[error("Path `{path}` must not contain `.` or `..` segments.")]
	DotSegmentInPath {
		/// Offending path as supplied by the caller.
		path: String,
	},
	/// Relative request path contains a `\`, which URL parsing would turn into `/`.
	#[error("Request path `{path}` must not contain a backslash.")]
	BackslashInPath {
		/// Offending path as supplied by the caller.
		path: String,
	},
}

/// Response body that could not be decoded into the requested type.
#[derive(Debug, ThisError)]
#[error("Graph returned a body that could not be decoded at `{}`.", .source.path())]
pub struct DecodeError {
	/// Structured decoding failure.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
	/// HTTP status code, when the body came from a response.
	pub status: Option<u16>,
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a failure.
	#[error("Network error occurred while calling Microsoft Graph.")]
	Network {
		/// Transport-specific error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Returns the original transport error when it has type `E`.
	pub fn downcast_ref<E>(&self) -> Option<&E>
	where
		E: 'static + std::error::Error,
	{
		match self {
			Self::Network { source } => source.downcast_ref::<E>(),
		}
	}
}
