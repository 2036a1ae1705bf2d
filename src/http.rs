//! Transport primitives for Graph requests.
//!
//! The module exposes [`GraphTransport`] alongside the transport-neutral [`GraphRequest`]
//! and [`GraphResponse`] values so downstream crates can plug in a custom HTTP stack (or
//! an in-memory fake) without touching URL construction or response classification,
//! both of which stay in [`GraphClient`](crate::client::GraphClient).

// crates.io
use time::format_description::well_known::Rfc2822;
// self
use crate::{_prelude::*, error::DecodeError};

/// Header mapping attached to a request.
pub type Headers = BTreeMap<&'static str, String>;

/// Boxed future returned by [`GraphTransport::execute`].
pub type TransportFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<GraphResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing a single Graph request.
///
/// The trait acts as the client's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so one transport can be shared behind `Arc` by every clone of a
/// client, and the futures they return must be `Send` so callers can spawn them. A transport
/// reports every HTTP response it receives, whatever the status code; only failures to
/// obtain a response belong in [`GraphTransport::TransportError`].
pub trait GraphTransport
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and resolves with the raw response.
	fn execute(&self, request: GraphRequest) -> TransportFuture<'_, Self::TransportError>;
}

/// HTTP methods used by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	/// `GET`.
	Get,
	/// `POST`.
	Post,
}
impl HttpMethod {
	/// Returns the canonical method token.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Fully resolved outbound request.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphRequest {
	/// Request method.
	pub method: HttpMethod,
	/// Absolute request URL.
	pub url: Url,
	/// Headers derived from the auth context.
	pub headers: Headers,
	/// JSON body for `POST` requests.
	pub body: Option<Value>,
}
impl GraphRequest {
	/// Creates a body-less request.
	pub fn new(method: HttpMethod, url: Url, headers: Headers) -> Self {
		Self { method, url, headers, body: None }
	}

	/// Attaches a JSON body.
	pub fn with_body(mut self, body: Value) -> Self {
		self.body = Some(body);

		self
	}
}

/// Raw response as reported by a transport.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response headers with lowercase names.
	pub headers: Vec<(String, String)>,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl GraphResponse {
	/// Creates a response with the provided status and body.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, headers: Vec::new(), body: body.into() }
	}

	/// Creates a response whose body is the serialized JSON value.
	pub fn json_body(status: u16, body: &Value) -> Self {
		Self::new(status, body.to_string()).with_header("content-type", "application/json")
	}

	/// Appends a header; the name is stored lowercase.
	pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
		self.headers.push((name.to_ascii_lowercase(), value.into()));

		self
	}

	/// Returns the first value of the named header (case-insensitive).
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	/// Body decoded as UTF-8, replacing invalid sequences.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Deserializes the body as JSON.
	pub fn json<T>(&self) -> Result<T, DecodeError>
	where
		T: DeserializeOwned,
	{
		let mut de = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut de)
			.map_err(|source| DecodeError { source, status: Some(self.status) })
	}

	/// Consumes the response and returns the raw body.
	pub fn into_bytes(self) -> Vec<u8> {
		self.body
	}

	/// Parses the `Retry-After` header as delta-seconds or an HTTP date.
	pub fn retry_after(&self) -> Option<Duration> {
		parse_retry_after(self.header("retry-after")?, OffsetDateTime::now_utc())
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl GraphTransport for ReqwestTransport {
	type TransportError = ReqwestError;

	fn execute(&self, request: GraphRequest) -> TransportFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let method = match request.method {
				HttpMethod::Get => reqwest::Method::GET,
				HttpMethod::Post => reqwest::Method::POST,
			};
			let mut builder = client.request(method, request.url);

			for (name, value) in &request.headers {
				builder = builder.header(*name, value);
			}
			if let Some(body) = &request.body {
				builder = builder.body(body.to_string());
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let headers = response
				.headers()
				.iter()
				.filter_map(|(name, value)| {
					value.to_str().ok().map(|value| (name.as_str().to_owned(), value.to_owned()))
				})
				.collect();
			let body = response.bytes().await?.to_vec();

			Ok(GraphResponse { status, headers, body })
		})
	}
}

fn parse_retry_after(raw: &str, now: OffsetDateTime) -> Option<Duration> {
	let raw = raw.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return Some(Duration::seconds(i64::try_from(secs).ok()?));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - now;

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	#[test]
	fn retry_after_accepts_seconds_and_dates() {
		let now = datetime!(2024-05-01 12:00:00 UTC);

		assert_eq!(parse_retry_after(" 120 ", now), Some(Duration::seconds(120)));
		assert_eq!(
			parse_retry_after("Wed, 01 May 2024 12:00:30 +0000", now),
			Some(Duration::seconds(30))
		);
		assert_eq!(parse_retry_after("Wed, 01 May 2024 11:59:00 +0000", now), None);
		assert_eq!(parse_retry_after("soon", now), None);
	}

	#[test]
	fn response_headers_are_case_insensitive() {
		let response = GraphResponse::new(429, "").with_header("Retry-After", "7");

		assert_eq!(response.header("retry-after"), Some("7"));
		assert_eq!(response.header("RETRY-AFTER"), Some("7"));
		assert_eq!(response.retry_after(), Some(Duration::seconds(7)));
	}

	#[test]
	fn json_errors_report_path_and_status() {
		#[derive(Debug, Deserialize)]
		struct Listing {
			#[allow(dead_code)]
			value: Vec<String>,
		}

		let response = GraphResponse::new(200, r#"{"value":[1]}"#);
		let err = response.json::<Listing>().expect_err("Integers are not strings.");

		assert_eq!(err.status, Some(200));
		assert_eq!(err.source.path().to_string(), "value[0]");
	}

	#[test]
	fn text_is_lossy() {
		let response = GraphResponse::new(500, vec![b'o', b'k', 0xff]);

		assert_eq!(response.text(), "ok\u{fffd}");
	}
}
