//! Graph request construction, dispatch, and response classification.
//!
//! [`GraphClient`] owns an [`AuthContext`], a base URL, and a shared [`GraphTransport`].
//! Every operation joins a relative path onto the base URL, attaches the context headers,
//! sends exactly one request, and accepts exactly one status code: `200` for reads and
//! `201` for the generic [`GraphClient::post`]. Any other status becomes a
//! [`GraphApiError`] carrying the status and the raw body; nothing is retried.

pub mod drive;
pub mod site;

pub use drive::*;
pub use site::*;

// self
use crate::{
	_prelude::*,
	auth::AuthContext,
	config::{ClientConfig, GRAPH_BASE_URL},
	error::{ConfigError, GraphApiError, TransportError},
	http::{GraphRequest, GraphResponse, GraphTransport, HttpMethod},
	obs::{self, Operation, RequestOutcome, RequestSpan},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

/// Status accepted by read operations.
pub const STATUS_OK: u16 = 200;
/// Status accepted by [`GraphClient::post`].
pub const STATUS_CREATED: u16 = 201;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestGraphClient = GraphClient<ReqwestTransport>;

/// Stateless Graph client bound to one credential and one base URL.
///
/// Clones share the transport, so concurrent calls through any clone need no locking.
pub struct GraphClient<T>
where
	T: ?Sized + GraphTransport,
{
	/// Credential whose headers sign every request.
	pub context: AuthContext,
	base_url: String,
	transport: Arc<T>,
}
impl<T> GraphClient<T>
where
	T: ?Sized + GraphTransport,
{
	/// Creates a client for the Graph v1.0 endpoint using the provided transport.
	pub fn with_transport(context: AuthContext, transport: Arc<T>) -> Self {
		Self { context, base_url: GRAPH_BASE_URL.to_owned(), transport }
	}

	/// Creates a client that joins paths onto the configured base URL.
	pub fn from_config(config: &ClientConfig, context: AuthContext, transport: Arc<T>) -> Self {
		Self { context, base_url: config.base_url_str().to_owned(), transport }
	}

	/// Base URL every relative path is joined onto.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Shared transport handle.
	pub fn transport(&self) -> &Arc<T> {
		&self.transport
	}

	/// Joins `path` onto the base URL as `base_url + "/" + path`.
	///
	/// A leading `/` on `path` is dropped so the joined URL never contains `//` at the seam.
	/// Paths that URL parsing would rewrite (`.`/`..` segments, backslashes) are rejected.
	pub fn url_for(&self, path: &str) -> Result<Url> {
		check_relative_path(path)?;

		let joined = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

		Url::parse(&joined)
			.map_err(|source| ConfigError::InvalidRequestUrl { url: joined, source }.into())
	}

	/// Sends a `GET` and returns the parsed JSON body of a `200` response.
	pub async fn get(&self, path: &str) -> Result<Value> {
		self.get_json(path).await
	}

	/// Sends a `GET` and deserializes the body of a `200` response into `R`.
	pub async fn get_json<R>(&self, path: &str) -> Result<R>
	where
		R: DeserializeOwned,
	{
		self.observe(Operation::Get, "get", async move {
			let response = self.send(HttpMethod::Get, path, None, STATUS_OK).await?;

			Ok(response.json()?)
		})
		.await
	}

	/// Sends a `POST` with `payload` as the JSON body and returns the parsed JSON body of a
	/// `201` response. Any other status, `200` included, is an error.
	pub async fn post<B>(&self, path: &str, payload: &B) -> Result<Value>
	where
		B: ?Sized + Serialize,
	{
		self.post_json(path, payload).await
	}

	/// Typed variant of [`GraphClient::post`].
	pub async fn post_json<B, R>(&self, path: &str, payload: &B) -> Result<R>
	where
		B: ?Sized + Serialize,
		R: DeserializeOwned,
	{
		let body = encode_payload(payload)?;

		self.observe(Operation::Post, "post", async move {
			let response =
				self.send(HttpMethod::Post, path, Some(body), STATUS_CREATED).await?;

			Ok(response.json()?)
		})
		.await
	}

	/// Sends one request and checks the response status against `expected`.
	///
	/// Transport failures are wrapped without further classification.
	pub(crate) async fn send(
		&self,
		method: HttpMethod,
		path: &str,
		body: Option<Value>,
		expected: u16,
	) -> Result<GraphResponse> {
		let mut request = GraphRequest::new(method, self.url_for(path)?, self.context.headers());

		request.body = body;

		obs::trace_dispatch(&request);

		let response = self.transport.execute(request).await.map_err(TransportError::network)?;

		if response.status != expected {
			obs::trace_unexpected_status(&response, expected);

			return Err(GraphApiError::new(response.status, response.text())
				.with_retry_after(response.retry_after())
				.into());
		}

		Ok(response)
	}

	/// Runs `fut` inside the operation span and records its outcome.
	pub(crate) async fn observe<F, R>(
		&self,
		operation: Operation,
		stage: &'static str,
		fut: F,
	) -> Result<R>
	where
		F: Future<Output = Result<R>>,
	{
		let span = RequestSpan::new(operation, stage);

		obs::record_request_outcome(operation, RequestOutcome::Attempt);

		let result = span.instrument(fut).await;

		match &result {
			Ok(_) => obs::record_request_outcome(operation, RequestOutcome::Success),
			Err(_) => obs::record_request_outcome(operation, RequestOutcome::Failure),
		}

		result
	}
}
#[cfg(feature = "reqwest")]
impl GraphClient<ReqwestTransport> {
	/// Creates a client for the Graph v1.0 endpoint backed by a default reqwest transport.
	pub fn new(context: AuthContext) -> Self {
		Self::with_transport(context, Arc::new(ReqwestTransport::default()))
	}
}
impl<T> Clone for GraphClient<T>
where
	T: ?Sized + GraphTransport,
{
	fn clone(&self) -> Self {
		Self {
			context: self.context.clone(),
			base_url: self.base_url.clone(),
			transport: Arc::clone(&self.transport),
		}
	}
}
impl<T> Debug for GraphClient<T>
where
	T: ?Sized + GraphTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("GraphClient")
			.field("context", &self.context)
			.field("base_url", &self.base_url)
			.finish()
	}
}

fn check_relative_path(path: &str) -> Result<(), ConfigError> {
	let path_only = path.split(['?', '#']).next().unwrap_or_default();

	if path_only.contains('\\') {
		return Err(ConfigError::BackslashInPath { path: path.to_owned() });
	}
	if path_only.split('/').any(is_dot_segment) {
		return Err(ConfigError::DotSegmentInPath { path: path.to_owned() });
	}

	Ok(())
}

/// Matches the segments WHATWG URL parsing treats as `.` or `..`, percent-encoded forms
/// included.
fn is_dot_segment(segment: &str) -> bool {
	let lowered = segment.to_ascii_lowercase();

	matches!(lowered.as_str(), "." | ".." | "%2e" | ".%2e" | "%2e." | "%2e%2e")
}

pub(crate) fn encode_payload<B>(payload: &B) -> Result<Value>
where
	B: ?Sized + Serialize,
{
	serde_json::to_value(payload).map_err(|source| ConfigError::InvalidPayload { source }.into())
}
