//! Demonstrates plugging a non-reqwest transport into [`GraphClient`].
//!
//! 1. Implement [`GraphTransport`] with its own error type.
//! 2. Report every HTTP response as-is; the client decides which status is a success.
//! 3. Return `Err` only when no response exists; the client surfaces it as a transport error.

// std
use std::{collections::BTreeMap, sync::Arc};
// crates.io
use color_eyre::Result;
use serde_json::json;
// self
use sharepoint_graph::{
	auth::AuthContext,
	client::GraphClient,
	error::Error,
	http::{GraphRequest, GraphResponse, GraphTransport, TransportFuture},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let transport = Arc::new(FixtureTransport::default().with(
		"/v1.0/sites/site1/drives/drive1/root:/General:/children",
		GraphResponse::json_body(200, &json!({ "value": [{ "name": "report.docx" }] })),
	));
	let context = AuthContext::without_expiry("fixture-token");
	let client = GraphClient::with_transport(context, transport);
	let listing = client.list_folder_contents("site1", "drive1", "General").await?;

	println!("Fixture listing: {listing}.");

	match client.get_item_metadata_by_path("site1", "drive1", "General/missing.docx").await {
		Err(Error::Api(e)) => println!("Unmatched fixture surfaced as an API error: {e}."),
		other => println!("Unexpected outcome: {other:?}."),
	}
	match client.get("offline/endpoint").await {
		Err(Error::Transport(e)) => println!("Transport failure kept its source: {e}."),
		other => println!("Unexpected outcome: {other:?}."),
	}

	Ok(())
}

#[derive(Debug, thiserror::Error)]
#[error("The fixture transport is offline for {path}.")]
struct Offline {
	path: String,
}

/// Serves canned responses keyed by URL path.
#[derive(Default)]
struct FixtureTransport {
	fixtures: BTreeMap<String, GraphResponse>,
}
impl FixtureTransport {
	fn with(mut self, path: &str, response: GraphResponse) -> Self {
		self.fixtures.insert(path.to_owned(), response);

		self
	}
}
impl GraphTransport for FixtureTransport {
	type TransportError = Offline;

	fn execute(&self, request: GraphRequest) -> TransportFuture<'_, Self::TransportError> {
		let path = request.url.path().to_owned();
		let outcome = if path.starts_with("/v1.0/offline") {
			Err(Offline { path })
		} else {
			Ok(self
				.fixtures
				.get(&path)
				.cloned()
				.unwrap_or_else(|| GraphResponse::new(404, "itemNotFound")))
		};

		Box::pin(async move { outcome })
	}
}
