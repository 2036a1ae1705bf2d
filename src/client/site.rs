//! Site discovery and search.

// self
use crate::{
	_prelude::*,
	client::{GraphClient, STATUS_OK, encode_payload},
	config::SiteAddress,
	http::{GraphTransport, HttpMethod},
	models::{DocumentLibrary, SearchHit, SiteSummary},
	obs::Operation,
};

/// Relative path of the Graph search endpoint.
pub const SEARCH_PATH: &str = "search/query";
/// Entity types searched when the request does not narrow them.
pub const DEFAULT_ENTITY_TYPES: [&str; 3] = ["driveItem", "listItem", "list"];

/// Single search query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
	/// KQL query string.
	pub query: String,
	/// Entity types to search.
	pub entity_types: Vec<String>,
	/// Geographic region, required by Graph for application permissions.
	pub region: Option<String>,
}
impl SearchRequest {
	/// Creates a request over the default entity types.
	pub fn new(query: impl Into<String>) -> Self {
		Self {
			query: query.into(),
			entity_types: DEFAULT_ENTITY_TYPES.iter().map(|kind| (*kind).to_owned()).collect(),
			region: None,
		}
	}

	/// Replaces the searched entity types.
	pub fn entity_types<I, S>(mut self, entity_types: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.entity_types = entity_types.into_iter().map(Into::into).collect();

		self
	}

	/// Sets the search region (for example `NAM`).
	pub fn region(mut self, region: impl Into<String>) -> Self {
		self.region = Some(region.into());

		self
	}

	/// Wire body for `POST search/query`.
	pub fn to_payload(&self) -> SearchPayload<'_> {
		SearchPayload {
			requests: [SearchPayloadEntry {
				entity_types: &self.entity_types,
				query: SearchPayloadQuery { query_string: &self.query },
				region: self.region.as_deref(),
			}],
		}
	}
}

/// Borrowed wire body of a search request.
#[derive(Debug, Serialize)]
pub struct SearchPayload<'a> {
	requests: [SearchPayloadEntry<'a>; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchPayloadEntry<'a> {
	entity_types: &'a [String],
	query: SearchPayloadQuery<'a>,
	#[serde(skip_serializing_if = "Option::is_none")]
	region: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchPayloadQuery<'a> {
	query_string: &'a str,
}

impl<T> GraphClient<T>
where
	T: ?Sized + GraphTransport,
{
	/// Fetches the site resource.
	pub async fn get_site_info(&self, site: &SiteAddress) -> Result<Value> {
		let path = site.graph_path();

		self.observe(Operation::GetSiteInfo, "get_site_info", async move {
			let response = self.send(HttpMethod::Get, &path, None, STATUS_OK).await?;

			Ok(response.json()?)
		})
		.await
	}

	/// Lists the drives (document libraries) of the site.
	pub async fn list_document_libraries(&self, site: &SiteAddress) -> Result<Value> {
		let path = site.graph_child_path("drives");

		self.observe(Operation::ListDocumentLibraries, "list_document_libraries", async move {
			let response = self.send(HttpMethod::Get, &path, None, STATUS_OK).await?;

			Ok(response.json()?)
		})
		.await
	}

	/// Runs a search query and returns the raw Graph answer.
	///
	/// Unlike [`GraphClient::post`], this accepts `200`, which is what the search endpoint
	/// answers with.
	pub async fn search(&self, request: &SearchRequest) -> Result<Value> {
		let body = encode_payload(&request.to_payload())?;

		self.observe(Operation::Search, "search", async move {
			let response = self.send(HttpMethod::Post, SEARCH_PATH, Some(body), STATUS_OK).await?;

			Ok(response.json()?)
		})
		.await
	}

	/// Checks whether the credential can read the site.
	///
	/// Graph refusing the request yields `Ok(false)`; transport and configuration failures
	/// still surface as errors.
	pub async fn probe_site(&self, site: &SiteAddress) -> Result<bool> {
		match self.get_site_info(site).await {
			Ok(_) => Ok(true),
			Err(Error::Api(_)) => Ok(false),
			Err(e) => Err(e),
		}
	}

	/// Site resource projected onto a [`SiteSummary`].
	pub async fn site_summary(&self, site: &SiteAddress) -> Result<SiteSummary> {
		let info = self.get_site_info(site).await?;

		Ok(SiteSummary::from_site_info(info, site.url())?)
	}

	/// Site drives projected onto [`DocumentLibrary`] entries.
	pub async fn document_libraries(&self, site: &SiteAddress) -> Result<Vec<DocumentLibrary>> {
		let drives = self.list_document_libraries(site).await?;

		Ok(DocumentLibrary::list_from(drives)?)
	}

	/// Search results flattened into [`SearchHit`] entries.
	pub async fn search_hits(&self, request: &SearchRequest) -> Result<Vec<SearchHit>> {
		let response = self.search(request).await?;

		Ok(SearchHit::collect(response)?)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn payload_uses_default_entity_types() {
		let payload = serde_json::to_value(SearchRequest::new("budget").to_payload())
			.expect("Search payload should serialize.");

		assert_eq!(
			payload,
			json!({
				"requests": [{
					"entityTypes": ["driveItem", "listItem", "list"],
					"query": { "queryString": "budget" }
				}]
			})
		);
	}

	#[test]
	fn payload_carries_overrides() {
		let request = SearchRequest::new("q").entity_types(["driveItem"]).region("NAM");
		let payload =
			serde_json::to_value(request.to_payload()).expect("Search payload should serialize.");

		assert_eq!(payload["requests"][0]["entityTypes"], json!(["driveItem"]));
		assert_eq!(payload["requests"][0]["region"], "NAM");
	}
}
