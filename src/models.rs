//! Compact summaries projected from raw Graph payloads.
//!
//! Graph omits properties it has no value for, so every projection carries fixed
//! fallback strings instead of optional fields.

// self
use crate::{_prelude::*, error::DecodeError};

/// Fallback for any missing name, date, URL, or type.
pub const UNKNOWN: &str = "Unknown";
/// Fallback for a missing description.
pub const NO_DESCRIPTION: &str = "No description";
/// Fallback for a search hit without a summary.
pub const NO_SUMMARY: &str = "No summary available";

/// Basic facts about a SharePoint site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSummary {
	/// Display name.
	pub name: String,
	/// Site description.
	pub description: String,
	/// Creation timestamp as reported by Graph.
	pub created: String,
	/// Last modification timestamp as reported by Graph.
	pub last_modified: String,
	/// Browser URL of the site.
	pub web_url: String,
}
impl SiteSummary {
	/// Projects a site resource; a missing `webUrl` falls back to `fallback_web_url`.
	pub fn from_site_info(site_info: Value, fallback_web_url: &str) -> Result<Self, DecodeError> {
		let raw: SiteResource = decode(site_info)?;

		Ok(Self {
			name: or_unknown(raw.display_name),
			description: raw.description.unwrap_or_else(|| NO_DESCRIPTION.into()),
			created: or_unknown(raw.created_date_time),
			last_modified: or_unknown(raw.last_modified_date_time),
			web_url: raw.web_url.unwrap_or_else(|| fallback_web_url.into()),
		})
	}
}

/// Document library (drive) of a site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLibrary {
	/// Library name.
	pub name: String,
	/// Library description.
	pub description: String,
	/// Browser URL of the library.
	pub web_url: String,
	/// Graph drive type, usually `documentLibrary`.
	pub drive_type: String,
	/// Drive identifier, usable as `drive_id` in drive item calls.
	pub id: String,
}
impl DocumentLibrary {
	/// Projects every entry of a drive collection's `value` array.
	pub fn list_from(drives: Value) -> Result<Vec<Self>, DecodeError> {
		let raw: Collection<DriveResource> = decode(drives)?;

		Ok(raw
			.value
			.into_iter()
			.map(|drive| Self {
				name: or_unknown(drive.name),
				description: drive.description.unwrap_or_else(|| NO_DESCRIPTION.into()),
				web_url: or_unknown(drive.web_url),
				drive_type: or_unknown(drive.drive_type),
				id: or_unknown(drive.id),
			})
			.collect())
	}
}

/// Single search hit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
	/// Name of the matched resource.
	pub title: String,
	/// Browser URL of the matched resource.
	pub url: String,
	/// OData type of the matched resource, for example `#microsoft.graph.driveItem`.
	#[serde(rename = "type")]
	pub kind: String,
	/// Highlighted summary text.
	pub summary: String,
}
impl SearchHit {
	/// Flattens the hits of the first search response.
	///
	/// Only `value[0]` is read since the client sends one request per query. An empty
	/// `value` array yields no hits.
	pub fn collect(search_response: Value) -> Result<Vec<Self>, DecodeError> {
		let raw: Collection<SearchResponse> = decode(search_response)?;
		let Some(first) = raw.value.into_iter().next() else {
			return Ok(Vec::new());
		};

		Ok(first
			.hits_containers
			.into_iter()
			.flat_map(|container| container.hits)
			.map(|hit| {
				let resource = hit.resource.unwrap_or_default();

				Self {
					title: or_unknown(resource.name),
					url: or_unknown(resource.web_url),
					kind: or_unknown(resource.odata_type),
					summary: hit.summary.unwrap_or_else(|| NO_SUMMARY.into()),
				}
			})
			.collect())
	}
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SiteResource {
	display_name: Option<String>,
	description: Option<String>,
	created_date_time: Option<String>,
	last_modified_date_time: Option<String>,
	web_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Collection<T> {
	#[serde(default = "Vec::new")]
	value: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveResource {
	id: Option<String>,
	name: Option<String>,
	description: Option<String>,
	web_url: Option<String>,
	drive_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
	#[serde(default)]
	hits_containers: Vec<HitsContainer>,
}

#[derive(Debug, Deserialize)]
struct HitsContainer {
	#[serde(default)]
	hits: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
struct RawHit {
	summary: Option<String>,
	resource: Option<HitResource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HitResource {
	name: Option<String>,
	web_url: Option<String>,
	#[serde(rename = "@odata.type")]
	odata_type: Option<String>,
}

fn decode<T>(value: Value) -> Result<T, DecodeError>
where
	T: DeserializeOwned,
{
	serde_path_to_error::deserialize(value).map_err(|source| DecodeError { source, status: None })
}

fn or_unknown(value: Option<String>) -> String {
	value.unwrap_or_else(|| UNKNOWN.into())
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn site_summary_uses_fallbacks() {
		let summary = SiteSummary::from_site_info(
			json!({ "id": "x" }),
			"https://contoso.sharepoint.com/sites/team",
		)
		.expect("Sparse site payload should project.");

		assert_eq!(summary.name, UNKNOWN);
		assert_eq!(summary.description, NO_DESCRIPTION);
		assert_eq!(summary.created, UNKNOWN);
		assert_eq!(summary.last_modified, UNKNOWN);
		assert_eq!(summary.web_url, "https://contoso.sharepoint.com/sites/team");
	}

	#[test]
	fn site_summary_keeps_reported_values() {
		let summary = SiteSummary::from_site_info(
			json!({
				"displayName": "Team",
				"description": "Team site",
				"createdDateTime": "2024-01-01T00:00:00Z",
				"lastModifiedDateTime": "2024-02-01T00:00:00Z",
				"webUrl": "https://contoso.sharepoint.com/sites/team"
			}),
			"ignored",
		)
		.expect("Full site payload should project.");

		assert_eq!(summary.name, "Team");
		assert_eq!(summary.description, "Team site");
		assert_eq!(summary.created, "2024-01-01T00:00:00Z");
		assert_eq!(summary.last_modified, "2024-02-01T00:00:00Z");
		assert_eq!(summary.web_url, "https://contoso.sharepoint.com/sites/team");
	}

	#[test]
	fn libraries_project_each_drive() {
		let libraries = DocumentLibrary::list_from(json!({
			"value": [
				{
					"id": "b!1",
					"name": "Documents",
					"driveType": "documentLibrary",
					"webUrl": "https://x/d"
				},
				{}
			]
		}))
		.expect("Drive collection should project.");

		assert_eq!(libraries.len(), 2);
		assert_eq!(libraries[0].id, "b!1");
		assert_eq!(libraries[0].description, NO_DESCRIPTION);
		assert_eq!(libraries[1].name, UNKNOWN);
		assert_eq!(libraries[1].drive_type, UNKNOWN);
		assert!(DocumentLibrary::list_from(json!({})).expect("Missing value is empty.").is_empty());
	}

	#[test]
	fn search_hits_flatten_containers() {
		let hits = SearchHit::collect(json!({
			"value": [{
				"hitsContainers": [
					{ "hits": [{
						"summary": "Quarterly <c0>report</c0>",
						"resource": {
							"@odata.type": "#microsoft.graph.driveItem",
							"name": "report.docx",
							"webUrl": "https://x/report.docx"
						}
					}] },
					{ "hits": [{ "resource": {} }, {}] }
				]
			}]
		}))
		.expect("Search payload should project.");

		assert_eq!(hits.len(), 3);
		assert_eq!(hits[0].title, "report.docx");
		assert_eq!(hits[0].kind, "#microsoft.graph.driveItem");
		assert_eq!(hits[1].summary, NO_SUMMARY);
		assert_eq!(hits[2].url, UNKNOWN);
		assert!(
			SearchHit::collect(json!({ "value": [] })).expect("Empty value is fine.").is_empty()
		);
	}

	#[test]
	fn search_hit_serializes_kind_as_type() {
		let hit = SearchHit {
			title: "a".into(),
			url: "b".into(),
			kind: "c".into(),
			summary: "d".into(),
		};

		assert_eq!(serde_json::to_value(&hit).expect("Hit should serialize.")["type"], "c");
	}

	#[test]
	fn mistyped_fields_report_their_path() {
		let err = DocumentLibrary::list_from(json!({ "value": [{ "name": 7 }] }))
			.expect_err("Numeric name should fail.");

		assert_eq!(err.source.path().to_string(), "value[0].name");
		assert_eq!(err.status, None);
	}
}
