//! Path-addressed drive item helpers.
//!
//! Graph addresses a drive item by path with the `root:/{path}:` syntax; the trailing
//! colon closes the path so a navigation segment (`/children`, `/content`) can follow.
//! The drive root itself is plain `root`.

// crates.io
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
// self
use crate::{
	_prelude::*,
	client::{GraphClient, STATUS_OK},
	error::ConfigError,
	http::{GraphTransport, HttpMethod},
	obs::Operation,
};

/// Characters escaped inside a drive item path segment. Everything else (including `:`)
/// passes through so ordinary names keep their literal form.
const ITEM_PATH_SEGMENT: &AsciiSet = &CONTROLS
	.add(b' ')
	.add(b'"')
	.add(b'#')
	.add(b'%')
	.add(b'<')
	.add(b'>')
	.add(b'?')
	.add(b'\\')
	.add(b'`')
	.add(b'{')
	.add(b'}');

impl<T> GraphClient<T>
where
	T: ?Sized + GraphTransport,
{
	/// Lists the children of a folder addressed by path; `""` lists the drive root.
	///
	/// The Graph payload (`{ "value": [ ... ] }`) is returned as received, without paging.
	pub async fn list_folder_contents(
		&self,
		site_id: &str,
		drive_id: &str,
		path: &str,
	) -> Result<Value> {
		self.observe(Operation::ListFolderContents, "list_folder_contents", async move {
			let relative = children_path(site_id, drive_id, path)?;
			let response = self.send(HttpMethod::Get, &relative, None, STATUS_OK).await?;

			Ok(response.json()?)
		})
		.await
	}

	/// Downloads the raw bytes of the file at `path`.
	pub async fn get_document_content_by_path(
		&self,
		site_id: &str,
		drive_id: &str,
		path: &str,
	) -> Result<Vec<u8>> {
		self.observe(Operation::GetDocumentContent, "get_document_content_by_path", async move {
			let relative = content_path(site_id, drive_id, path)?;
			let response = self.send(HttpMethod::Get, &relative, None, STATUS_OK).await?;

			Ok(response.into_bytes())
		})
		.await
	}

	/// Fetches the metadata of the item at `path`; `""` addresses the drive root item.
	///
	/// Fields such as `id`, `name`, `size`, and `webUrl` pass through untouched.
	pub async fn get_item_metadata_by_path(
		&self,
		site_id: &str,
		drive_id: &str,
		path: &str,
	) -> Result<Value> {
		self.observe(Operation::GetItemMetadata, "get_item_metadata_by_path", async move {
			let relative = item_path(site_id, drive_id, path)?;
			let response = self.send(HttpMethod::Get, &relative, None, STATUS_OK).await?;

			Ok(response.json()?)
		})
		.await
	}
}

/// Relative path of a folder's children collection.
pub fn children_path(site_id: &str, drive_id: &str, path: &str) -> Result<String> {
	let base = drive_base(site_id, drive_id);

	Ok(match encode_item_path(path)? {
		Some(encoded) => format!("{base}/root:/{encoded}:/children"),
		None => format!("{base}/root/children"),
	})
}

/// Relative path of a file's content stream.
pub fn content_path(site_id: &str, drive_id: &str, path: &str) -> Result<String> {
	let encoded = encode_item_path(path)?
		.ok_or(ConfigError::EmptyItemPath { operation: "get_document_content_by_path" })?;

	Ok(format!("{}/root:/{encoded}:/content", drive_base(site_id, drive_id)))
}

/// Relative path of a drive item resource.
pub fn item_path(site_id: &str, drive_id: &str, path: &str) -> Result<String> {
	let base = drive_base(site_id, drive_id);

	Ok(match encode_item_path(path)? {
		Some(encoded) => format!("{base}/root:/{encoded}"),
		None => format!("{base}/root"),
	})
}

fn drive_base(site_id: &str, drive_id: &str) -> String {
	format!("sites/{site_id}/drives/{drive_id}")
}

/// Normalizes a drive item path: outer and repeated `/` are dropped and each segment is
/// escaped. Returns `None` when nothing but separators remain.
///
/// `.` and `..` segments are refused; once joined they would address another item, or
/// another drive entirely.
fn encode_item_path(path: &str) -> Result<Option<String>, ConfigError> {
	let mut encoded = Vec::new();

	for segment in path.split('/').filter(|segment| !segment.is_empty()) {
		if matches!(segment, "." | "..") {
			return Err(ConfigError::DotSegmentInPath { path: path.to_owned() });
		}

		encoded.push(utf8_percent_encode(segment, ITEM_PATH_SEGMENT).to_string());
	}

	Ok(if encoded.is_empty() { None } else { Some(encoded.join("/")) })
}
