//! Optional observability helpers for Graph operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `sharepoint_graph.request` with the
//!   `operation` and `stage` (call site) fields, plus `debug` events for dispatch and
//!   non-success responses.
//! - Enable `metrics` to increment the `sharepoint_graph_request_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Client operations observed by the instrumentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Generic `GET`.
	Get,
	/// Generic `POST`.
	Post,
	/// Drive folder listing.
	ListFolderContents,
	/// Drive item content download.
	GetDocumentContent,
	/// Drive item metadata lookup.
	GetItemMetadata,
	/// Site lookup by hostname + name.
	GetSiteInfo,
	/// Site drive listing.
	ListDocumentLibraries,
	/// Search query.
	Search,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::Get => "get",
			Operation::Post => "post",
			Operation::ListFolderContents => "list_folder_contents",
			Operation::GetDocumentContent => "get_document_content",
			Operation::GetItemMetadata => "get_item_metadata",
			Operation::GetSiteInfo => "get_site_info",
			Operation::ListDocumentLibraries => "list_document_libraries",
			Operation::Search => "search",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Success => "success",
			RequestOutcome::Failure => "failure",
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
