//! SharePoint site addressing.

// self
use crate::{_prelude::*, error::ConfigError};

const SHAREPOINT_HOST_SUFFIX: &str = ".sharepoint.com";

/// Hostname + site name pair that Graph uses to address a SharePoint site by path.
///
/// `https://contoso.sharepoint.com/sites/team` resolves to hostname
/// `contoso.sharepoint.com` and site `team`. A URL without a second path segment
/// addresses the tenant root site.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SiteAddress {
	url: String,
	hostname: String,
	site_name: Option<String>,
}
impl SiteAddress {
	/// Parses and validates a SharePoint site URL.
	pub fn parse(site_url: &str) -> Result<Self, ConfigError> {
		let invalid = |reason| ConfigError::InvalidSiteUrl { url: site_url.to_owned(), reason };
		let url = Url::parse(site_url).map_err(|_| invalid("not an absolute URL"))?;

		if url.scheme() != "https" {
			return Err(invalid("the scheme must be https"));
		}

		let hostname =
			url.host_str().ok_or_else(|| invalid("the host is missing"))?.to_ascii_lowercase();

		if !hostname.ends_with(SHAREPOINT_HOST_SUFFIX) {
			return Err(invalid("the host must be a sharepoint.com domain"));
		}

		let site_name = url
			.path_segments()
			.and_then(|mut segments| segments.nth(1))
			.filter(|segment| !segment.is_empty())
			.map(str::to_owned);

		Ok(Self { url: site_url.to_owned(), hostname, site_name })
	}

	/// Addresses the root site of a tenant host.
	pub fn root(hostname: impl Into<String>) -> Self {
		let hostname = hostname.into().to_ascii_lowercase();

		Self { url: format!("https://{hostname}"), hostname, site_name: None }
	}

	/// Original site URL.
	pub fn url(&self) -> &str {
		&self.url
	}

	/// Tenant hostname, lowercased.
	pub fn hostname(&self) -> &str {
		&self.hostname
	}

	/// Site name, or `None` for the tenant root site.
	pub fn site_name(&self) -> Option<&str> {
		self.site_name.as_deref()
	}

	/// Relative Graph path addressing the site resource.
	pub fn graph_path(&self) -> String {
		match &self.site_name {
			Some(name) => format!("sites/{}:/sites/{name}", self.hostname),
			None => format!("sites/{}", self.hostname),
		}
	}

	/// Relative Graph path of a child collection of the site (for example `drives`).
	pub fn graph_child_path(&self, child: &str) -> String {
		match &self.site_name {
			Some(_) => format!("{}:/{child}", self.graph_path()),
			None => format!("{}/{child}", self.graph_path()),
		}
	}
}
impl Display for SiteAddress {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.url)
	}
}
impl FromStr for SiteAddress {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn named_site_resolves_host_and_name() {
		let site =
			SiteAddress::parse("https://Contoso.SharePoint.com/sites/team/Shared%20Documents")
				.expect("Named site URL should parse.");

		assert_eq!(site.hostname(), "contoso.sharepoint.com");
		assert_eq!(site.site_name(), Some("team"));
		assert_eq!(site.graph_path(), "sites/contoso.sharepoint.com:/sites/team");
		assert_eq!(
			site.graph_child_path("drives"),
			"sites/contoso.sharepoint.com:/sites/team:/drives"
		);
	}

	#[test]
	fn bare_host_resolves_root_site() {
		for raw in [
			"https://contoso.sharepoint.com",
			"https://contoso.sharepoint.com/",
			"https://contoso.sharepoint.com/sites/",
		] {
			let site = SiteAddress::parse(raw).expect("Root site URL should parse.");

			assert_eq!(site.site_name(), None, "{raw} should address the root site.");
			assert_eq!(site.graph_path(), "sites/contoso.sharepoint.com");
			assert_eq!(site.graph_child_path("drives"), "sites/contoso.sharepoint.com/drives");
		}

		assert_eq!(
			SiteAddress::root("contoso.sharepoint.com").graph_path(),
			"sites/contoso.sharepoint.com"
		);
	}

	#[test]
	fn rejects_non_sharepoint_urls() {
		for raw in [
			"http://contoso.sharepoint.com/sites/team",
			"https://example.com/sites/team",
			"contoso",
		] {
			let err = SiteAddress::parse(raw).expect_err("Invalid site URL should be rejected.");

			assert!(matches!(err, ConfigError::InvalidSiteUrl { .. }), "{raw} produced {err:?}.");
		}
	}

	#[test]
	fn from_str_round_trips_display() {
		let site: SiteAddress =
			"https://contoso.sharepoint.com/sites/team".parse().expect("Site URL should parse.");

		assert_eq!(site.to_string(), "https://contoso.sharepoint.com/sites/team");
	}
}
