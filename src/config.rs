//! Validated client configuration.
//!
//! [`ClientConfig`] pins the Graph base URL every request is joined onto and, optionally,
//! the SharePoint site the caller works against. Values come either from
//! [`ClientConfigBuilder`] or from the process environment via [`ClientConfig::from_env`].

pub mod site;

pub use site::*;

// self
use crate::{_prelude::*, error::ConfigError};

/// Microsoft Graph v1.0 endpoint.
pub const GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";
/// Environment variable overriding [`GRAPH_BASE_URL`].
pub const ENV_GRAPH_BASE_URL: &str = "GRAPH_BASE_URL";
/// Environment variable holding the SharePoint site URL.
pub const ENV_SITE_URL: &str = "SITE_URL";

/// Immutable client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// Base URL that relative request paths are joined onto.
	pub base_url: Url,
	/// SharePoint site used by site-level helpers, when configured.
	pub site: Option<SiteAddress>,
}
impl ClientConfig {
	/// Creates a new builder seeded with the Graph v1.0 base URL.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}

	/// Loads configuration from the process environment.
	///
	/// Reads [`ENV_GRAPH_BASE_URL`] and [`ENV_SITE_URL`]; unset or blank variables fall back
	/// to defaults.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Loads configuration through an arbitrary variable lookup.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
		let mut builder = Self::builder();

		if let Some(base_url) = read(ENV_GRAPH_BASE_URL) {
			builder = builder.base_url(base_url.trim());
		}
		if let Some(site_url) = read(ENV_SITE_URL) {
			builder = builder.site(SiteAddress::parse(site_url.trim())?);
		}

		builder.build()
	}

	/// Base URL as joined by the client, without a trailing slash.
	pub fn base_url_str(&self) -> &str {
		self.base_url.as_str().trim_end_matches('/')
	}
}
impl Default for ClientConfig {
	fn default() -> Self {
		Self { base_url: default_base_url(), site: None }
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Clone, Debug, Default)]
pub struct ClientConfigBuilder {
	/// Raw base URL override.
	pub base_url: Option<String>,
	/// Site used by site-level helpers.
	pub site: Option<SiteAddress>,
}
impl ClientConfigBuilder {
	/// Overrides the base URL.
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = Some(url.into());

		self
	}

	/// Sets the SharePoint site.
	pub fn site(mut self, site: SiteAddress) -> Self {
		self.site = Some(site);

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let base_url = match self.base_url {
			Some(raw) => Url::parse(&raw).map_err(|source| ConfigError::InvalidBaseUrl { source })?,
			None => default_base_url(),
		};

		validate_base_url(&base_url)?;

		Ok(ClientConfig { base_url, site: self.site })
	}
}

fn default_base_url() -> Url {
	Url::parse(GRAPH_BASE_URL).unwrap_or_else(|_| unreachable!("constant base URL parses"))
}

fn validate_base_url(url: &Url) -> Result<(), ConfigError> {
	let loopback = matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"));

	match url.scheme() {
		"https" => {},
		"http" if loopback => {},
		_ => return Err(ConfigError::InsecureBaseUrl { url: url.to_string() }),
	}

	if url.cannot_be_a_base() || url.query().is_some() || url.fragment().is_some() {
		return Err(ConfigError::UnsupportedBaseUrl { url: url.to_string() });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
		move |key| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| (*v).to_owned())
	}

	#[test]
	fn defaults_to_graph_v1() {
		let config = ClientConfig::builder().build().expect("Default configuration should build.");

		assert_eq!(config.base_url_str(), GRAPH_BASE_URL);
		assert_eq!(config, ClientConfig::default());
		assert!(config.site.is_none());
	}

	#[test]
	fn trailing_slash_is_trimmed_for_joining() {
		let config = ClientConfig::builder()
			.base_url("http://127.0.0.1:8080/")
			.build()
			.expect("Loopback HTTP base URL should be accepted.");

		assert_eq!(config.base_url_str(), "http://127.0.0.1:8080");
	}

	#[test]
	fn rejects_insecure_and_decorated_base_urls() {
		let err = ClientConfig::builder()
			.base_url("http://graph.example.com/v1.0")
			.build()
			.expect_err("Plain HTTP must be rejected for remote hosts.");

		assert!(matches!(err, ConfigError::InsecureBaseUrl { .. }));

		let err = ClientConfig::builder()
			.base_url("https://graph.microsoft.com/v1.0?x=1")
			.build()
			.expect_err("Query strings must be rejected.");

		assert!(matches!(err, ConfigError::UnsupportedBaseUrl { .. }));

		let err = ClientConfig::builder()
			.base_url("not a url")
			.build()
			.expect_err("Unparsable base URLs must be rejected.");

		assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
	}

	#[test]
	fn lookup_reads_base_url_and_site() {
		let config = ClientConfig::from_lookup(lookup(&[
			(ENV_GRAPH_BASE_URL, "https://graph.microsoft.com/beta"),
			(ENV_SITE_URL, "https://contoso.sharepoint.com/sites/team"),
		]))
		.expect("Environment configuration should build.");

		assert_eq!(config.base_url_str(), "https://graph.microsoft.com/beta");

		let site = config.site.expect("Site should be configured.");

		assert_eq!(site.hostname(), "contoso.sharepoint.com");
		assert_eq!(site.site_name(), Some("team"));
	}

	#[test]
	fn blank_variables_fall_back_to_defaults() {
		let config =
			ClientConfig::from_lookup(lookup(&[(ENV_GRAPH_BASE_URL, "  "), (ENV_SITE_URL, "")]))
				.expect("Blank variables should be ignored.");

		assert_eq!(config, ClientConfig::default());
	}

	#[test]
	fn invalid_site_url_surfaces_from_lookup() {
		let err =
			ClientConfig::from_lookup(lookup(&[(ENV_SITE_URL, "https://example.com/sites/x")]))
				.expect_err("Non-SharePoint hosts must be rejected.");

		assert!(matches!(err, ConfigError::InvalidSiteUrl { .. }));
	}
}
