//! Prints a site summary, its document libraries, and the root folder of the first library.
//!
//! With `GRAPH_ACCESS_TOKEN` and `SITE_URL` exported, the demo talks to Microsoft Graph
//! (honoring `GRAPH_BASE_URL` when set). Otherwise it starts a local mock server.

// std
use std::sync::Arc;
// crates.io
use color_eyre::{Result, eyre::eyre};
use httpmock::prelude::*;
use serde_json::json;
// self
use sharepoint_graph::{
	auth::AuthContext,
	client::{GraphClient, ReqwestGraphClient},
	config::{ClientConfig, SiteAddress},
	http::ReqwestTransport,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	match std::env::var("GRAPH_ACCESS_TOKEN") {
		Ok(token) => {
			let config = ClientConfig::from_env()?;
			let site = config.site.clone().ok_or_else(|| eyre!("SITE_URL must be set."))?;

			overview(&client(&config, token), &site).await
		},
		Err(_) => {
			let server = MockServer::start_async().await;

			mock_site(&server).await;

			let config =
				ClientConfig::builder().base_url(format!("{}/v1.0", server.base_url())).build()?;
			let site = SiteAddress::parse("https://contoso.sharepoint.com/sites/team")?;

			overview(&client(&config, "demo-token".into()), &site).await
		},
	}
}

fn client(config: &ClientConfig, token: String) -> ReqwestGraphClient {
	let context = AuthContext::without_expiry(token);

	GraphClient::from_config(config, context, Arc::new(ReqwestTransport::default()))
}

async fn overview(client: &ReqwestGraphClient, site: &SiteAddress) -> Result<()> {
	if !client.probe_site(site).await? {
		return Err(eyre!("The credential cannot read {site}."));
	}

	let site_info = client.get_site_info(site).await?;
	let summary = client.site_summary(site).await?;

	println!("{}", serde_json::to_string_pretty(&summary)?);

	let libraries = client.document_libraries(site).await?;

	println!("{}", serde_json::to_string_pretty(&libraries)?);

	let (Some(site_id), Some(library)) = (site_info["id"].as_str(), libraries.first()) else {
		return Ok(());
	};
	let listing = client.list_folder_contents(site_id, &library.id, "").await?;

	for item in listing["value"].as_array().into_iter().flatten() {
		println!("- {}", item["name"].as_str().unwrap_or("?"));
	}

	Ok(())
}

async fn mock_site(server: &MockServer) {
	server
		.mock_async(|when, then| {
			when.method(GET).path("/v1.0/sites/contoso.sharepoint.com:/sites/team");
			then.status(200).json_body(json!({
				"id": "contoso.sharepoint.com,site-guid,web-guid",
				"displayName": "Team",
				"createdDateTime": "2024-01-01T00:00:00Z",
				"webUrl": "https://contoso.sharepoint.com/sites/team"
			}));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/v1.0/sites/contoso.sharepoint.com:/sites/team:/drives");
			then.status(200).json_body(json!({
				"value": [{ "id": "b!docs", "name": "Documents", "driveType": "documentLibrary" }]
			}));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path(
				"/v1.0/sites/contoso.sharepoint.com,site-guid,web-guid/drives/b!docs/root/children",
			);
			then.status(200).json_body(json!({
				"value": [{ "name": "General", "folder": { "childCount": 3 } }]
			}));
		})
		.await;
}
