//! Typed async Microsoft Graph client for SharePoint sites: path-addressed drive items,
//! site discovery, and search behind a pluggable transport.
//!
//! [`client::GraphClient`] joins relative Graph paths onto a fixed base URL, attaches the
//! bearer headers derived from an [`auth::AuthContext`], and classifies every response
//! into a typed value or an [`error::Error`]. The HTTP stack is injected through
//! [`http::GraphTransport`]; the default `reqwest` feature provides
//! [`http::ReqwestTransport`].

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod obs;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
