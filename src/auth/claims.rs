//! JWT payload inspection for access-token diagnostics.
//!
//! Graph rejects app-only tokens that carry neither a `roles` nor an `scp` claim, which
//! usually means the application permissions were never consented. [`TokenClaims`]
//! decodes the payload segment without verifying the signature so callers can report
//! that situation before issuing requests.

// crates.io
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
// self
use crate::_prelude::*;

/// Errors raised while decoding a token payload.
#[derive(Debug, ThisError)]
pub enum ClaimsError {
	/// Token does not have the `header.payload.signature` shape.
	#[error("Access token has {segments} segments; a JWT has 3.")]
	MalformedToken {
		/// Number of dot-separated segments found.
		segments: usize,
	},
	/// Payload segment is not valid base64url.
	#[error("Access token payload is not valid base64url.")]
	Base64(#[from] base64::DecodeError),
	/// Payload segment is not a JSON object.
	#[error("Access token payload is not valid JSON.")]
	Json(#[from] serde_json::Error),
}

/// Claims carried by a Microsoft identity platform access token.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
	/// Issuer.
	#[serde(default)]
	pub iss: Option<String>,
	/// Audience; Graph tokens use `https://graph.microsoft.com` or its app id.
	#[serde(default)]
	pub aud: Option<String>,
	/// Application id of the client that requested the token.
	#[serde(default)]
	pub appid: Option<String>,
	/// Application permissions granted to the client.
	#[serde(default)]
	pub roles: Vec<String>,
	/// Space-separated delegated permissions.
	#[serde(default)]
	pub scp: Option<String>,
	/// Expiry as seconds since the Unix epoch.
	#[serde(default)]
	pub exp: Option<i64>,
	/// Every other claim, untouched.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}
impl TokenClaims {
	/// Decodes the payload segment of `token`.
	pub fn decode(token: &str) -> Result<Self, ClaimsError> {
		let segments = token.split('.').collect::<Vec<_>>();

		if segments.len() != 3 {
			return Err(ClaimsError::MalformedToken { segments: segments.len() });
		}

		let payload = URL_SAFE_NO_PAD.decode(segments[1].trim_end_matches('='))?;

		Ok(serde_json::from_slice(&payload)?)
	}

	/// Returns `true` when the token grants any application role or delegated scope.
	pub fn has_permissions(&self) -> bool {
		!self.roles.is_empty() || self.scp.as_deref().is_some_and(|scp| !scp.trim().is_empty())
	}

	/// Delegated scopes split on whitespace.
	pub fn scopes(&self) -> impl Iterator<Item = &str> {
		self.scp.as_deref().unwrap_or_default().split_whitespace()
	}

	/// Expiry instant, when the `exp` claim is present and in range.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		self.exp.and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn token_with(payload: &Value) -> String {
		let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
		let body = URL_SAFE_NO_PAD.encode(payload.to_string());

		format!("{header}.{body}.signature")
	}

	#[test]
	fn decodes_application_token() {
		let token = token_with(&serde_json::json!({
			"iss": "https://sts.windows.net/tenant/",
			"aud": "https://graph.microsoft.com",
			"appid": "app-123",
			"roles": ["Sites.Read.All"],
			"exp": 1_700_000_000,
			"tid": "tenant"
		}));
		let claims = TokenClaims::decode(&token).expect("Token payload should decode.");

		assert_eq!(claims.aud.as_deref(), Some("https://graph.microsoft.com"));
		assert_eq!(claims.roles, vec!["Sites.Read.All".to_owned()]);
		assert_eq!(claims.extra.get("tid"), Some(&Value::from("tenant")));
		assert!(claims.has_permissions());
		assert_eq!(
			claims.expires_at().map(OffsetDateTime::unix_timestamp),
			Some(1_700_000_000)
		);
	}

	#[test]
	fn delegated_scopes_split_on_whitespace() {
		let token = token_with(&serde_json::json!({ "scp": "Files.Read  Sites.Read.All" }));
		let claims = TokenClaims::decode(&token).expect("Token payload should decode.");

		assert_eq!(claims.scopes().collect::<Vec<_>>(), ["Files.Read", "Sites.Read.All"]);
		assert!(claims.has_permissions());
	}

	#[test]
	fn missing_roles_and_scopes_are_reported() {
		let token = token_with(&serde_json::json!({ "scp": "  " }));
		let claims = TokenClaims::decode(&token).expect("Token payload should decode.");

		assert!(!claims.has_permissions());
	}

	#[test]
	fn padded_payload_is_tolerated() {
		let token = token_with(&serde_json::json!({ "appid": "a" }));
		let mut parts = token.split('.').map(str::to_owned).collect::<Vec<_>>();

		parts[1].push_str("==");

		let claims =
			TokenClaims::decode(&parts.join(".")).expect("Padded payload should still decode.");

		assert_eq!(claims.appid.as_deref(), Some("a"));
	}

	#[test]
	fn malformed_tokens_are_rejected() {
		assert!(matches!(
			TokenClaims::decode("not-a-jwt"),
			Err(ClaimsError::MalformedToken { segments: 1 })
		));
		assert!(matches!(TokenClaims::decode("a.!!!.c"), Err(ClaimsError::Base64(_))));

		let not_json = format!("a.{}.c", URL_SAFE_NO_PAD.encode("plain"));

		assert!(matches!(TokenClaims::decode(&not_json), Err(ClaimsError::Json(_))));
	}
}
