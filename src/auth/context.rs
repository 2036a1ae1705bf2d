//! Bearer credential context shared by every Graph request.

// self
use crate::{
	_prelude::*,
	auth::{ClaimsError, TokenClaims, TokenSecret},
	http::Headers,
};

/// Header carrying the bearer credential.
pub const AUTHORIZATION: &str = "Authorization";
/// Header announcing JSON request bodies.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Bearer token plus expiry, read by every request a client issues.
///
/// The context is immutable once built. Clients never check expiry themselves; callers
/// that own the token issuer use [`AuthContext::is_token_valid`] to decide when to build
/// a replacement context.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthContext {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Expiry instant reported by the issuer, when known.
	pub token_expiry: Option<OffsetDateTime>,
}
impl AuthContext {
	/// Creates a context for a token expiring at `token_expiry`.
	pub fn new(access_token: impl Into<TokenSecret>, token_expiry: OffsetDateTime) -> Self {
		Self { access_token: access_token.into(), token_expiry: Some(token_expiry) }
	}

	/// Creates a context for a token whose expiry is unknown.
	///
	/// Such a context reports itself as invalid but can still sign requests.
	pub fn without_expiry(access_token: impl Into<TokenSecret>) -> Self {
		Self { access_token: access_token.into(), token_expiry: None }
	}

	/// Header mapping attached to every outbound request.
	pub fn headers(&self) -> Headers {
		let mut headers = Headers::new();

		headers.insert(AUTHORIZATION, format!("Bearer {}", self.access_token.expose()));
		headers.insert(CONTENT_TYPE, "application/json".into());

		headers
	}

	/// Returns `true` while the provided instant precedes the expiry.
	pub fn is_token_valid_at(&self, instant: OffsetDateTime) -> bool {
		self.token_expiry.is_some_and(|expiry| instant < expiry)
	}

	/// Checks validity against the current UTC instant.
	pub fn is_token_valid(&self) -> bool {
		self.is_token_valid_at(OffsetDateTime::now_utc())
	}

	/// Decodes the JWT payload of the access token for diagnostics.
	pub fn claims(&self) -> Result<TokenClaims, ClaimsError> {
		TokenClaims::decode(self.access_token.expose())
	}
}
impl Debug for AuthContext {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthContext")
			.field("access_token", &"<redacted>")
			.field("token_expiry", &self.token_expiry)
			.finish()
	}
}
