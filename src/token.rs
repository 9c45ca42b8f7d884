//! Bearer token acquisition, expiry tracking, and single-flight refresh.
//!
//! [`TokenManager`] owns the only mutable state in the client: the cached
//! [`AccessToken`]. Reads take a cheap shared lock; refreshes are serialized through an
//! async guard so concurrent callers that observe an expired token piggy-back on the
//! same in-flight authentication instead of stampeding the token endpoint.

// crates.io
use ::http::{
	HeaderMap, HeaderValue, Method,
	header::{ACCEPT, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, Credentials, ExpiresIn, TokenSecret},
	config::ClientConfig,
	error::AuthenticationError,
	http::{ApiHttpClient, HttpRequest},
	obs::{self, CallKind, CallOutcome, CallSpan},
	transport::classify,
};

/// Token endpoint path.
pub const TOKEN_PATH: &str = "/v2/token";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenPayload<'a> {
	client_id: &'a str,
	client_secret: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	expires_in: Option<ExpiresIn>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
	token: String,
	expires_in: Option<u64>,
}

/// Guarantees every outgoing request carries a currently valid bearer token.
pub struct TokenManager<C>
where
	C: ?Sized + ApiHttpClient,
{
	http_client: Arc<C>,
	credentials: Credentials,
	token_url: Url,
	cached: RwLock<Option<AccessToken>>,
	refresh_guard: AsyncMutex<()>,
}
impl<C> TokenManager<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a manager that authenticates `config.credentials` against the configured host.
	pub fn new(config: &ClientConfig, http_client: impl Into<Arc<C>>) -> Result<Self> {
		Ok(Self {
			http_client: http_client.into(),
			credentials: config.credentials.clone(),
			token_url: config.endpoint(TOKEN_PATH)?,
			cached: RwLock::new(None),
			refresh_guard: AsyncMutex::new(()),
		})
	}

	/// Requests a new token, optionally asking for a specific lifetime in seconds.
	///
	/// The lifetime must lie in `[5, 604800]`; anything else fails with
	/// [`crate::error::ValidationError::ExpiresInOutOfRange`] before any network call.
	/// The new token replaces the cached one even if that one was still valid.
	pub async fn authenticate(&self, expires_in: Option<u64>) -> Result<TokenSecret> {
		let expires_in = expires_in.map(ExpiresIn::new).transpose()?;
		let _singleflight = self.refresh_guard.lock().await;

		self.issue(expires_in, true).await
	}

	/// Returns the cached token while it is valid, authenticating otherwise.
	pub async fn valid_token(&self) -> Result<TokenSecret> {
		if let Some(secret) = self.cached_secret_at(OffsetDateTime::now_utc()) {
			return Ok(secret);
		}

		let _singleflight = self.refresh_guard.lock().await;

		// Another caller may have refreshed while this one waited on the guard.
		if let Some(secret) = self.cached_secret_at(OffsetDateTime::now_utc()) {
			return Ok(secret);
		}

		self.issue(None, false).await
	}

	/// Snapshot of the cached token, valid or not.
	pub fn current(&self) -> Option<AccessToken> {
		self.cached.read().clone()
	}

	/// Drops the cached token so the next request re-authenticates.
	pub fn invalidate(&self) {
		*self.cached.write() = None;
	}

	fn cached_secret_at(&self, now: OffsetDateTime) -> Option<TokenSecret> {
		self.cached
			.read()
			.as_ref()
			.filter(|token| !token.is_expired_at(now))
			.map(|token| token.secret.clone())
	}

	async fn issue(&self, expires_in: Option<ExpiresIn>, forced: bool) -> Result<TokenSecret> {
		const KIND: CallKind = CallKind::Authenticate;

		let span = CallSpan::new(KIND, Method::POST.as_str(), TOKEN_PATH);

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let token = self.request_token(expires_in).await?;
				let secret = token.secret.clone();

				obs::trace_token_issued(token.remaining_at(token.issued_at), forced);

				*self.cached.write() = Some(token);

				Ok(secret)
			})
			.await;

		obs::record_call_outcome(KIND, CallOutcome::of(&result));

		result
	}

	async fn request_token(&self, expires_in: Option<ExpiresIn>) -> Result<AccessToken> {
		let payload = TokenPayload {
			client_id: self.credentials.client_id(),
			client_secret: self.credentials.client_secret().expose(),
			expires_in,
		};
		let body =
			serde_json::to_vec(&payload).map_err(|e| AuthenticationError::failed(0, e))?;
		let mut headers = HeaderMap::new();

		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

		let request =
			HttpRequest { method: Method::POST, url: self.token_url.clone(), headers, body: Some(body) };
		let response = self
			.http_client
			.execute(request)
			.await
			.map_err(|e| AuthenticationError::failed(0, e))?;

		if response.status != 200 {
			let details = classify::parse_body(&response.body);
			let message = classify::body_message(&details).unwrap_or("Authentication failed").to_owned();

			return Err(AuthenticationError::rejected(message, response.status, Some(details)).into());
		}

		let mut de = serde_json::Deserializer::from_slice(&response.body);
		let parsed: TokenResponse = serde_path_to_error::deserialize(&mut de)
			.map_err(|e| AuthenticationError::failed(response.status, e))?;

		Ok(AccessToken::issued(
			parsed.token,
			OffsetDateTime::now_utc(),
			parsed.expires_in.unwrap_or(AccessToken::DEFAULT_EXPIRES_IN),
		))
	}
}
impl<C> Debug for TokenManager<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenManager")
			.field("credentials", &self.credentials)
			.field("token_url", &self.token_url.as_str())
			.field("cached", &*self.cached.read())
			.finish()
	}
}
