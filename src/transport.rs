//! Authenticated request dispatch.
//!
//! [`Transport`] performs one HTTP exchange per call. Every call obtains a valid bearer
//! token from its [`TokenManager`], composes headers (instance defaults, then
//! `Authorization`, then the body's content type, then caller headers, with later
//! layers winning), and runs the response through [`classify`].

pub mod classify;
pub mod options;

pub use options::*;

// crates.io
use ::http::{
	HeaderMap, HeaderValue, Method,
	header::{AUTHORIZATION, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	config::ClientConfig,
	error::{ApiError, AuthenticationError, ValidationError},
	http::{ApiHttpClient, HttpRequest, HttpResponse},
	obs::{self, CallKind, CallOutcome, CallSpan},
	token::TokenManager,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Content type used when a file's media type cannot be guessed.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

#[cfg(feature = "reqwest")]
/// Transport specialized for the crate's default reqwest stack.
pub type ReqwestTransport = Transport<ReqwestHttpClient>;

/// Authenticated HTTP transport shared by every resource facade.
pub struct Transport<C>
where
	C: ?Sized + ApiHttpClient,
{
	config: ClientConfig,
	http_client: Arc<C>,
	tokens: TokenManager<C>,
}
impl<C> Transport<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a transport that reuses the caller-provided HTTP client.
	pub fn with_http_client(config: ClientConfig, http_client: impl Into<Arc<C>>) -> Result<Self> {
		let http_client = http_client.into();
		let tokens = TokenManager::new(&config, http_client.clone())?;

		Ok(Self { config, http_client, tokens })
	}

	/// Configuration this transport was built with.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Token manager owning the cached bearer token.
	pub fn tokens(&self) -> &TokenManager<C> {
		&self.tokens
	}

	/// Requests a new token, optionally with an explicit lifetime in `[5, 604800]` seconds.
	pub async fn authenticate(&self, expires_in: Option<u64>) -> Result<TokenSecret> {
		self.tokens.authenticate(expires_in).await
	}

	/// Issues a `GET` request.
	pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
		self.request(Method::GET, path, RequestOptions::new().query(query)).await
	}

	/// Issues a `POST` request with a JSON body.
	pub async fn post(&self, path: &str, body: Value, query: &[(&str, &str)]) -> Result<Value> {
		self.request(Method::POST, path, RequestOptions::new().json(body).query(query)).await
	}

	/// Issues a `DELETE` request.
	pub async fn delete(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
		self.request(Method::DELETE, path, RequestOptions::new().query(query)).await
	}

	/// Uploads a local file as the raw request body.
	///
	/// The whole file is read into memory before the request is sent.
	///
	/// The content type is guessed from the file name, falling back to
	/// [`FALLBACK_CONTENT_TYPE`]. A missing file fails with
	/// [`ValidationError::FileNotFound`] before any network call.
	pub async fn upload(
		&self,
		path: &str,
		file: impl AsRef<Path>,
		query: &[(&str, &str)],
	) -> Result<Value> {
		let file = file.as_ref();

		if !file.exists() {
			return Err(ValidationError::FileNotFound { path: file.display().to_string() }.into());
		}

		let bytes = std::fs::read(file).map_err(|source| ValidationError::FileRead {
			path: file.display().to_string(),
			source,
		})?;
		let content_type = mime_guess::from_path(file).first_raw().unwrap_or(FALLBACK_CONTENT_TYPE);

		self.upload_content(path, bytes, content_type, query).await
	}

	/// Uploads raw bytes with an explicit content type.
	pub async fn upload_content(
		&self,
		path: &str,
		bytes: impl Into<Vec<u8>>,
		content_type: &str,
		query: &[(&str, &str)],
	) -> Result<Value> {
		let options = RequestOptions::new().raw(bytes, content_type).query(query);

		self.request(Method::POST, path, options).await
	}

	/// Downloads a resource and returns its raw bytes.
	///
	/// Successful bodies are returned untouched. Every status of 400 or above, 429
	/// included, fails with [`ApiError`].
	pub async fn download(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<u8>> {
		const KIND: CallKind = CallKind::Download;

		let method = Method::GET;
		let span = CallSpan::new(KIND, method.as_str(), path);

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let response = self.dispatch(method, path, RequestOptions::new().query(query)).await?;

				classify::check_status(&response)?;

				Ok(response.body)
			})
			.await;

		obs::record_call_outcome(KIND, CallOutcome::of(&result));

		result
	}

	/// Issues a request described by `options` and classifies the response.
	///
	/// The general form every other helper composes from.
	pub async fn request(
		&self,
		method: Method,
		path: &str,
		options: RequestOptions,
	) -> Result<Value> {
		const KIND: CallKind = CallKind::Request;

		let span = CallSpan::new(KIND, method.as_str(), path);

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let response = self.dispatch(method, path, options).await?;

				classify::classify(response)
			})
			.await;

		obs::record_call_outcome(KIND, CallOutcome::of(&result));

		result
	}

	async fn dispatch(
		&self,
		method: Method,
		path: &str,
		options: RequestOptions,
	) -> Result<HttpResponse> {
		let RequestOptions { query, body, headers: caller_headers } = options;
		let mut url = self.config.endpoint(path)?;

		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(query.iter());
		}

		let (body, content_type) = match body {
			RequestBody::Empty => (None, None),
			RequestBody::Json(value) => {
				let bytes = serde_json::to_vec(&value).map_err(ApiError::transport)?;

				(Some(bytes), Some(HeaderValue::from_static("application/json")))
			},
			RequestBody::Raw { bytes, content_type } => {
				let value = HeaderValue::from_str(&content_type)
					.map_err(|_| ValidationError::InvalidContentType { content_type })?;

				(Some(bytes), Some(value))
			},
		};
		let token = self.tokens.valid_token().await?;
		let headers = compose_headers(&self.config.default_headers, &token, content_type, caller_headers)?;
		let request = HttpRequest { method, url, headers, body };

		self.http_client.execute(request).await.map_err(|e| ApiError::transport(e).into())
	}
}
#[cfg(feature = "reqwest")]
impl Transport<ReqwestHttpClient> {
	/// Creates a transport backed by a reqwest client honoring the configured timeout.
	pub fn new(config: ClientConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::from_config(&config)?;

		Self::with_http_client(config, http_client)
	}
}
impl<C> Debug for Transport<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Transport")
			.field("base_url", &self.config.base_url.as_str())
			.field("tokens", &self.tokens)
			.finish()
	}
}

/// Merges header layers; each later layer replaces values of earlier ones.
fn compose_headers(
	defaults: &HeaderMap,
	token: &TokenSecret,
	content_type: Option<HeaderValue>,
	caller: HeaderMap,
) -> Result<HeaderMap> {
	let mut headers = defaults.clone();
	let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token.expose())).map_err(|_| {
		AuthenticationError::rejected("Issued token is not a valid header value.", 0, None)
	})?;

	bearer.set_sensitive(true);
	headers.insert(AUTHORIZATION, bearer);

	if let Some(content_type) = content_type {
		headers.insert(CONTENT_TYPE, content_type);
	}

	headers.extend(caller);

	Ok(headers)
}
