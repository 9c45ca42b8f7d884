//! Transport primitives for API exchanges.
//!
//! [`ApiHttpClient`] is the client's only dependency on an HTTP stack. The transport
//! hands it fully composed [`HttpRequest`] values (absolute URL, merged headers, body
//! bytes) and receives [`HttpResponse`] values with the body already buffered, so
//! classification never depends on the concrete HTTP library. The crate ships
//! [`ReqwestHttpClient`]; tests and callers with their own stack implement the trait.

// std
use std::ops::Deref;
// crates.io
use ::http::{HeaderMap, Method, header::RETRY_AFTER};
use time::format_description::well_known::Rfc2822;
// self
use crate::{_prelude::*, config::ClientConfig, error::ConfigError};

/// Boxed future returned by [`ApiHttpClient::execute`].
pub type HttpFuture<'a, E> = Pin<Box<dyn Future<Output = Result<HttpResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing one request at a time.
///
/// Implementations must be `Send + Sync + 'static` so a client can be shared across
/// tasks, and must return non-2xx responses as `Ok` values: status classification is the
/// transport layer's job, not the HTTP client's. Only failures that prevent a response
/// from being received (DNS, TCP, TLS, timeouts, truncated bodies) belong in the error
/// channel.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and buffers the full response.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError>;
}

/// Fully composed outbound request.
#[derive(Clone, Debug)]
pub struct HttpRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute URL including query parameters.
	pub url: Url,
	/// Final header set (defaults, authorization, content type, caller overrides).
	pub headers: HeaderMap,
	/// Request body bytes, if any.
	pub body: Option<Vec<u8>>,
}

/// Buffered inbound response.
#[derive(Clone, Debug, Default)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response headers.
	pub headers: HeaderMap,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Creates a response with the given status and body and no headers.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, headers: HeaderMap::new(), body: body.into() }
	}

	/// Returns a header value as a trimmed string, if present and valid UTF-8.
	pub fn header_str(&self, name: &str) -> Option<&str> {
		self.headers.get(name)?.to_str().ok().map(str::trim)
	}

	/// Parses a header as an unsigned counter, defaulting to `0` when absent or malformed.
	pub fn header_u64(&self, name: &str) -> u64 {
		self.header_str(name).and_then(|raw| raw.parse().ok()).unwrap_or(0)
	}

	/// Parses `Retry-After` as whole seconds.
	///
	/// Accepts delta-seconds or an HTTP date; absent, malformed, or past values yield `0`.
	pub fn retry_after_secs(&self) -> u64 {
		let Some(raw) = self.header_str(RETRY_AFTER.as_str()) else {
			return 0;
		};

		if let Ok(secs) = raw.parse::<u64>() {
			return secs;
		}
		if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
			let delta = moment - OffsetDateTime::now_utc();

			if delta.is_positive() {
				return u64::try_from(delta.whole_seconds()).unwrap_or(0);
			}
		}

		0
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	///
	/// The wrapped client's own timeout and `User-Agent` apply; [`ClientConfig`] values are
	/// only used by [`ReqwestHttpClient::from_config`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a reqwest client honoring the configured timeout and `User-Agent`.
	pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.timeout(config.timeout)
			.user_agent(config.user_agent.as_str())
			.build()?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		Box::pin(async move {
			let HttpRequest { method, url, headers, body } = request;
			let mut builder = self.0.request(method, url).headers(headers);

			if let Some(body) = body {
				builder = builder.body(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let headers = response.headers().to_owned();
			let body = response.bytes().await?.to_vec();

			Ok(HttpResponse { status, headers, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use ::http::HeaderValue;
	// self
	use super::*;

	fn with_header(name: &'static str, value: &str) -> HttpResponse {
		let mut response = HttpResponse::new(429, Vec::new());

		response.headers.insert(
			name,
			HeaderValue::from_str(value).expect("Test header value should be valid."),
		);

		response
	}

	#[test]
	fn counters_default_to_zero() {
		let response = with_header("x-ratelimit-limit", "abc");

		assert_eq!(response.header_u64("x-ratelimit-limit"), 0);
		assert_eq!(response.header_u64("x-ratelimit-remaining"), 0);
		assert_eq!(with_header("x-ratelimit-limit", " 100 ").header_u64("x-ratelimit-limit"), 100);
	}

	#[test]
	fn retry_after_accepts_seconds_and_dates() {
		assert_eq!(with_header("retry-after", "30").retry_after_secs(), 30);
		assert_eq!(with_header("retry-after", "soon").retry_after_secs(), 0);
		assert_eq!(
			with_header("retry-after", "Mon, 01 Jan 2001 00:00:00 +0000").retry_after_secs(),
			0
		);

		let future = (OffsetDateTime::now_utc() + Duration::minutes(10))
			.format(&Rfc2822)
			.expect("Future date should format.");
		let secs = with_header("retry-after", &future).retry_after_secs();

		assert!((590..=600).contains(&secs), "Unexpected retry delay {secs}.");
	}
}
