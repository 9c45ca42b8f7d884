//! Client-level error types shared by the token manager, transport, and resource facades.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed transport failure carried as an error source.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// Every failure is scoped to the call that produced it and is never retried by the
/// client; callers branch on the variant (for example, pausing for
/// [`RateLimitError::retry_after`] before trying again).
#[derive(Debug, ThisError)]
pub enum Error {
	/// Caller input rejected before any network call was made.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Token issuance was rejected or failed.
	#[error(transparent)]
	Authentication(#[from] AuthenticationError),
	/// The API answered with HTTP 429.
	#[error(transparent)]
	RateLimited(#[from] RateLimitError),
	/// Any other HTTP failure status or a transport-level failure.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Local configuration problem detected while building the client.
	#[error(transparent)]
	Config(#[from] ConfigError),
}
impl Error {
	/// HTTP status associated with the failure.
	///
	/// Validation failures report `400`; transport failures report `0`.
	pub fn http_status(&self) -> u16 {
		match self {
			Self::Validation(_) => 400,
			Self::Authentication(e) => e.code,
			Self::RateLimited(_) => 429,
			Self::Api(e) => e.status,
			Self::Config(_) => 0,
		}
	}

	/// Internal error code (the API's `code` field for [`ApiError`]).
	pub fn code(&self) -> i64 {
		match self {
			Self::Validation(_) => 400,
			Self::Authentication(e) => i64::from(e.code),
			Self::RateLimited(_) => 429,
			Self::Api(e) => e.code,
			Self::Config(_) => 0,
		}
	}

	/// Structured error body returned by the API, if any.
	pub fn details(&self) -> Option<&Value> {
		match self {
			Self::Authentication(e) => e.details.as_ref(),
			Self::RateLimited(e) => Some(&e.details),
			Self::Api(e) => Some(&e.details),
			Self::Validation(_) | Self::Config(_) => None,
		}
	}

	/// Server-assigned request identifier, when the API supplied one.
	pub fn request_id(&self) -> Option<&str> {
		match self {
			Self::Api(e) => e.request_id.as_deref(),
			_ => None,
		}
	}

	/// Returns `true` for HTTP 429 failures.
	pub fn is_rate_limited(&self) -> bool {
		matches!(self, Self::RateLimited(_))
	}

	/// Retry hint for rate-limited failures.
	pub fn retry_after(&self) -> Option<Duration> {
		match self {
			Self::RateLimited(e) => Some(e.retry_after_duration()),
			_ => None,
		}
	}
}

/// Caller input problems detected before a request leaves the process.
#[derive(Debug, ThisError)]
pub enum ValidationError {
	/// Requested token lifetime is outside the range accepted by the token endpoint.
	#[error("expiresIn must be between {min} and {max} seconds, got {value}.")]
	ExpiresInOutOfRange {
		/// Rejected value in seconds.
		value: u64,
		/// Smallest accepted value.
		min: u64,
		/// Largest accepted value.
		max: u64,
	},
	/// Upload source does not exist.
	#[error("File not found: {path}.")]
	FileNotFound {
		/// Local path supplied by the caller.
		path: String,
	},
	/// Content type supplied for a raw upload is not a valid header value.
	#[error("Content type `{content_type}` is invalid.")]
	InvalidContentType {
		/// Offending content type.
		content_type: String,
	},
	/// Date could not be rendered for a statistics query.
	#[error("Date could not be formatted.")]
	DateFormat {
		/// Underlying formatting failure.
		#[source]
		source: time::error::Format,
	},
	/// Upload source exists but could not be read.
	#[error("Failed to read file {path}.")]
	FileRead {
		/// Local path supplied by the caller.
		path: String,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
}

/// Token issuance failure.
#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct AuthenticationError {
	/// Server-supplied message, or a client default.
	pub message: String,
	/// HTTP status of the token response; `0` when no response was received.
	pub code: u16,
	/// Structured error body returned by the token endpoint.
	pub details: Option<Value>,
	/// Underlying transport or parse failure.
	#[source]
	pub source: Option<BoxError>,
}
impl AuthenticationError {
	/// Builds an error from a rejected token response.
	pub fn rejected(message: impl Into<String>, code: u16, details: Option<Value>) -> Self {
		Self { message: message.into(), code, details, source: None }
	}

	/// Builds an error from a failure that happened before a usable response existed.
	pub fn failed(code: u16, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self {
			message: format!("Failed to authenticate: {src}"),
			code,
			details: None,
			source: Some(Box::new(src)),
		}
	}
}

/// HTTP 429 failure with the throttling counters published by the API.
#[derive(Clone, Debug, ThisError)]
#[error("{message}")]
pub struct RateLimitError {
	/// Server-supplied message, or `"Rate limit exceeded"`.
	pub message: String,
	/// Seconds to wait before retrying (`Retry-After`).
	pub retry_after: u64,
	/// Request allowance of the current window (`X-RateLimit-Limit`).
	pub limit: u64,
	/// Requests left in the current window (`X-RateLimit-Remaining`).
	pub remaining: u64,
	/// Parsed response body.
	pub details: Value,
}
impl RateLimitError {
	/// [`RateLimitError::retry_after`] as a [`Duration`].
	pub fn retry_after_duration(&self) -> Duration {
		Duration::seconds(i64::try_from(self.retry_after).unwrap_or(i64::MAX))
	}
}

/// Generic API failure: any HTTP status of 400 or above other than 429, or a
/// transport-level failure (reported with status `0`).
#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct ApiError {
	/// Server-supplied message, or a client default.
	pub message: String,
	/// The API's internal error code (`code` body field), `0` when absent.
	pub code: i64,
	/// HTTP status; `0` for transport failures.
	pub status: u16,
	/// `X-Request-Id` response header.
	pub request_id: Option<String>,
	/// Parsed response body.
	pub details: Value,
	/// Underlying transport failure.
	#[source]
	pub source: Option<BoxError>,
}
impl ApiError {
	/// Wraps a transport failure that prevented a response from being received.
	pub fn transport(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self {
			message: format!("Request failed: {src}"),
			code: 0,
			status: 0,
			request_id: None,
			details: Value::Object(Map::new()),
			source: Some(Box::new(src)),
		}
	}
}

/// Configuration and construction failures raised while building a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL parsed but cannot address the API.
	#[error("Base URL `{url}` must use http or https and include a host.")]
	UnsupportedBaseUrl {
		/// Offending URL.
		url: String,
	},
	/// Endpoint path could not be joined onto the base URL.
	#[error("Endpoint path `{path}` is invalid.")]
	InvalidPath {
		/// Offending path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A header name is not valid.
	#[error("Header name `{name}` is invalid.")]
	InvalidHeaderName {
		/// Offending header name.
		name: String,
	},
	/// A header value is not valid.
	#[error("Header `{name}` has an invalid value.")]
	InvalidHeaderValue {
		/// Header the value belonged to.
		name: String,
	},
	/// Request timeout must be non-zero.
	#[error("Request timeout must be greater than zero.")]
	ZeroTimeout,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn accessors_expose_status_and_code() {
		let err = Error::from(ApiError {
			message: "Not found".into(),
			code: 1004,
			status: 404,
			request_id: Some("req-1".into()),
			details: serde_json::json!({ "message": "Not found", "code": 1004 }),
			source: None,
		});

		assert_eq!(err.http_status(), 404);
		assert_eq!(err.code(), 1004);
		assert_eq!(err.request_id(), Some("req-1"));
		assert_eq!(err.to_string(), "Not found");
		assert!(!err.is_rate_limited());
		assert!(err.retry_after().is_none());
	}

	#[test]
	fn rate_limit_exposes_retry_hint() {
		let err = Error::from(RateLimitError {
			message: "Rate limit exceeded".into(),
			retry_after: 30,
			limit: 100,
			remaining: 0,
			details: Value::Object(Map::new()),
		});

		assert!(err.is_rate_limited());
		assert_eq!(err.http_status(), 429);
		assert_eq!(err.retry_after(), Some(Duration::seconds(30)));
	}

	#[test]
	fn validation_reports_bad_request() {
		let err = Error::from(ValidationError::FileNotFound { path: "/missing.jpg".into() });

		assert_eq!(err.http_status(), 400);
		assert_eq!(err.to_string(), "File not found: /missing.jpg.");
		assert!(err.details().is_none());
	}
}
