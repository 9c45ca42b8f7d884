//! Builder that validates and assembles a [`super::ClientConfig`].

// std
use std::time::Duration as StdDuration;
// crates.io
use ::http::{HeaderMap, HeaderName, HeaderValue};
// self
use crate::{_prelude::*, auth::Credentials, config::ClientConfig, error::ConfigError};

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// Credentials exchanged for bearer tokens.
	pub credentials: Credentials,
	/// Unvalidated API root.
	pub base_url: String,
	/// Request timeout.
	pub timeout: StdDuration,
	/// Unvalidated default headers, applied in insertion order.
	pub default_headers: Vec<(String, String)>,
	/// Optional `User-Agent` override.
	pub user_agent: Option<String>,
}
impl ClientConfigBuilder {
	/// Creates a new builder seeded with the provided credentials.
	pub fn new(credentials: Credentials) -> Self {
		Self {
			credentials,
			base_url: ClientConfig::DEFAULT_BASE_URL.into(),
			timeout: ClientConfig::DEFAULT_TIMEOUT,
			default_headers: Vec::new(),
			user_agent: None,
		}
	}

	/// Overrides the API root (useful for proxies and mock servers).
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = url.into();

		self
	}

	/// Overrides the request timeout.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Adds a header sent with every authenticated request.
	pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.default_headers.push((name.into(), value.into()));

		self
	}

	/// Replaces every default header.
	pub fn default_headers<I, K, V>(mut self, headers: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.default_headers =
			headers.into_iter().map(|(name, value)| (name.into(), value.into())).collect();

		self
	}

	/// Overrides the `User-Agent` header.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		if self.timeout.is_zero() {
			return Err(ConfigError::ZeroTimeout);
		}

		let base_url = parse_base_url(&self.base_url)?;
		let default_headers = header_map(&self.default_headers)?;
		let user_agent = self
			.user_agent
			.unwrap_or_else(|| concat!("sirv-client/", env!("CARGO_PKG_VERSION")).into());

		Ok(ClientConfig {
			credentials: self.credentials,
			base_url,
			timeout: self.timeout,
			default_headers,
			user_agent,
		})
	}
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
	let mut url = Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl { source })?;

	if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
		return Err(ConfigError::UnsupportedBaseUrl { url: url.to_string() });
	}
	// Relative joins replace the last segment unless the path ends with a slash.
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	url.set_query(None);
	url.set_fragment(None);

	Ok(url)
}

/// Validates name/value pairs into a [`HeaderMap`]; later pairs replace earlier ones.
pub(crate) fn header_map(pairs: &[(String, String)]) -> Result<HeaderMap, ConfigError> {
	let mut headers = HeaderMap::with_capacity(pairs.len());

	for (name, value) in pairs {
		let header_name = HeaderName::from_bytes(name.as_bytes())
			.map_err(|_| ConfigError::InvalidHeaderName { name: name.clone() })?;
		let header_value = HeaderValue::from_str(value)
			.map_err(|_| ConfigError::InvalidHeaderValue { name: name.clone() })?;

		headers.insert(header_name, header_value);
	}

	Ok(headers)
}
