//! Client configuration: API host, timeout, and headers applied to every request.
//!
//! Configurations are assembled through [`ClientConfigBuilder`], which validates the base
//! URL and default headers once so request dispatch never has to.

pub mod builder;

pub use builder::*;

// std
use std::time::Duration as StdDuration;
// crates.io
use ::http::HeaderMap;
// self
use crate::{_prelude::*, auth::Credentials, error::ConfigError};

/// Immutable configuration consumed by [`crate::client::SirvClient`] and
/// [`crate::transport::Transport`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// Client credentials exchanged for bearer tokens.
	pub credentials: Credentials,
	/// API root; endpoint paths are resolved against it.
	pub base_url: Url,
	/// Socket timeout applied uniformly to every request.
	pub timeout: StdDuration,
	/// Headers attached to every authenticated request before caller headers.
	pub default_headers: HeaderMap,
	/// `User-Agent` sent by the default reqwest transport.
	pub user_agent: String,
}
impl ClientConfig {
	/// Production API host.
	pub const DEFAULT_BASE_URL: &'static str = "https://api.sirv.com";
	/// Default request timeout.
	pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(30);

	/// Creates a new builder for the provided credentials.
	pub fn builder(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> ClientConfigBuilder {
		ClientConfigBuilder::new(Credentials::new(client_id, client_secret))
	}

	/// Resolves an endpoint path (such as `/v2/files/stat`) against the base URL.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		self.base_url
			.join(path.trim_start_matches('/'))
			.map_err(|source| ConfigError::InvalidPath { path: path.to_owned(), source })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn endpoint_keeps_base_path_prefix() {
		let config = ClientConfig::builder("id", "secret")
			.base_url("http://127.0.0.1:8080/proxy")
			.build()
			.expect("Config with a path prefix should build.");
		let url = config.endpoint("/v2/files/stat").expect("Endpoint should resolve.");

		assert_eq!(url.as_str(), "http://127.0.0.1:8080/proxy/v2/files/stat");
	}

	#[test]
	fn endpoint_defaults_to_production_host() {
		let config = ClientConfig::builder("id", "secret").build().expect("Default config should build.");

		assert_eq!(
			config.endpoint("/v2/token").expect("Endpoint should resolve.").as_str(),
			"https://api.sirv.com/v2/token"
		);
		assert_eq!(config.timeout, ClientConfig::DEFAULT_TIMEOUT);
		assert!(config.user_agent.starts_with("sirv-client/"));
	}
}
