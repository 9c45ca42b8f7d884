//! Top-level client entry point.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	config::ClientConfig,
	http::ApiHttpClient,
	resources::{Account, Files, Resource, ResourceKind, Stats, User},
	transport::Transport,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest stack.
pub type ReqwestSirvClient = SirvClient<ReqwestHttpClient>;

/// Sirv API client: one authenticated transport plus a facade per resource group.
///
/// Facades borrow the client, so a shared `Arc<SirvClient<_>>` serves any number of tasks
/// while every call reuses the same cached token.
pub struct SirvClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	transport: Transport<C>,
}
impl<C> SirvClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Crate version, also sent in the default `User-Agent`.
	pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");
	/// API version prefix of every endpoint path.
	pub const API_VERSION: &'static str = "v2";

	/// Creates a client over a caller-provided HTTP client.
	pub fn with_http_client(config: ClientConfig, http_client: impl Into<Arc<C>>) -> Result<Self> {
		Ok(Self { transport: Transport::with_http_client(config, http_client)? })
	}

	/// Account operations.
	pub fn account(&self) -> Account<'_, C> {
		Account::new(&self.transport)
	}

	/// File operations.
	pub fn files(&self) -> Files<'_, C> {
		Files::new(&self.transport)
	}

	/// Statistics operations.
	pub fn stats(&self) -> Stats<'_, C> {
		Stats::new(&self.transport)
	}

	/// User operations.
	pub fn user(&self) -> User<'_, C> {
		User::new(&self.transport)
	}

	/// Facade for `kind`.
	pub fn resource(&self, kind: ResourceKind) -> Resource<'_, C> {
		Resource::of(kind, &self.transport)
	}

	/// Facade named `name` (`account`, `files`, `stats`, or `user`); `None` otherwise.
	pub fn resource_by_name(&self, name: &str) -> Option<Resource<'_, C>> {
		ResourceKind::from_name(name).map(|kind| self.resource(kind))
	}

	/// Forces a new token, optionally with an explicit lifetime in `[5, 604800]` seconds.
	pub async fn authenticate(&self, expires_in: Option<u64>) -> Result<TokenSecret> {
		self.transport.authenticate(expires_in).await
	}

	/// Underlying transport, for endpoints without a dedicated facade method.
	pub fn transport(&self) -> &Transport<C> {
		&self.transport
	}
}
#[cfg(feature = "reqwest")]
impl SirvClient<ReqwestHttpClient> {
	/// Creates a client backed by reqwest.
	pub fn new(config: ClientConfig) -> Result<Self> {
		Ok(Self { transport: Transport::new(config)? })
	}
}
impl<C> Debug for SirvClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SirvClient").field("transport", &self.transport).finish()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::convert::Infallible;
	// self
	use super::*;
	use crate::http::{HttpFuture, HttpRequest, HttpResponse};

	struct Offline;
	impl ApiHttpClient for Offline {
		type TransportError = Infallible;

		fn execute(&self, _: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
			Box::pin(async { Ok(HttpResponse::new(503, Vec::new())) })
		}
	}

	fn client() -> SirvClient<Offline> {
		let config = ClientConfig::builder("id", "secret").build().expect("Config should build.");

		SirvClient::with_http_client(config, Offline).expect("Client should build.")
	}

	#[test]
	fn resources_resolve_by_name() {
		let client = client();

		for kind in ResourceKind::ALL {
			let resource =
				client.resource_by_name(kind.as_str()).expect("Known resource should resolve.");

			assert_eq!(resource.kind(), kind);
		}

		assert!(client.resource_by_name("billing").is_none());
	}

	#[test]
	fn versions_are_exposed() {
		assert_eq!(SirvClient::<Offline>::API_VERSION, "v2");
		assert_eq!(SirvClient::<Offline>::VERSION, env!("CARGO_PKG_VERSION"));
		assert!(client().transport().config().user_agent.ends_with(SirvClient::<Offline>::VERSION));
	}
}
