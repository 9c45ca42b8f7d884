//! Account management operations.

// self
use crate::{_prelude::*, http::ApiHttpClient, resources::def_facade};

def_facade!(Account, "Account settings, limits, usage, users, billing, and events.");
impl<C> Account<'_, C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Account details, including CDN URL and account name.
	pub async fn get(&self) -> Result<Value> {
		self.transport.get("/v2/account", &[]).await
	}

	/// Updates account settings (for example `minify` or `fetching`).
	pub async fn update(&self, settings: Value) -> Result<Value> {
		self.transport.post("/v2/account", settings, &[]).await
	}

	/// API request allowances and current usage.
	pub async fn limits(&self) -> Result<Value> {
		self.transport.get("/v2/account/limits", &[]).await
	}

	/// Storage usage, plan limits, and file count.
	pub async fn storage(&self) -> Result<Value> {
		self.transport.get("/v2/account/storage", &[]).await
	}

	/// Every account user with roles.
	pub async fn users(&self) -> Result<Value> {
		self.transport.get("/v2/account/users", &[]).await
	}

	/// Billing plan details.
	pub async fn billing_plan(&self) -> Result<Value> {
		self.transport.get("/v2/billing/plan", &[]).await
	}

	/// Searches account events by `module`, `type`, `level`, `from`, and `to`.
	pub async fn search_events(&self, params: Value) -> Result<Value> {
		self.transport.post("/v2/account/events/search", params, &[]).await
	}

	/// Marks events as seen.
	pub async fn mark_events_seen<S>(&self, event_ids: &[S]) -> Result<Value>
	where
		S: AsRef<str>,
	{
		let ids = event_ids.iter().map(|id| Value::from(id.as_ref())).collect();

		self.transport.post("/v2/account/events/seen", Value::Array(ids), &[]).await
	}
}
