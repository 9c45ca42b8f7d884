//! User information.

// self
use crate::{_prelude::*, http::ApiHttpClient, resources::def_facade};

def_facade!(User, "User information.");
impl<C> User<'_, C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Details of `user_id`, or of the current user when `None`.
	pub async fn get(&self, user_id: Option<&str>) -> Result<Value> {
		match user_id {
			Some(user_id) => self.transport.get("/v2/user", &[("userId", user_id)]).await,
			None => self.transport.get("/v2/user", &[]).await,
		}
	}
}
