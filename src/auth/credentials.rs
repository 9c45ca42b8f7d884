//! Client credentials presented to the token endpoint.

// self
use crate::{_prelude::*, auth::ClientSecret};

/// Client identifier + secret pair, immutable for the lifetime of a client.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	client_id: String,
	client_secret: ClientSecret,
}
impl Credentials {
	/// Creates a credential pair.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self { client_id: client_id.into(), client_secret: ClientSecret::new(client_secret) }
	}

	/// Client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// Client secret; callers must avoid logging the exposed value.
	pub fn client_secret(&self) -> &ClientSecret {
		&self.client_secret
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn debug_redacts_secret() {
		let credentials = Credentials::new("client", "hunter2");
		let rendered = format!("{credentials:?}");

		assert!(rendered.contains("client"));
		assert!(!rendered.contains("hunter2"));
		assert_eq!(credentials.client_secret().expose(), "hunter2");
	}
}
