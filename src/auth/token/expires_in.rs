//! Validated token lifetime requested from the token endpoint.

// self
use crate::{_prelude::*, error::ValidationError};

/// Token lifetime in seconds, restricted to the range the token endpoint accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ExpiresIn(u64);
impl ExpiresIn {
	/// Shortest lifetime accepted by the token endpoint.
	pub const MIN: u64 = 5;
	/// Longest lifetime accepted by the token endpoint (7 days).
	pub const MAX: u64 = 604_800;

	/// Validates a lifetime expressed in seconds.
	pub fn new(seconds: u64) -> Result<Self, ValidationError> {
		if (Self::MIN..=Self::MAX).contains(&seconds) {
			Ok(Self(seconds))
		} else {
			Err(ValidationError::ExpiresInOutOfRange {
				value: seconds,
				min: Self::MIN,
				max: Self::MAX,
			})
		}
	}

	/// Lifetime in seconds.
	pub const fn seconds(self) -> u64 {
		self.0
	}
}
