//! Immutable access token record and its lifecycle helpers.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Current lifecycle status for an access token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenStatus {
	/// Token can be presented to the API.
	Active,
	/// Token reached its buffered expiry instant and must be replaced.
	Expired,
}

/// Bearer token issued by the token endpoint.
///
/// Records are never mutated; every successful authentication replaces the cached
/// record wholesale.
#[derive(Clone)]
pub struct AccessToken {
	/// Bearer token value; callers must avoid logging it.
	pub secret: TokenSecret,
	/// Instant the token response was received.
	pub issued_at: OffsetDateTime,
	/// Buffered expiry instant: `issued_at + expires_in - REFRESH_BUFFER`.
	pub expires_at: OffsetDateTime,
}
impl AccessToken {
	/// Safety margin subtracted from the server-declared lifetime so tokens are renewed
	/// before the API starts rejecting them.
	pub const REFRESH_BUFFER: Duration = Duration::seconds(60);
	/// Lifetime assumed when the token response omits `expiresIn`.
	pub const DEFAULT_EXPIRES_IN: u64 = 1_200;

	/// Builds a record from a token response received at `issued_at`.
	pub fn issued(
		secret: impl Into<String>,
		issued_at: OffsetDateTime,
		expires_in_secs: u64,
	) -> Self {
		let lifetime = Duration::seconds(i64::try_from(expires_in_secs).unwrap_or(i64::MAX));
		let expires_at = issued_at.saturating_add(lifetime).saturating_sub(Self::REFRESH_BUFFER);

		Self { secret: TokenSecret::new(secret), issued_at, expires_at }
	}

	/// Computes the lifecycle status at a given instant.
	pub fn status_at(&self, instant: OffsetDateTime) -> TokenStatus {
		if instant >= self.expires_at { TokenStatus::Expired } else { TokenStatus::Active }
	}

	/// Returns `true` if the record has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		matches!(self.status_at(instant), TokenStatus::Expired)
	}

	/// Returns `true` if the record is expired relative to the current clock.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}

	/// Time left before the buffered expiry, clamped at zero.
	pub fn remaining_at(&self, instant: OffsetDateTime) -> Duration {
		let remaining = self.expires_at - instant;

		if remaining.is_negative() { Duration::ZERO } else { remaining }
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("secret", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn expiry_applies_refresh_buffer() {
		let issued = macros::datetime!(2025-01-01 00:00 UTC);
		let token = AccessToken::issued("token", issued, 1_200);

		assert_eq!(token.expires_at, macros::datetime!(2025-01-01 00:19 UTC));
		assert_eq!(token.status_at(macros::datetime!(2025-01-01 00:18:59 UTC)), TokenStatus::Active);
		assert_eq!(token.status_at(macros::datetime!(2025-01-01 00:19 UTC)), TokenStatus::Expired);
		assert!(token.is_expired_at(macros::datetime!(2025-01-01 00:20 UTC)));
	}

	#[test]
	fn lifetimes_inside_the_buffer_are_born_expired() {
		let issued = macros::datetime!(2025-01-01 00:00 UTC);
		let token = AccessToken::issued("short", issued, 30);

		assert!(token.is_expired_at(issued));
		assert_eq!(token.remaining_at(issued), Duration::ZERO);
	}

	#[test]
	fn debug_redacts_secret() {
		let token = AccessToken::issued("visible?", OffsetDateTime::now_utc(), 600);

		assert!(!format!("{token:?}").contains("visible?"));
		assert!(!token.is_expired());
	}
}
