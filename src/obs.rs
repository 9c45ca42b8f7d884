//! Optional observability helpers for API calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `sirv_client.call` with the `kind`,
//!   `method`, and `path` fields.
//! - Enable `metrics` to increment the `sirv_client_call_total` counter for every
//!   attempt/success/rate_limited/failure, labeled by `kind` + `outcome`.

mod metrics;
mod tracing;

pub use self::metrics::*;
pub use self::tracing::*;

// self
use crate::_prelude::*;

/// Call kinds observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Token endpoint exchange.
	Authenticate,
	/// JSON-returning API request (including uploads).
	Request,
	/// Raw download.
	Download,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Authenticate => "authenticate",
			CallKind::Request => "request",
			CallKind::Download => "download",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client call.
	Attempt,
	/// Successful completion.
	Success,
	/// The API answered with HTTP 429.
	RateLimited,
	/// Any other failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::RateLimited => "rate_limited",
			CallOutcome::Failure => "failure",
		}
	}

	/// Classifies a finished call.
	pub fn of<T>(result: &Result<T>) -> Self {
		match result {
			Ok(_) => CallOutcome::Success,
			Err(Error::RateLimited(_)) => CallOutcome::RateLimited,
			Err(_) => CallOutcome::Failure,
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::{RateLimitError, ValidationError};

	#[test]
	fn outcome_classifies_results() {
		let ok: Result<()> = Ok(());
		let limited: Result<()> = Err(RateLimitError {
			message: "slow down".into(),
			retry_after: 1,
			limit: 1,
			remaining: 0,
			details: Value::Null,
		}
		.into());
		let failed: Result<()> = Err(ValidationError::FileNotFound { path: "x".into() }.into());

		assert_eq!(CallOutcome::of(&ok), CallOutcome::Success);
		assert_eq!(CallOutcome::of(&limited), CallOutcome::RateLimited);
		assert_eq!(CallOutcome::of(&failed), CallOutcome::Failure);
		assert_eq!(CallKind::Download.to_string(), "download");
	}
}
