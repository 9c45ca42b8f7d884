//! Usage statistics.

// crates.io
use time::macros::format_description;
// self
use crate::{_prelude::*, error::ValidationError, http::ApiHttpClient, resources::def_facade};

/// Date bound of a statistics query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DateParam {
	/// Rendered as `YYYY-MM-DDTHH:MM:SS.mmm` using the value's own offset.
	DateTime(OffsetDateTime),
	/// Sent verbatim; expected to be ISO 8601.
	Raw(String),
}
impl DateParam {
	/// Renders the value for a query string.
	pub fn render(&self) -> Result<String, ValidationError> {
		match self {
			Self::DateTime(instant) => instant
				.format(format_description!(
					"[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]"
				))
				.map_err(|source| ValidationError::DateFormat { source }),
			Self::Raw(raw) => Ok(raw.clone()),
		}
	}
}
impl From<OffsetDateTime> for DateParam {
	fn from(value: OffsetDateTime) -> Self {
		Self::DateTime(value)
	}
}
impl From<&str> for DateParam {
	fn from(value: &str) -> Self {
		Self::Raw(value.to_owned())
	}
}
impl From<String> for DateParam {
	fn from(value: String) -> Self {
		Self::Raw(value)
	}
}

def_facade!(Stats, "Transfer, storage, and spin viewer statistics.");
impl<C> Stats<'_, C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Daily HTTP transfer amounts between `from` and `to`.
	pub async fn http(
		&self,
		from: impl Into<DateParam>,
		to: impl Into<DateParam>,
	) -> Result<Value> {
		self.range("/v2/stats/http", from.into(), to.into(), None).await
	}

	/// Spin viewer statistics (the API caps the period at 5 days), optionally per alias.
	pub async fn spin_views(
		&self,
		from: impl Into<DateParam>,
		to: impl Into<DateParam>,
		alias: Option<&str>,
	) -> Result<Value> {
		self.range("/v2/stats/spins/views", from.into(), to.into(), alias).await
	}

	/// Total data stored over the period.
	pub async fn storage(
		&self,
		from: impl Into<DateParam>,
		to: impl Into<DateParam>,
	) -> Result<Value> {
		self.range("/v2/stats/storage", from.into(), to.into(), None).await
	}

	async fn range(
		&self,
		path: &str,
		from: DateParam,
		to: DateParam,
		alias: Option<&str>,
	) -> Result<Value> {
		let from = from.render()?;
		let to = to.render()?;
		let mut query = vec![("from", from.as_str()), ("to", to.as_str())];

		if let Some(alias) = alias {
			query.push(("alias", alias));
		}

		self.transport.get(path, &query).await
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn datetimes_render_with_milliseconds() {
		let param = DateParam::from(macros::datetime!(2025-03-04 05:06:07.089 UTC));

		assert_eq!(param.render().ok().as_deref(), Some("2025-03-04T05:06:07.089"));
		assert_eq!(DateParam::from("2025-01-01").render().ok().as_deref(), Some("2025-01-01"));
	}
}
