//! Resource facades mapping API operations onto [`Transport`] calls.
//!
//! Facades borrow the client's transport and hold no state of their own; each method
//! fixes an endpoint path and passes its parameters through.

pub mod account;
pub mod files;
pub mod stats;
pub mod user;

pub use account::Account;
pub use files::{ExportTarget, Files};
pub use stats::{DateParam, Stats};
pub use user::User;

// self
use crate::{http::ApiHttpClient, transport::Transport};

macro_rules! def_facade {
	($name:ident, $doc:literal) => {
		#[doc = $doc]
		pub struct $name<'a, C>
		where
			C: ?Sized + crate::http::ApiHttpClient,
		{
			transport: &'a crate::transport::Transport<C>,
		}
		impl<'a, C> $name<'a, C>
		where
			C: ?Sized + crate::http::ApiHttpClient,
		{
			/// Creates a facade over `transport`.
			pub fn new(transport: &'a crate::transport::Transport<C>) -> Self {
				Self { transport }
			}
		}
		impl<C> Clone for $name<'_, C>
		where
			C: ?Sized + crate::http::ApiHttpClient,
		{
			fn clone(&self) -> Self {
				*self
			}
		}
		impl<C> Copy for $name<'_, C> where C: ?Sized + crate::http::ApiHttpClient {}
		impl<C> std::fmt::Debug for $name<'_, C>
		where
			C: ?Sized + crate::http::ApiHttpClient,
		{
			fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
				f.debug_struct(stringify!($name)).finish_non_exhaustive()
			}
		}
	};
}
pub(crate) use def_facade;

/// Names every facade reachable from a client, for callers that dispatch by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
	/// Account management.
	Account,
	/// File management.
	Files,
	/// Usage statistics.
	Stats,
	/// User information.
	User,
}
impl ResourceKind {
	/// Every resource, in declaration order.
	pub const ALL: [ResourceKind; 4] =
		[ResourceKind::Account, ResourceKind::Files, ResourceKind::Stats, ResourceKind::User];

	/// Looks up a resource by its lowercase name.
	pub fn from_name(name: &str) -> Option<Self> {
		match name {
			"account" => Some(Self::Account),
			"files" => Some(Self::Files),
			"stats" => Some(Self::Stats),
			"user" => Some(Self::User),
			_ => None,
		}
	}

	/// Stable lowercase name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Account => "account",
			Self::Files => "files",
			Self::Stats => "stats",
			Self::User => "user",
		}
	}
}

/// Any facade, as returned by name-based lookup.
#[derive(Debug)]
pub enum Resource<'a, C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Account facade.
	Account(Account<'a, C>),
	/// Files facade.
	Files(Files<'a, C>),
	/// Stats facade.
	Stats(Stats<'a, C>),
	/// User facade.
	User(User<'a, C>),
}
impl<'a, C> Resource<'a, C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Builds the facade for `kind` over `transport`.
	pub fn of(kind: ResourceKind, transport: &'a Transport<C>) -> Self {
		match kind {
			ResourceKind::Account => Self::Account(Account::new(transport)),
			ResourceKind::Files => Self::Files(Files::new(transport)),
			ResourceKind::Stats => Self::Stats(Stats::new(transport)),
			ResourceKind::User => Self::User(User::new(transport)),
		}
	}

	/// Kind of the wrapped facade.
	pub fn kind(&self) -> ResourceKind {
		match self {
			Self::Account(_) => ResourceKind::Account,
			Self::Files(_) => ResourceKind::Files,
			Self::Stats(_) => ResourceKind::Stats,
			Self::User(_) => ResourceKind::User,
		}
	}
}
