//! Credentials, redacted secrets, and the access token record owned by the token manager.

pub mod credentials;
pub mod token;

pub use credentials::*;
pub use token::{expires_in::*, record::*, secret::*};
