//! Async client for the Sirv REST API: client-credential bearer tokens with single-flight
//! refresh, typed rate-limit and API errors, and thin resource facades over one transport.
//!
//! ```no_run
//! use sirv_client::{client::SirvClient, config::ClientConfig};
//!
//! # async fn example() -> sirv_client::error::Result<()> {
//! let config = ClientConfig::builder("client-id", "client-secret").build()?;
//! let client = SirvClient::new(config)?;
//! let listing = client.files().list("/").await?;
//!
//! println!("{listing}");
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod resources;
pub mod token;
pub mod transport;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		path::Path,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map, Value};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use ::http::{HeaderMap, HeaderName, HeaderValue, Method};
#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
