//! Per-call request description.

// crates.io
use ::http::{HeaderMap, HeaderName, HeaderValue};
// self
use crate::_prelude::*;

/// Body carried by a request.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestBody {
	/// No body.
	#[default]
	Empty,
	/// JSON document; sent with `Content-Type: application/json` unless the caller
	/// supplies another content type.
	Json(Value),
	/// Raw bytes with an explicit content type.
	Raw {
		/// Body bytes.
		bytes: Vec<u8>,
		/// Media type of `bytes`.
		content_type: String,
	},
}

/// Query parameters, body, and caller headers for one request.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
	/// Query parameters appended to the endpoint URL in order.
	pub query: Vec<(String, String)>,
	/// Request body.
	pub body: RequestBody,
	/// Caller headers; these win over default, authorization, and content-type headers.
	pub headers: HeaderMap,
}
impl RequestOptions {
	/// Creates empty options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends query parameters.
	pub fn query<K, V>(mut self, pairs: &[(K, V)]) -> Self
	where
		K: AsRef<str>,
		V: AsRef<str>,
	{
		self.query
			.extend(pairs.iter().map(|(k, v)| (k.as_ref().to_owned(), v.as_ref().to_owned())));

		self
	}

	/// Sets a JSON body.
	pub fn json(mut self, body: Value) -> Self {
		self.body = RequestBody::Json(body);

		self
	}

	/// Sets a raw body with an explicit content type.
	pub fn raw(mut self, bytes: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
		self.body = RequestBody::Raw { bytes: bytes.into(), content_type: content_type.into() };

		self
	}

	/// Sets a caller header, replacing any previous value.
	pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);

		self
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use ::http::header::CONTENT_TYPE;
	// self
	use super::*;

	#[test]
	fn builders_compose() {
		let options = RequestOptions::new()
			.query(&[("filename", "/a.jpg"), ("expiry", "60")])
			.json(serde_json::json!({ "approved": true }))
			.header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

		assert_eq!(options.query, vec![
			("filename".to_owned(), "/a.jpg".to_owned()),
			("expiry".to_owned(), "60".to_owned()),
		]);
		assert!(matches!(options.body, RequestBody::Json(_)));
		assert!(matches!(
			RequestOptions::new().raw(vec![1, 2], "image/png").body,
			RequestBody::Raw { ref content_type, .. } if content_type == "image/png"
		));
	}
}
