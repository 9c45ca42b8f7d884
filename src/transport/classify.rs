//! Response-to-error classification shared by every API call.

// self
use crate::{
	_prelude::*,
	error::{ApiError, RateLimitError},
	http::HttpResponse,
};

/// Response header carrying the request allowance of the current window.
pub const RATE_LIMIT_LIMIT: &str = "x-ratelimit-limit";
/// Response header carrying the requests left in the current window.
pub const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
/// Response header carrying the server-assigned correlation identifier.
pub const REQUEST_ID: &str = "x-request-id";

/// Parses a response body as JSON.
///
/// Empty, unparseable, and `null` bodies become an empty object instead of an error.
pub fn parse_body(bytes: &[u8]) -> Value {
	match serde_json::from_slice::<Value>(bytes) {
		Ok(Value::Null) | Err(_) => Value::Object(Map::new()),
		Ok(value) => value,
	}
}

/// Returns the `message` field of an error body.
pub fn body_message(body: &Value) -> Option<&str> {
	body.get("message").and_then(Value::as_str)
}

/// Returns the API's internal error `code`, accepting numeric strings, defaulting to `0`.
pub fn body_code(body: &Value) -> i64 {
	body.get("code")
		.and_then(|code| code.as_i64().or_else(|| code.as_str()?.trim().parse().ok()))
		.unwrap_or(0)
}

/// Turns a JSON-returning response into its parsed body or a typed error.
pub fn classify(response: HttpResponse) -> Result<Value> {
	let body = parse_body(&response.body);

	failure(&response, body)
}

/// Checks the status of a raw download response without interpreting a successful body.
///
/// Downloads have no rate-limit branch: every status of 400 or above, 429 included,
/// becomes an [`ApiError`].
pub fn check_status(response: &HttpResponse) -> Result<()> {
	if response.status < 400 {
		return Ok(());
	}

	Err(api_error(response, parse_body(&response.body)).into())
}

fn failure(response: &HttpResponse, body: Value) -> Result<Value> {
	if response.status == 429 {
		return Err(RateLimitError {
			message: body_message(&body).unwrap_or("Rate limit exceeded").to_owned(),
			retry_after: response.retry_after_secs(),
			limit: response.header_u64(RATE_LIMIT_LIMIT),
			remaining: response.header_u64(RATE_LIMIT_REMAINING),
			details: body,
		}
		.into());
	}
	if response.status >= 400 {
		return Err(api_error(response, body).into());
	}

	Ok(body)
}

fn api_error(response: &HttpResponse, body: Value) -> ApiError {
	ApiError {
		message: body_message(&body).unwrap_or("API request failed").to_owned(),
		code: body_code(&body),
		status: response.status,
		request_id: response.header_str(REQUEST_ID).map(ToOwned::to_owned),
		details: body,
		source: None,
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use ::http::HeaderValue;
	// self
	use super::*;

	fn response(status: u16, body: &str, headers: &[(&'static str, &'static str)]) -> HttpResponse {
		let mut response = HttpResponse::new(status, body);

		for (name, value) in headers {
			response.headers.insert(*name, HeaderValue::from_static(*value));
		}

		response
	}

	#[test]
	fn empty_and_invalid_bodies_become_empty_objects() {
		assert_eq!(classify(response(200, "", &[])).ok(), Some(serde_json::json!({})));
		assert_eq!(classify(response(204, "not json", &[])).ok(), Some(serde_json::json!({})));
		assert_eq!(classify(response(200, "null", &[])).ok(), Some(serde_json::json!({})));
		assert_eq!(classify(response(200, "[1,2]", &[])).ok(), Some(serde_json::json!([1, 2])));
	}

	#[test]
	fn too_many_requests_maps_to_rate_limit() {
		let err = classify(response(
			429,
			"",
			&[("retry-after", "30"), ("x-ratelimit-limit", "100"), ("x-ratelimit-remaining", "0")],
		))
		.expect_err("429 must fail.");

		match err {
			Error::RateLimited(e) => {
				assert_eq!(e.retry_after, 30);
				assert_eq!(e.limit, 100);
				assert_eq!(e.remaining, 0);
				assert_eq!(e.message, "Rate limit exceeded");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn rate_limit_headers_default_to_zero() {
		let err = classify(response(429, "{\"message\":\"Slow down\"}", &[]))
			.expect_err("429 must fail.");

		assert!(matches!(
			err,
			Error::RateLimited(RateLimitError { retry_after: 0, limit: 0, remaining: 0, ref message, .. })
				if message == "Slow down"
		));
	}

	#[test]
	fn client_errors_carry_body_and_request_id() {
		let err = classify(response(
			404,
			"{\"message\":\"Not found\",\"code\":1004}",
			&[("x-request-id", "req-42")],
		))
		.expect_err("404 must fail.");

		match err {
			Error::Api(e) => {
				assert_eq!(e.status, 404);
				assert_eq!(e.message, "Not found");
				assert_eq!(e.code, 1004);
				assert_eq!(e.request_id.as_deref(), Some("req-42"));
				assert_eq!(e.details, serde_json::json!({ "message": "Not found", "code": 1004 }));
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn server_errors_without_body_use_defaults() {
		let err = classify(response(503, "<html>", &[])).expect_err("503 must fail.");

		assert!(matches!(
			err,
			Error::Api(ApiError { status: 503, code: 0, request_id: None, ref message, .. })
				if message == "API request failed"
		));
	}

	#[test]
	fn check_status_ignores_successful_bodies() {
		assert!(check_status(&response(200, "\u{0}binary", &[])).is_ok());
		assert!(matches!(
			check_status(&response(403, "", &[])),
			Err(Error::Api(ApiError { status: 403, .. }))
		));
	}

	#[test]
	fn throttled_downloads_are_api_errors() {
		let err = check_status(&response(
			429,
			"{\"message\":\"Slow down\",\"code\":\"29\"}",
			&[("retry-after", "5"), ("x-request-id", "rid")],
		))
		.expect_err("429 must fail.");

		assert!(!err.is_rate_limited());
		assert_eq!(err.http_status(), 429);
		assert_eq!(err.request_id(), Some("rid"));
		assert!(matches!(
			err,
			Error::Api(ApiError { status: 429, code: 29, ref message, .. }) if message == "Slow down"
		));
	}

	#[test]
	fn string_codes_are_accepted() {
		assert_eq!(body_code(&serde_json::json!({ "code": "17" })), 17);
		assert_eq!(body_code(&serde_json::json!({ "code": true })), 0);
		assert_eq!(body_code(&serde_json::json!([])), 0);
	}
}
