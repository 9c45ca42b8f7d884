// std
use std::time::Duration as StdDuration;
// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use sirv_client::{
	client::{ReqwestSirvClient, SirvClient},
	config::ClientConfig,
	error::{Error, ValidationError},
};

const CLIENT_ID: &str = "client-id";
const CLIENT_SECRET: &str = "client-secret";

fn build_client(server: &MockServer) -> ReqwestSirvClient {
	let config = ClientConfig::builder(CLIENT_ID, CLIENT_SECRET)
		.base_url(server.base_url())
		.build()
		.expect("Client configuration should build for token tests.");

	SirvClient::new(config).expect("Client should build for token tests.")
}

#[tokio::test]
async fn token_is_cached_across_calls() -> color_eyre::Result<()> {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let token = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/v2/token")
				.header("content-type", "application/json")
				.json_body(json!({ "clientId": CLIENT_ID, "clientSecret": CLIENT_SECRET }));
			then.status(200).json_body(json!({ "token": "cached-token", "expiresIn": 1200 }));
		})
		.await;
	let account = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/account").header("authorization", "Bearer cached-token");
			then.status(200).json_body(json!({ "alias": "demo" }));
		})
		.await;

	client.account().get().await?;

	let second = client.account().get().await?;

	assert_eq!(second["alias"], "demo");

	token.assert_calls_async(1).await;
	account.assert_calls_async(2).await;

	Ok(())
}

#[tokio::test]
async fn short_lived_token_is_renewed_on_next_call() -> color_eyre::Result<()> {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path("/v2/token");
			then.status(200).json_body(json!({ "token": "short", "expiresIn": 60 }));
		})
		.await;
	let user = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/user");
			then.status(200).json_body(json!({ "email": "user@example.com" }));
		})
		.await;

	client.user().get(None).await?;
	client.user().get(None).await?;

	token.assert_calls_async(2).await;
	user.assert_calls_async(2).await;

	Ok(())
}

#[tokio::test]
async fn concurrent_calls_share_one_token_request() -> color_eyre::Result<()> {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path("/v2/token");
			then.status(200)
				.delay(StdDuration::from_millis(200))
				.json_body(json!({ "token": "shared", "expiresIn": 1200 }));
		})
		.await;
	let limits = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/account/limits").header("authorization", "Bearer shared");
			then.status(200).json_body(json!({}));
		})
		.await;
	let account = client.account();
	let (first, second, third) = tokio::join!(account.limits(), account.limits(), account.limits());

	first?;
	second?;
	third?;

	token.assert_calls_async(1).await;
	limits.assert_calls_async(3).await;

	Ok(())
}

#[tokio::test]
async fn explicit_authentication_forwards_lifetime() -> color_eyre::Result<()> {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path("/v2/token").json_body(json!({
				"clientId": CLIENT_ID,
				"clientSecret": CLIENT_SECRET,
				"expiresIn": 3600,
			}));
			then.status(200).json_body(json!({ "token": "explicit", "expiresIn": 3600 }));
		})
		.await;
	let secret = client.authenticate(Some(3600)).await?;

	assert_eq!(secret.expose(), "explicit");
	assert!(client.transport().tokens().current().is_some());

	token.assert_calls_async(1).await;

	Ok(())
}

#[tokio::test]
async fn invalid_lifetime_never_reaches_the_server() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path("/v2/token");
			then.status(200).json_body(json!({ "token": "unused", "expiresIn": 1200 }));
		})
		.await;

	for value in [0, 4, 604_801] {
		let err = client.authenticate(Some(value)).await.expect_err("Lifetime should be rejected.");

		assert!(matches!(
			err,
			Error::Validation(ValidationError::ExpiresInOutOfRange { value: rejected, .. }) if rejected == value
		));
	}

	token.assert_calls_async(0).await;
}

#[tokio::test]
async fn rejected_credentials_surface_as_authentication_errors() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path("/v2/token");
			then.status(401).json_body(json!({ "message": "Invalid credentials" }));
		})
		.await;
	let stat = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/files/stat");
			then.status(200).json_body(json!({}));
		})
		.await;
	let err = client.files().info("/a.jpg").await.expect_err("Rejected token should fail the call.");

	let Error::Authentication(auth) = &err else {
		panic!("Expected an authentication error, got {err:?}.");
	};

	assert_eq!(auth.message, "Invalid credentials");
	assert_eq!(auth.code, 401);
	assert_eq!(err.details(), Some(&json!({ "message": "Invalid credentials" })));

	token.assert_calls_async(1).await;
	stat.assert_calls_async(0).await;
}
