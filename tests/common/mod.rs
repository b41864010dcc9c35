//! Helpers shared by the integration suites.

#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use httpmock::MockServer;
// self
use entitlement_relay::{
	config::DebugFlag,
	endpoint::UpstreamEndpoint,
	http::ReqwestHttpClient,
	mapper::ReqwestTransportErrorMapper,
	obs::MemoryUpstreamLog,
	relay::{ReqwestRelay, Relay},
	url::Url,
};

/// Endpoint builder pointed at the mock server root.
pub fn endpoint_for(server: &MockServer) -> UpstreamEndpoint {
	UpstreamEndpoint::builder()
		.base_url(Url::parse(&server.base_url()).expect("Mock server base URL should parse."))
		.build()
		.expect("Mock server endpoint should build.")
}

/// Reqwest-backed relay plus the in-memory sink capturing its `debug_proxy` records.
pub fn build_reqwest_test_relay(
	endpoint: UpstreamEndpoint,
	debug_proxy: bool,
) -> (ReqwestRelay, MemoryUpstreamLog) {
	let log = MemoryUpstreamLog::default();
	let http_client =
		ReqwestHttpClient::new(endpoint).expect("Reqwest client should build for tests.");
	let relay = Relay::with_http_client(
		http_client,
		ReqwestTransportErrorMapper,
		DebugFlag::new(debug_proxy),
	)
	.with_log(Arc::new(log.clone()));

	(relay, log)
}
