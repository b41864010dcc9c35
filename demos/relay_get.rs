//! Demonstrates loading a relay from TOML and forwarding calls to a mock entitlement service
//! with `debug_proxy` switched on, then toggling it off through a config reload.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use entitlement_relay::{
	auth::UserId,
	config::RelayConfig,
	obs::MemoryUpstreamLog,
	relay::{ReqwestRelay, RequestDescriptor},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let owners_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/candlepin/owners/acme").header("cp-user", "admin");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"key\":\"acme\",\"displayName\":\"ACME Corp\"}");
		})
		.await;
	let missing_mock = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/candlepin/consumers/missing");
			then.status(404)
				.header("content-type", "application/json")
				.body("{\"displayMessage\":\"Unit missing not found.\"}");
		})
		.await;
	let config = RelayConfig::from_toml_str(&format!(
		"base_url = \"{}\"\ndebug_proxy = true\n\n[auth]\nkind = \"basic\"\n\
		 username = \"admin\"\npassword = \"admin\"\n",
		server.url("/candlepin"),
	))?;
	let log = MemoryUpstreamLog::default();
	let relay = ReqwestRelay::from_config(&config)?.with_log(Arc::new(log.clone()));
	let owner = relay
		.forward(RequestDescriptor::get("/owners/acme").acting_as(UserId::new("admin")?))
		.await?;

	println!("Owner ({}): {}.", owner.status, owner.payload);

	match relay.delete("/consumers/missing").await {
		Ok(payload) => println!("Unexpected success: {payload}."),
		Err(e) => println!("Upstream refused: {e} Payload: {:?}.", e.payload()),
	}

	for record in log.take() {
		println!(
			"Logged {} {} -> {:?}: {}.",
			record.method,
			record.path,
			record.status,
			record.payload_text()
		);
	}

	let mut reloaded = config.clone();

	reloaded.debug_proxy = false;
	relay.debug.reload(&reloaded);

	if let Err(e) = relay.get("/owners/acme").await {
		println!("Unattributed call refused: {e}");
	}

	println!("Records after disabling debug_proxy: {}.", log.len());

	owners_mock.assert_calls_async(1).await;
	missing_mock.assert_async().await;

	Ok(())
}
