//! Relay configuration loaded from TOML, plus the reloadable `debug_proxy` flag.
//!
//! ```toml
//! base_url = "https://candlepin.example.com/candlepin"
//! debug_proxy = true
//! timeout_secs = 30
//!
//! [auth]
//! kind = "basic"
//! username = "admin"
//! password = "admin"
//! ```

// std
use std::{
	path::Path,
	sync::atomic::{AtomicBool, Ordering},
	time::Duration as StdDuration,
};
// self
use crate::{
	_prelude::*,
	auth::UpstreamAuth,
	endpoint::{DEFAULT_ACTING_USER_HEADER, EndpointError, UpstreamEndpoint},
	error::ConfigError,
};

/// Deserialized relay settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
	/// Base URL inbound paths are appended to.
	pub base_url: Url,
	/// Log every upstream response at `DEBUG` when true.
	#[serde(default)]
	pub debug_proxy: bool,
	/// Total request timeout in seconds.
	#[serde(default)]
	pub timeout_secs: Option<u64>,
	/// Connect timeout in seconds.
	#[serde(default)]
	pub connect_timeout_secs: Option<u64>,
	/// Header carrying the acting user.
	#[serde(default = "default_acting_user_header")]
	pub acting_user_header: String,
	/// Credential presented to the upstream.
	#[serde(default)]
	pub auth: UpstreamAuth,
}
impl RelayConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
		let config: Self = serde_path_to_error::deserialize(toml::Deserializer::new(raw))?;

		config.endpoint()?;

		Ok(config)
	}

	/// Reads, parses, and validates the TOML file at `path`.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let raw = std::fs::read_to_string(path)
			.map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;

		Self::from_toml_str(&raw)
	}

	/// Builds the validated upstream endpoint described by this configuration.
	pub fn endpoint(&self) -> Result<UpstreamEndpoint, EndpointError> {
		let mut builder = UpstreamEndpoint::builder()
			.base_url(self.base_url.clone())
			.auth(self.auth.clone())
			.acting_user_header(self.acting_user_header.clone());

		if let Some(secs) = self.timeout_secs {
			builder = builder.timeout(StdDuration::from_secs(secs));
		}
		if let Some(secs) = self.connect_timeout_secs {
			builder = builder.connect_timeout(StdDuration::from_secs(secs));
		}

		builder.build()
	}

	/// Creates a fresh [`DebugFlag`] seeded from `debug_proxy`.
	pub fn debug_flag(&self) -> DebugFlag {
		DebugFlag::new(self.debug_proxy)
	}
}

fn default_acting_user_header() -> String {
	DEFAULT_ACTING_USER_HEADER.into()
}

/// Shared `debug_proxy` switch.
///
/// The relay only reads it, once per call; the host flips it by handing a reloaded
/// [`RelayConfig`] to [`reload`](Self::reload). Clones observe the same value.
#[derive(Clone, Debug, Default)]
pub struct DebugFlag(Arc<AtomicBool>);
impl DebugFlag {
	/// Creates a flag with the given initial value.
	pub fn new(enabled: bool) -> Self {
		Self(Arc::new(AtomicBool::new(enabled)))
	}

	/// Current value.
	pub fn is_enabled(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}

	/// Applies the `debug_proxy` value of a reloaded configuration and returns the previous value.
	pub fn reload(&self, config: &RelayConfig) -> bool {
		let previous = self.0.swap(config.debug_proxy, Ordering::Relaxed);

		#[cfg(feature = "tracing")]
		if previous != config.debug_proxy {
			tracing::info!(debug_proxy = config.debug_proxy, "upstream response logging toggled");
		}

		previous
	}
}
