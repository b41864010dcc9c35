//! Transparent relay that forwards already-authorized GET/POST/DELETE calls to an upstream
//! entitlement service and hands back whatever JSON the upstream produced.
//!
//! The relay never retries, caches, or rewrites requests. Authentication, authorization, and
//! path normalization belong to the dispatcher that sits in front of it; the only side effect
//! the relay owns is the opt-in `debug_proxy` response log.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod mapper;
pub mod obs;
pub mod relay;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::Result;
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
