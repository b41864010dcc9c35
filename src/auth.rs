//! Upstream credentials and the caller identity the relay forwards on the dispatcher's behalf.

pub mod id;

pub use id::*;

// self
use crate::_prelude::*;

/// Credential the relay presents to the upstream on every call.
///
/// Deserializes from a `kind`-tagged table, e.g. `{ kind = "basic", username = "...", password =
/// "..." }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpstreamAuth {
	/// No credential; the upstream trusts the network path.
	#[default]
	None,
	/// HTTP Basic credentials.
	Basic {
		/// Account name.
		username: String,
		/// Account password.
		password: Secret,
	},
	/// Bearer token sent in the `Authorization` header.
	Bearer {
		/// Opaque token value.
		token: Secret,
	},
}
impl UpstreamAuth {
	/// Stable label recorded on outbound request events.
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Basic { .. } => "basic",
			Self::Bearer { .. } => "bearer",
		}
	}

	/// Whether every part the upstream will check is non-empty.
	///
	/// A blank username or token usually means an unset environment variable made it into the
	/// config; the upstream would answer 401 on every call.
	pub fn is_complete(&self) -> bool {
		match self {
			Self::None => true,
			Self::Basic { username, password } => !username.is_empty() && !password.is_empty(),
			Self::Bearer { token } => !token.is_empty(),
		}
	}
}

/// Credential material kept out of `Debug`, `Display`, and tracing output.
///
/// Only the transport reads the raw value, through [`expose`](Self::expose).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);
impl Secret {
	/// Wraps a credential value.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Raw credential for the outbound `Authorization` header.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Whether the credential is blank.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Secret(***)")
	}
}
impl Display for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("***")
	}
}
