//! Acting-user identifier forwarded to the upstream.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

const IDENTIFIER_MAX_LEN: usize = 128;

/// Login name of the user the dispatcher authenticated, forwarded so the upstream can attribute
/// the call.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);
impl UserId {
	/// Creates a new identifier after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}
}
impl Deref for UserId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for UserId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for UserId {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<UserId> for String {
	fn from(value: UserId) -> Self {
		value.0
	}
}
impl TryFrom<String> for UserId {
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl Debug for UserId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "User({})", self.0)
	}
}
impl Display for UserId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for UserId {
	type Err = IdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("User identifier cannot be empty.")]
	Empty,
	/// The identifier contains whitespace characters.
	#[error("User identifier contains whitespace.")]
	ContainsWhitespace,
	/// The identifier contains control characters that cannot travel in a header.
	#[error("User identifier contains control characters.")]
	ContainsControl,
	/// The identifier exceeded the allowed character count.
	#[error("User identifier exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

fn validate_view(view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty);
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace);
	}
	if view.chars().any(char::is_control) {
		return Err(IdentifierError::ContainsControl);
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}
