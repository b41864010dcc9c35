//! Inbound request descriptor handed to the relay by the dispatcher.

// self
use crate::{_prelude::*, auth::UserId};

/// HTTP verbs the relay forwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProxyMethod {
	/// `GET`, never carries a body.
	Get,
	/// `POST`, carries the inbound body verbatim.
	Post,
	/// `DELETE`, never carries a body.
	Delete,
}
impl ProxyMethod {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ProxyMethod::Get => "GET",
			ProxyMethod::Post => "POST",
			ProxyMethod::Delete => "DELETE",
		}
	}

	#[cfg(feature = "reqwest")]
	pub(crate) fn as_reqwest(self) -> reqwest::Method {
		match self {
			ProxyMethod::Get => reqwest::Method::GET,
			ProxyMethod::Post => reqwest::Method::POST,
			ProxyMethod::Delete => reqwest::Method::DELETE,
		}
	}
}
impl Display for ProxyMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for ProxyMethod {
	type Err = UnsupportedMethod;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_uppercase().as_str() {
			"GET" => Ok(Self::Get),
			"POST" => Ok(Self::Post),
			"DELETE" => Ok(Self::Delete),
			_ => Err(UnsupportedMethod(s.to_owned())),
		}
	}
}

/// Raised when a dispatcher asks for a verb the relay does not forward.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("HTTP method `{0}` is not relayed.")]
pub struct UnsupportedMethod(pub String);

/// One already-authorized call to forward.
///
/// Fields are private so the descriptor stays immutable once the dispatcher has built it; the
/// relay only ever reads from it.
#[derive(Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
	method: ProxyMethod,
	path: String,
	body: Option<Vec<u8>>,
	acting_user: Option<UserId>,
}
impl RequestDescriptor {
	/// Describes a `GET` of `path`.
	pub fn get(path: impl Into<String>) -> Self {
		Self { method: ProxyMethod::Get, path: path.into(), body: None, acting_user: None }
	}

	/// Describes a `POST` of `body` to `path`.
	pub fn post(path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
		Self {
			method: ProxyMethod::Post,
			path: path.into(),
			body: Some(body.into()),
			acting_user: None,
		}
	}

	/// Describes a `DELETE` of `path`.
	pub fn delete(path: impl Into<String>) -> Self {
		Self { method: ProxyMethod::Delete, path: path.into(), body: None, acting_user: None }
	}

	/// Attributes the call to the user the dispatcher authenticated.
	pub fn acting_as(mut self, user: UserId) -> Self {
		self.acting_user = Some(user);

		self
	}

	/// Verb to forward.
	pub fn method(&self) -> ProxyMethod {
		self.method
	}

	/// Upstream-relative path, exactly as the dispatcher normalized it.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Raw body bytes; only `POST` carries one.
	pub fn body(&self) -> Option<&[u8]> {
		self.body.as_deref()
	}

	/// User the call is made on behalf of.
	pub fn acting_user(&self) -> Option<&UserId> {
		self.acting_user.as_ref()
	}
}
impl Debug for RequestDescriptor {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestDescriptor")
			.field("method", &self.method)
			.field("path", &self.path)
			.field("body_len", &self.body.as_ref().map(Vec::len))
			.field("acting_user", &self.acting_user)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn constructors_only_attach_bodies_to_post() {
		let get = RequestDescriptor::get("/owners/acme");
		let post =
			RequestDescriptor::post("/consumers/abc/entitlements", br#"{"pool":"p1"}"#.to_vec());
		let delete = RequestDescriptor::delete("/consumers/abc");

		assert_eq!(get.method(), ProxyMethod::Get);
		assert!(get.body().is_none());
		assert_eq!(post.method(), ProxyMethod::Post);
		assert_eq!(post.body(), Some(br#"{"pool":"p1"}"#.as_slice()));
		assert_eq!(delete.path(), "/consumers/abc");
		assert!(delete.body().is_none());
	}

	#[test]
	fn acting_user_is_carried_and_debug_hides_body() {
		let user = UserId::new("admin").expect("Acting user fixture should be valid.");
		let request = RequestDescriptor::post("/owners", "secret-body").acting_as(user.clone());

		assert_eq!(request.acting_user(), Some(&user));

		let rendered = format!("{request:?}");

		assert!(rendered.contains("body_len: Some(11)"));
		assert!(!rendered.contains("secret-body"));
	}

	#[test]
	fn methods_parse_case_insensitively() {
		assert_eq!("get".parse::<ProxyMethod>(), Ok(ProxyMethod::Get));
		assert_eq!("Delete".parse::<ProxyMethod>(), Ok(ProxyMethod::Delete));
		assert_eq!(
			"PUT".parse::<ProxyMethod>(),
			Err(UnsupportedMethod("PUT".into())),
			"Verbs outside GET/POST/DELETE must be rejected."
		);
		assert_eq!(ProxyMethod::Post.to_string(), "POST");
	}
}
