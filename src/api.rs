//! Wire envelope handling shared by every server call
//!
//! Every JSON endpoint answers with the same envelope: a success flag, an
//! optional message and a payload whose shape depends on the call. The
//! envelope is decoded strictly; a false flag is a server rejection and a
//! payload that does not match the expected shape is a protocol error,
//! never silently coerced.

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::SyncError;

/// Response envelope common to all JSON endpoints
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
	#[serde(default)]
	pub ok: bool,
	#[serde(default)]
	pub code: Option<i64>,
	#[serde(default)]
	pub msg: Option<String>,
	#[serde(default)]
	pub error: Option<String>,
	#[serde(default)]
	pub data: Option<serde_json::Value>,
}

impl ApiEnvelope {
	/// Best human-readable rejection message the envelope carries
	pub fn message(&self) -> String {
		self.msg
			.clone()
			.or_else(|| self.error.clone())
			.unwrap_or_else(|| "request rejected by server".to_string())
	}
}

/// Build the blocking HTTP client used for one command invocation
pub fn client() -> Result<Client, SyncError> {
	Ok(Client::builder().build()?)
}

/// Read a response, enforce HTTP status and the envelope's success flag.
///
/// 401/403 become `Auth`, other non-success statuses become `Server` with
/// the response body, an unparseable body becomes `Protocol`, `ok=false`
/// becomes `Server` with the envelope's message.
pub fn expect_ok(resp: Response) -> Result<ApiEnvelope, SyncError> {
	let status = resp.status();
	let body = resp.text()?;

	if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
		return Err(SyncError::Auth {
			message: format!("token rejected (HTTP {}): {}", status.as_u16(), body.trim()),
		});
	}
	if !status.is_success() {
		return Err(SyncError::Server {
			message: format!("HTTP {}: {}", status.as_u16(), body.trim()),
		});
	}

	let envelope: ApiEnvelope = serde_json::from_str(&body).map_err(|e| SyncError::Protocol {
		message: format!("invalid response envelope: {} (body: {})", e, body.trim()),
	})?;

	if !envelope.ok {
		return Err(SyncError::Server { message: envelope.message() });
	}
	Ok(envelope)
}

/// Decode the envelope's data payload into the shape `what` expects
pub fn data_field<T: DeserializeOwned>(envelope: ApiEnvelope, what: &str) -> Result<T, SyncError> {
	let data = envelope.data.ok_or_else(|| SyncError::Protocol {
		message: format!("missing data field in {} response", what),
	})?;
	serde_json::from_value(data).map_err(|e| SyncError::Protocol {
		message: format!("malformed {} response: {}", what, e),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_envelope_message_prefers_msg() {
		let env: ApiEnvelope =
			serde_json::from_str(r#"{"ok":false,"msg":"nope","error":"other"}"#).unwrap();
		assert_eq!(env.message(), "nope");
	}

	#[test]
	fn test_envelope_defaults() {
		let env: ApiEnvelope = serde_json::from_str("{}").unwrap();
		assert!(!env.ok);
		assert!(env.data.is_none());
		assert_eq!(env.message(), "request rejected by server");
	}

	#[test]
	fn test_data_field_rejects_missing_payload() {
		let env: ApiEnvelope = serde_json::from_str(r#"{"ok":true}"#).unwrap();
		let res: Result<Vec<String>, _> = data_field(env, "listing");
		assert!(matches!(res, Err(SyncError::Protocol { .. })));
	}

	#[test]
	fn test_data_field_rejects_wrong_shape() {
		let env: ApiEnvelope =
			serde_json::from_str(r#"{"ok":true,"data":{"a":1}}"#).unwrap();
		let res: Result<Vec<String>, _> = data_field(env, "listing");
		assert!(matches!(res, Err(SyncError::Protocol { .. })));
	}
}

// vim: ts=4
