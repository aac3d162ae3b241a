//! Account registration and login

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::api;
use crate::error::SyncError;

#[derive(Serialize)]
struct RegisterRequest<'a> {
	email: &'a str,
	password: &'a str,
	user_type: i32,
	verification_type: i32,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
	email: &'a str,
	password: &'a str,
}

/// Tokens returned by a successful login
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
	pub token: String,
	#[serde(default)]
	pub refresh_token: String,
}

/// Per-field validation failure in a register rejection
#[derive(Debug, Deserialize)]
struct FieldError {
	#[serde(default)]
	field: String,
	#[serde(default)]
	messages: serde_json::Value,
}

/// Register a new account.
///
/// Validation rejections carry a per-field message list in the envelope's
/// data; those are folded into the error message.
pub fn register(
	client: &Client,
	server: &str,
	email: &str,
	password: &str,
) -> Result<(), SyncError> {
	let body = RegisterRequest { email, password, user_type: 1, verification_type: 0 };
	let resp = client.post(format!("{}/api/v1/register", server)).json(&body).send()?;

	let status = resp.status();
	let text = resp.text()?;
	let envelope: api::ApiEnvelope =
		serde_json::from_str(&text).map_err(|e| SyncError::Protocol {
			message: format!("invalid register response: {} (body: {})", e, text.trim()),
		})?;

	if envelope.ok && status.is_success() {
		return Ok(());
	}

	let mut message = envelope.message();
	if let Some(data) = envelope.data {
		if let Ok(fields) = serde_json::from_value::<Vec<FieldError>>(data) {
			for f in fields {
				message.push_str(&format!("; {}: {}", f.field, f.messages));
			}
		}
	}
	Err(SyncError::Server { message })
}

/// Log in and return the token pair the server issued.
pub fn login(
	client: &Client,
	server: &str,
	email: &str,
	password: &str,
) -> Result<TokenPair, SyncError> {
	let body = LoginRequest { email, password };
	let resp = client.post(format!("{}/api/v1/login", server)).json(&body).send()?;
	let envelope = api::expect_ok(resp)?;
	api::data_field(envelope, "login")
}


// vim: ts=4
