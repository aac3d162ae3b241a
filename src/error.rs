//! Error types for hsync operations

use std::error::Error;
use std::fmt;
use std::io;

/// Main error type for sync operations
#[derive(Debug)]
pub enum SyncError {
	/// Local filesystem failure (unreadable file, missing directory)
	Io(io::Error),

	/// Transport-level failure (connection refused, timeout)
	Network { message: String },

	/// Malformed or unexpected response shape
	Protocol { message: String },

	/// Well-formed response signaling application-level rejection
	Server { message: String },

	/// Missing, invalid or expired token
	Auth { message: String },

	/// Invalid or unresolvable configuration
	Config { message: String },

	/// Not inside a repository (no metadata marker found)
	NoRepository { start: String },
}

impl fmt::Display for SyncError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SyncError::Io(e) => write!(f, "I/O error: {}", e),
			SyncError::Network { message } => write!(f, "Network error: {}", message),
			SyncError::Protocol { message } => write!(f, "Protocol error: {}", message),
			SyncError::Server { message } => write!(f, "Server error: {}", message),
			SyncError::Auth { message } => write!(f, "Authentication error: {}", message),
			SyncError::Config { message } => write!(f, "Configuration error: {}", message),
			SyncError::NoRepository { start } => {
				write!(
					f,
					"not an hsync repository (or any parent of {}): .hsync not found",
					start
				)
			}
		}
	}
}

impl Error for SyncError {}

impl From<io::Error> for SyncError {
	fn from(e: io::Error) -> Self {
		SyncError::Io(e)
	}
}

impl From<reqwest::Error> for SyncError {
	fn from(e: reqwest::Error) -> Self {
		// Decode failures are a protocol problem, everything else is transport
		if e.is_decode() {
			SyncError::Protocol { message: e.to_string() }
		} else {
			SyncError::Network { message: e.to_string() }
		}
	}
}

impl From<serde_json::Error> for SyncError {
	fn from(e: serde_json::Error) -> Self {
		SyncError::Protocol { message: e.to_string() }
	}
}

impl SyncError {
	/// True when the failure means the token was rejected or absent
	pub fn is_auth(&self) -> bool {
		matches!(self, SyncError::Auth { .. })
	}
}

// vim: ts=4
