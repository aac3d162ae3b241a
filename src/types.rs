//! Core data types shared between the scanner, fetcher and reconciler

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the repository metadata directory (never synced)
pub const META_DIR: &str = ".hsync";

/// Name of the repository ignore-marker file (never synced)
pub const IGNORE_FILE: &str = ".hsyncignore";

/// The unit of comparison between a local and a remote tree.
///
/// `fingerprint` equality is treated as evidence the content is unchanged;
/// it is a cheap approximation, not a cryptographic binding. `modified_at`
/// is only a tie-break signal, never the sole change indicator.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct FileRecord {
	/// Relative, slash-normalized path (unique within one snapshot)
	pub path: String,

	/// Content fingerprint (hex string)
	#[serde(rename = "hash")]
	pub fingerprint: String,

	/// Modification time in whole seconds
	#[serde(rename = "mod_time")]
	pub modified_at: i64,
}

/// An immutable path -> record mapping captured at one instant,
/// produced atomically by either the scanner (local) or the fetcher (remote).
pub type Snapshot = BTreeMap<String, FileRecord>;

/// The derived transfer plan for one push/pull/status invocation.
///
/// The two lists are disjoint: a path never needs both directions.
#[derive(Clone, Debug, Default)]
pub struct TransferPlan {
	pub to_upload: Vec<FileRecord>,
	pub to_download: Vec<FileRecord>,
}

impl TransferPlan {
	pub fn is_empty(&self) -> bool {
		self.to_upload.is_empty() && self.to_download.is_empty()
	}
}

// vim: ts=4
