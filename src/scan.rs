//! Local tree scanner
//!
//! Walks a repository root and produces a snapshot of every regular file,
//! keyed by slash-normalized relative path. The client's own metadata
//! (`.hsync/`) and the ignore-marker file are never part of a snapshot;
//! patterns listed in the marker file are honored gitignore-style.

use ignore::WalkBuilder;
use std::io;
use std::path::Path;

use crate::error::SyncError;
use crate::fingerprint;
use crate::types::{FileRecord, Snapshot, IGNORE_FILE, META_DIR};

fn walk_error(err: ignore::Error) -> SyncError {
	SyncError::Io(io::Error::new(io::ErrorKind::Other, err))
}

/// Relative path with forward slashes regardless of platform
fn normalize(rel: &Path) -> String {
	let parts: Vec<String> =
		rel.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect();
	parts.join("/")
}

/// Scan `root` recursively into an immutable snapshot.
///
/// Fails fast with `SyncError::Io` on the first unreadable path; no partial
/// snapshot is ever returned.
pub fn scan(root: &Path) -> Result<Snapshot, SyncError> {
	let mut walker = WalkBuilder::new(root);
	walker.standard_filters(false).follow_links(false);
	walker.add_custom_ignore_filename(IGNORE_FILE);

	let mut snapshot = Snapshot::new();
	for entry in walker.build() {
		let entry = entry.map_err(walk_error)?;
		match entry.file_type() {
			Some(ft) if ft.is_file() => {}
			_ => continue,
		}

		let rel = entry
			.path()
			.strip_prefix(root)
			.map_err(|e| SyncError::Io(io::Error::new(io::ErrorKind::Other, e)))?;
		let rel = normalize(rel);

		// The repository's own config/state is never synced
		if rel == IGNORE_FILE || rel.starts_with(META_DIR) {
			continue;
		}

		let meta = entry.metadata().map_err(walk_error)?;
		let record = FileRecord {
			fingerprint: fingerprint::fingerprint(entry.path())?,
			modified_at: fingerprint::mtime_secs(&meta)?,
			path: rel.clone(),
		};
		snapshot.insert(rel, record);
	}

	Ok(snapshot)
}


// vim: ts=4
