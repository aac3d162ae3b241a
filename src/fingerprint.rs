//! Cheap content fingerprints
//!
//! A fingerprint is the hex SHA-256 of: the decimal file size, the decimal
//! modification time in seconds, and a content sample. Files under 1 MiB are
//! hashed in full; larger files contribute only their first 4096 bytes and
//! (when larger than 8192 bytes) their last 4096 bytes. Two large files with
//! identical size, mtime and head/tail windows therefore fingerprint
//! identically even if interior bytes differ. The thresholds are part of the
//! wire contract with the server and must not change.

use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use std::time::UNIX_EPOCH;

use crate::error::SyncError;

/// Files smaller than this are hashed in full
const FULL_HASH_LIMIT: u64 = 1024 * 1024;

/// Head/tail sample window for large files
const SAMPLE_WINDOW: u64 = 4096;

/// Modification time in whole seconds (0 for pre-epoch times)
pub fn mtime_secs(meta: &fs::Metadata) -> io::Result<i64> {
	let modified = meta.modified()?;
	match modified.duration_since(UNIX_EPOCH) {
		Ok(d) => Ok(d.as_secs() as i64),
		Err(e) => Ok(-(e.duration().as_secs() as i64)),
	}
}

/// Compute the fingerprint of one file.
///
/// Fails with `SyncError::Io` when the file cannot be stat'd or read.
pub fn fingerprint(path: &Path) -> Result<String, SyncError> {
	let meta = fs::metadata(path)?;
	let size = meta.len();
	let mtime = mtime_secs(&meta)?;

	let mut hasher = Sha256::new();
	hasher.update(size.to_string().as_bytes());
	hasher.update(mtime.to_string().as_bytes());

	let mut file = fs::File::open(path)?;
	if size < FULL_HASH_LIMIT {
		io::copy(&mut file, &mut hasher)?;
	} else {
		let mut head = [0u8; SAMPLE_WINDOW as usize];
		file.read_exact(&mut head)?;
		hasher.update(&head[..]);

		if size > 2 * SAMPLE_WINDOW {
			file.seek(SeekFrom::Start(size - SAMPLE_WINDOW))?;
			let mut tail = [0u8; SAMPLE_WINDOW as usize];
			file.read_exact(&mut tail)?;
			hasher.update(&tail[..]);
		}
	}

	Ok(hex::encode(hasher.finalize()))
}


// vim: ts=4
