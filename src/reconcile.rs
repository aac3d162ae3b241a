//! Snapshot reconciliation
//!
//! Pure diffing of a local snapshot against a remote snapshot under a
//! last-writer-wins policy. No I/O happens here; the two plans depend only
//! on the shape of the snapshots, not on how they were produced.
//!
//! A path goes into a plan when it is missing on the other side, or when the
//! fingerprints differ and this side's mtime is strictly newer. Matching
//! fingerprints never transfer, whatever the timestamps say. Differing
//! fingerprints with equal timestamps land in neither plan; that conflict is
//! deliberately left untouched.

use crate::types::{FileRecord, Snapshot, TransferPlan};

/// Records in `local` that a push must send to the server
pub fn plan_upload(local: &Snapshot, remote: &Snapshot) -> Vec<FileRecord> {
	let mut result = Vec::new();
	for (path, l) in local {
		match remote.get(path) {
			None => result.push(l.clone()),
			Some(r) => {
				if l.fingerprint != r.fingerprint && l.modified_at > r.modified_at {
					result.push(l.clone());
				}
			}
		}
	}
	result
}

/// Records in `remote` that a pull must fetch from the server
pub fn plan_download(local: &Snapshot, remote: &Snapshot) -> Vec<FileRecord> {
	let mut result = Vec::new();
	for (path, r) in remote {
		match local.get(path) {
			None => result.push(r.clone()),
			Some(l) => {
				if r.fingerprint != l.fingerprint && r.modified_at > l.modified_at {
					result.push(r.clone());
				}
			}
		}
	}
	result
}

/// Both directions at once, for status reporting
pub fn plan(local: &Snapshot, remote: &Snapshot) -> TransferPlan {
	TransferPlan {
		to_upload: plan_upload(local, remote),
		to_download: plan_download(local, remote),
	}
}


// vim: ts=4
