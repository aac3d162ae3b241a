//! Remote tree fetcher
//!
//! Retrieves the server-side file listing for one repository and turns it
//! into the same snapshot shape the local scanner produces. Every entry must
//! carry path, hash and mod_time; an entry missing a field fails the whole
//! fetch rather than being skipped.

use reqwest::blocking::Client;

use crate::api;
use crate::error::SyncError;
use crate::types::{FileRecord, Snapshot};

/// Fetch the remote snapshot for `repo`.
pub fn fetch_remote(
	client: &Client,
	server: &str,
	token: &str,
	repo: &str,
) -> Result<Snapshot, SyncError> {
	let url = format!("{}/file/list", server);
	let resp = client.get(&url).query(&[("repo", repo)]).bearer_auth(token).send()?;
	let envelope = api::expect_ok(resp)?;
	let entries: Vec<FileRecord> = api::data_field(envelope, "file listing")?;

	let mut snapshot = Snapshot::new();
	for entry in entries {
		snapshot.insert(entry.path.clone(), entry);
	}
	Ok(snapshot)
}

#[cfg(test)]
mod tests {
	use crate::types::FileRecord;

	#[test]
	fn test_listing_entry_decodes_wire_names() {
		let rec: FileRecord =
			serde_json::from_str(r#"{"path":"a/b.txt","hash":"abc","mod_time":1700000000}"#)
				.unwrap();
		assert_eq!(rec.path, "a/b.txt");
		assert_eq!(rec.fingerprint, "abc");
		assert_eq!(rec.modified_at, 1_700_000_000);
	}

	#[test]
	fn test_listing_entry_missing_field_is_rejected() {
		let res: Result<FileRecord, _> =
			serde_json::from_str(r#"{"path":"a.txt","hash":"abc"}"#);
		assert!(res.is_err());
	}
}

// vim: ts=4
