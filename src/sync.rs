//! Sync orchestration: the push / pull / status command bodies
//!
//! Each command captures both snapshots once (remote listing, local scan),
//! derives its plan, then executes transfers strictly one after another.
//! A single file's transfer failure is reported and counted but never stops
//! the rest of the plan; only failures that prevent producing a plan at all
//! (bad config, missing token, unreachable server) propagate out.

use std::path::Path;

use crate::config::Settings;
use crate::error::SyncError;
use crate::logging::{error, info};
use crate::types::TransferPlan;
use crate::{api, reconcile, remote, scan, transfer};

/// Per-file outcome tally for one push or pull
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
	pub transferred: usize,
	pub failed: usize,
}

impl SyncOutcome {
	pub fn attempted(&self) -> usize {
		self.transferred + self.failed
	}
}

/// Upload everything the reconciler selects as locally newer or local-only.
pub fn push(settings: &Settings, repo_name: &str, root: &Path) -> Result<SyncOutcome, SyncError> {
	let token = settings.require_token()?;
	let client = api::client()?;

	let remote_snap = remote::fetch_remote(&client, &settings.server, token, repo_name)?;
	let local_snap = scan::scan(root)?;
	let to_upload = reconcile::plan_upload(&local_snap, &remote_snap);
	info!("push: {} file(s) to upload", to_upload.len());

	let mut outcome = SyncOutcome::default();
	for record in &to_upload {
		match transfer::upload(&client, &settings.server, token, repo_name, root, record) {
			Ok(()) => {
				info!(path = record.path.as_str(), "uploaded");
				outcome.transferred += 1;
			}
			Err(e) => {
				error!(path = record.path.as_str(), "upload failed: {}", e);
				outcome.failed += 1;
			}
		}
	}
	Ok(outcome)
}

/// Download everything the reconciler selects as remotely newer or remote-only.
pub fn pull(settings: &Settings, repo_name: &str, root: &Path) -> Result<SyncOutcome, SyncError> {
	let token = settings.require_token()?;
	let client = api::client()?;

	let remote_snap = remote::fetch_remote(&client, &settings.server, token, repo_name)?;
	let local_snap = scan::scan(root)?;
	let to_download = reconcile::plan_download(&local_snap, &remote_snap);
	info!("pull: {} file(s) to download", to_download.len());

	let mut outcome = SyncOutcome::default();
	for record in &to_download {
		match transfer::download(&client, &settings.server, token, repo_name, root, &record.path)
		{
			Ok(()) => {
				info!(path = record.path.as_str(), "downloaded");
				outcome.transferred += 1;
			}
			Err(e) => {
				error!(path = record.path.as_str(), "download failed: {}", e);
				outcome.failed += 1;
			}
		}
	}
	Ok(outcome)
}

/// Compute both plans without transferring anything (dry-run view).
pub fn status(settings: &Settings, repo_name: &str, root: &Path) -> Result<TransferPlan, SyncError> {
	let token = settings.require_token()?;
	let client = api::client()?;

	let remote_snap = remote::fetch_remote(&client, &settings.server, token, repo_name)?;
	let local_snap = scan::scan(root)?;
	Ok(reconcile::plan(&local_snap, &remote_snap))
}

// vim: ts=4
