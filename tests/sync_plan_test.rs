//! End-to-end plan computation over real directory trees
//!
//! Scans temp directories the way push/pull/status do and checks the
//! resulting transfer plans, including the interplay of fingerprints and
//! modification times across the two sides.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use tempfile::TempDir;

use hsync::{reconcile, scan};

fn write_file(root: &Path, name: &str, content: &[u8], mtime: i64) -> PathBuf {
	let path = root.join(name);
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent).unwrap();
	}
	let mut f = fs::File::create(&path).unwrap();
	f.write_all(content).unwrap();
	drop(f);
	filetime::set_file_mtime(&path, FileTime::from_unix_time(mtime, 0)).unwrap();
	path
}

#[test]
fn test_identical_trees_are_in_sync() {
	let local = TempDir::new().unwrap();
	let remote = TempDir::new().unwrap();
	write_file(local.path(), "a.txt", b"same", 100);
	write_file(remote.path(), "a.txt", b"same", 100);
	write_file(local.path(), "sub/b.txt", b"also same", 200);
	write_file(remote.path(), "sub/b.txt", b"also same", 200);

	let local_snap = scan::scan(local.path()).unwrap();
	let remote_snap = scan::scan(remote.path()).unwrap();

	let plan = reconcile::plan(&local_snap, &remote_snap);
	assert!(plan.is_empty());
}

#[test]
fn test_one_sided_files_split_across_plans() {
	let local = TempDir::new().unwrap();
	let remote = TempDir::new().unwrap();
	write_file(local.path(), "local_only.txt", b"mine", 100);
	write_file(remote.path(), "remote_only.txt", b"theirs", 100);

	let local_snap = scan::scan(local.path()).unwrap();
	let remote_snap = scan::scan(remote.path()).unwrap();

	let plan = reconcile::plan(&local_snap, &remote_snap);
	let up: Vec<&str> = plan.to_upload.iter().map(|r| r.path.as_str()).collect();
	let down: Vec<&str> = plan.to_download.iter().map(|r| r.path.as_str()).collect();
	assert_eq!(up, vec!["local_only.txt"]);
	assert_eq!(down, vec!["remote_only.txt"]);
}

#[test]
fn test_newer_local_edit_wins() {
	let local = TempDir::new().unwrap();
	let remote = TempDir::new().unwrap();
	write_file(local.path(), "doc.txt", b"edited locally", 200);
	write_file(remote.path(), "doc.txt", b"stale remote", 100);

	let local_snap = scan::scan(local.path()).unwrap();
	let remote_snap = scan::scan(remote.path()).unwrap();

	let plan = reconcile::plan(&local_snap, &remote_snap);
	assert_eq!(plan.to_upload.len(), 1);
	assert!(plan.to_download.is_empty());
}

#[test]
fn test_equal_mtime_different_content_is_ignored() {
	let local = TempDir::new().unwrap();
	let remote = TempDir::new().unwrap();
	write_file(local.path(), "doc.txt", b"version A", 100);
	write_file(remote.path(), "doc.txt", b"version B!", 100);

	let local_snap = scan::scan(local.path()).unwrap();
	let remote_snap = scan::scan(remote.path()).unwrap();

	// Fingerprints differ (size differs) but mtimes tie: neither side moves
	let plan = reconcile::plan(&local_snap, &remote_snap);
	assert!(plan.is_empty());
}

#[test]
fn test_metadata_dir_never_enters_a_plan() {
	let local = TempDir::new().unwrap();
	let remote = TempDir::new().unwrap();
	write_file(local.path(), ".hsync/config.toml", b"server = \"x\"", 100);
	write_file(local.path(), "real.txt", b"data", 100);

	let local_snap = scan::scan(local.path()).unwrap();
	let remote_snap = scan::scan(remote.path()).unwrap();

	let plan = reconcile::plan(&local_snap, &remote_snap);
	let up: Vec<&str> = plan.to_upload.iter().map(|r| r.path.as_str()).collect();
	assert_eq!(up, vec!["real.txt"]);
}

// Same content written at the same second fingerprints identically on both
// sides, so a fresh copy of a tree needs no transfers at all
#[test]
fn test_fingerprints_agree_across_directories() {
	let local = TempDir::new().unwrap();
	let remote = TempDir::new().unwrap();
	let content = vec![0x5Au8; 300_000];
	write_file(local.path(), "big.bin", &content, 12345);
	write_file(remote.path(), "big.bin", &content, 12345);

	let local_snap = scan::scan(local.path()).unwrap();
	let remote_snap = scan::scan(remote.path()).unwrap();

	assert_eq!(
		local_snap.get("big.bin").unwrap().fingerprint,
		remote_snap.get("big.bin").unwrap().fingerprint
	);
	assert!(reconcile::plan(&local_snap, &remote_snap).is_empty());
}

// vim: ts=4
