//! Repository discovery
//!
//! A repository is any directory with a `.hsync` metadata directory in it;
//! the repository name is that directory's basename. Discovery walks
//! upwards from the starting point, like version-control tools do.

use std::path::{Path, PathBuf};

use crate::error::SyncError;
use crate::types::META_DIR;

/// Repository root and name, resolved from a starting directory
#[derive(Debug, Clone)]
pub struct Repo {
	pub root: PathBuf,
	pub name: String,
}

/// Find the nearest ancestor of `start` that contains the metadata marker.
pub fn find_repo(start: &Path) -> Result<Repo, SyncError> {
	let start_abs = start.canonicalize()?;

	let mut dir: &Path = &start_abs;
	loop {
		if dir.join(META_DIR).exists() {
			let name = dir
				.file_name()
				.map(|n| n.to_string_lossy().into_owned())
				.ok_or_else(|| SyncError::NoRepository {
					start: start.display().to_string(),
				})?;
			return Ok(Repo { root: dir.to_path_buf(), name });
		}
		match dir.parent() {
			Some(parent) => dir = parent,
			None => {
				return Err(SyncError::NoRepository { start: start.display().to_string() })
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;
	use tempfile::TempDir;

	#[test]
	fn test_find_repo_at_root() {
		let dir = TempDir::new().unwrap();
		fs::create_dir(dir.path().join(META_DIR)).unwrap();

		let repo = find_repo(dir.path()).unwrap();
		assert_eq!(repo.root, dir.path().canonicalize().unwrap());
		assert_eq!(repo.name, dir.path().file_name().unwrap().to_string_lossy());
	}

	#[test]
	fn test_find_repo_from_subdirectory() {
		let dir = TempDir::new().unwrap();
		fs::create_dir(dir.path().join(META_DIR)).unwrap();
		let sub = dir.path().join("a").join("b");
		fs::create_dir_all(&sub).unwrap();

		let repo = find_repo(&sub).unwrap();
		assert_eq!(repo.root, dir.path().canonicalize().unwrap());
	}

	#[test]
	fn test_find_repo_outside_any_repo() {
		let dir = TempDir::new().unwrap();
		let err = find_repo(dir.path()).unwrap_err();
		assert!(matches!(err, SyncError::NoRepository { .. }));
	}
}

// vim: ts=4
