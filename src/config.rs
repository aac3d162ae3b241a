//! Layered configuration and token storage
//!
//! Configuration lives in TOML files named `config.toml` under a `.hsync`
//! directory, either inside the repository or in the user's home directory.
//! Resolution priority is repo dir, then home dir, then the built-in
//! default server URL. The layered lookup happens exactly once, producing a
//! `Settings` value that is passed explicitly into the sync commands; the
//! rest of the crate never reads config files on its own.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{env, fs};

use crate::error::SyncError;
use crate::types::META_DIR;

/// Server used when no config file sets one
pub const DEFAULT_SERVER: &str = "http://localhost:8080";

/// On-disk shape of one `config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
	pub server: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub token: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<String>,
}

/// Fully resolved configuration for one command invocation
#[derive(Debug, Clone)]
pub struct Settings {
	pub server: String,
	pub token: Option<String>,
	pub refresh_token: Option<String>,
}

impl Settings {
	/// Resolve the layered configuration once.
	///
	/// `repo_dir` is the repository root when the command runs inside one;
	/// its config layer takes priority over the home layer for every field.
	pub fn resolve(repo_dir: Option<&Path>) -> Result<Settings, SyncError> {
		let repo_cfg = match repo_dir {
			Some(dir) => load_layer(&repo_config_path(dir))?,
			None => None,
		};
		let home_cfg = load_layer(&home_config_path()?)?;

		let pick = |f: fn(&ConfigFile) -> Option<String>| -> Option<String> {
			repo_cfg.as_ref().and_then(f).or_else(|| home_cfg.as_ref().and_then(f))
		};

		Ok(Settings {
			server: pick(|c| {
				if c.server.is_empty() {
					None
				} else {
					Some(c.server.clone())
				}
			})
			.unwrap_or_else(|| DEFAULT_SERVER.to_string()),
			token: pick(|c| c.token.clone()),
			refresh_token: pick(|c| c.refresh_token.clone()),
		})
	}

	/// The stored token, or an auth error telling the user to log in
	pub fn require_token(&self) -> Result<&str, SyncError> {
		match self.token.as_deref() {
			Some(t) if !t.is_empty() => Ok(t),
			_ => Err(SyncError::Auth {
				message: "no token found, run `hsync login` first".to_string(),
			}),
		}
	}
}

/// Path of the config file inside a repository
pub fn repo_config_path(dir: &Path) -> PathBuf {
	dir.join(META_DIR).join("config.toml")
}

/// Path of the config file in the user's home directory
pub fn home_config_path() -> Result<PathBuf, SyncError> {
	match env::var("HOME") {
		Ok(home) => Ok(PathBuf::from(home).join(META_DIR).join("config.toml")),
		Err(_) => Err(SyncError::Config {
			message: "could not determine HOME directory".to_string(),
		}),
	}
}

/// Read one config layer; a missing file is simply an absent layer
pub fn load_layer(path: &Path) -> Result<Option<ConfigFile>, SyncError> {
	let text = match fs::read_to_string(path) {
		Ok(t) => t,
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
		Err(e) => return Err(SyncError::Io(e)),
	};
	let cfg: ConfigFile = toml::from_str(&text).map_err(|e| SyncError::Config {
		message: format!("cannot parse {}: {}", path.display(), e),
	})?;
	Ok(Some(cfg))
}

fn write_layer(path: &Path, cfg: &ConfigFile) -> Result<(), SyncError> {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)?;
	}
	let text = toml::to_string(cfg).map_err(|e| SyncError::Config {
		message: format!("cannot serialize config: {}", e),
	})?;
	fs::write(path, text)?;
	Ok(())
}

/// Create the home-directory config file with the given (or default) server.
pub fn init_home_config(server: Option<&str>) -> Result<PathBuf, SyncError> {
	let path = home_config_path()?;
	init_at(&path, server)?;
	Ok(path)
}

/// Create a repo-local config file with the given (or default) server.
pub fn init_local_config(dir: &Path, server: Option<&str>) -> Result<PathBuf, SyncError> {
	let path = repo_config_path(dir);
	init_at(&path, server)?;
	Ok(path)
}

fn init_at(path: &Path, server: Option<&str>) -> Result<(), SyncError> {
	let cfg = ConfigFile {
		server: server.unwrap_or(DEFAULT_SERVER).to_string(),
		token: None,
		refresh_token: None,
	};
	write_layer(path, &cfg)
}

/// Persist a token pair into the highest-priority existing config layer.
///
/// Prefers the repo-dir file, then the home file; when neither exists a
/// repo-dir file is created. The server URL already in the file survives.
pub fn save_token(
	repo_dir: &Path,
	token: &str,
	refresh_token: &str,
) -> Result<PathBuf, SyncError> {
	let local = repo_config_path(repo_dir);
	let home = home_config_path()?;
	let path = if local.exists() {
		local
	} else if home.exists() {
		home
	} else {
		local
	};

	let mut cfg = load_layer(&path)?.unwrap_or_default();
	if cfg.server.is_empty() {
		cfg.server = DEFAULT_SERVER.to_string();
	}
	cfg.token = Some(token.to_string());
	cfg.refresh_token = Some(refresh_token.to_string());
	write_layer(&path, &cfg)?;
	Ok(path)
}

/// Token rendering for `config list` output
pub fn mask_token(token: &str) -> String {
	// Counted in chars so a non-ASCII token cannot split a boundary
	let count = token.chars().count();
	if count <= 10 {
		return "****".to_string();
	}
	let head: String = token.chars().take(6).collect();
	let tail: String = token.chars().skip(count - 4).collect();
	format!("{}****{}", head, tail)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Mutex;
	use tempfile::TempDir;

	// Tests that repoint HOME must not run concurrently
	static HOME_LOCK: Mutex<()> = Mutex::new(());

	fn write_config(dir: &Path, cfg: &ConfigFile) {
		write_layer(&repo_config_path(dir), cfg).unwrap();
	}

	#[test]
	fn test_load_missing_layer_is_none() {
		let dir = TempDir::new().unwrap();
		assert!(load_layer(&repo_config_path(dir.path())).unwrap().is_none());
	}

	#[test]
	fn test_layer_roundtrip() {
		let dir = TempDir::new().unwrap();
		let cfg = ConfigFile {
			server: "https://files.example.com".to_string(),
			token: Some("tok".to_string()),
			refresh_token: None,
		};
		write_config(dir.path(), &cfg);

		let loaded = load_layer(&repo_config_path(dir.path())).unwrap().unwrap();
		assert_eq!(loaded.server, "https://files.example.com");
		assert_eq!(loaded.token.as_deref(), Some("tok"));
		assert!(loaded.refresh_token.is_none());
	}

	#[test]
	fn test_save_token_preserves_server() {
		let dir = TempDir::new().unwrap();
		write_config(
			dir.path(),
			&ConfigFile { server: "https://s.example".to_string(), token: None, refresh_token: None },
		);

		let path = save_token(dir.path(), "newtok", "refresh").unwrap();
		let loaded = load_layer(&path).unwrap().unwrap();
		assert_eq!(loaded.server, "https://s.example");
		assert_eq!(loaded.token.as_deref(), Some("newtok"));
		assert_eq!(loaded.refresh_token.as_deref(), Some("refresh"));
	}

	#[test]
	fn test_save_token_creates_local_file_when_none_exists() {
		let _guard = HOME_LOCK.lock().unwrap();
		let dir = TempDir::new().unwrap();
		// Point HOME at an empty directory so no home layer interferes
		let home = TempDir::new().unwrap();
		env::set_var("HOME", home.path());

		let path = save_token(dir.path(), "tok", "").unwrap();
		assert_eq!(path, repo_config_path(dir.path()));
		assert!(path.exists());
	}

	#[test]
	fn test_mask_token() {
		assert_eq!(mask_token("short"), "****");
		assert_eq!(mask_token("abcdef123456789wxyz"), "abcdef****wxyz");
	}

	#[test]
	fn test_mask_token_multibyte() {
		// Multi-byte chars at both slice boundaries must not panic
		assert_eq!(mask_token("ábcdéf0123456789ñxyz"), "ábcdéf****ñxyz");
		assert_eq!(mask_token("ééééééééééé"), "éééééé****éééé");
	}

	#[test]
	fn test_require_token_missing_is_auth_error() {
		let settings =
			Settings { server: "s".to_string(), token: None, refresh_token: None };
		assert!(settings.require_token().unwrap_err().is_auth());
	}

	#[test]
	fn test_resolve_prefers_repo_layer() {
		let _guard = HOME_LOCK.lock().unwrap();
		let repo = TempDir::new().unwrap();
		let home = TempDir::new().unwrap();
		env::set_var("HOME", home.path());

		write_layer(
			&home_config_path().unwrap(),
			&ConfigFile {
				server: "https://home.example".to_string(),
				token: Some("home-token".to_string()),
				refresh_token: None,
			},
		)
		.unwrap();
		write_config(
			repo.path(),
			&ConfigFile { server: "https://repo.example".to_string(), token: None, refresh_token: None },
		);

		let settings = Settings::resolve(Some(repo.path())).unwrap();
		assert_eq!(settings.server, "https://repo.example");
		// Token falls through to the home layer
		assert_eq!(settings.token.as_deref(), Some("home-token"));
	}

	#[test]
	fn test_resolve_falls_back_to_default_server() {
		let _guard = HOME_LOCK.lock().unwrap();
		let home = TempDir::new().unwrap();
		env::set_var("HOME", home.path());

		let settings = Settings::resolve(None).unwrap();
		assert_eq!(settings.server, DEFAULT_SERVER);
		assert!(settings.token.is_none());
	}
}

// vim: ts=4
