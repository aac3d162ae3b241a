//! # hsync - HTTP file-storage sync client
//!
//! hsync keeps a local directory tree in step with a remote file-storage
//! service over HTTP(S), using bearer-token auth and a compare-then-transfer
//! model: both sides are captured as path -> fingerprint snapshots, diffed
//! under a last-writer-wins policy, and only the differing files move.
//! Large uploads go in 10 MiB chunks; downloads resume from whatever bytes
//! are already on disk.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hsync::config::Settings;
//! use hsync::repo;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = repo::find_repo(std::path::Path::new("."))?;
//!     let settings = Settings::resolve(Some(&repo.root))?;
//!     let outcome = hsync::sync::push(&settings, &repo.name, &repo.root)?;
//!     println!("uploaded {} file(s)", outcome.transferred);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod logging;
pub mod reconcile;
pub mod remote;
pub mod repo;
pub mod scan;
pub mod sync;
pub mod transfer;
pub mod types;

// Re-export commonly used types and functions
pub use config::Settings;
pub use error::SyncError;
pub use types::{FileRecord, Snapshot, TransferPlan};

// vim: ts=4
