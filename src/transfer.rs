//! Transfer executor
//!
//! Uploads are single-shot multipart POSTs up to 100 MiB; above that the
//! file goes through a chunked session: init (receiving an opaque
//! `upload_id`), one sequential 10 MiB part per request, then a completion
//! call that makes the server merge the parts. A failed part aborts the
//! whole upload; there is no chunk retry and no session persistence, so a
//! killed upload restarts from part zero.
//!
//! Downloads resume from whatever is already on disk: the existing file
//! size becomes a `Range: bytes=N-` request and the body is appended. A 416
//! answer means the file is already complete.

use reqwest::blocking::{multipart, Client};
use reqwest::{header, StatusCode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::api;
use crate::error::SyncError;
use crate::fingerprint;
use crate::types::FileRecord;

/// Largest file that goes up in a single request
const SINGLE_UPLOAD_LIMIT: u64 = 100 * 1024 * 1024;

/// Part size for chunked uploads
pub const CHUNK_SIZE: u64 = 10 * 1024 * 1024;

/// Number of parts a chunked upload of `size` bytes needs
fn total_parts(size: u64) -> u64 {
	(size + CHUNK_SIZE - 1) / CHUNK_SIZE
}

/// Byte range (offset, length) of one zero-based part
fn chunk_span(size: u64, index: u64) -> (u64, u64) {
	let start = index * CHUNK_SIZE;
	let len = CHUNK_SIZE.min(size - start);
	(start, len)
}

/// Turn a slash-normalized relative path into a local path under `root`
fn local_path(root: &Path, rel: &str) -> PathBuf {
	let mut path = root.to_path_buf();
	for part in rel.split('/') {
		path.push(part);
	}
	path
}

/// Upload one file, choosing single-shot or chunked by size.
pub fn upload(
	client: &Client,
	server: &str,
	token: &str,
	repo: &str,
	root: &Path,
	record: &FileRecord,
) -> Result<(), SyncError> {
	let path = local_path(root, &record.path);
	let meta = fs::metadata(&path)?;

	if meta.len() > SINGLE_UPLOAD_LIMIT {
		upload_in_chunks(client, server, token, repo, &path, &record.path, &meta)
	} else {
		upload_single(client, server, token, repo, &path, &record.path, meta.len())
	}
}

fn upload_single(
	client: &Client,
	server: &str,
	token: &str,
	repo: &str,
	path: &Path,
	rel: &str,
	size: u64,
) -> Result<(), SyncError> {
	let file = fs::File::open(path)?;
	let part = multipart::Part::reader_with_length(file, size).file_name(rel.to_string());
	let form = multipart::Form::new().part("file", part);

	let resp = client
		.post(format!("{}/file/upload", server))
		.query(&[("repo", repo)])
		.bearer_auth(token)
		.multipart(form)
		.send()?;
	api::expect_ok(resp)?;
	Ok(())
}

#[derive(Serialize)]
struct InitRequest<'a> {
	repo: &'a str,
	file_name: &'a str,
	file_size: u64,
	total_parts: u64,
	original_mod_time: i64,
}

#[derive(Deserialize)]
struct InitData {
	upload_id: String,
}

#[derive(Serialize)]
struct CompleteRequest<'a> {
	upload_id: &'a str,
}

fn upload_in_chunks(
	client: &Client,
	server: &str,
	token: &str,
	repo: &str,
	path: &Path,
	rel: &str,
	meta: &fs::Metadata,
) -> Result<(), SyncError> {
	let size = meta.len();
	let parts = total_parts(size);
	let mod_time = fingerprint::mtime_secs(meta)?;
	info!(file = rel, size, parts, "starting chunked upload");

	let init = InitRequest { repo, file_name: rel, file_size: size, total_parts: parts, original_mod_time: mod_time };
	let resp = client
		.post(format!("{}/file/upload/init", server))
		.query(&[("repo", repo)])
		.bearer_auth(token)
		.json(&init)
		.send()?;
	let data: InitData = api::data_field(api::expect_ok(resp)?, "upload init")?;

	// Parts are strictly sequential; any failure aborts the whole session
	let mut file = fs::File::open(path)?;
	for index in 0..parts {
		let (start, len) = chunk_span(size, index);
		let mut chunk = vec![0u8; len as usize];
		file.seek(SeekFrom::Start(start))?;
		file.read_exact(&mut chunk)?;

		let part = multipart::Part::bytes(chunk).file_name(rel.to_string());
		let form = multipart::Form::new()
			.part("file", part)
			.text("upload_id", data.upload_id.clone())
			.text("part_index", index.to_string());
		let resp = client
			.post(format!("{}/file/upload/chunk", server))
			.query(&[("repo", repo)])
			.bearer_auth(token)
			.multipart(form)
			.send()?;
		api::expect_ok(resp)?;
		info!(file = rel, "chunk {}/{} uploaded", index + 1, parts);
	}

	let complete = CompleteRequest { upload_id: &data.upload_id };
	let resp = client
		.post(format!("{}/file/upload/complete", server))
		.query(&[("repo", repo)])
		.bearer_auth(token)
		.json(&complete)
		.send()?;
	api::expect_ok(resp)?;
	info!(file = rel, "chunked upload merged");
	Ok(())
}

/// Download one file, resuming from the bytes already on disk.
pub fn download(
	client: &Client,
	server: &str,
	token: &str,
	repo: &str,
	root: &Path,
	remote_path: &str,
) -> Result<(), SyncError> {
	let dest = local_path(root, remote_path);
	let offset = match fs::metadata(&dest) {
		Ok(meta) => meta.len(),
		Err(_) => 0,
	};

	let mut req = client
		.get(format!("{}/file/download", server))
		.query(&[("repo", repo), ("file", remote_path)])
		.bearer_auth(token);
	if offset > 0 {
		req = req.header(header::RANGE, format!("bytes={}-", offset));
	}
	let resp = req.send()?;

	let status = resp.status();
	if status == StatusCode::RANGE_NOT_SATISFIABLE {
		// Nothing left beyond our offset
		debug!(file = remote_path, offset, "already fully downloaded");
		return Ok(());
	}
	if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
		return Err(SyncError::Auth {
			message: format!("token rejected (HTTP {})", status.as_u16()),
		});
	}
	if !status.is_success() {
		let body = resp.text().unwrap_or_default();
		return Err(SyncError::Server {
			message: format!("HTTP {}: {}", status.as_u16(), body.trim()),
		});
	}

	if let Some(parent) = dest.parent() {
		fs::create_dir_all(parent)?;
	}
	let mut file = if offset > 0 {
		fs::OpenOptions::new().append(true).open(&dest)?
	} else {
		fs::File::create(&dest)?
	};
	let mut body = resp;
	std::io::copy(&mut body, &mut file)?;
	Ok(())
}


// vim: ts=4
