//! Persisted records tying the local mirror to upstream versions.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use serde_json::Map;
use serde_json::Value;

use crate::json;

/// A record error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// An IO error.
	#[error("IO error: {0}")]
	Io(#[from] io::Error),

	/// An existing record file failed to parse.
	#[error("Corrupt record: {0}")]
	Corrupt(#[from] json::Error),
}

/// A record result.
pub type Result<T> = std::result::Result<T, Error>;

/// The release tag the asset mirror was last synchronized to, persisted as
/// plain text.
pub struct VersionFile {
	path: PathBuf,
}

impl VersionFile {
	/// Returns a version file at the given path.
	pub fn new<P>(path: P) -> Self
	where
		P: AsRef<Path>,
	{
		Self {
			path: path.as_ref().to_owned(),
		}
	}

	/// Reads the persisted tag. A missing file is `None`, not an error.
	///
	/// # Errors
	///
	/// If the file exists but cannot be read, [`Error::Io`] is returned.
	pub fn read(&self) -> Result<Option<String>> {
		match fs::read_to_string(&self.path) {
			Ok(tag) => Ok(Some(tag.trim().to_owned())),
			Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
			Err(err) => Err(err.into()),
		}
	}

	/// Overwrites the persisted tag.
	///
	/// # Errors
	///
	/// If the file cannot be written, [`Error::Io`] is returned.
	pub fn write(&self, tag: &str) -> Result<()> {
		fs::write(&self.path, tag)?;

		Ok(())
	}
}

/// A snapshot pinning mirrored components to upstream version identifiers,
/// persisted as a flat JSON object.
///
/// Updates are read-modify-write: keys other than the one being set are
/// preserved as-is.
pub struct Snapshot {
	path: PathBuf,
}

impl Snapshot {
	/// Returns a snapshot at the given path.
	pub fn new<P>(path: P) -> Self
	where
		P: AsRef<Path>,
	{
		Self {
			path: path.as_ref().to_owned(),
		}
	}

	/// Reads the snapshot, treating a missing file as an empty object.
	///
	/// # Errors
	///
	/// If an existing file does not parse, [`Error::Corrupt`] is returned.
	pub fn read(&self) -> Result<Map<String, Value>> {
		let file = match fs::File::open(&self.path) {
			Ok(file) => file,
			Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
			Err(err) => return Err(err.into()),
		};

		Ok(json::from_reader(file)?)
	}

	/// Sets a component's version and writes the snapshot back.
	///
	/// # Errors
	///
	/// See [`read`]. If the file cannot be written, [`Error::Io`] is returned.
	///
	/// [`read`]: Snapshot::read
	pub fn set(&self, component: &str, version: &str) -> Result<()> {
		let mut snapshot = self.read()?;

		snapshot.insert(component.to_owned(), Value::String(version.to_owned()));

		json::to_writer(fs::File::create(&self.path)?, &snapshot)?;

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_version_file() {
		let temp_dir = tempfile::tempdir().unwrap();
		let version = VersionFile::new(temp_dir.path().join("version.txt"));

		assert_eq!(version.read().unwrap(), None);
	}

	#[test]
	fn version_roundtrip() {
		let temp_dir = tempfile::tempdir().unwrap();
		let version = VersionFile::new(temp_dir.path().join("version.txt"));

		version.write("v1.2.3").unwrap();

		assert_eq!(version.read().unwrap(), Some("v1.2.3".to_owned()));
	}

	#[test]
	fn snapshot_creates_file() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("versions.json");

		Snapshot::new(&path).set("comfyui", "abc123").unwrap();

		assert_eq!(
			fs::read_to_string(&path).unwrap(),
			r#"{"comfyui":"abc123"}"#
		);
	}

	#[test]
	fn snapshot_preserves_keys() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("versions.json");
		fs::write(&path, r#"{"other": "x"}"#).unwrap();

		Snapshot::new(&path).set("comfyui", "abc123").unwrap();

		assert_eq!(
			fs::read_to_string(&path).unwrap(),
			r#"{"other":"x","comfyui":"abc123"}"#
		);
	}

	#[test]
	fn snapshot_idempotent() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("versions.json");
		let snapshot = Snapshot::new(&path);

		snapshot.set("comfyui", "abc123").unwrap();
		let once = fs::read_to_string(&path).unwrap();

		snapshot.set("comfyui", "abc123").unwrap();
		let twice = fs::read_to_string(&path).unwrap();

		assert_eq!(once, twice);
	}

	#[test]
	fn snapshot_corrupt() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("versions.json");
		fs::write(&path, "not json").unwrap();

		let result = Snapshot::new(&path).set("comfyui", "abc123");

		assert!(matches!(result, Err(Error::Corrupt(_))));
	}
}
