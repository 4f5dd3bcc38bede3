use std::fs;
use std::io;
use std::path::Path;

use zip::ZipArchive;

/// An archive error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The archive is corrupt or unreadable.
	#[error("Failed to read archive: {0}")]
	Zip(#[from] zip::result::ZipError),

	/// An IO error.
	#[error("IO error: {0}")]
	Io(#[from] io::Error),
}

/// An archive result.
pub type Result<T> = std::result::Result<T, Error>;

/// Extracts a zip archive into a directory, creating parent directories as
/// needed. Entry names are sanitized so an entry cannot escape `dest`.
///
/// # Errors
///
/// If the archive is corrupt or incomplete, [`Error::Zip`] is returned.
///
/// If a file could not be created or written, [`Error::Io`] is returned.
pub fn extract<P, Q>(archive_path: P, dest: Q) -> Result<()>
where
	P: AsRef<Path>,
	Q: AsRef<Path>,
{
	let dest = dest.as_ref();

	let file = fs::File::open(archive_path)?;
	let mut archive = ZipArchive::new(file)?;

	for i in 0..archive.len() {
		let mut entry = archive.by_index(i)?;
		let path = dest.join(entry.mangled_name());

		if entry.is_dir() {
			fs::create_dir_all(&path)?;
			continue;
		}

		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent)?;
		}

		let mut file = fs::File::create(&path)?;
		io::copy(&mut entry, &mut file)?;
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test;

	#[test]
	fn extract_archive() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = test::dist_zip(temp_dir.path());

		let dest = temp_dir.path().join("out");
		extract(&path, &dest).unwrap();

		assert_eq!(
			fs::read_to_string(dest.join("index.html")).unwrap(),
			"<html></html>"
		);
		assert_eq!(
			fs::read_to_string(dest.join("scripts/ui.js")).unwrap(),
			"export {};"
		);
	}

	#[test]
	fn extract_corrupt_archive() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("dist.zip");
		fs::write(&path, b"not a zip").unwrap();

		let result = extract(&path, temp_dir.path().join("out"));

		assert!(matches!(result, Err(Error::Zip(_))));
	}
}
