use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

/// Recursively copies a directory, replacing the destination if it exists.
pub fn copy_dir(src: &Path, dest: &Path) -> io::Result<()> {
	if dest.exists() {
		fs::remove_dir_all(dest)?;
	}

	for entry in WalkDir::new(src) {
		let entry = entry?;
		// SAFETY: every walked path is under src.
		let rel = entry.path().strip_prefix(src).unwrap();
		let target = dest.join(rel);

		if entry.file_type().is_dir() {
			fs::create_dir_all(&target)?;
		} else {
			if let Some(parent) = target.parent() {
				fs::create_dir_all(parent)?;
			}
			fs::copy(entry.path(), &target)?;
		}
	}

	Ok(())
}
