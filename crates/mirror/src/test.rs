//! Shared test fixtures.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use zip::write::SimpleFileOptions;

use crate::config::DEFAULT_COMFY_URL;
use crate::Config;

/// Writes a minimal dist archive, with an index page and a scripts subtree,
/// into `dir` and returns its path.
pub fn dist_zip(dir: &Path) -> PathBuf {
	let path = dir.join("dist.zip");
	let file = fs::File::create(&path).unwrap();
	let mut writer = zip::ZipWriter::new(file);
	let options =
		SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

	writer.start_file("index.html", options).unwrap();
	writer.write_all(b"<html></html>").unwrap();

	writer.add_directory("assets", options).unwrap();
	writer.start_file("assets/index.js", options).unwrap();
	writer.write_all(b"console.log();").unwrap();

	writer.add_directory("scripts", options).unwrap();
	writer.start_file("scripts/ui.js", options).unwrap();
	writer.write_all(b"export {};").unwrap();

	writer.finish().unwrap();

	path
}

/// Returns a config rooted inside `dir`.
pub fn config(dir: &Path) -> Config {
	let path = |name: &str| dir.join(name).to_str().unwrap().to_owned();

	Config {
		public_dir: path("public"),
		version_file: path("version.txt"),
		snapshot_file: path("versions.json"),
		comfy_url: DEFAULT_COMFY_URL.to_owned(),
	}
}
