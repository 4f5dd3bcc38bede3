use std::path::PathBuf;

/// The address a local ComfyUI instance listens on.
pub const DEFAULT_COMFY_URL: &str = "http://127.0.0.1:8188";

/// A set of configuration options for the mirror.
/// Use `Default::default` for the layout the deployed playground expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	/// The directory mirrored web assets are written to.
	pub public_dir: String,

	/// The plain-text file holding the installed release tag.
	pub version_file: String,

	/// The JSON file pinning mirrored components to upstream versions.
	pub snapshot_file: String,

	/// The base URL of the locally running ComfyUI instance.
	pub comfy_url: String,
}

impl Config {
	/// Returns the public directory as a path.
	#[must_use]
	pub fn public_dir(&self) -> PathBuf {
		PathBuf::from(&self.public_dir)
	}

	/// Returns the directory the front-end release bundle is installed into.
	#[must_use]
	pub fn assets_dir(&self) -> PathBuf {
		self.public_dir().join("comfyui")
	}

	/// Returns the stable path the release's `scripts` subtree is relocated to.
	#[must_use]
	pub fn scripts_dir(&self) -> PathBuf {
		self.public_dir().join("scripts")
	}

	/// Returns the directory the catalogue documents are written to.
	#[must_use]
	pub fn api_dir(&self) -> PathBuf {
		self.public_dir().join("api")
	}

	/// Returns the directory extension assets are mirrored into.
	#[must_use]
	pub fn extensions_dir(&self) -> PathBuf {
		self.public_dir().join("extensions")
	}

	/// Returns the version file as a path.
	#[must_use]
	pub fn version_file(&self) -> PathBuf {
		PathBuf::from(&self.version_file)
	}

	/// Returns the snapshot file as a path.
	#[must_use]
	pub fn snapshot_file(&self) -> PathBuf {
		PathBuf::from(&self.snapshot_file)
	}
}

impl Default for Config {
	fn default() -> Self {
		Config {
			public_dir: "public".to_owned(),
			version_file: "version.txt".to_owned(),
			snapshot_file: "versions.json".to_owned(),
			comfy_url: DEFAULT_COMFY_URL.to_owned(),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::path::Path;

	use super::*;

	#[test]
	fn derived_paths() {
		let config = Config::default();

		assert_eq!(config.assets_dir(), Path::new("public/comfyui"));
		assert_eq!(config.scripts_dir(), Path::new("public/scripts"));
		assert_eq!(config.api_dir(), Path::new("public/api"));
		assert_eq!(config.extensions_dir(), Path::new("public/extensions"));
		assert_eq!(config.version_file(), Path::new("version.txt"));
		assert_eq!(config.snapshot_file(), Path::new("versions.json"));
	}
}
