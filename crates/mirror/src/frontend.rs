//! The front-end release synchronizer.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use log::info;

use crate::archive;
use crate::config::Config;
use crate::download;
use crate::download::Download;
use crate::github;
use crate::record;
use crate::record::Snapshot;
use crate::record::VersionFile;

/// The snapshot component updated on every successful synchronization.
pub const SNAPSHOT_COMPONENT: &str = "comfyui";

/// A synchronization error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// A GitHub API error.
	#[error(transparent)]
	GitHub(#[from] github::Error),

	/// A download error.
	#[error(transparent)]
	Download(#[from] download::Error),

	/// An archive error.
	#[error(transparent)]
	Archive(#[from] archive::Error),

	/// A record error.
	#[error(transparent)]
	Record(#[from] record::Error),

	/// An IO error.
	#[error("IO error: {0}")]
	Io(#[from] io::Error),
}

/// A synchronization result.
pub type Result<T> = std::result::Result<T, Error>;

/// The front-end release synchronizer.
///
/// Brings the local asset directory into agreement with the latest published
/// front-end release, and records the release tag and the upstream source
/// commit it was synchronized against.
pub struct Frontend {
	config: Config,
	download: Download,
	github: github::Client,
}

impl Frontend {
	/// Creates a new synchronizer using the given HTTP client.
	#[must_use]
	pub fn new(config: Config, client: reqwest::Client) -> Self {
		Self {
			config,
			download: Download::new(client.clone()),
			github: github::Client::new(client),
		}
	}

	/// Reads the tag of the currently installed release, if any.
	///
	/// # Errors
	///
	/// See [`VersionFile::read`]. A missing version file is `Ok(None)`.
	pub fn current_version(&self) -> Result<Option<String>> {
		Ok(VersionFile::new(self.config.version_file()).read()?)
	}

	/// Downloads the dist archive and installs it.
	///
	/// The download lives in a scoped temporary directory that is removed on
	/// every exit path, success or failure.
	///
	/// # Errors
	///
	/// See [`install_archive`].
	///
	/// [`install_archive`]: Frontend::install_archive
	pub async fn install(&self, url: &str) -> Result<()> {
		let download_dir = tempfile::tempdir()?;
		let archive_path = download_dir.path().join(github::DIST_ASSET);

		info!("downloading {url}");
		self.download.download_to_path(url, &archive_path).await?;

		self.install_archive(&archive_path)
	}

	/// Extracts a dist archive over the asset directory and relocates its
	/// `scripts` subtree to the stable scripts path.
	///
	/// Extraction is staged next to the asset directory and swapped in with a
	/// remove-and-rename, so a partially extracted tree is never visible at
	/// the destination.
	///
	/// # Errors
	///
	/// If the archive is corrupt, [`Error::Archive`] is returned. Filesystem
	/// failures are returned as [`Error::Io`]. Both abort the run.
	pub fn install_archive(&self, archive_path: &Path) -> Result<()> {
		let assets_dir = self.config.assets_dir();
		let parent = match assets_dir.parent() {
			Some(parent) if parent != Path::new("") => parent.to_path_buf(),
			_ => PathBuf::from("."),
		};
		fs::create_dir_all(&parent)?;

		// Stage in the same parent so the swap below is a same-device rename.
		let staging = tempfile::Builder::new()
			.prefix(".comfyui.")
			.tempdir_in(&parent)?;

		info!(
			"extracting {} to {}",
			archive_path.display(),
			assets_dir.display()
		);
		archive::extract(archive_path, staging.path())?;

		if assets_dir.exists() {
			fs::remove_dir_all(&assets_dir)?;
		}
		fs::rename(staging.path(), &assets_dir)?;

		// Relocate the scripts subtree out of the extracted tree.
		let scripts_dir = self.config.scripts_dir();
		if scripts_dir.exists() {
			fs::remove_dir_all(&scripts_dir)?;
		}
		fs::rename(assets_dir.join("scripts"), &scripts_dir)?;

		Ok(())
	}

	/// Writes the version file, but only if the fetched tag differs from the
	/// current one.
	fn record_tag(&self, current: Option<&str>, tag: &str) -> Result<()> {
		if current != Some(tag) {
			VersionFile::new(self.config.version_file()).write(tag)?;
			info!("updated to version {tag}");
		}

		Ok(())
	}

	/// Runs a full synchronization:
	///
	/// 1. Read the current version.
	/// 2. Fetch the latest release info.
	/// 3. Install the bundle. Install is idempotent and cheap to re-run, so
	///    this happens even when the tag is unchanged.
	/// 4. Write the version file if the tag differs.
	/// 5. Record the latest upstream source commit in the snapshot. The
	///    snapshot tracks the source repository, not the front-end tag, so
	///    this happens on every run.
	///
	/// The run is strictly linear: the first error aborts it, and a failed
	/// run is re-invoked from the start.
	///
	/// # Errors
	///
	/// Any step's error is propagated verbatim.
	pub async fn update(&self) -> Result<()> {
		let current = self.current_version()?;
		info!("current version: {}", current.as_deref().unwrap_or("none"));

		let release = self.github.latest_release().await?;
		info!("latest version: {}", release.tag);

		self.install(&release.download_url).await?;

		self.record_tag(current.as_deref(), &release.tag)?;

		let sha = self.github.latest_commit().await?;
		Snapshot::new(self.config.snapshot_file()).set(SNAPSHOT_COMPONENT, &sha)?;

		Ok(())
	}
}
