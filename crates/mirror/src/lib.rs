//! A local mirror of ComfyUI's web assets and plugin catalogue.
//!
//! The mirror bootstraps a deployed playground instance without a live
//! connection to ComfyUI at deploy time. Two independent pipelines are
//! exposed: [`Frontend`] synchronizes the local asset tree with the latest
//! published front-end release, and [`Exporter`] snapshots the capability
//! catalogue of a locally running instance.

pub mod archive;
pub mod config;
pub mod download;
pub mod error;
pub mod export;
pub mod frontend;
pub mod github;
pub mod json;
pub mod record;

#[cfg(test)]
mod test;
mod util;

pub use config::Config;
pub use download::Download;
pub use error::Error;
pub use error::Result;
pub use export::Exporter;
pub use frontend::Frontend;
pub use github::ReleaseInfo;
pub use record::Snapshot;
pub use record::VersionFile;

/// A high-level interface to the mirror.
pub struct Mirror {
	/// The front-end release synchronizer.
	pub frontend: Frontend,

	/// The capability-catalogue exporter.
	pub exporter: Exporter,
}

impl Mirror {
	/// Creates a new mirror. Both pipelines share one HTTP client.
	#[must_use]
	pub fn new(config: Config) -> Self {
		let client = reqwest::Client::new();

		Self {
			frontend: Frontend::new(config.clone(), client.clone()),
			exporter: Exporter::new(config, client),
		}
	}

	/// Synchronizes the front-end assets with the latest published release.
	/// See [`Frontend::update`].
	///
	/// # Errors
	///
	/// See [`Frontend::update`].
	pub async fn sync(&self) -> Result<()> {
		self.frontend.update().await?;

		Ok(())
	}

	/// Exports the capability catalogue of the running ComfyUI instance.
	/// See [`Exporter::export`].
	///
	/// # Errors
	///
	/// See [`Exporter::export`].
	pub async fn export(&self) -> Result<()> {
		self.exporter.export().await?;

		Ok(())
	}
}
