//! A minimal client for the GitHub API endpoints the mirror consumes.

use std::env;

use serde::Deserialize;

/// The release listing of the ComfyUI front-end distribution.
pub const RELEASES_URL: &str =
	"https://api.github.com/repos/Comfy-Org/ComfyUI_frontend/releases/latest";

/// The latest commit on the default branch of the ComfyUI source repository.
pub const COMMITS_URL: &str = "https://api.github.com/repos/comfyanonymous/ComfyUI/commits/master";

/// The release asset holding the built front-end.
pub const DIST_ASSET: &str = "dist.zip";

/// The environment variable supplying an optional API bearer token.
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";

/// A GitHub API error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// An error from reqwest.
	#[error("GitHub request failed: {0}")]
	Request(#[from] reqwest::Error),

	/// The API answered with a non-success status.
	#[error("GitHub API returned status {0}")]
	Status(reqwest::StatusCode),

	/// The release has no asset with the expected name.
	#[error("Asset {0:?} not found in release assets")]
	AssetNotFound(&'static str),
}

/// A GitHub API result.
pub type Result<T> = std::result::Result<T, Error>;

/// A downloadable file attached to a release.
#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
	/// The asset's file name.
	pub name: String,

	/// The asset's download URL.
	pub browser_download_url: String,
}

/// A published release, as returned by the release-listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
	/// The release tag.
	pub tag_name: String,

	/// The release's downloadable assets.
	pub assets: Vec<Asset>,
}

/// A commit, as returned by the commit endpoint.
#[derive(Debug, Clone, Deserialize)]
struct Commit {
	sha: String,
}

/// The latest front-end release: its tag, and where to download the dist archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
	/// The release tag.
	pub tag: String,

	/// The download URL of the [`DIST_ASSET`] asset.
	pub download_url: String,
}

impl ReleaseInfo {
	/// Selects the dist asset out of a release.
	///
	/// # Errors
	///
	/// If no asset is named exactly [`DIST_ASSET`], [`Error::AssetNotFound`]
	/// is returned, even when other assets exist.
	pub fn from_release(release: Release) -> Result<Self> {
		let asset = release
			.assets
			.into_iter()
			.find(|asset| asset.name == DIST_ASSET)
			.ok_or(Error::AssetNotFound(DIST_ASSET))?;

		Ok(Self {
			tag: release.tag_name,
			download_url: asset.browser_download_url,
		})
	}
}

/// A client for the GitHub API.
///
/// A bearer token is taken from the [`TOKEN_VAR`] environment variable if set,
/// which raises the API's rate limit.
#[derive(Clone)]
pub struct Client {
	client: reqwest::Client,
	token: Option<String>,
}

impl Client {
	/// Creates a new client using the given HTTP client.
	#[must_use]
	pub fn new(client: reqwest::Client) -> Self {
		Self {
			client,
			token: env::var(TOKEN_VAR).ok(),
		}
	}

	async fn get_json<T>(&self, url: &str) -> Result<T>
	where
		T: serde::de::DeserializeOwned,
	{
		let mut request = self
			.client
			.get(url)
			// GitHub rejects requests without a user agent.
			.header("User-Agent", "comfy-mirror");

		if let Some(token) = &self.token {
			request = request.bearer_auth(token);
		}

		let resp = request.send().await?;

		if !resp.status().is_success() {
			return Err(Error::Status(resp.status()));
		}

		Ok(resp.json().await?)
	}

	/// Fetches the latest front-end release and selects its dist asset.
	///
	/// # Errors
	///
	/// [`Error::Request`] or [`Error::Status`] is returned if the listing
	/// could not be fetched, and [`Error::AssetNotFound`] if the release has
	/// no dist asset.
	pub async fn latest_release(&self) -> Result<ReleaseInfo> {
		let release: Release = self.get_json(RELEASES_URL).await?;

		ReleaseInfo::from_release(release)
	}

	/// Fetches the hash of the latest commit on the ComfyUI default branch.
	///
	/// # Errors
	///
	/// [`Error::Request`] or [`Error::Status`] is returned if the commit
	/// could not be fetched.
	pub async fn latest_commit(&self) -> Result<String> {
		let commit: Commit = self.get_json(COMMITS_URL).await?;

		Ok(commit.sha)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn release(assets: Vec<Asset>) -> Release {
		Release {
			tag_name: "v2".to_owned(),
			assets,
		}
	}

	#[test]
	fn dist_asset_selected() {
		let release = release(vec![
			Asset {
				name: "source.tar.gz".to_owned(),
				browser_download_url: "https://x/source.tar.gz".to_owned(),
			},
			Asset {
				name: "dist.zip".to_owned(),
				browser_download_url: "https://x/dist.zip".to_owned(),
			},
		]);

		let info = ReleaseInfo::from_release(release).unwrap();

		assert_eq!(info.tag, "v2");
		assert_eq!(info.download_url, "https://x/dist.zip");
	}

	#[test]
	fn dist_asset_missing() {
		let release = release(vec![Asset {
			name: "source.tar.gz".to_owned(),
			browser_download_url: "https://x/source.tar.gz".to_owned(),
		}]);

		let result = ReleaseInfo::from_release(release);

		assert!(matches!(result, Err(Error::AssetNotFound(_))));
	}

	#[test]
	fn no_assets() {
		let result = ReleaseInfo::from_release(release(vec![]));

		assert!(matches!(result, Err(Error::AssetNotFound(DIST_ASSET))));
	}
}
