//! The capability-catalogue exporter.

use std::fs;
use std::io;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use log::info;
use log::warn;
use serde_json::Value;

use crate::config::Config;
use crate::json;
use crate::util;

/// Extension directories duplicated to fixed top-level paths, loaded directly
/// by the deployed playground.
const COMPAT_COPIES: &[(&str, &str)] = &[
	("rgthree-comfy", "rgthree"),
	("kjweb_async", "kjweb_async"),
];

/// The canned defaults patched into well-known node input fields, so the
/// exported catalogue is usable without the original model files present.
fn default_inputs() -> Vec<(&'static str, Value)> {
	vec![
		("image", serde_json::json!([[], { "image_upload": true }])),
		(
			"ckpt_name",
			serde_json::json!([[
				"Flux1-Schnell.safetensors",
				"Flux1-Dev.safetensors",
				"Juggernaut-XL.safetensors",
				"Realistic-Vision-V6.0-B1.safetensors",
				"Stable-Diffusion-1.5-Base.safetensors",
				"Stable-Diffusion-XL-Base.safetensors",
			]]),
		),
		(
			"lora_name",
			serde_json::json!([["flux_realism_lora.safetensors"]]),
		),
	]
}

/// An export error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// An error from reqwest.
	#[error("Failed to fetch from ComfyUI: {0}")]
	Request(#[from] reqwest::Error),

	/// The ComfyUI instance answered with a non-success status.
	#[error("{url} returned status {status}")]
	Status {
		url: String,
		status: reqwest::StatusCode,
	},

	/// An IO error.
	#[error("IO error: {0}")]
	Io(#[from] io::Error),

	/// A JSON (de)serialization error.
	#[error(transparent)]
	Json(#[from] json::Error),
}

/// An export result.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns the local destination for a server-supplied extension path, or
/// None if the path would escape the public directory.
fn extension_dest(public_dir: &Path, extension: &str) -> Option<PathBuf> {
	// Extension paths are absolute URL paths, e.g. "/extensions/a/b.js".
	let relative = Path::new(extension.trim_start_matches('/'));

	if relative
		.components()
		.any(|component| !matches!(component, Component::Normal(_)))
	{
		return None;
	}

	Some(public_dir.join(relative))
}

/// Rewrites well-known input fields across every node entry with canned
/// defaults.
///
/// The replacement is written into whichever section (`required` or
/// `optional`) the field was found in. Entries are never removed, only field
/// values replaced, so the rewrite is idempotent and order-independent.
pub fn patch_defaults(object_info: &mut Value) {
	let defaults = default_inputs();

	let Some(nodes) = object_info.as_object_mut() else {
		return;
	};

	for node in nodes.values_mut() {
		let Some(input) = node.get_mut("input").and_then(Value::as_object_mut) else {
			continue;
		};

		for section in ["required", "optional"] {
			let Some(fields) = input.get_mut(section).and_then(Value::as_object_mut) else {
				continue;
			};

			for (name, value) in &defaults {
				if fields.contains_key(*name) {
					fields.insert((*name).to_owned(), value.clone());
				}
			}
		}
	}
}

/// The capability-catalogue exporter.
///
/// Produces a static, self-contained snapshot of a running ComfyUI instance:
/// its extension catalogue, its node-definition catalogue, and a mirror of
/// every extension's asset files.
pub struct Exporter {
	config: Config,
	client: reqwest::Client,
}

impl Exporter {
	/// Creates a new exporter using the given HTTP client.
	#[must_use]
	pub fn new(config: Config, client: reqwest::Client) -> Self {
		Self { config, client }
	}

	/// GETs and parses a JSON document from the ComfyUI instance.
	///
	/// # Errors
	///
	/// [`Error::Request`] or [`Error::Status`] is returned if the document
	/// could not be fetched.
	async fn fetch<T>(&self, path: &str) -> Result<T>
	where
		T: serde::de::DeserializeOwned,
	{
		let url = format!("{}{}", self.config.comfy_url, path);
		let resp = self.client.get(&url).send().await?;

		if !resp.status().is_success() {
			return Err(Error::Status {
				url,
				status: resp.status(),
			});
		}

		Ok(resp.json().await?)
	}

	/// Mirrors one extension file into `dest`.
	async fn mirror_one(&self, extension: &str, dest: &Path) -> Result<()> {
		let url = format!("{}{}", self.config.comfy_url, extension);
		let resp = self.client.get(&url).send().await?;

		if !resp.status().is_success() {
			return Err(Error::Status {
				url,
				status: resp.status(),
			});
		}

		let content = resp.bytes().await?;

		if let Some(parent) = dest.parent() {
			fs::create_dir_all(parent)?;
		}
		fs::write(dest, &content)?;

		Ok(())
	}

	/// Mirrors every listed extension file into the public directory,
	/// preserving relative path structure.
	///
	/// A failed fetch is logged and skipped, so one bad extension does not
	/// prevent export of the rest.
	///
	/// # Errors
	///
	/// Only filesystem setup failures are returned; per-extension fetch
	/// failures are tolerated.
	pub async fn mirror_assets(&self, extensions: &[String]) -> Result<()> {
		let public_dir = self.config.public_dir();

		for extension in extensions {
			let Some(dest) = extension_dest(&public_dir, extension) else {
				warn!("skipping {extension}: path escapes the output directory");
				continue;
			};

			match self.mirror_one(extension, &dest).await {
				Ok(()) => info!("mirrored {extension}"),
				Err(err) => warn!("skipping {extension}: {err}"),
			}
		}

		Ok(())
	}

	/// Duplicates specific extension directories to the fixed top-level paths
	/// the deployed playground loads them from. Directories not present after
	/// mirroring are skipped.
	fn compat_copies(&self) -> Result<()> {
		for (extension, dest) in COMPAT_COPIES {
			let src = self.config.extensions_dir().join(extension);
			if !src.exists() {
				continue;
			}

			util::copy_dir(&src, &self.config.public_dir().join(dest))?;
		}

		Ok(())
	}

	/// Runs a full export into the configured public directory:
	///
	/// 1. Fetch the extension and node-definition catalogues.
	/// 2. Patch canned defaults into the node definitions.
	/// 3. Persist both catalogues under `api/`.
	/// 4. Mirror every extension's asset files.
	/// 5. Duplicate the compatibility extension directories.
	///
	/// # Errors
	///
	/// Any step's error is propagated verbatim, except per-extension fetch
	/// failures in step 4, which are logged and skipped.
	pub async fn export(&self) -> Result<()> {
		fs::create_dir_all(self.config.public_dir())?;

		let extensions: Vec<String> = self.fetch("/api/extensions").await?;
		let mut object_info: Value = self.fetch("/api/object_info").await?;

		patch_defaults(&mut object_info);

		let api_dir = self.config.api_dir();
		fs::create_dir_all(&api_dir)?;

		json::to_writer_pretty(
			fs::File::create(api_dir.join("object_info.json"))?,
			&object_info,
		)?;
		json::to_writer(
			fs::File::create(api_dir.join("extensions.json"))?,
			&extensions,
		)?;

		self.mirror_assets(&extensions).await?;
		self.compat_copies()?;

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn object_info() -> Value {
		serde_json::json!({
			"LoadImage": {
				"input": {
					"required": {
						"image": [["example.png"], { "image_upload": true }],
						"upload": ["IMAGE_UPLOAD"]
					}
				}
			},
			"LoraLoader": {
				"input": {
					"required": {
						"lora_name": [["some_local.safetensors"]]
					},
					"optional": {
						"ckpt_name": [["some_local.ckpt"]]
					}
				}
			},
			"SaveImage": {
				"input": {
					"required": {
						"filename_prefix": ["STRING"]
					}
				}
			}
		})
	}

	#[test]
	fn patch_replaces_required_image() {
		let mut info = object_info();

		patch_defaults(&mut info);

		assert_eq!(
			info["LoadImage"]["input"]["required"]["image"],
			serde_json::json!([[], { "image_upload": true }])
		);
		// Unrelated fields and nodes are untouched.
		assert_eq!(
			info["LoadImage"]["input"]["required"]["upload"],
			serde_json::json!(["IMAGE_UPLOAD"])
		);
		assert_eq!(
			info["SaveImage"]["input"]["required"]["filename_prefix"],
			serde_json::json!(["STRING"])
		);
	}

	#[test]
	fn patch_writes_into_section_found_in() {
		let mut info = object_info();

		patch_defaults(&mut info);

		// An optional field stays optional after the rewrite.
		let node = &info["LoraLoader"]["input"];
		assert!(node["required"].get("ckpt_name").is_none());
		assert_eq!(
			node["optional"]["ckpt_name"][0][0],
			serde_json::json!("Flux1-Schnell.safetensors")
		);
		assert_eq!(
			node["required"]["lora_name"],
			serde_json::json!([["flux_realism_lora.safetensors"]])
		);
	}

	#[test]
	fn extension_dest_stays_inside_output() {
		let public_dir = Path::new("public");

		assert_eq!(
			extension_dest(public_dir, "/extensions/a/b.js"),
			Some(PathBuf::from("public/extensions/a/b.js"))
		);
		assert_eq!(
			extension_dest(public_dir, "/extensions/../../etc/passwd"),
			None
		);
		assert_eq!(extension_dest(public_dir, "/.."), None);
	}

	#[test]
	fn patch_is_idempotent() {
		let mut once = object_info();
		patch_defaults(&mut once);

		let mut twice = once.clone();
		patch_defaults(&mut twice);

		assert_eq!(once, twice);
	}
}
