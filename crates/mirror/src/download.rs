use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::io::BufWriter;
use std::path::Path;

use futures_util::StreamExt;

/// A download error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// An error from reqwest.
	#[error("Failed to download URL: {0}")]
	Request(#[from] reqwest::Error),

	/// An IO error.
	#[error("IO error: {0}")]
	Io(#[from] io::Error),
}

/// A download result.
pub type Result<T> = std::result::Result<T, Error>;

/// An asynchronous streaming downloader.
#[derive(Clone)]
pub struct Download {
	client: reqwest::Client,
}

impl Download {
	/// Creates a new downloader using the given HTTP client.
	#[must_use]
	pub fn new(client: reqwest::Client) -> Self {
		Self { client }
	}

	/// Downloads a URL by streaming it to a writer and returns the number of bytes written.
	///
	/// # Errors
	///
	/// If the HTTP request could not be sent, answered with a non-success
	/// status, or a chunk failed to be received, [`Error::Request`] is returned.
	///
	/// If writing to the writer failed, [`Error::Io`] is returned.
	pub async fn download<W: Write>(&self, url: &str, writer: W) -> Result<u64> {
		let mut buf = BufWriter::new(writer);

		let resp = self.client.get(url).send().await?.error_for_status()?;

		let mut current = 0u64;

		let mut stream = resp.bytes_stream();

		while let Some(chunk) = stream.next().await {
			let chunk = chunk?;

			buf.write_all(&chunk)?;

			current += chunk.len() as u64;
		}

		buf.flush()?;

		Ok(current)
	}

	/// Downloads a URL to a file path and returns the number of bytes written.
	///
	/// # Errors
	///
	/// See [`download`].
	///
	/// [`download`]: Download::download
	pub async fn download_to_path<P: AsRef<Path>>(&self, url: &str, path: P) -> Result<u64> {
		let file = File::create(path)?;

		self.download(url, file).await
	}
}

impl Default for Download {
	fn default() -> Self {
		Self::new(reqwest::Client::new())
	}
}
