use std::io;

use crate::archive;
use crate::download;
use crate::export;
use crate::frontend;
use crate::github;
use crate::json;
use crate::record;

/// A catch-all error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	// An archive error.
	#[error(transparent)]
	Archive(#[from] archive::Error),

	// A download error.
	#[error(transparent)]
	Download(#[from] download::Error),

	// An export error.
	#[error(transparent)]
	Export(#[from] export::Error),

	// A synchronization error.
	#[error(transparent)]
	Frontend(#[from] frontend::Error),

	// A GitHub API error.
	#[error(transparent)]
	GitHub(#[from] github::Error),

	// An IO error.
	#[error(transparent)]
	Io(#[from] io::Error),

	// A JSON error.
	#[error(transparent)]
	Json(#[from] json::Error),

	// A record error.
	#[error(transparent)]
	Record(#[from] record::Error),
}

/// A catch-all result.
pub type Result<T> = std::result::Result<T, Error>;
