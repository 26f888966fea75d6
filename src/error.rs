//! Error types shared by the catalog, download and museum layers.

/// Failures that can reach a user-facing notification.
#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
	#[error("request to {url} failed: {message}")]
	Fetch { url: String, message: String },

	#[error("request to {url} returned HTTP {status}")]
	HttpStatus { url: String, status: u16 },

	#[error("archive error: {0}")]
	Archive(String),

	#[error("export failed: {0}")]
	Export(String),

	#[error("configuration error: {0}")]
	Config(String),

	#[error("malformed JSON: {0}")]
	Parse(#[from] serde_json::Error),
}

impl From<zip::result::ZipError> for GalleryError {
	fn from(err: zip::result::ZipError) -> Self {
		Self::Archive(err.to_string())
	}
}

impl From<std::io::Error> for GalleryError {
	fn from(err: std::io::Error) -> Self {
		Self::Archive(err.to_string())
	}
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GalleryError>;
