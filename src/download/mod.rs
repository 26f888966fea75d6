//! Selection tracking and image/metadata downloads.
//!
//! Network access, file saving and user notifications are collaborators behind the traits
//! below. The browser implementations live in [`crate::web`] and the toaster component;
//! tests substitute in-memory fakes.

mod archive;
mod batch;
mod naming;
mod selection;
mod single;
mod wallpaper;

use async_trait::async_trait;

use crate::error::Result;

pub use batch::{BatchCoordinator, BatchStatus};
pub use single::{WALLPAPER_RESOLUTIONS, download_embed_html, download_image, download_metadata, download_wallpaper};
pub use wallpaper::{DEVICE_RESOLUTIONS, download_wallpaper_batch, random_wallpaper, wallpaper_pool};

/// Bytes of a fetched image plus what the server said it was.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchedImage {
	pub bytes: Vec<u8>,
	pub content_type: Option<String>,
}

/// Retrieves image resources.
#[async_trait(?Send)]
pub trait ImageFetcher {
	async fn fetch_image(&self, url: &str) -> Result<FetchedImage>;
}

/// Hands a finished file to the user, e.g. by triggering a browser download.
pub trait SaveTarget {
	fn save(&self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<()>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastVariant {
	#[default]
	Default,
	Destructive,
}

/// A transient user notification.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
	pub title: String,
	pub description: String,
	pub variant: ToastVariant,
}

impl Toast {
	pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			description: description.into(),
			variant: ToastVariant::Default,
		}
	}

	pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			description: description.into(),
			variant: ToastVariant::Destructive,
		}
	}
}

pub trait Notifier {
	fn notify(&self, toast: Toast);
}
