//! One-off downloads from the artwork detail and daily pages.

use log::{error, info};

use super::naming::{
	embed_file_name, image_extension, image_file_name, metadata_file_name, metadata_text,
	wallpaper_file_name,
};
use super::{ImageFetcher, Notifier, SaveTarget, Toast};
use crate::catalog::Artwork;
use crate::error::Result;

const TEXT_MIME: &str = "text/plain;charset=utf-8";
const HTML_MIME: &str = "text/html;charset=utf-8";
const OCTET_MIME: &str = "application/octet-stream";

/// Wallpaper presets offered for the daily artwork: `(label, resolution)`.
pub const WALLPAPER_RESOLUTIONS: [(&str, &str); 3] = [
	("Desktop", "1920x1080"),
	("Desktop 4K", "3840x2160"),
	("Mobile", "1080x1920"),
];

fn image_mime(ext: &str) -> String {
	match ext {
		"jpg" => "image/jpeg".into(),
		"svg" => "image/svg+xml".into(),
		"tif" => "image/tiff".into(),
		"" => OCTET_MIME.into(),
		other => format!("image/{other}"),
	}
}

/// Fetch an image and save it under `file_name(ext)`. The extension comes from the response.
async fn fetch_and_save<F, S>(
	fetcher: &F,
	saver: &S,
	art: &Artwork,
	fallback_ext: &str,
	file_name: impl FnOnce(&str) -> String,
) -> Result<String>
where
	F: ImageFetcher + ?Sized,
	S: SaveTarget + ?Sized,
{
	let image = fetcher.fetch_image(&art.image_url).await?;
	let ext = image_extension(image.content_type.as_deref(), &art.image_url, fallback_ext);
	let name = file_name(&ext);
	let mime = image
		.content_type
		.clone()
		.unwrap_or_else(|| image_mime(&ext));
	saver.save(&name, &mime, &image.bytes)?;
	Ok(name)
}

/// Save the full-size image of `art`, notifying once either way.
pub async fn download_image<F, S, N>(fetcher: &F, saver: &S, notifier: &N, art: &Artwork, fallback_ext: &str) -> bool
where
	F: ImageFetcher + ?Sized,
	S: SaveTarget + ?Sized,
	N: Notifier + ?Sized,
{
	match fetch_and_save(fetcher, saver, art, fallback_ext, |ext| image_file_name(art, ext)).await {
		Ok(name) => {
			info!("downloaded image {name}");
			notifier.notify(Toast::success("Download started", format!("{name} is being downloaded")));
			true
		}
		Err(err) => {
			error!("image download for {} failed: {err}", art.id);
			notifier.notify(Toast::error(
				"Download failed",
				"There was an error downloading the image",
			));
			false
		}
	}
}

/// Save the daily artwork as a wallpaper labelled with `resolution`. The image itself is
/// not resampled.
pub async fn download_wallpaper<F, S, N>(
	fetcher: &F,
	saver: &S,
	notifier: &N,
	art: &Artwork,
	resolution: &str,
	fallback_ext: &str,
) -> bool
where
	F: ImageFetcher + ?Sized,
	S: SaveTarget + ?Sized,
	N: Notifier + ?Sized,
{
	let saved = fetch_and_save(fetcher, saver, art, fallback_ext, |ext| {
		wallpaper_file_name(art, resolution, ext)
	})
	.await;
	match saved {
		Ok(name) => {
			info!("downloaded wallpaper {name}");
			notifier.notify(Toast::success(
				"Wallpaper downloaded",
				format!("{resolution} wallpaper saved to your device"),
			));
			true
		}
		Err(err) => {
			error!("wallpaper download for {} failed: {err}", art.id);
			notifier.notify(Toast::error(
				"Download failed",
				"There was an error downloading the wallpaper",
			));
			false
		}
	}
}

pub fn download_metadata<S, N>(saver: &S, notifier: &N, art: &Artwork) -> bool
where
	S: SaveTarget + ?Sized,
	N: Notifier + ?Sized,
{
	let name = metadata_file_name(art);
	match saver.save(&name, TEXT_MIME, metadata_text(art).as_bytes()) {
		Ok(()) => {
			notifier.notify(Toast::success(
				"Info downloaded",
				format!("Information about {} saved as text", art.title),
			));
			true
		}
		Err(err) => {
			error!("saving {name} failed: {err}");
			notifier.notify(Toast::error("Download failed", "There was an error saving the information"));
			false
		}
	}
}

fn escape_html(s: &str) -> String {
	let mut out = String::with_capacity(s.len());
	for c in s.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#39;"),
			c => out.push(c),
		}
	}
	out
}

/// Self-contained HTML snippet showing the image with its caption.
pub fn embed_html(art: &Artwork) -> String {
	let title = escape_html(&art.title);
	let artist = escape_html(&art.artist);
	let year = escape_html(&art.year);
	let source = escape_html(&art.source);
	let description = escape_html(&art.description);
	let image_url = escape_html(&art.image_url);
	format!(
		r#"<!DOCTYPE html>
<html>
<head>
	<title>{title} by {artist}</title>
	<meta charset="UTF-8">
	<style>
		.artwork-container {{ max-width: 800px; margin: 0 auto; font-family: 'Georgia', serif; color: #333; }}
		.artwork-image {{ width: 100%; height: auto; border-radius: 4px; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1); }}
		.artwork-info {{ margin-top: 1rem; }}
		.artwork-title {{ font-size: 1.5rem; font-weight: bold; margin-bottom: 0.5rem; }}
		.artwork-meta {{ font-style: italic; color: #666; }}
		.artwork-description {{ margin-top: 1rem; line-height: 1.6; }}
	</style>
</head>
<body>
	<div class="artwork-container">
		<img src="{image_url}" alt="{title}" class="artwork-image">
		<div class="artwork-info">
			<div class="artwork-title">{title}</div>
			<div class="artwork-meta">{artist}, {year} | {source}</div>
			<p class="artwork-description">{description}</p>
		</div>
	</div>
</body>
</html>"#
	)
}

pub fn download_embed_html<S, N>(saver: &S, notifier: &N, art: &Artwork) -> bool
where
	S: SaveTarget + ?Sized,
	N: Notifier + ?Sized,
{
	let name = embed_file_name(art);
	match saver.save(&name, HTML_MIME, embed_html(art).as_bytes()) {
		Ok(()) => {
			notifier.notify(Toast::success(
				"HTML embed downloaded",
				format!("Embeddable HTML for {} saved", art.title),
			));
			true
		}
		Err(err) => {
			error!("saving {name} failed: {err}");
			notifier.notify(Toast::error("Download failed", "There was an error saving the embed"));
			false
		}
	}
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;

	use super::*;
	use crate::catalog::sample;
	use crate::download::ToastVariant;
	use crate::download::fakes::{FakeFetcher, FakeNotifier, FakeSaver};

	#[test]
	fn image_download_names_file_from_response() {
		let art = sample("4", "The Kiss", "Gustav Klimt", "1908");
		let fetcher = FakeFetcher::default().serve("https://img.test/4.jpg", b"png!", Some("image/png"));
		let (saver, notifier) = (FakeSaver::default(), FakeNotifier::default());

		assert!(block_on(download_image(&fetcher, &saver, &notifier, &art, "jpg")));

		let saved = saver.saved.borrow();
		assert_eq!(saved[0].0, "The_Kiss_1908_Gustav_Klimt.png");
		assert_eq!(saved[0].1, "image/png");
		assert_eq!(saved[0].2, b"png!");
		assert_eq!(notifier.toasts.borrow()[0].title, "Download started");
	}

	#[test]
	fn failed_image_download_notifies_once() {
		let art = sample("4", "The Kiss", "Gustav Klimt", "1908");
		let (fetcher, saver, notifier) = (FakeFetcher::default(), FakeSaver::default(), FakeNotifier::default());

		assert!(!block_on(download_image(&fetcher, &saver, &notifier, &art, "jpg")));
		assert!(saver.saved.borrow().is_empty());
		let toasts = notifier.toasts.borrow();
		assert_eq!(toasts.len(), 1);
		assert_eq!(toasts[0].variant, ToastVariant::Destructive);
	}

	#[test]
	fn wallpaper_uses_resolution_in_name() {
		let art = sample("2", "The Great Wave", "Hokusai", "1831");
		let fetcher = FakeFetcher::default().serve("https://img.test/2.jpg", b"jpg", None);
		let (saver, notifier) = (FakeSaver::default(), FakeNotifier::default());

		assert!(block_on(download_wallpaper(&fetcher, &saver, &notifier, &art, "3840x2160", "jpg")));
		let saved = saver.saved.borrow();
		assert_eq!(saved[0].0, "The_Great_Wave_wallpaper_3840x2160.jpg");
		assert_eq!(saved[0].1, "image/jpeg");
		assert!(notifier.toasts.borrow()[0].description.starts_with("3840x2160"));
	}

	#[test]
	fn metadata_is_saved_as_text() {
		let art = sample("1", "Nocturne", "Ann Painter", "1900");
		let (saver, notifier) = (FakeSaver::default(), FakeNotifier::default());
		assert!(download_metadata(&saver, &notifier, &art));
		let saved = saver.saved.borrow();
		assert_eq!(saved[0].0, "Nocturne_info.txt");
		assert_eq!(saved[0].1, TEXT_MIME);
		assert!(String::from_utf8_lossy(&saved[0].2).starts_with("Title: Nocturne\n"));
	}

	#[test]
	fn embed_escapes_markup() {
		let art = sample("1", "Cats & <Dogs>", "A \"Quoted\" Artist", "1900");
		let html = embed_html(&art);
		assert!(html.starts_with("<!DOCTYPE html>"));
		assert!(html.contains("<title>Cats &amp; &lt;Dogs&gt; by A &quot;Quoted&quot; Artist</title>"));
		assert!(html.contains(r#"<img src="https://img.test/1.jpg""#));
		assert!(!html.contains("<Dogs>"));
	}

	#[test]
	fn embed_save_failure_is_destructive() {
		let art = sample("1", "Nocturne", "Ann Painter", "1900");
		let saver = FakeSaver {
			fail: true,
			..FakeSaver::default()
		};
		let notifier = FakeNotifier::default();
		assert!(!download_embed_html(&saver, &notifier, &art));
		assert_eq!(notifier.toasts.borrow()[0].variant, ToastVariant::Destructive);
	}
}
