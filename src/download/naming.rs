//! File names and text payloads produced for downloads.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::catalog::Artwork;

/// Replace every character outside `[A-Za-z0-9]` with `_`.
pub fn sanitize(s: &str) -> String {
	s.chars()
		.map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
		.collect()
}

fn extension_for_mime(content_type: &str) -> Option<&'static str> {
	let mime = content_type.split(';').next()?.trim().to_ascii_lowercase();
	Some(match mime.as_str() {
		"image/jpeg" | "image/jpg" | "image/pjpeg" => "jpg",
		"image/png" => "png",
		"image/gif" => "gif",
		"image/webp" => "webp",
		"image/avif" => "avif",
		"image/svg+xml" => "svg",
		"image/tiff" => "tif",
		"image/bmp" => "bmp",
		_ => return None,
	})
}

fn extension_from_url(url: &str) -> Option<&'static str> {
	let path = url.split(['?', '#']).next()?;
	let file = path.rsplit('/').next()?;
	let (_, ext) = file.rsplit_once('.')?;
	Some(match ext.to_ascii_lowercase().as_str() {
		"jpg" | "jpeg" => "jpg",
		"png" => "png",
		"gif" => "gif",
		"webp" => "webp",
		"avif" => "avif",
		"svg" => "svg",
		"tif" | "tiff" => "tif",
		"bmp" => "bmp",
		_ => return None,
	})
}

/// Extension for a downloaded image: content type first, then the URL, then `fallback`.
pub(crate) fn image_extension(content_type: Option<&str>, url: &str, fallback: &str) -> String {
	content_type
		.and_then(extension_for_mime)
		.or_else(|| extension_from_url(url))
		.unwrap_or(fallback)
		.to_owned()
}

/// `<title>_<year>_<artist>.<ext>`, every segment sanitized.
pub fn image_file_name(art: &Artwork, ext: &str) -> String {
	format!(
		"{}_{}_{}.{ext}",
		sanitize(&art.title),
		sanitize(&art.year),
		sanitize(&art.artist)
	)
}

pub fn metadata_file_name(art: &Artwork) -> String {
	format!("{}_info.txt", sanitize(&art.title))
}

pub(crate) fn embed_file_name(art: &Artwork) -> String {
	format!("{}_embed.html", sanitize(&art.title))
}

pub(crate) fn wallpaper_file_name(art: &Artwork, resolution: &str, ext: &str) -> String {
	format!("{}_wallpaper_{}.{ext}", sanitize(&art.title), sanitize(resolution))
}

/// `<prefix>_<YYYY-MM-DD>.zip`
pub fn archive_file_name(prefix: &str, date: NaiveDate) -> String {
	format!("{prefix}_{}.zip", date.format("%Y-%m-%d"))
}

/// Plain-text record bundled next to an image.
pub fn metadata_text(art: &Artwork) -> String {
	let mut out = String::new();
	// Writing to a String cannot fail.
	let _ = writeln!(out, "Title: {}", art.title);
	let _ = writeln!(out, "Artist: {}", art.artist);
	let _ = writeln!(out, "Year: {}", art.year);
	let _ = writeln!(out, "Source: {}", art.source);
	let _ = writeln!(out, "Movement: {}", art.movement);
	let _ = writeln!(out, "Location: {}", art.location);
	if let Some(dimensions) = &art.dimensions {
		let _ = writeln!(out, "Dimensions: {dimensions}");
	}
	if let Some(medium) = &art.medium {
		let _ = writeln!(out, "Medium: {medium}");
	}
	let _ = write!(
		out,
		"\nDescription:\n{}\n\nTags: {}",
		art.description,
		art.tags.join(", ")
	);
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog::{catalog, sample};

	#[test]
	fn sanitize_replaces_each_non_alphanumeric() {
		assert_eq!(sanitize("The Starry Night"), "The_Starry_Night");
		assert_eq!(sanitize("Salvador Dalí"), "Salvador_Dal_");
		assert_eq!(sanitize("Christina's World"), "Christina_s_World");
		assert_eq!(sanitize("a/b\\c:d"), "a_b_c_d");
	}

	#[test]
	fn image_names_are_filesystem_safe() {
		let art = sample("1", "Impression, Sunrise", "Claude Monet", "c. 1872");
		let name = image_file_name(&art, "jpg");
		assert_eq!(name, "Impression__Sunrise_c__1872_Claude_Monet.jpg");
		assert!(name.trim_end_matches(".jpg").chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
	}

	#[test]
	fn extension_resolution_order() {
		let url = "https://upload.wikimedia.org/a/b/Starry.png/1280px-Starry.png?x=1";
		assert_eq!(image_extension(Some("image/webp; q=1"), url, "jpg"), "webp");
		assert_eq!(image_extension(None, url, "jpg"), "png");
		assert_eq!(image_extension(Some("application/octet-stream"), url, "jpg"), "png");
		assert_eq!(image_extension(None, "https://host/image", "jpg"), "jpg");
		assert_eq!(image_extension(None, "https://host/photo.JPEG", "bin"), "jpg");
	}

	#[test]
	fn archive_name_contains_date() {
		let day = NaiveDate::from_ymd_opt(2024, 7, 9).unwrap();
		assert_eq!(archive_file_name("nuvva_artworks", day), "nuvva_artworks_2024-07-09.zip");
	}

	#[test]
	fn metadata_includes_optional_fields_only_when_present() {
		let starry = &catalog()[0];
		let text = metadata_text(starry);
		assert!(text.starts_with("Title: The Starry Night\nArtist: Vincent van Gogh\nYear: 1889\n"));
		assert!(text.contains("Dimensions: 73.7 cm × 92.1 cm\n"));
		assert!(text.contains("Medium: Oil on canvas\n"));
		assert!(text.ends_with("Tags: night, stars, landscape, swirling, emotional, expressionist"));

		let bare = sample("x", "Bare", "Nobody", "1900");
		let text = metadata_text(&bare);
		assert!(!text.contains("Dimensions:"));
		assert!(!text.contains("Medium:"));
		assert!(text.contains("Location: Nowhere\n\nDescription:\nBare by Nobody\n"));
	}

	#[test]
	fn companion_file_names() {
		let art = sample("1", "The Kiss", "Gustav Klimt", "1908");
		assert_eq!(metadata_file_name(&art), "The_Kiss_info.txt");
		assert_eq!(embed_file_name(&art), "The_Kiss_embed.html");
		assert_eq!(wallpaper_file_name(&art, "1920x1080", "jpg"), "The_Kiss_wallpaper_1920x1080.jpg");
	}
}
