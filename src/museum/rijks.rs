use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

use super::{JsonSource, collect_tags, or_default, present};
use crate::catalog::Artwork;

const SOURCE: &str = "Rijksmuseum";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dating {
	pub presenting_date: Option<String>,
	/// Usually a list of period names, sometimes a bare century number.
	pub period: Option<Value>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct WebImage {
	pub url: Option<String>,
}

/// An entry of the `artObjects` list returned by a collection search.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RijksObject {
	pub object_number: Option<String>,
	pub title: Option<String>,
	pub long_title: Option<String>,
	pub principal_or_first_maker: Option<String>,
	pub dating: Option<Dating>,
	pub web_image: Option<WebImage>,
	pub header_image: Option<WebImage>,
	pub physical_medium: Option<String>,
	pub technique: Option<Vec<String>>,
	pub object_types: Option<Vec<String>>,
}

impl RijksObject {
	fn image_url(&self) -> Option<&str> {
		[&self.web_image, &self.header_image]
			.into_iter()
			.flatten()
			.find_map(|image| present(&image.url))
	}

	fn period(&self) -> Option<&str> {
		match self.dating.as_ref()?.period.as_ref()? {
			Value::Array(names) => names.first()?.as_str().map(str::trim).filter(|s| !s.is_empty()),
			Value::String(name) => Some(name.trim()).filter(|s| !s.is_empty()),
			_ => None,
		}
	}

	/// Map to a catalog record; objects without an object number or an image are rejected.
	pub fn into_artwork(self) -> Option<Artwork> {
		let number = present(&self.object_number)?.to_owned();
		let image_url = self.image_url()?.to_owned();

		let description = present(&self.long_title)
			.or(present(&self.title))
			.unwrap_or("A masterpiece from the Rijksmuseum collection.")
			.to_owned();
		let tags = collect_tags(
			present(&self.physical_medium)
				.into_iter()
				.chain(self.technique.iter().flatten().map(String::as_str))
				.chain(self.object_types.iter().flatten().map(String::as_str)),
		);
		let year = self
			.dating
			.as_ref()
			.map(|d| or_default(&d.presenting_date, "Unknown"))
			.unwrap_or_else(|| "Unknown".into());

		Some(Artwork {
			id: format!("rijks-{number}"),
			title: or_default(&self.title, "Untitled"),
			artist: or_default(&self.principal_or_first_maker, "Unknown Artist"),
			year,
			source: SOURCE.into(),
			description,
			image_url,
			tags,
			movement: self.period().unwrap_or("Dutch Art").to_owned(),
			location: "Amsterdam, Netherlands".into(),
			dimensions: None,
			medium: present(&self.physical_medium).map(str::to_owned),
			connections: Vec::new(),
		})
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SearchResponse {
	art_objects: Vec<Value>,
}

/// Search client for the Rijksmuseum collection API. Searching requires an API key.
pub struct Rijksmuseum<S> {
	source: S,
	base_url: String,
	api_key: Option<String>,
}

impl<S: JsonSource> Rijksmuseum<S> {
	pub fn new(source: S, base_url: impl Into<String>, api_key: Option<String>) -> Self {
		Self {
			source,
			base_url: base_url.into(),
			api_key: api_key.filter(|k| !k.trim().is_empty()),
		}
	}

	/// Up to `limit` paintings matching `query`. Malformed entries are skipped; a failed
	/// search, or a missing API key, yields an empty list.
	pub async fn search_artworks(&self, query: &str, limit: usize) -> Vec<Artwork> {
		let Some(key) = &self.api_key else {
			debug!("no Rijksmuseum API key configured, skipping search");
			return Vec::new();
		};
		let params = [
			("key", key.clone()),
			("q", query.to_owned()),
			("imgonly", "true".to_owned()),
			("ps", limit.to_string()),
			("type", "painting".to_owned()),
		];
		let response = match self.source.get_json(&self.base_url, &params).await {
			Ok(doc) => serde_json::from_value::<SearchResponse>(doc),
			Err(err) => {
				warn!("Rijksmuseum search for {query:?} failed: {err}");
				return Vec::new();
			}
		};
		let objects = match response {
			Ok(response) => response.art_objects,
			Err(err) => {
				warn!("unexpected Rijksmuseum response: {err}");
				return Vec::new();
			}
		};

		objects
			.into_iter()
			.filter_map(|doc| match serde_json::from_value::<RijksObject>(doc) {
				Ok(object) => object.into_artwork(),
				Err(err) => {
					warn!("skipping malformed Rijksmuseum object: {err}");
					None
				}
			})
			.take(limit)
			.collect()
	}
}
