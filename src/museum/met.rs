use log::{debug, warn};
use serde::Deserialize;

use super::{JsonSource, collect_tags, or_default, present};
use crate::catalog::Artwork;
use crate::error::Result;

const SOURCE: &str = "The Metropolitan Museum of Art";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse {
	#[serde(rename = "objectIDs")]
	object_ids: Option<Vec<u64>>,
}

/// A record from the Met's `/objects/{id}` endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetObject {
	#[serde(rename = "objectID")]
	pub object_id: Option<u64>,
	pub title: Option<String>,
	pub artist_display_name: Option<String>,
	pub object_date: Option<String>,
	pub department: Option<String>,
	pub culture: Option<String>,
	pub period: Option<String>,
	pub dynasty: Option<String>,
	pub city: Option<String>,
	pub country: Option<String>,
	pub dimensions: Option<String>,
	pub medium: Option<String>,
	pub classification: Option<String>,
	pub primary_image: Option<String>,
	pub is_public_domain: Option<bool>,
}

impl MetObject {
	fn description(&self) -> String {
		let mut parts = Vec::new();
		if let Some(title) = present(&self.title) {
			parts.push(format!("\"{title}\""));
		}
		if let Some(artist) = present(&self.artist_display_name) {
			parts.push(format!("by {artist}"));
		}
		if let Some(date) = present(&self.object_date) {
			parts.push(format!("from {date}"));
		}
		if let Some(department) = present(&self.department) {
			parts.push(format!("in the {department} collection"));
		}
		if let Some(culture) = present(&self.culture) {
			parts.push(format!("representing {culture} culture"));
		}
		if parts.is_empty() {
			return format!("An object from {SOURCE}.");
		}
		parts.join(" ") + "."
	}

	/// Map to a catalog record. Objects without an id, without a primary image or not in the
	/// public domain are rejected.
	pub fn into_artwork(self) -> Option<Artwork> {
		let id = self.object_id?;
		let image_url = present(&self.primary_image)?.to_owned();
		if self.is_public_domain != Some(true) {
			return None;
		}

		let description = self.description();
		let tags = collect_tags(
			[&self.medium, &self.department, &self.culture, &self.period, &self.classification]
				.into_iter()
				.filter_map(present),
		);
		let movement = present(&self.period)
			.or(present(&self.dynasty))
			.unwrap_or("Unknown")
			.to_owned();
		let location = present(&self.city)
			.or(present(&self.country))
			.unwrap_or("Unknown")
			.to_owned();

		Some(Artwork {
			id: format!("met-{id}"),
			title: or_default(&self.title, "Untitled"),
			artist: or_default(&self.artist_display_name, "Unknown Artist"),
			year: or_default(&self.object_date, "Unknown"),
			source: SOURCE.into(),
			description,
			image_url,
			tags,
			movement,
			location,
			dimensions: present(&self.dimensions).map(str::to_owned),
			medium: present(&self.medium).map(str::to_owned),
			connections: Vec::new(),
		})
	}
}

/// Search client for the Met collection API.
pub struct MetMuseum<S> {
	source: S,
	base_url: String,
}

impl<S: JsonSource> MetMuseum<S> {
	pub fn new(source: S, base_url: impl Into<String>) -> Self {
		Self {
			source,
			base_url: base_url.into().trim_end_matches('/').to_owned(),
		}
	}

	/// Up to `limit` public-domain artworks with images matching `query`. Objects that fail
	/// to load are skipped; a failed search yields an empty list.
	pub async fn search_artworks(&self, query: &str, limit: usize) -> Vec<Artwork> {
		let ids = match self.search_ids(query).await {
			Ok(ids) => ids,
			Err(err) => {
				warn!("Met search for {query:?} failed: {err}");
				return Vec::new();
			}
		};

		let mut artworks = Vec::new();
		for id in ids.into_iter().take(limit) {
			match self.object(id).await {
				Ok(object) => match object.into_artwork() {
					Some(art) => artworks.push(art),
					None => debug!("skipping Met object {id}: no public-domain image"),
				},
				Err(err) => warn!("failed to fetch Met object {id}: {err}"),
			}
		}
		artworks
	}

	async fn search_ids(&self, query: &str) -> Result<Vec<u64>> {
		let url = format!("{}/search", self.base_url);
		let params = [("q", query.to_owned()), ("hasImages", "true".to_owned())];
		let doc = self.source.get_json(&url, &params).await?;
		let response: SearchResponse = serde_json::from_value(doc)?;
		Ok(response.object_ids.unwrap_or_default())
	}

	async fn object(&self, id: u64) -> Result<MetObject> {
		let url = format!("{}/objects/{id}", self.base_url);
		let doc = self.source.get_json(&url, &[]).await?;
		Ok(serde_json::from_value(doc)?)
	}
}
