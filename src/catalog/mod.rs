//! The static artwork catalog and the read-only queries over it.

mod filter;

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub use filter::{FilterCriteria, SearchScope, SortKey, search_artworks};

/// A single catalog record.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
	pub id: String,
	pub title: String,
	pub artist: String,
	/// Free text; usually a four digit year but not guaranteed to be numeric.
	pub year: String,
	pub source: String,
	pub description: String,
	pub image_url: String,
	pub tags: Vec<String>,
	pub movement: String,
	pub location: String,
	#[serde(default)]
	pub dimensions: Option<String>,
	#[serde(default)]
	pub medium: Option<String>,
	/// Declared relations to other artworks. Not necessarily symmetric.
	#[serde(default)]
	pub connections: Vec<String>,
}

impl Artwork {
	/// `true` if the artwork carries `tag` (exact match).
	pub fn has_tag(&self, tag: &str) -> bool {
		self.tags.iter().any(|t| t == tag)
	}
}

static CATALOG: LazyLock<Vec<Artwork>> = LazyLock::new(|| {
	serde_json::from_str(include_str!("artworks.json")).unwrap_or_else(|err| {
		log::error!("embedded catalog is malformed: {err}");
		Vec::new()
	})
});

/// The process-wide catalog, parsed once on first access.
pub fn catalog() -> &'static [Artwork] {
	CATALOG.as_slice()
}

/// Look up an artwork by id.
pub fn find_artwork<'a>(catalog: &'a [Artwork], id: &str) -> Option<&'a Artwork> {
	catalog.iter().find(|art| art.id == id)
}

/// Resolve `artwork.connections` in declared order, dropping ids that are not in the catalog.
pub fn related_artworks<'a>(catalog: &'a [Artwork], artwork: &Artwork) -> Vec<&'a Artwork> {
	let by_id: HashMap<&str, &Artwork> = catalog.iter().map(|a| (a.id.as_str(), a)).collect();
	artwork
		.connections
		.iter()
		.filter_map(|id| by_id.get(id.as_str()).copied())
		.collect()
}

/// The featured artwork for `date`: `day_of_year % len`.
///
/// Returns `None` only for an empty catalog.
pub fn daily_artwork(catalog: &[Artwork], date: NaiveDate) -> Option<&Artwork> {
	if catalog.is_empty() {
		return None;
	}
	catalog.get(date.ordinal() as usize % catalog.len())
}

fn unique_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
	values
		.collect::<BTreeSet<_>>()
		.into_iter()
		.map(str::to_owned)
		.collect()
}

/// Distinct artist names, sorted.
pub fn artists(catalog: &[Artwork]) -> Vec<String> {
	unique_sorted(catalog.iter().map(|a| a.artist.as_str()))
}

/// Distinct movement names, sorted.
pub fn movements(catalog: &[Artwork]) -> Vec<String> {
	unique_sorted(catalog.iter().map(|a| a.movement.as_str()))
}

/// Distinct tags across the catalog, sorted.
pub fn tags(catalog: &[Artwork]) -> Vec<String> {
	unique_sorted(catalog.iter().flat_map(|a| a.tags.iter().map(String::as_str)))
}

/// Facet values containing `query`, case-insensitively. An empty query keeps every value.
pub fn narrow_facet(values: &[String], query: &str) -> Vec<String> {
	let term = query.trim().to_lowercase();
	values
		.iter()
		.filter(|v| term.is_empty() || v.to_lowercase().contains(&term))
		.cloned()
		.collect()
}

/// The facet value equal to `query` ignoring case, if any.
pub fn exact_facet<'a>(values: &'a [String], query: &str) -> Option<&'a String> {
	let term = query.trim();
	if term.is_empty() {
		return None;
	}
	values.iter().find(|v| v.to_lowercase() == term.to_lowercase())
}

fn first_containing(values: Vec<String>, query: &str) -> Option<String> {
	if query.is_empty() {
		return None;
	}
	let term = query.to_lowercase();
	values.into_iter().find(|v| v.to_lowercase().contains(&term))
}

/// First artist (alphabetically) whose name contains `query`, case-insensitively.
pub fn suggest_artist(catalog: &[Artwork], query: &str) -> Option<String> {
	first_containing(artists(catalog), query)
}

pub fn suggest_movement(catalog: &[Artwork], query: &str) -> Option<String> {
	first_containing(movements(catalog), query)
}

#[cfg(test)]
pub(crate) fn sample(id: &str, title: &str, artist: &str, year: &str) -> Artwork {
	Artwork {
		id: id.into(),
		title: title.into(),
		artist: artist.into(),
		year: year.into(),
		source: "Test Museum".into(),
		description: format!("{title} by {artist}"),
		image_url: format!("https://img.test/{id}.jpg"),
		tags: vec!["test".into()],
		movement: "Testism".into(),
		location: "Nowhere".into(),
		dimensions: None,
		medium: None,
		connections: Vec::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn embedded_catalog_parses() {
		let all = catalog();
		assert_eq!(all.len(), 30);
		assert_eq!(all[0].title, "The Starry Night");
		assert_eq!(all[0].connections, ["2", "3", "19"]);
	}

	#[test]
	fn related_preserves_declared_order() {
		let all = catalog();
		let starry = find_artwork(all, "1").unwrap();
		let ids: Vec<_> = related_artworks(all, starry).iter().map(|a| a.id.as_str()).collect();
		assert_eq!(ids, ["2", "3", "19"]);
	}

	#[test]
	fn related_drops_dangling_ids() {
		let mut a = sample("a", "A", "X", "1900");
		let b = sample("b", "B", "Y", "1901");
		a.connections = vec!["missing".into(), "b".into(), "also-missing".into()];
		let all = vec![a.clone(), b];
		let related = related_artworks(&all, &a);
		assert_eq!(related.len(), 1);
		assert_eq!(related[0].id, "b");
	}

	#[test]
	fn related_includes_self_only_when_declared() {
		let mut a = sample("a", "A", "X", "1900");
		let all_plain = vec![a.clone()];
		assert!(related_artworks(&all_plain, &a).is_empty());

		a.connections = vec!["a".into()];
		let all = vec![a.clone()];
		let related = related_artworks(&all, &a);
		assert_eq!(related.len(), 1);
		assert_eq!(related[0].id, "a");
	}

	#[test]
	fn every_catalog_relation_resolves_to_a_catalog_entry() {
		let all = catalog();
		for art in all {
			for rel in related_artworks(all, art) {
				assert!(find_artwork(all, &rel.id).is_some());
			}
		}
	}

	#[test]
	fn daily_is_stable_within_a_day() {
		let all = catalog();
		let day = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
		assert_eq!(daily_artwork(all, day), daily_artwork(all, day));
	}

	#[test]
	fn daily_changes_between_consecutive_days() {
		let all = catalog();
		let day = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
		let next = day.succ_opt().unwrap();
		assert_ne!(
			daily_artwork(all, day).unwrap().id,
			daily_artwork(all, next).unwrap().id
		);
	}

	#[test]
	fn daily_uses_day_of_year_modulo_length() {
		let all = catalog();
		// January 1st is day 1.
		let jan_first = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
		assert_eq!(daily_artwork(all, jan_first).unwrap().id, all[1].id);
		assert!(daily_artwork(&[], jan_first).is_none());
	}

	#[test]
	fn facets_are_unique_and_sorted() {
		let all = catalog();
		let names = artists(all);
		assert!(names.windows(2).all(|w| w[0] < w[1]));
		assert_eq!(names.iter().filter(|a| *a == "Vincent van Gogh").count(), 1);
		assert!(movements(all).contains(&"Ukiyo-e".to_string()));
		assert!(tags(all).contains(&"wave".to_string()));
	}

	#[test]
	fn suggestions_pick_first_facet_containing_query() {
		let all = catalog();
		assert_eq!(suggest_artist(all, "VAN").as_deref(), Some("Jan van Eyck"));
		assert_eq!(suggest_movement(all, "impression").as_deref(), Some("Impressionism"));
		assert_eq!(suggest_artist(all, "zzz"), None);
		assert_eq!(suggest_movement(all, ""), None);
	}

	#[test]
	fn facet_search_narrows_case_insensitively() {
		let values: Vec<String> = ["Claude Monet", "Edvard Munch", "Vincent van Gogh"]
			.into_iter()
			.map(String::from)
			.collect();
		assert_eq!(narrow_facet(&values, "MON"), ["Claude Monet"]);
		assert_eq!(narrow_facet(&values, "n"), values);
		assert_eq!(narrow_facet(&values, "  "), values);
		assert!(narrow_facet(&values, "rembrandt").is_empty());
	}

	#[test]
	fn exact_facet_needs_the_whole_value() {
		let values = tags(catalog());
		assert_eq!(exact_facet(&values, " WAVE ").map(String::as_str), Some("wave"));
		assert_eq!(exact_facet(&values, "wav"), None);
		assert_eq!(exact_facet(&values, ""), None);
	}
}
