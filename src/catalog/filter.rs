use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::Artwork;

/// Ordering applied to the filtered view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
	#[default]
	TitleAsc,
	TitleDesc,
	ArtistAsc,
	ArtistDesc,
	CountryAsc,
	CountryDesc,
	YearNewest,
	YearOldest,
}

impl SortKey {
	pub const ALL: [SortKey; 8] = [
		SortKey::TitleAsc,
		SortKey::TitleDesc,
		SortKey::ArtistAsc,
		SortKey::ArtistDesc,
		SortKey::CountryAsc,
		SortKey::CountryDesc,
		SortKey::YearNewest,
		SortKey::YearOldest,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			SortKey::TitleAsc => "title-asc",
			SortKey::TitleDesc => "title-desc",
			SortKey::ArtistAsc => "artist-asc",
			SortKey::ArtistDesc => "artist-desc",
			SortKey::CountryAsc => "country-asc",
			SortKey::CountryDesc => "country-desc",
			SortKey::YearNewest => "year-newest",
			SortKey::YearOldest => "year-oldest",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			SortKey::TitleAsc => "Title A-Z",
			SortKey::TitleDesc => "Title Z-A",
			SortKey::ArtistAsc => "Artist A-Z",
			SortKey::ArtistDesc => "Artist Z-A",
			SortKey::CountryAsc => "Country A-Z",
			SortKey::CountryDesc => "Country Z-A",
			SortKey::YearNewest => "Newest First",
			SortKey::YearOldest => "Oldest First",
		}
	}

	fn compare(self, a: &Artwork, b: &Artwork) -> Ordering {
		match self {
			SortKey::TitleAsc => text_cmp(&a.title, &b.title),
			SortKey::TitleDesc => text_cmp(&b.title, &a.title),
			SortKey::ArtistAsc => text_cmp(surname(&a.artist), surname(&b.artist)),
			SortKey::ArtistDesc => text_cmp(surname(&b.artist), surname(&a.artist)),
			SortKey::CountryAsc => text_cmp(&a.location, &b.location),
			SortKey::CountryDesc => text_cmp(&b.location, &a.location),
			SortKey::YearNewest => parse_year(&b.year).cmp(&parse_year(&a.year)),
			SortKey::YearOldest => parse_year(&a.year).cmp(&parse_year(&b.year)),
		}
	}
}

impl fmt::Display for SortKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SortKey {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		SortKey::ALL
			.into_iter()
			.find(|key| key.as_str() == s)
			.ok_or_else(|| format!("unknown sort key `{s}`"))
	}
}

/// Case-insensitive comparison; ties fall back to the stable sort.
fn text_cmp(a: &str, b: &str) -> Ordering {
	a.to_lowercase().cmp(&b.to_lowercase())
}

/// Last whitespace-separated token of an artist name.
fn surname(artist: &str) -> &str {
	artist.split_whitespace().last().unwrap_or(artist)
}

/// Leading integer of a year string ("1503–1506" -> 1503). Non-numeric years are `None`,
/// which orders before every number.
fn parse_year(year: &str) -> Option<i64> {
	let trimmed = year.trim_start();
	let (sign, digits) = match trimmed.strip_prefix('-') {
		Some(rest) => (-1, rest),
		None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
	};
	let end = digits
		.find(|c: char| !c.is_ascii_digit())
		.unwrap_or(digits.len());
	digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// User-selected narrowing of the catalog. Empty sets mean "no constraint".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterCriteria {
	pub artists: BTreeSet<String>,
	pub movements: BTreeSet<String>,
	pub tags: BTreeSet<String>,
	pub search: Option<String>,
	pub sort: Option<SortKey>,
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
	if !set.remove(value) {
		set.insert(value.to_owned());
	}
}

impl FilterCriteria {
	pub fn toggle_artist(&mut self, artist: &str) {
		toggle(&mut self.artists, artist);
	}

	pub fn toggle_movement(&mut self, movement: &str) {
		toggle(&mut self.movements, movement);
	}

	pub fn toggle_tag(&mut self, tag: &str) {
		toggle(&mut self.tags, tag);
	}

	/// Number of active field filters, as shown on the filter button.
	pub fn active_count(&self) -> usize {
		self.artists.len() + self.movements.len() + self.tags.len()
	}

	/// Drop every field filter and the search term, keeping the sort key.
	pub fn clear(&mut self) {
		*self = Self {
			sort: self.sort,
			..Self::default()
		};
	}

	fn search_term(&self) -> Option<String> {
		self.search
			.as_deref()
			.filter(|term| !term.is_empty())
			.map(str::to_lowercase)
	}

	fn matches(&self, art: &Artwork, term: Option<&str>) -> bool {
		if !self.artists.is_empty() && !self.artists.contains(&art.artist) {
			return false;
		}
		if !self.movements.is_empty() && !self.movements.contains(&art.movement) {
			return false;
		}
		if !self.tags.is_empty() && !self.tags.iter().any(|tag| art.has_tag(tag)) {
			return false;
		}
		term.is_none_or(|term| matches_text(art, term))
	}

	/// Filter then stably sort.
	pub fn apply<'a>(&self, catalog: &'a [Artwork]) -> Vec<&'a Artwork> {
		let mut view = filter_artworks(catalog, self);
		if let Some(key) = self.sort {
			sort_artworks(&mut view, key);
		}
		view
	}
}

/// Case-insensitive substring match over title, artist, description, movement and tags.
/// `term` must already be lowercase.
fn matches_text(art: &Artwork, term: &str) -> bool {
	art.title.to_lowercase().contains(term)
		|| art.artist.to_lowercase().contains(term)
		|| art.description.to_lowercase().contains(term)
		|| art.movement.to_lowercase().contains(term)
		|| art.tags.iter().any(|tag| tag.to_lowercase().contains(term))
}

/// Artworks satisfying every non-empty criterion, in catalog order.
///
/// Within a field any listed value matches; across fields all must match. The search term
/// narrows the field-filtered set further.
pub fn filter_artworks<'a>(catalog: &'a [Artwork], criteria: &FilterCriteria) -> Vec<&'a Artwork> {
	let term = criteria.search_term();
	catalog
		.iter()
		.filter(|art| criteria.matches(art, term.as_deref()))
		.collect()
}

/// Stable in-place sort of a view.
pub fn sort_artworks(view: &mut [&Artwork], key: SortKey) {
	view.sort_by(|a, b| key.compare(a, b));
}

/// Which fields a search page query is restricted to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchScope {
	#[default]
	All,
	Artist,
	Movement,
}

/// Free-text search used by the search page. An empty query returns the whole catalog.
pub fn search_artworks<'a>(catalog: &'a [Artwork], query: &str, scope: SearchScope) -> Vec<&'a Artwork> {
	if query.is_empty() {
		return catalog.iter().collect();
	}
	let term = query.to_lowercase();
	catalog
		.iter()
		.filter(|art| matches_text(art, &term))
		.filter(|art| match scope {
			SearchScope::All => true,
			SearchScope::Artist => art.artist.to_lowercase().contains(&term),
			SearchScope::Movement => art.movement.to_lowercase().contains(&term),
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog::{catalog, sample};

	fn ids<'a>(view: &[&'a Artwork]) -> Vec<&'a str> {
		view.iter().map(|a| a.id.as_str()).collect()
	}

	#[test]
	fn empty_criteria_is_identity() {
		let all = catalog();
		let view = filter_artworks(all, &FilterCriteria::default());
		assert_eq!(view.len(), all.len());
		assert!(view.iter().zip(all).all(|(a, b)| a.id == b.id));
	}

	#[test]
	fn wave_tag_selects_only_the_great_wave() {
		let mut criteria = FilterCriteria::default();
		criteria.toggle_tag("wave");
		let view = filter_artworks(catalog(), &criteria);
		assert_eq!(ids(&view), ["2"]);
		assert_eq!(view[0].title, "The Great Wave off Kanagawa");
	}

	#[test]
	fn or_within_field_and_across_fields() {
		let mut criteria = FilterCriteria::default();
		criteria.toggle_artist("Vincent van Gogh");
		criteria.toggle_artist("Claude Monet");
		let view = filter_artworks(catalog(), &criteria);
		assert_eq!(ids(&view), ["1", "8", "19", "20", "26"]);

		criteria.toggle_movement("Impressionism");
		let view = filter_artworks(catalog(), &criteria);
		assert_eq!(ids(&view), ["8", "26"]);
	}

	#[test]
	fn search_is_case_insensitive_and_narrows_field_filters() {
		let criteria = FilterCriteria {
			search: Some("NIGHT".into()),
			..Default::default()
		};
		let view = filter_artworks(catalog(), &criteria);
		assert!(view.iter().any(|a| a.id == "1"));
		assert!(view.iter().any(|a| a.id == "13"));

		let mut narrowed = criteria.clone();
		narrowed.toggle_artist("Rembrandt van Rijn");
		assert_eq!(ids(&filter_artworks(catalog(), &narrowed)), ["13"]);
	}

	#[test]
	fn empty_search_term_is_ignored() {
		let criteria = FilterCriteria {
			search: Some(String::new()),
			..Default::default()
		};
		assert_eq!(filter_artworks(catalog(), &criteria).len(), catalog().len());
	}

	#[test]
	fn toggling_twice_restores_criteria() {
		let mut criteria = FilterCriteria::default();
		criteria.toggle_movement("Cubism");
		assert_eq!(criteria.active_count(), 1);
		criteria.toggle_movement("Cubism");
		assert_eq!(criteria, FilterCriteria::default());
	}

	#[test]
	fn year_sort_orders_numerically_both_ways() {
		let all = vec![
			sample("a", "Son of Man", "René Magritte", "1964"),
			sample("b", "Arnolfini", "Jan van Eyck", "1434"),
		];
		let mut view: Vec<&Artwork> = all.iter().collect();
		sort_artworks(&mut view, SortKey::YearOldest);
		assert_eq!(ids(&view), ["b", "a"]);
		sort_artworks(&mut view, SortKey::YearNewest);
		assert_eq!(ids(&view), ["a", "b"]);
	}

	#[test]
	fn non_numeric_years_sort_to_the_oldest_end() {
		let all = vec![
			sample("a", "A", "X", "1900"),
			sample("b", "B", "X", "circa unknown"),
			sample("c", "C", "X", "1503–1506"),
		];
		let mut view: Vec<&Artwork> = all.iter().collect();
		sort_artworks(&mut view, SortKey::YearNewest);
		assert_eq!(ids(&view), ["a", "c", "b"]);
		sort_artworks(&mut view, SortKey::YearOldest);
		assert_eq!(ids(&view), ["b", "c", "a"]);
	}

	#[test]
	fn artist_sort_uses_surname() {
		let all = vec![
			sample("a", "A", "Vincent van Gogh", "1889"),
			sample("b", "B", "Salvador Dalí", "1931"),
			sample("c", "C", "Michelangelo", "1512"),
		];
		let mut view: Vec<&Artwork> = all.iter().collect();
		sort_artworks(&mut view, SortKey::ArtistAsc);
		assert_eq!(ids(&view), ["b", "a", "c"]);
		sort_artworks(&mut view, SortKey::ArtistDesc);
		assert_eq!(ids(&view), ["c", "a", "b"]);
	}

	#[test]
	fn equal_keys_keep_catalog_order() {
		let all = vec![
			sample("a", "Same", "X", "1900"),
			sample("b", "same", "Y", "1900"),
			sample("c", "Same", "Z", "1900"),
		];
		let mut view: Vec<&Artwork> = all.iter().collect();
		sort_artworks(&mut view, SortKey::TitleAsc);
		assert_eq!(ids(&view), ["a", "b", "c"]);
		sort_artworks(&mut view, SortKey::YearOldest);
		assert_eq!(ids(&view), ["a", "b", "c"]);
	}

	#[test]
	fn apply_filters_then_sorts() {
		let criteria = FilterCriteria {
			artists: ["Vincent van Gogh".to_string()].into(),
			sort: Some(SortKey::TitleAsc),
			..Default::default()
		};
		let titles: Vec<_> = criteria.apply(catalog()).iter().map(|a| a.title.as_str()).collect();
		assert_eq!(titles, ["Café Terrace at Night", "The Bedroom", "The Starry Night"]);
	}

	#[test]
	fn sort_keys_round_trip_through_strings() {
		for key in SortKey::ALL {
			assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
		}
		assert!("sideways".parse::<SortKey>().is_err());
	}

	#[test]
	fn scoped_search() {
		let all = catalog();
		assert_eq!(search_artworks(all, "", SearchScope::Artist).len(), all.len());
		let picasso = search_artworks(all, "picasso", SearchScope::Artist);
		assert_eq!(ids(&picasso), ["7", "25"]);
		let cubism = search_artworks(all, "cubism", SearchScope::Movement);
		assert!(cubism.iter().all(|a| a.movement == "Cubism"));
		assert!(search_artworks(all, "kanagawa", SearchScope::Artist).is_empty());
		assert_eq!(ids(&search_artworks(all, "kanagawa", SearchScope::All)), ["2"]);
	}

	#[test]
	fn year_parsing() {
		assert_eq!(parse_year("1889"), Some(1889));
		assert_eq!(parse_year(" 1503–1506"), Some(1503));
		assert_eq!(parse_year("-500"), Some(-500));
		assert_eq!(parse_year("c. 1500"), None);
		assert_eq!(parse_year(""), None);
	}
}
