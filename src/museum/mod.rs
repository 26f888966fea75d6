//! Parsing layer for external museum collection APIs.
//!
//! Responses are loosely typed: every field may be missing, null or empty. The models here
//! accept all of that and map into a strict [`Artwork`](crate::catalog::Artwork) with
//! explicit defaults, so nothing downstream has to care.

mod met;
mod rijks;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub use met::MetMuseum;
pub use rijks::Rijksmuseum;

const MAX_TAGS: usize = 5;

/// GETs a JSON document.
#[async_trait(?Send)]
pub trait JsonSource {
	async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value>;
}

#[async_trait(?Send)]
impl<T: JsonSource + ?Sized> JsonSource for &T {
	async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
		(**self).get_json(url, query).await
	}
}

/// `Some` only for strings with visible content.
fn present(value: &Option<String>) -> Option<&str> {
	value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn or_default(value: &Option<String>, default: &str) -> String {
	present(value).unwrap_or(default).to_owned()
}

/// Lowercased, deduplicated in first-seen order, at most five.
fn collect_tags<'a>(candidates: impl IntoIterator<Item = &'a str>) -> Vec<String> {
	let mut tags: Vec<String> = Vec::new();
	for tag in candidates {
		let tag = tag.trim().to_lowercase();
		if tag.is_empty() || tags.contains(&tag) {
			continue;
		}
		tags.push(tag);
		if tags.len() == MAX_TAGS {
			break;
		}
	}
	tags
}

#[cfg(test)]
pub(crate) mod fakes {
	use std::cell::RefCell;
	use std::collections::HashMap;

	use super::*;
	use crate::error::GalleryError;

	/// Canned documents keyed by URL (query ignored); unknown URLs fail.
	#[derive(Default)]
	pub struct FakeSource {
		pub documents: HashMap<String, Value>,
		pub requests: RefCell<Vec<(String, Vec<(String, String)>)>>,
	}

	impl FakeSource {
		pub fn with(mut self, url: &str, doc: Value) -> Self {
			self.documents.insert(url.into(), doc);
			self
		}
	}

	#[async_trait(?Send)]
	impl JsonSource for FakeSource {
		async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
			self.requests.borrow_mut().push((
				url.into(),
				query.iter().map(|(k, v)| ((*k).to_owned(), v.clone())).collect(),
			));
			self.documents.get(url).cloned().ok_or_else(|| GalleryError::HttpStatus {
				url: url.into(),
				status: 404,
			})
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tags_are_unique_lowercase_and_capped() {
		let tags = collect_tags(["Oil", "oil", " Paintings ", "", "A", "B", "C", "D"]);
		assert_eq!(tags, ["oil", "paintings", "a", "b", "c"]);
	}

	#[test]
	fn blank_strings_count_as_missing() {
		assert_eq!(present(&Some("  ".into())), None);
		assert_eq!(or_default(&None, "Untitled"), "Untitled");
		assert_eq!(or_default(&Some(" Night ".into()), "Untitled"), "Night");
	}
}
