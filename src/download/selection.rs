use std::collections::HashSet;

/// Ids of the artworks the user has ticked for a batch download.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
	ids: HashSet<String>,
}

impl SelectionSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add `id` if absent, remove it if present.
	pub fn toggle(&mut self, id: &str) {
		if !self.ids.remove(id) {
			self.ids.insert(id.to_owned());
		}
	}

	/// Replace the selection with exactly `ids`.
	pub fn select_all<I, S>(&mut self, ids: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.ids = ids.into_iter().map(Into::into).collect();
	}

	pub fn clear(&mut self) {
		self.ids.clear();
	}

	pub fn contains(&self, id: &str) -> bool {
		self.ids.contains(id)
	}

	pub fn len(&self) -> usize {
		self.ids.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}
}
