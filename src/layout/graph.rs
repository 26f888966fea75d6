//! Graph data derived from catalog records.

use std::collections::{HashMap, HashSet};

use crate::catalog::Artwork;
use crate::config::LayoutConfig;

use super::ForceSettings;

/// Qualitative palette for the corpus graph.
pub const CATEGORY_COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

/// Ego-graph palette; index 0 is reserved for the centre.
pub const LOCAL_COLORS: &[&str] = &[
	"#3b82f6", "#ef4444", "#f97316", "#eab308", "#22c55e", "#06b6d4", "#8b5cf6", "#ec4899",
	"#f43f5e",
];

const GROUP_COUNT: u64 = 5;

/// A node as handed to the simulation and the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub label: String,
	pub thumbnail: Option<String>,
	pub group: u32,
	pub color: String,
	pub is_center: bool,
}

/// A directed edge. The layout treats it as an undirected spring.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	pub weight: f64,
}

impl GraphLink {
	pub fn new(source: &str, target: &str) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			weight: 1.0,
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

/// Which of the two graph views a simulation belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphVariant {
	/// Every artwork in the current view with its declared connections.
	Global,
	/// One artwork and its direct neighbours.
	Local,
}

impl GraphVariant {
	pub fn settings(self, config: &LayoutConfig) -> ForceSettings {
		match self {
			GraphVariant::Global => config.global.clone(),
			GraphVariant::Local => config.local.clone(),
		}
	}

	/// Whether clicking `node` should open its detail page.
	pub fn navigates(self, node: &GraphNode) -> bool {
		match self {
			GraphVariant::Global => true,
			GraphVariant::Local => !node.is_center,
		}
	}
}

/// Colour group: numeric ids modulo a small constant, other ids hashed first.
fn group_for_id(id: &str) -> u32 {
	let key = id.parse::<u64>().unwrap_or_else(|_| {
		// FNV-1a
		id.bytes().fold(0xcbf2_9ce4_8422_2325u64, |h, b| {
			(h ^ b as u64).wrapping_mul(0x0000_0100_0000_01b3)
		})
	});
	(key % GROUP_COUNT) as u32 + 1
}

/// Corpus graph over `artworks`. Every declared connection becomes one link, so mutual
/// declarations produce two; links to artworks outside the set are left for the simulation
/// to drop. Groups take palette colours in the order they are first met.
pub fn global_graph<'a>(artworks: impl IntoIterator<Item = &'a Artwork>) -> GraphData {
	let mut data = GraphData::default();
	let mut palette: HashMap<u32, usize> = HashMap::new();
	for art in artworks {
		let group = group_for_id(&art.id);
		let next = palette.len();
		let slot = *palette.entry(group).or_insert(next);
		data.nodes.push(GraphNode {
			id: art.id.clone(),
			label: art.title.clone(),
			thumbnail: Some(art.image_url.clone()),
			group,
			color: CATEGORY_COLORS[slot % CATEGORY_COLORS.len()].into(),
			is_center: false,
		});
		data.links.extend(
			art.connections
				.iter()
				.map(|target| GraphLink::new(&art.id, target)),
		);
	}
	data
}

/// Star-shaped ego-graph: `center` linked to each of `related`, whatever the related
/// artworks declare themselves. Repeated entries and the centre itself are skipped.
pub fn local_graph(center: &Artwork, related: &[&Artwork]) -> GraphData {
	let mut seen = HashSet::from([center.id.as_str()]);
	let mut data = GraphData {
		nodes: vec![GraphNode {
			id: center.id.clone(),
			label: center.title.clone(),
			thumbnail: Some(center.image_url.clone()),
			group: 0,
			color: LOCAL_COLORS[0].into(),
			is_center: true,
		}],
		links: Vec::new(),
	};

	let ring = &LOCAL_COLORS[1..];
	for art in related.iter().filter(|a| seen.insert(a.id.as_str())) {
		let slot = data.nodes.len() - 1;
		data.nodes.push(GraphNode {
			id: art.id.clone(),
			label: art.title.clone(),
			thumbnail: Some(art.image_url.clone()),
			group: slot as u32 + 1,
			color: ring[slot % ring.len()].into(),
			is_center: false,
		});
		data.links.push(GraphLink::new(&center.id, &art.id));
	}
	data
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog::{catalog, find_artwork, related_artworks, sample};

	#[test]
	fn global_graph_keeps_one_link_per_declaration() {
		let all = catalog();
		let data = global_graph(all);
		assert_eq!(data.nodes.len(), all.len());
		let declared: usize = all.iter().map(|a| a.connections.len()).sum();
		assert_eq!(data.links.len(), declared);
		// 1 and 2 list each other: both directions are present.
		assert!(data.links.contains(&GraphLink::new("1", "2")));
		assert!(data.links.contains(&GraphLink::new("2", "1")));
	}

	#[test]
	fn global_groups_come_from_numeric_ids() {
		let data = global_graph(catalog());
		let n7 = data.nodes.iter().find(|n| n.id == "7").unwrap();
		assert_eq!(n7.group, 3);
		assert!(data.nodes.iter().all(|n| (1..=5).contains(&n.group)));
	}

	#[test]
	fn palette_follows_first_seen_group_order() {
		let data = global_graph(catalog());
		// "1" is met first (group 2), then "2" (group 3).
		assert_eq!(data.nodes[0].color, CATEGORY_COLORS[0]);
		assert_eq!(data.nodes[1].color, CATEGORY_COLORS[1]);
		let n7 = data.nodes.iter().find(|n| n.id == "7").unwrap();
		assert_eq!(n7.color, CATEGORY_COLORS[1]);
		for a in &data.nodes {
			for b in &data.nodes {
				assert_eq!(a.group == b.group, a.color == b.color);
			}
		}

		let only_seven = global_graph(find_artwork(catalog(), "7"));
		assert_eq!(only_seven.nodes[0].color, CATEGORY_COLORS[0]);
	}

	#[test]
	fn non_numeric_ids_still_get_a_stable_group() {
		assert_eq!(group_for_id("met-436535"), group_for_id("met-436535"));
		assert!((1..=5).contains(&group_for_id("rijks-SK-C-5")));
	}

	#[test]
	fn local_graph_is_a_star_from_the_centre() {
		let all = catalog();
		let center = find_artwork(all, "1").unwrap();
		let related = related_artworks(all, center);
		let data = local_graph(center, &related);

		assert_eq!(data.nodes.len(), 4);
		assert!(data.nodes[0].is_center);
		assert_eq!(data.nodes.iter().filter(|n| n.is_center).count(), 1);
		assert!(data.links.iter().all(|l| l.source == "1"));
		let targets: Vec<_> = data.links.iter().map(|l| l.target.as_str()).collect();
		assert_eq!(targets, ["2", "3", "19"]);
	}

	#[test]
	fn local_colours_recycle_and_centre_is_distinct() {
		let center = sample("c", "Centre", "X", "1900");
		let related: Vec<Artwork> = (0..10)
			.map(|i| sample(&i.to_string(), "R", "Y", "1900"))
			.collect();
		let refs: Vec<&Artwork> = related.iter().collect();
		let data = local_graph(&center, &refs);

		assert_eq!(data.nodes[0].color, LOCAL_COLORS[0]);
		assert!(data.nodes[1..].iter().all(|n| n.color != LOCAL_COLORS[0]));
		assert_eq!(data.nodes[1].color, LOCAL_COLORS[1]);
		assert_eq!(data.nodes[9].color, LOCAL_COLORS[1]);
	}

	#[test]
	fn local_graph_skips_self_and_repeats() {
		let center = sample("c", "Centre", "X", "1900");
		let other = sample("o", "Other", "Y", "1900");
		let data = local_graph(&center, &[&center, &other, &other]);
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.links, [GraphLink::new("c", "o")]);
	}

	#[test]
	fn only_non_centre_nodes_navigate_in_local_view() {
		let center = sample("c", "Centre", "X", "1900");
		let other = sample("o", "Other", "Y", "1900");
		let data = local_graph(&center, &[&other]);
		assert!(!GraphVariant::Local.navigates(&data.nodes[0]));
		assert!(GraphVariant::Local.navigates(&data.nodes[1]));
		assert!(GraphVariant::Global.navigates(&data.nodes[0]));
	}
}
