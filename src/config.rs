//! Runtime configuration.
//!
//! Every field has a default, so an empty JSON object is a valid configuration. The host
//! page may override any subset by embedding
//! `<script id="gallery-config" type="application/json">{...}</script>`.

use log::{debug, warn};
use serde::Deserialize;

use crate::error::{GalleryError, Result};
use crate::layout::ForceSettings;

const CONFIG_ELEMENT_ID: &str = "gallery-config";

/// Top-level configuration for the gallery.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GalleryConfig {
	/// Force parameters for both graph variants.
	pub layout: LayoutConfig,
	/// Batch and single download settings.
	pub download: DownloadConfig,
	/// External museum collection endpoints.
	pub museums: MuseumConfig,
}

/// Force parameters for the corpus graph and the per-artwork ego-graph.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(from = "LayoutOverrides")]
pub struct LayoutConfig {
	pub global: ForceSettings,
	pub local: ForceSettings,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			global: ForceSettings::global(),
			local: ForceSettings::local(),
		}
	}
}

/// Partial force settings; anything left out keeps the variant's default.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ForceOverrides {
	link_distance: Option<f64>,
	charge_strength: Option<f64>,
	axis_strength: Option<f64>,
	collision_radius: Option<f64>,
	alpha_min: Option<f64>,
	alpha_decay: Option<f64>,
	velocity_decay: Option<f64>,
	drag_alpha_target: Option<f64>,
}

impl ForceOverrides {
	fn apply(self, mut base: ForceSettings) -> ForceSettings {
		base.link_distance = self.link_distance.unwrap_or(base.link_distance);
		base.charge_strength = self.charge_strength.unwrap_or(base.charge_strength);
		base.axis_strength = self.axis_strength.or(base.axis_strength);
		base.collision_radius = self.collision_radius.or(base.collision_radius);
		base.alpha_min = self.alpha_min.unwrap_or(base.alpha_min);
		base.alpha_decay = self.alpha_decay.unwrap_or(base.alpha_decay);
		base.velocity_decay = self.velocity_decay.unwrap_or(base.velocity_decay);
		base.drag_alpha_target = self.drag_alpha_target.unwrap_or(base.drag_alpha_target);
		base
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LayoutOverrides {
	global: ForceOverrides,
	local: ForceOverrides,
}

impl From<LayoutOverrides> for LayoutConfig {
	fn from(overrides: LayoutOverrides) -> Self {
		Self {
			global: overrides.global.apply(ForceSettings::global()),
			local: overrides.local.apply(ForceSettings::local()),
		}
	}
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct DownloadConfig {
	/// Archive names are `<prefix>_<YYYY-MM-DD>.zip`.
	pub archive_prefix: String,
	/// Number of image fetches in flight at once. `1` is strictly sequential.
	pub concurrency: usize,
	/// Used when neither the content type nor the URL reveals an image format.
	pub fallback_extension: String,
	/// Delay between items of a sequential wallpaper batch.
	pub wallpaper_pause_ms: u64,
}

impl Default for DownloadConfig {
	fn default() -> Self {
		Self {
			archive_prefix: "nuvva_artworks".into(),
			concurrency: 1,
			fallback_extension: "jpg".into(),
			wallpaper_pause_ms: 500,
		}
	}
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct MuseumConfig {
	pub met_base_url: String,
	pub rijks_base_url: String,
	/// Rijksmuseum searches are skipped without a key.
	pub rijks_api_key: Option<String>,
	pub search_limit: usize,
}

impl Default for MuseumConfig {
	fn default() -> Self {
		Self {
			met_base_url: "https://collectionapi.metmuseum.org/public/collection/v1".into(),
			rijks_base_url: "https://www.rijksmuseum.nl/api/en/collection".into(),
			rijks_api_key: None,
			search_limit: 20,
		}
	}
}

impl GalleryConfig {
	/// Parse a (possibly partial) JSON configuration.
	pub fn from_json(raw: &str) -> Result<Self> {
		let config: Self = serde_json::from_str(raw)?;
		if config.download.concurrency == 0 {
			return Err(GalleryError::Config(
				"download.concurrency must be at least 1".into(),
			));
		}
		Ok(config)
	}

	/// Read the configuration embedded in the host page, falling back to defaults.
	pub fn load() -> Self {
		let embedded = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
			.and_then(|el| el.text_content());

		let Some(raw) = embedded else {
			debug!("no #{CONFIG_ELEMENT_ID} element, using default configuration");
			return Self::default();
		};
		match Self::from_json(&raw) {
			Ok(config) => config,
			Err(err) => {
				warn!("ignoring embedded configuration: {err}");
				Self::default()
			}
		}
	}
}
