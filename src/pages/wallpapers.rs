use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, info, warn};

use crate::catalog::{Artwork, FilterCriteria, catalog};
use crate::components::cleanup_slot;
use crate::components::filter_panel::FilterPanel;
use crate::components::toast::use_toaster;
use crate::config::GalleryConfig;
use crate::download::{
	DEVICE_RESOLUTIONS, WALLPAPER_RESOLUTIONS, download_wallpaper, download_wallpaper_batch, random_wallpaper,
	wallpaper_pool,
};
use crate::web::{BrowserSaver, HttpClient, sleep};

const AUTO_WALLPAPER_EVERY: Duration = Duration::from_secs(24 * 60 * 60);
const AUTO_WALLPAPER_RESOLUTION: &str = "1920x1080";
const GRID_LIMIT: usize = 12;

/// Filtered wallpaper picker: random picks, a "first N" batch at a chosen device
/// resolution and an optional daily auto-wallpaper.
#[component]
pub fn WallpaperStudio(title: &'static str, batch_size: usize) -> impl IntoView {
	let notifier = use_toaster();
	let download = use_context::<GalleryConfig>().unwrap_or_default().download;
	let fallback_ext = StoredValue::new(download.fallback_extension);
	let pause = Duration::from_millis(download.wallpaper_pause_ms);

	let criteria = RwSignal::new(FilterCriteria::default());
	let resolution = RwSignal::new(DEVICE_RESOLUTIONS[0].1);
	let auto = RwSignal::new(false);
	let filtered = Memo::new(move |_| criteria.with(|c| c.apply(catalog())));

	let save_one = move |art: &'static Artwork, resolution: &'static str| {
		let fallback_ext = fallback_ext.get_value();
		spawn_local(async move {
			download_wallpaper(&HttpClient::new(), &BrowserSaver, &notifier, art, resolution, &fallback_ext).await;
		});
	};

	let save_random = move |resolution: &'static str| {
		let pool = wallpaper_pool(filtered.get_untracked(), catalog());
		match random_wallpaper(&pool, js_sys::Math::random()) {
			Some(art) => save_one(art, resolution),
			None => warn!("no artworks to pick a wallpaper from"),
		}
	};

	let save_batch = move |_| {
		let picked = filtered.get_untracked();
		let resolution = resolution.get_untracked();
		let fallback_ext = fallback_ext.get_value();
		spawn_local(async move {
			download_wallpaper_batch(
				&HttpClient::new(),
				&BrowserSaver,
				&notifier,
				&picked,
				batch_size,
				resolution,
				&fallback_ext,
				|| sleep(pause),
			)
			.await;
		});
	};

	let interval = cleanup_slot(|handle: IntervalHandle| {
		debug!("wallpaper studio unmounted, auto-wallpaper stopped");
		handle.clear();
	});
	let toggle_auto = move |ev: leptos::ev::Event| {
		let enabled = event_target_checked(&ev);
		auto.set(enabled);
		if let Some(previous) = interval.lock().ok().and_then(|mut slot| slot.take()) {
			previous.clear();
		}
		if !enabled {
			info!("auto-wallpaper disabled");
			return;
		}
		match set_interval_with_handle(move || save_random(AUTO_WALLPAPER_RESOLUTION), AUTO_WALLPAPER_EVERY) {
			Ok(handle) => {
				if let Ok(mut slot) = interval.lock() {
					*slot = Some(handle);
				}
				info!("auto-wallpaper enabled");
			}
			Err(err) => warn!("could not schedule auto-wallpaper: {err:?}"),
		}
	};

	let on_resolution = move |ev: leptos::ev::Event| {
		let value = event_target_value(&ev);
		if let Some(picked) = DEVICE_RESOLUTIONS.iter().map(|(_, r)| *r).find(|r| *r == value) {
			resolution.set(picked);
		}
	};

	let grid = move || {
		filtered
			.get()
			.into_iter()
			.take(GRID_LIMIT)
			.map(|art| {
				view! {
					<div class="wallpaper-card">
						<img src=art.image_url.as_str() alt=art.title.as_str() loading="lazy" />
						<h3>{art.title.as_str()}</h3>
						<p>{art.artist.as_str()}</p>
						<div class="artwork-actions">
							{WALLPAPER_RESOLUTIONS
								.into_iter()
								.map(|(label, res)| {
									view! {
										<button class="button button-ghost" on:click=move |_| save_one(art, res)>
											{label}
										</button>
									}
								})
								.collect_view()}
						</div>
					</div>
				}
			})
			.collect_view()
	};

	view! {
		<section class="wallpapers">
			<h1 class="section-title">{title}</h1>
			<p class="subtitle">"Turn public-domain masterpieces into wallpapers for any screen."</p>
			<div class="gallery-body">
				<FilterPanel criteria />
				<div class="gallery-main">
					<div class="studio-controls">
						<select class="studio-select" on:change=on_resolution>
							{DEVICE_RESOLUTIONS
								.into_iter()
								.map(|(label, res)| {
									view! {
										<option value=res prop:selected=move || resolution.get() == res>
											{format!("{label} ({res})")}
										</option>
									}
								})
								.collect_view()}
						</select>
						<button class="button" on:click=move |_| save_random(resolution.get_untracked())>
							"Random wallpaper"
						</button>
						<button class="button" on:click=save_batch>
							{format!("Download first {batch_size}")}
						</button>
						<label class="facet-option">
							<input type="checkbox" prop:checked=move || auto.get() on:change=toggle_auto />
							"New wallpaper every day"
						</label>
						<span class="gallery-count">{move || format!("{} artworks", filtered.with(Vec::len))}</span>
					</div>
					<Show
						when=move || !filtered.with(Vec::is_empty)
						fallback=|| {
							view! {
								<p class="empty">"No artworks match your current filters. Try adjusting your selection."</p>
							}
						}
					>
						<div class="studio-grid">{grid}</div>
					</Show>
				</div>
			</div>
		</section>
	}
}
