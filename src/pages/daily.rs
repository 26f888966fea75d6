use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::catalog::{Artwork, catalog, daily_artwork, related_artworks};
use crate::components::art_card::ArtCard;
use crate::components::toast::use_toaster;
use crate::config::GalleryConfig;
use crate::download::{WALLPAPER_RESOLUTIONS, download_wallpaper};
use crate::web::{BrowserSaver, HttpClient};

#[component]
fn Wallpapers(artwork: &'static Artwork) -> impl IntoView {
	let notifier = use_toaster();
	let fallback_ext = use_context::<GalleryConfig>()
		.unwrap_or_default()
		.download
		.fallback_extension;

	WALLPAPER_RESOLUTIONS
		.into_iter()
		.map(|(label, resolution)| {
			let fallback_ext = fallback_ext.clone();
			let save = move |_| {
				let fallback_ext = fallback_ext.clone();
				spawn_local(async move {
					download_wallpaper(
						&HttpClient::new(),
						&BrowserSaver,
						&notifier,
						artwork,
						resolution,
						&fallback_ext,
					)
					.await;
				});
			};
			view! {
				<div class="wallpaper-card">
					<img src=artwork.image_url.as_str() alt=format!("{label} wallpaper") />
					<h3>{format!("{label} - {resolution}")}</h3>
					<button class="button" on:click=save>
						"Download"
					</button>
				</div>
			}
		})
		.collect_view()
}

/// The artwork of the day with wallpaper downloads.
#[component]
pub fn DailyPage() -> impl IntoView {
	let all = catalog();
	let Some(artwork) = daily_artwork(all, Local::now().date_naive()) else {
		return view! { <p class="empty">"The collection is empty."</p> }.into_any();
	};

	view! {
		<section class="daily">
			<h1 class="section-title">"Today's Masterpiece"</h1>
			<p class="subtitle">"A new featured artwork every day to inspire and educate."</p>
			<div class="daily-feature">
				<img src=artwork.image_url.as_str() alt=artwork.title.as_str() />
				<div class="daily-info">
					<h2>{artwork.title.as_str()}</h2>
					<p class="artwork-meta">{artwork.artist.as_str()}", "{artwork.year.as_str()}</p>
					<p>{artwork.description.as_str()}</p>
					<h3>"Source"</h3>
					<p>{artwork.source.as_str()}</p>
					<h3>"Movement"</h3>
					<p>{artwork.movement.as_str()}</p>
					<A href=format!("/artwork/{}", artwork.id)>"View Full Details"</A>
				</div>
			</div>
			<h2 class="section-title">"Suggested Wallpapers"</h2>
			<div class="wallpaper-grid">
				<Wallpapers artwork />
			</div>
			<h2 class="section-title">"Related Artworks"</h2>
			<div class="art-grid">
				{related_artworks(all, artwork)
					.into_iter()
					.map(|artwork| view! { <ArtCard artwork selection_mode=false /> })
					.collect_view()}
			</div>
		</section>
	}
	.into_any()
}
