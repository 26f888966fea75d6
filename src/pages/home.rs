use chrono::Local;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::catalog::{catalog, daily_artwork};
use crate::components::art_card::ArtCard;

const FEATURED: usize = 6;

/// Landing page: today's artwork as the hero and a few featured cards.
#[component]
pub fn Home() -> impl IntoView {
	let all = catalog();
	let daily = daily_artwork(all, Local::now().date_naive());

	view! {
		<section class="hero">
			{daily
				.map(|art| {
					view! { <img class="hero-backdrop" src=art.image_url.as_str() alt="" /> }
				})}
			<div class="hero-content">
				<span class="hero-badge">"Public Domain Art Collection"</span>
				<h1>"Discover timeless masterpieces"</h1>
				<p class="subtitle">
					"Explore high-definition artworks from the world's greatest museums. Download, share, and celebrate art that belongs to humanity."
				</p>
				<div class="hero-actions">
					<A href="/gallery">"Explore Gallery"</A>
					{daily
						.map(|art| view! { <A href=format!("/artwork/{}", art.id)>"Today's Masterpiece"</A> })}
				</div>
			</div>
		</section>
		<section class="featured">
			<h2 class="section-title">"Featured Collection"</h2>
			<div class="art-grid">
				{all
					.iter()
					.take(FEATURED)
					.map(|artwork| view! { <ArtCard artwork selection_mode=false /> })
					.collect_view()}
			</div>
		</section>
	}
}
