use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_query_map};
use log::info;

use crate::catalog::{Artwork, SearchScope, catalog, search_artworks, suggest_artist, suggest_movement};
use crate::components::art_card::ArtCard;
use crate::config::GalleryConfig;
use crate::museum::{MetMuseum, Rijksmuseum};
use crate::web::HttpClient;

fn scope_button(label: &'static str, target: SearchScope, scope: RwSignal<SearchScope>) -> impl IntoView {
	view! {
		<button
			class="button"
			class:active=move || scope.get() == target
			on:click=move |_| scope.set(target)
		>
			{label}
		</button>
	}
}

/// Catalog search with artist/movement scoping, plus an on-demand search of the public
/// museum collections.
#[component]
pub fn SearchPage() -> impl IntoView {
	let museums = use_context::<GalleryConfig>().unwrap_or_default().museums;
	let query = use_query_map();
	let navigate = use_navigate();
	let scope = RwSignal::new(SearchScope::All);
	let external = RwSignal::new(Vec::<Artwork>::new());
	let searching = RwSignal::new(false);

	let term = Memo::new(move |_| query.with(|q| q.get("q")).unwrap_or_default());
	let results = Memo::new(move |_| term.with(|t| search_artworks(catalog(), t, scope.get())));
	let artist = Memo::new(move |_| term.with(|t| suggest_artist(catalog(), t)));
	let movement = Memo::new(move |_| term.with(|t| suggest_movement(catalog(), t)));

	let on_submit = move |ev: leptos::ev::Event| {
		let value = event_target_value(&ev);
		external.set(Vec::new());
		navigate(
			&format!("/search?q={}", String::from(js_sys::encode_uri_component(&value))),
			Default::default(),
		);
	};

	let search_museums = move |_| {
		let q = term.get_untracked();
		if q.is_empty() || searching.get_untracked() {
			return;
		}
		let museums = museums.clone();
		searching.set(true);
		spawn_local(async move {
			let client = HttpClient::new();
			let mut found = MetMuseum::new(client.clone(), museums.met_base_url.as_str())
				.search_artworks(&q, museums.search_limit)
				.await;
			found.extend(
				Rijksmuseum::new(client, museums.rijks_base_url.as_str(), museums.rijks_api_key.clone())
					.search_artworks(&q, museums.search_limit)
					.await,
			);
			info!("museum search for {q:?} returned {} artworks", found.len());
			external.set(found);
			searching.set(false);
		});
	};

	view! {
		<section class="search">
			<input
				type="search"
				class="search-input"
				placeholder="Search artworks, artists, movements..."
				prop:value=move || term.get()
				on:change=on_submit
			/>
			<h1>{move || format!("Search Results for \"{}\"", term.get())}</h1>
			<div class="suggestions">
				{move || {
					artist
						.get()
						.map(|name| {
							view! {
								<div class="suggestion">
									<h3>"Artist"</h3>
									<h4>{name}</h4>
									<button class="button" on:click=move |_| scope.set(SearchScope::Artist)>
										"View Artist's Works"
									</button>
								</div>
							}
						})
				}}
				{move || {
					movement
						.get()
						.map(|name| {
							view! {
								<div class="suggestion">
									<h3>"Art Movement"</h3>
									<h4>{name}</h4>
									<button class="button" on:click=move |_| scope.set(SearchScope::Movement)>
										"View Movement Works"
									</button>
								</div>
							}
						})
				}}
			</div>
			<div class="scope-toggle">
				<span class="result-count">{move || format!("{} results", results.with(Vec::len))}</span>
				{scope_button("All Results", SearchScope::All, scope)}
				{scope_button("Artists Only", SearchScope::Artist, scope)}
				{scope_button("Movements Only", SearchScope::Movement, scope)}
			</div>
			<div class="art-grid">
				<For each=move || results.get() key=|art| art.id.clone() let:artwork>
					<ArtCard artwork selection_mode=false />
				</For>
			</div>
			<div class="museum-search">
				<button class="button" on:click=search_museums disabled=move || searching.get() || term.with(String::is_empty)>
					{move || if searching.get() { "Searching museums..." } else { "Search museum collections" }}
				</button>
				<div class="art-grid">
					<For each=move || external.get() key=|art| art.id.clone() let:artwork>
						<article class="art-card art-card-external">
							<a href=artwork.image_url.clone() target="_blank" rel="noopener">
								<img class="art-card-image" src=artwork.image_url.clone() alt=artwork.title.clone() loading="lazy" />
								<div class="art-card-caption">
									<h3>{artwork.title.clone()}</h3>
									<p>{format!("{}, {} | {}", artwork.artist, artwork.year, artwork.source)}</p>
								</div>
							</a>
						</article>
					</For>
				</div>
			</div>
		</section>
	}
}
