use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::catalog::{Artwork, catalog, find_artwork, related_artworks};
use crate::components::art_card::ArtCard;
use crate::components::force_graph::ForceGraphCanvas;
use crate::components::toast::use_toaster;
use crate::config::GalleryConfig;
use crate::download::{download_embed_html, download_image, download_metadata};
use crate::layout::{GraphVariant, local_graph};
use crate::web::{BrowserSaver, HttpClient};

#[component]
fn ArtworkDetail(artwork: &'static Artwork) -> impl IntoView {
	let notifier = use_toaster();
	let fallback_ext = use_context::<GalleryConfig>()
		.unwrap_or_default()
		.download
		.fallback_extension;
	let related = related_artworks(catalog(), artwork);
	let graph = Signal::derive(move || local_graph(artwork, &related_artworks(catalog(), artwork)));

	let save_image = move |_| {
		let fallback_ext = fallback_ext.clone();
		spawn_local(async move {
			download_image(&HttpClient::new(), &BrowserSaver, &notifier, artwork, &fallback_ext).await;
		});
	};

	view! {
		<article class="artwork-detail">
			<div class="artwork-image">
				<img src=artwork.image_url.as_str() alt=artwork.title.as_str() />
			</div>
			<div class="artwork-info">
				<h1>{artwork.title.as_str()}</h1>
				<p class="artwork-meta">{artwork.artist.as_str()}", "{artwork.year.as_str()}</p>
				<dl class="artwork-facts">
					<dt>"Movement"</dt>
					<dd>{artwork.movement.as_str()}</dd>
					<dt>"Location"</dt>
					<dd>{artwork.location.as_str()}</dd>
					<dt>"Source"</dt>
					<dd>{artwork.source.as_str()}</dd>
					{artwork
						.medium
						.as_deref()
						.map(|medium| view! { <dt>"Medium"</dt><dd>{medium}</dd> })}
					{artwork
						.dimensions
						.as_deref()
						.map(|dimensions| view! { <dt>"Dimensions"</dt><dd>{dimensions}</dd> })}
				</dl>
				<p class="artwork-description">{artwork.description.as_str()}</p>
				<ul class="tag-list">
					{artwork.tags.iter().map(|tag| view! { <li class="tag">{tag.as_str()}</li> }).collect_view()}
				</ul>
				<div class="artwork-actions">
					<button class="button button-primary" on:click=save_image>
						"Download image"
					</button>
					<button class="button" on:click=move |_| { download_metadata(&BrowserSaver, &notifier, artwork); }>
						"Download info"
					</button>
					<button class="button" on:click=move |_| { download_embed_html(&BrowserSaver, &notifier, artwork); }>
						"Download HTML embed"
					</button>
				</div>
			</div>
		</article>
		<section class="artwork-connections">
			<h2>"Connections"</h2>
			<div class="graph-frame graph-frame-local">
				<ForceGraphCanvas data=graph variant=GraphVariant::Local height=Some(400.0) />
			</div>
			<div class="art-grid">
				{related
					.into_iter()
					.map(|artwork| view! { <ArtCard artwork selection_mode=false /> })
					.collect_view()}
			</div>
		</section>
	}
}

/// `/artwork/:id`
#[component]
pub fn ArtworkPage() -> impl IntoView {
	let params = use_params_map();
	let artwork = Memo::new(move |_| {
		params
			.with(|p| p.get("id"))
			.and_then(|id| find_artwork(catalog(), &id))
	});

	move || match artwork.get() {
		Some(artwork) => view! { <ArtworkDetail artwork /> }.into_any(),
		None => {
			view! {
				<section class="not-found">
					<h2>"Artwork Not Found"</h2>
					<p>"The artwork you are looking for might have been removed or doesn't exist."</p>
					<A href="/gallery">"Return to Gallery"</A>
				</section>
			}
				.into_any()
		}
	}
}
