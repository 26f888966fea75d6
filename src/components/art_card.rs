use leptos::prelude::*;
use leptos_router::components::A;

use crate::catalog::Artwork;
use crate::download::BatchCoordinator;

/// Thumbnail card. In selection mode a click toggles the artwork in the batch selection
/// instead of opening it.
#[component]
pub fn ArtCard(
	artwork: &'static Artwork,
	#[prop(into)] selection_mode: Signal<bool>,
	#[prop(optional)] coordinator: Option<RwSignal<BatchCoordinator>>,
) -> impl IntoView {
	let id = artwork.id.as_str();
	let selected = move || coordinator.is_some_and(|c| c.with(|c| c.selection().contains(id)));
	let toggle = move |_| {
		if let Some(c) = coordinator {
			c.update(|c| c.toggle(id));
		}
	};

	let body = move || {
		view! {
			<img class="art-card-image" src=artwork.image_url.as_str() alt=artwork.title.as_str() loading="lazy" />
			<div class="art-card-caption">
				<h3>{artwork.title.as_str()}</h3>
				<p>{artwork.artist.as_str()}", "{artwork.year.as_str()}</p>
			</div>
		}
	};

	view! {
		<article class="art-card" class:art-card-selected=selected>
			<Show
				when=move || selection_mode.get()
				fallback=move || view! { <A href=format!("/artwork/{id}")>{body()}</A> }
			>
				<button class="art-card-select" on:click=toggle aria-pressed=move || selected().to_string()>
					<span class="art-card-check">{move || if selected() { "✓" } else { "" }}</span>
					{body()}
				</button>
			</Show>
		</article>
	}
}
