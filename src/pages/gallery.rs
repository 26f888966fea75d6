use leptos::prelude::*;

use crate::catalog::{FilterCriteria, SortKey, catalog};
use crate::components::art_card::ArtCard;
use crate::components::batch_toolbar::{BatchToolbar, use_batch_coordinator};
use crate::components::filter_panel::FilterPanel;
use crate::components::force_graph::ForceGraphCanvas;
use crate::layout::{GraphVariant, global_graph};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ViewMode {
	Grid,
	Graph,
}

/// Filterable catalog shown as a card grid or as a connection graph.
#[component]
pub fn Gallery() -> impl IntoView {
	let criteria = RwSignal::new(FilterCriteria {
		sort: Some(SortKey::TitleAsc),
		..FilterCriteria::default()
	});
	let coordinator = use_batch_coordinator();
	// A running job keeps its selection until it settles.
	on_cleanup(move || {
		coordinator.try_update(|c| {
			if !c.is_downloading() {
				c.clear();
			}
		});
	});
	let selection_mode = RwSignal::new(false);
	let mode = RwSignal::new(ViewMode::Grid);

	let visible = Memo::new(move |_| criteria.with(|c| c.apply(catalog())));
	let graph = Signal::derive(move || visible.with(|v| global_graph(v.iter().copied())));

	view! {
		<div class="gallery">
			<header class="gallery-header">
				<h1 class="section-title">"Gallery"</h1>
				<span class="gallery-count">{move || format!("{} artworks", visible.with(Vec::len))}</span>
				<div class="view-toggle">
					<button
						class="button"
						class:active=move || mode.get() == ViewMode::Grid
						on:click=move |_| mode.set(ViewMode::Grid)
					>
						"Grid"
					</button>
					<button
						class="button"
						class:active=move || mode.get() == ViewMode::Graph
						on:click=move |_| {
							selection_mode.set(false);
							mode.set(ViewMode::Graph);
						}
					>
						"Graph"
					</button>
				</div>
			</header>
			<div class="gallery-body">
				<FilterPanel criteria />
				<div class="gallery-main">
					<Show
						when=move || mode.get() == ViewMode::Grid
						fallback=move || {
							view! {
								<div class="graph-frame">
									<ForceGraphCanvas data=graph variant=GraphVariant::Global height=Some(600.0) />
								</div>
							}
						}
					>
						<BatchToolbar coordinator visible selection_mode />
						<Show
							when=move || !visible.with(Vec::is_empty)
							fallback=|| view! { <p class="empty">"No artworks match these filters."</p> }
						>
							<div class="art-grid">
								<For each=move || visible.get() key=|art| art.id.clone() let:artwork>
									<ArtCard artwork selection_mode coordinator />
								</For>
							</div>
						</Show>
					</Show>
				</div>
			</div>
		</div>
	}
}
