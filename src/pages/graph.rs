use leptos::prelude::*;

use crate::catalog::catalog;
use crate::components::force_graph::ForceGraphCanvas;
use crate::layout::{GraphVariant, global_graph};

/// Full-window view of the whole catalog as a connection graph.
#[component]
pub fn GraphPage() -> impl IntoView {
	let graph = Signal::derive(|| global_graph(catalog()));
	let fullscreen = RwSignal::new(false);

	view! {
		<section class="graph-page">
			<h1>"Art Connections"</h1>
			<p class="subtitle">
				"Explore how artworks relate through shared movements, artists and themes. Hover a node to see its connections, click it to open the artwork."
			</p>
			<button class="button" on:click=move |_| fullscreen.set(true)>
				"Fullscreen"
			</button>
			<Show
				when=move || fullscreen.get()
				fallback=move || {
					view! {
						<div class="graph-frame">
							<ForceGraphCanvas data=graph variant=GraphVariant::Global height=Some(700.0) />
						</div>
					}
				}
			>
				<div class="graph-fullscreen">
					<ForceGraphCanvas data=graph variant=GraphVariant::Global fullscreen=true />
					<button class="button graph-exit" on:click=move |_| fullscreen.set(false)>
						"Exit fullscreen"
					</button>
				</div>
			</Show>
			<div class="graph-legend">
				<div class="legend-card">
					<h3>"Nodes"</h3>
					<p>"Each circle is an artwork, shown with its thumbnail once loaded."</p>
				</div>
				<div class="legend-card">
					<h3>"Connections"</h3>
					<p>"Arrows point from an artwork to the works it references."</p>
				</div>
				<div class="legend-card">
					<h3>"Navigation"</h3>
					<p>"Drag nodes to rearrange them, drag the background to pan and scroll to zoom."</p>
				</div>
			</div>
		</section>
	}
}
