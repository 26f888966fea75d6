use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<section class="not-found">
			<h1>"404"</h1>
			<p>"This page isn't part of the collection."</p>
			<A href="/">"Back to the gallery entrance"</A>
		</section>
	}
}
