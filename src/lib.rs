//! Nuvva Gallery: a client-side public-domain art gallery.
//!
//! The browser-independent core lives in `catalog`, `layout` and `download`; the Leptos
//! views in `components` and `pages` wire it to the DOM through `web`.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

mod catalog;
mod config;
mod download;
mod error;
mod layout;
mod museum;
mod web;

// Views
mod components;
mod pages;

use crate::components::batch_toolbar::provide_batch_coordinator;
use crate::components::toast::{Toaster, provide_toaster};
use crate::config::GalleryConfig;
use crate::pages::artwork::ArtworkPage;
use crate::pages::daily::DailyPage;
use crate::pages::gallery::Gallery;
use crate::pages::graph::GraphPage;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;
use crate::pages::search::SearchPage;
use crate::pages::wallpapers::WallpaperStudio;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

#[component]
fn NavBar() -> impl IntoView {
	view! {
		<header class="navbar">
			<A href="/" attr:class="brand">"Nuvva"</A>
			<nav>
				<A href="/gallery">"Gallery"</A>
				<A href="/graph">"Connections"</A>
				<A href="/daily">"Daily Art"</A>
				<A href="/wallpaper-app">"Wallpapers"</A>
				<A href="/search">"Search"</A>
			</nav>
		</header>
	}
}

/// The app router, with configuration and toasts provided to every page.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	let config = GalleryConfig::load();
	provide_batch_coordinator(config.download.clone());
	provide_context(config);
	provide_toaster();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="Nuvva Gallery" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<NavBar />
			<main>
				<Routes fallback=|| view! { <NotFound /> }>
					<Route path=path!("/") view=Home />
					<Route path=path!("/gallery") view=Gallery />
					<Route path=path!("/artwork/:id") view=ArtworkPage />
					<Route path=path!("/graph") view=GraphPage />
					<Route path=path!("/daily") view=DailyPage />
					<Route
						path=path!("/wallpaper-app")
						view=|| view! { <WallpaperStudio title="Wallpaper App" batch_size=5 /> }
					/>
					<Route
						path=path!("/wallpaper-desktop")
						view=|| view! { <WallpaperStudio title="Wallpaper Desktop" batch_size=10 /> }
					/>
					<Route path=path!("/search") view=SearchPage />
				</Routes>
			</main>
		</Router>
		<Toaster />
	}
}
