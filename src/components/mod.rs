//! Reusable views shared by the pages.

use std::sync::{Arc, Mutex};

use leptos::prelude::*;

pub mod art_card;
pub mod batch_toolbar;
pub mod filter_panel;
pub mod force_graph;
pub mod toast;

/// Slot for something acquired after mount; `release` runs on whatever it holds when the
/// owning view is cleaned up.
pub(crate) fn cleanup_slot<T: Send + Sync + 'static>(release: impl Fn(T) + Send + Sync + 'static) -> Arc<Mutex<Option<T>>> {
	let slot = Arc::new(Mutex::new(None));
	let held = slot.clone();
	on_cleanup(move || {
		let value = held.lock().ok().and_then(|mut held| held.take());
		if let Some(value) = value {
			release(value);
		}
	});
	slot
}
