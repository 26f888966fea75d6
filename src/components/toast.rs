//! Transient notifications.

use std::time::Duration;

use leptos::prelude::*;

use crate::download::{Notifier, Toast, ToastVariant};

const MAX_VISIBLE: usize = 3;
const DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Clone, Debug, PartialEq)]
pub struct ToastEntry {
	pub id: u64,
	pub toast: Toast,
}

/// Visible toasts, newest last.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastQueue {
	next_id: u64,
	entries: Vec<ToastEntry>,
}

impl ToastQueue {
	pub fn push(&mut self, toast: Toast) -> u64 {
		let id = self.next_id;
		self.next_id += 1;
		self.entries.push(ToastEntry { id, toast });
		if self.entries.len() > MAX_VISIBLE {
			self.entries.remove(0);
		}
		id
	}

	pub fn dismiss(&mut self, id: u64) {
		self.entries.retain(|entry| entry.id != id);
	}

	pub fn entries(&self) -> &[ToastEntry] {
		&self.entries
	}
}

/// Reactive handle to the page's toast queue.
#[derive(Clone, Copy, Debug)]
pub struct ToastNotifier {
	queue: RwSignal<ToastQueue>,
}

impl ToastNotifier {
	pub fn dismiss(&self, id: u64) {
		self.queue.update(|q| q.dismiss(id));
	}
}

impl Notifier for ToastNotifier {
	fn notify(&self, toast: Toast) {
		let Some(id) = self.queue.try_update(|q| q.push(toast)) else {
			return;
		};
		let queue = self.queue;
		set_timeout(
			move || {
				queue.try_update(|q| q.dismiss(id));
			},
			DISMISS_AFTER,
		);
	}
}

/// Create the queue and make it available to descendants.
pub fn provide_toaster() -> ToastNotifier {
	let notifier = ToastNotifier {
		queue: RwSignal::new(ToastQueue::default()),
	};
	provide_context(notifier);
	notifier
}

pub fn use_toaster() -> ToastNotifier {
	expect_context::<ToastNotifier>()
}

#[component]
pub fn Toaster() -> impl IntoView {
	let notifier = use_toaster();

	view! {
		<ol class="toaster" aria-live="polite">
			<For
				each=move || notifier.queue.get().entries().to_vec()
				key=|entry| entry.id
				let:entry
			>
				<li
					class="toast"
					class:toast-destructive={entry.toast.variant == ToastVariant::Destructive}
					on:click=move |_| notifier.dismiss(entry.id)
				>
					<strong class="toast-title">{entry.toast.title.clone()}</strong>
					<p class="toast-description">{entry.toast.description.clone()}</p>
				</li>
			</For>
		</ol>
	}
}
