use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::info;

use super::toast::use_toaster;
use crate::catalog::Artwork;
use crate::config::DownloadConfig;
use crate::download::{BatchCoordinator, BatchStatus};
use crate::web::{BrowserSaver, HttpClient};

/// Create the app-wide coordinator. It outlives the gallery view, so a job started there
/// still saves and notifies after the user navigates away.
pub fn provide_batch_coordinator(config: DownloadConfig) -> RwSignal<BatchCoordinator> {
	let coordinator = RwSignal::new(BatchCoordinator::new(config));
	provide_context(coordinator);
	coordinator
}

pub fn use_batch_coordinator() -> RwSignal<BatchCoordinator> {
	expect_context::<RwSignal<BatchCoordinator>>()
}

/// Selection controls and the "download as zip" action for the gallery grid.
#[component]
pub fn BatchToolbar(
	coordinator: RwSignal<BatchCoordinator>,
	/// The artworks currently shown; the batch follows this order.
	#[prop(into)]
	visible: Signal<Vec<&'static Artwork>>,
	selection_mode: RwSignal<bool>,
) -> impl IntoView {
	let notifier = use_toaster();
	let include_metadata = RwSignal::new(true);
	let count = move || coordinator.with(|c| c.selection().len());
	let downloading = move || coordinator.with(|c| c.is_downloading());

	let select_all = move |_| {
		let ids: Vec<String> = visible.with(|v| v.iter().map(|a| a.id.clone()).collect());
		coordinator.update(|c| c.select_all(ids));
	};
	let clear = move |_| coordinator.update(|c| c.clear());
	let exit = move |_| {
		coordinator.update(|c| c.clear());
		selection_mode.set(false);
	};

	let download = move |_| {
		let view = visible.get_untracked();
		let include = include_metadata.get_untracked();
		let Some(Ok(job)) = coordinator.try_update(|c| c.begin(view.iter().copied(), include, &notifier)) else {
			return;
		};
		info!("fetching {} artworks for the archive", job.targets().len());
		spawn_local(async move {
			let report = job.execute(&HttpClient::new()).await;
			let today = Utc::now().date_naive();
			let status = coordinator
				.try_update(|c| c.finish(report, today, &BrowserSaver, &notifier))
				.unwrap_or(BatchStatus::Failed);
			info!("batch download finished: {status:?}");
			if status == BatchStatus::Completed {
				selection_mode.set(false);
			}
		});
	};

	view! {
		<div class="batch-toolbar">
			<Show
				when=move || selection_mode.get()
				fallback=move || {
					view! {
						<button class="button" on:click=move |_| selection_mode.set(true)>
							"Select artworks"
						</button>
					}
				}
			>
				<span class="batch-count">{move || format!("{} selected", count())}</span>
				<button class="button" on:click=select_all disabled=downloading>
					"Select all"
				</button>
				<button class="button" on:click=clear disabled=move || downloading() || coordinator.with(|c| c.selection().is_empty())>
					"Clear"
				</button>
				<label class="batch-metadata">
					<input
						type="checkbox"
						prop:checked=move || include_metadata.get()
						on:change=move |ev| include_metadata.set(event_target_checked(&ev))
					/>
					"Include info files"
				</label>
				<button
					class="button button-primary"
					on:click=download
					disabled=move || downloading() || coordinator.with(|c| c.selection().is_empty())
				>
					{move || if downloading() { "Downloading..." } else { "Download zip" }}
				</button>
				<button class="button button-ghost" on:click=exit disabled=downloading>
					"Done"
				</button>
			</Show>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDate;
	use futures::executor::block_on;

	use super::*;
	use crate::catalog::sample;
	use crate::download::fakes::{FakeFetcher, FakeNotifier, FakeSaver};

	#[test]
	fn job_survives_the_view_that_started_it() {
		let app = Owner::new();
		app.set();
		let coordinator = provide_batch_coordinator(DownloadConfig::default());
		let arts = vec![sample("1", "Nocturne", "Ann Painter", "1900")];
		let (fetcher, saver, notifier) = (
			FakeFetcher::default().serve("https://img.test/1.jpg", b"one", None),
			FakeSaver::default(),
			FakeNotifier::default(),
		);

		let gallery = app.child();
		let job = gallery
			.with(|| {
				let coordinator = use_batch_coordinator();
				coordinator.update(|c| c.select_all(["1"]));
				coordinator.try_update(|c| c.begin(&arts, false, &notifier))
			})
			.unwrap()
			.unwrap();
		gallery.cleanup();

		let report = block_on(job.execute(&fetcher));
		let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
		let status = coordinator.try_update(|c| c.finish(report, today, &saver, &notifier));

		assert_eq!(status, Some(BatchStatus::Completed));
		assert_eq!(saver.saved.borrow().len(), 1);
		assert_eq!(notifier.toasts.borrow()[0].title, "Download complete");
		assert!(coordinator.with_untracked(|c| c.selection().is_empty()));
	}
}
