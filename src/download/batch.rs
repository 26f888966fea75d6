//! Multi-select batch download into a single zip archive.

use chrono::NaiveDate;
use futures::StreamExt;
use futures::stream;
use log::{debug, error, info, warn};

use super::archive::ArchiveBuilder;
use super::naming::{archive_file_name, image_extension, image_file_name, metadata_file_name, metadata_text};
use super::selection::SelectionSet;
use super::{ImageFetcher, Notifier, SaveTarget, Toast};
use crate::catalog::Artwork;
use crate::config::DownloadConfig;
use crate::error::{GalleryError, Result};

const ZIP_MIME: &str = "application/zip";

/// Lifecycle of the coordinator's current job.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BatchStatus {
	#[default]
	Idle,
	Running,
	Completed,
	Failed,
}

/// Reasons a batch is refused before any network access.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
	#[error("no artworks selected")]
	NothingSelected,
	#[error("a batch download is already running")]
	AlreadyRunning,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ItemFailure {
	pub id: String,
	pub title: String,
	pub reason: String,
}

/// What happened to each item of a job, plus the packaged archive.
#[derive(Debug)]
pub struct BatchReport {
	/// Ids whose image made it into the archive, in archive order.
	pub succeeded: Vec<String>,
	pub failed: Vec<ItemFailure>,
	/// Archive entry names, in the order they were written.
	pub entries: Vec<String>,
	pub package: Result<Vec<u8>>,
}

/// A snapshot of the selected artworks, detached from the coordinator so the fetches can
/// run while the selection stays editable.
#[derive(Clone, Debug)]
pub struct BatchJob {
	targets: Vec<Artwork>,
	include_metadata: bool,
	config: DownloadConfig,
}

impl BatchJob {
	pub fn targets(&self) -> &[Artwork] {
		&self.targets
	}

	/// Fetch every target and package the archive. A failed fetch is recorded and skipped;
	/// it never aborts the remaining items. Entries keep target order whatever the
	/// configured concurrency.
	pub async fn execute<F: ImageFetcher + ?Sized>(&self, fetcher: &F) -> BatchReport {
		let mut archive = ArchiveBuilder::new();
		let mut report = BatchReport {
			succeeded: Vec::new(),
			failed: Vec::new(),
			entries: Vec::new(),
			package: Ok(Vec::new()),
		};

		let mut fetches = stream::iter(&self.targets)
			.map(|art| async move { (art, fetcher.fetch_image(&art.image_url).await) })
			.buffered(self.config.concurrency.max(1));

		while let Some((art, fetched)) = fetches.next().await {
			let image = match fetched {
				Ok(image) => image,
				Err(err) => {
					warn!("failed to download artwork {}: {err}", art.id);
					report.failed.push(ItemFailure {
						id: art.id.clone(),
						title: art.title.clone(),
						reason: err.to_string(),
					});
					continue;
				}
			};
			if let Err(err) = self.pack(&mut archive, art, &image.bytes, image.content_type.as_deref(), &mut report.entries) {
				report.package = Err(err);
				return report;
			}
			debug!("packed artwork {} ({} bytes)", art.id, image.bytes.len());
			report.succeeded.push(art.id.clone());
		}

		debug!("packaging {} archive entries", archive.len());
		report.package = archive.finish();
		report
	}

	fn pack(
		&self,
		archive: &mut ArchiveBuilder,
		art: &Artwork,
		bytes: &[u8],
		content_type: Option<&str>,
		entries: &mut Vec<String>,
	) -> Result<()> {
		let ext = image_extension(content_type, &art.image_url, &self.config.fallback_extension);
		entries.push(archive.add(&image_file_name(art, &ext), bytes, false)?);
		if self.include_metadata {
			let text = metadata_text(art);
			entries.push(archive.add(&metadata_file_name(art), text.as_bytes(), true)?);
		}
		Ok(())
	}
}

/// Owns the selection set and the status of the one batch job allowed at a time.
#[derive(Clone, Debug, Default)]
pub struct BatchCoordinator {
	selection: SelectionSet,
	status: BatchStatus,
	config: DownloadConfig,
}

impl BatchCoordinator {
	pub fn new(config: DownloadConfig) -> Self {
		Self {
			config,
			..Self::default()
		}
	}

	pub fn selection(&self) -> &SelectionSet {
		&self.selection
	}

	pub fn toggle(&mut self, id: &str) {
		self.selection.toggle(id);
	}

	pub fn select_all<I, S>(&mut self, ids: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.selection.select_all(ids);
	}

	pub fn clear(&mut self) {
		self.selection.clear();
	}

	pub fn status(&self) -> BatchStatus {
		self.status
	}

	pub fn is_downloading(&self) -> bool {
		self.status == BatchStatus::Running
	}

	/// Validate the request and snapshot the selected artworks, in the order given by
	/// `artworks` (the current view). Rejections are reported through `notifier` and
	/// leave all state untouched.
	pub fn begin<'a, N: Notifier + ?Sized>(
		&mut self,
		artworks: impl IntoIterator<Item = &'a Artwork>,
		include_metadata: bool,
		notifier: &N,
	) -> std::result::Result<BatchJob, BatchError> {
		if self.is_downloading() {
			notifier.notify(Toast::error(
				"Download in progress",
				"Please wait for the current download to finish",
			));
			return Err(BatchError::AlreadyRunning);
		}
		let targets: Vec<Artwork> = artworks
			.into_iter()
			.filter(|art| self.selection.contains(&art.id))
			.cloned()
			.collect();
		if targets.is_empty() {
			notifier.notify(Toast::error(
				"No artworks selected",
				"Please select artworks to download",
			));
			return Err(BatchError::NothingSelected);
		}

		info!("starting batch download of {} artworks", targets.len());
		self.status = BatchStatus::Running;
		Ok(BatchJob {
			targets,
			include_metadata,
			config: self.config.clone(),
		})
	}

	/// Save the archive, notify once, and settle the job. Returns the terminal status; the
	/// coordinator itself goes back to idle. The selection is cleared only when the archive
	/// was handed to `saver`.
	pub fn finish<S, N>(&mut self, report: BatchReport, today: NaiveDate, saver: &S, notifier: &N) -> BatchStatus
	where
		S: SaveTarget + ?Sized,
		N: Notifier + ?Sized,
	{
		self.status = BatchStatus::Idle;
		let BatchReport {
			succeeded,
			failed,
			entries,
			package,
		} = report;

		let bytes = match package {
			Ok(bytes) => bytes,
			Err(err) => {
				error!("batch packaging failed: {err}");
				notifier.notify(package_failed());
				return BatchStatus::Failed;
			}
		};
		if succeeded.is_empty() {
			error!("batch download failed for all {} artworks", failed.len());
			notifier.notify(Toast::error(
				"Download failed",
				format!(
					"None of the {} selected artworks could be downloaded",
					failed.len()
				),
			));
			return BatchStatus::Failed;
		}

		for failure in &failed {
			debug!("left out of the archive: {} ({}): {}", failure.title, failure.id, failure.reason);
		}

		let file_name = archive_file_name(&self.config.archive_prefix, today);
		if let Err(err) = saver.save(&file_name, ZIP_MIME, &bytes) {
			error!("saving {file_name} failed: {err}");
			notifier.notify(package_failed());
			return BatchStatus::Failed;
		}

		let done = succeeded.len();
		let description = if failed.is_empty() {
			format!("{done} artworks downloaded successfully")
		} else {
			format!(
				"{done} of {} artworks downloaded ({} failed)",
				done + failed.len(),
				failed.len()
			)
		};
		info!("batch download saved as {file_name} ({} entries): {description}", entries.len());
		notifier.notify(Toast::success("Download complete", description));
		self.selection.clear();
		BatchStatus::Completed
	}

	/// `begin`, `execute` and `finish` in one go. The gallery toolbar runs the three steps
	/// itself because it cannot hold the coordinator across the awaits.
	#[cfg(test)]
	pub async fn run_batch<'a, F, S, N>(
		&mut self,
		artworks: impl IntoIterator<Item = &'a Artwork>,
		include_metadata: bool,
		today: NaiveDate,
		fetcher: &F,
		saver: &S,
		notifier: &N,
	) -> std::result::Result<BatchStatus, BatchError>
	where
		F: ImageFetcher + ?Sized,
		S: SaveTarget + ?Sized,
		N: Notifier + ?Sized,
	{
		let job = self.begin(artworks, include_metadata, notifier)?;
		let report = job.execute(fetcher).await;
		Ok(self.finish(report, today, saver, notifier))
	}
}

fn package_failed() -> Toast {
	Toast::error(
		"Download failed",
		"There was an error creating the download package",
	)
}

impl From<BatchError> for GalleryError {
	fn from(err: BatchError) -> Self {
		GalleryError::Export(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use std::io::Cursor;

	use futures::executor::block_on;
	use zip::ZipArchive;

	use super::*;
	use crate::catalog::sample;
	use crate::download::ToastVariant;
	use crate::download::fakes::{FakeFetcher, FakeNotifier, FakeSaver};

	fn today() -> NaiveDate {
		NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
	}

	fn three() -> Vec<Artwork> {
		vec![
			sample("1", "First Light", "Ann Painter", "1901"),
			sample("2", "Second Sight", "Bo Etcher", "1902"),
			sample("3", "Third Eye", "Cy Sculptor", "1903"),
		]
	}

	/// Serves artworks 1 and 3; artwork 2 fails.
	fn fetcher() -> FakeFetcher {
		FakeFetcher::default()
			.serve("https://img.test/1.jpg", b"one", Some("image/jpeg"))
			.serve("https://img.test/3.jpg", b"three", Some("image/png"))
	}

	fn archive_names(bytes: &[u8]) -> Vec<String> {
		let zip = ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
		zip.file_names().map(str::to_owned).collect()
	}

	#[test]
	fn one_failure_does_not_abort_the_batch() {
		let arts = three();
		let (fetcher, saver, notifier) = (fetcher(), FakeSaver::default(), FakeNotifier::default());
		let mut coordinator = BatchCoordinator::new(DownloadConfig::default());
		coordinator.select_all(["1", "2", "3"]);

		let status = block_on(coordinator.run_batch(&arts, true, today(), &fetcher, &saver, &notifier)).unwrap();

		assert_eq!(status, BatchStatus::Completed);
		assert_eq!(coordinator.status(), BatchStatus::Idle);
		assert!(coordinator.selection().is_empty());
		assert_eq!(fetcher.requests.borrow().len(), 3);

		let saved = saver.saved.borrow();
		assert_eq!(saved.len(), 1);
		let (name, mime, bytes) = &saved[0];
		assert_eq!(name, "nuvva_artworks_2024-05-01.zip");
		assert_eq!(mime, "application/zip");
		let mut names = archive_names(bytes);
		names.sort();
		assert_eq!(
			names,
			[
				"First_Light_1901_Ann_Painter.jpg",
				"First_Light_info.txt",
				"Third_Eye_1903_Cy_Sculptor.png",
				"Third_Eye_info.txt",
			]
		);

		let toasts = notifier.toasts.borrow();
		assert_eq!(toasts.len(), 1);
		assert_eq!(toasts[0].title, "Download complete");
		assert_eq!(toasts[0].variant, ToastVariant::Default);
		assert_eq!(toasts[0].description, "2 of 3 artworks downloaded (1 failed)");
	}

	#[test]
	fn images_only_without_metadata() {
		let arts = three();
		let (fetcher, saver, notifier) = (fetcher(), FakeSaver::default(), FakeNotifier::default());
		let mut coordinator = BatchCoordinator::new(DownloadConfig::default());
		coordinator.select_all(["1", "2", "3"]);

		let job = coordinator.begin(&arts, false, &notifier).unwrap();
		assert!(coordinator.is_downloading());
		let report = block_on(job.execute(&fetcher));
		assert_eq!(report.succeeded, ["1", "3"]);
		assert_eq!(report.failed.len(), 1);
		assert_eq!(report.failed[0].id, "2");
		assert_eq!(
			report.entries,
			["First_Light_1901_Ann_Painter.jpg", "Third_Eye_1903_Cy_Sculptor.png"]
		);
		assert_eq!(coordinator.finish(report, today(), &saver, &notifier), BatchStatus::Completed);
	}

	#[test]
	fn empty_selection_is_rejected_without_io() {
		let arts = three();
		let (fetcher, saver, notifier) = (fetcher(), FakeSaver::default(), FakeNotifier::default());
		let mut coordinator = BatchCoordinator::new(DownloadConfig::default());

		let err = block_on(coordinator.run_batch(&arts, true, today(), &fetcher, &saver, &notifier)).unwrap_err();

		assert_eq!(err, BatchError::NothingSelected);
		assert!(fetcher.requests.borrow().is_empty());
		assert!(saver.saved.borrow().is_empty());
		assert_eq!(coordinator.status(), BatchStatus::Idle);
		let toasts = notifier.toasts.borrow();
		assert_eq!(toasts[0].title, "No artworks selected");
		assert_eq!(toasts[0].variant, ToastVariant::Destructive);
	}

	#[test]
	fn selection_outside_the_view_counts_as_nothing_selected() {
		let arts = three();
		let notifier = FakeNotifier::default();
		let mut coordinator = BatchCoordinator::new(DownloadConfig::default());
		coordinator.toggle("99");
		assert_eq!(
			coordinator.begin(&arts, false, &notifier).unwrap_err(),
			BatchError::NothingSelected
		);
		assert!(coordinator.selection().contains("99"));
	}

	#[test]
	fn total_failure_skips_the_save_and_keeps_the_selection() {
		let arts = three();
		let (fetcher, saver, notifier) = (FakeFetcher::default(), FakeSaver::default(), FakeNotifier::default());
		let mut coordinator = BatchCoordinator::new(DownloadConfig::default());
		coordinator.select_all(["1", "2"]);

		let status = block_on(coordinator.run_batch(&arts, false, today(), &fetcher, &saver, &notifier)).unwrap();

		assert_eq!(status, BatchStatus::Failed);
		assert!(saver.saved.borrow().is_empty());
		assert_eq!(coordinator.selection().len(), 2);
		let toasts = notifier.toasts.borrow();
		assert_eq!(toasts.len(), 1);
		assert_eq!(toasts[0].variant, ToastVariant::Destructive);
	}

	#[test]
	fn save_failure_is_reported_and_selection_kept() {
		let arts = three();
		let saver = FakeSaver {
			fail: true,
			..FakeSaver::default()
		};
		let (fetcher, notifier) = (fetcher(), FakeNotifier::default());
		let mut coordinator = BatchCoordinator::new(DownloadConfig::default());
		coordinator.select_all(["1"]);

		let status = block_on(coordinator.run_batch(&arts, false, today(), &fetcher, &saver, &notifier)).unwrap();
		assert_eq!(status, BatchStatus::Failed);
		assert!(coordinator.selection().contains("1"));
		assert_eq!(notifier.toasts.borrow()[0].title, "Download failed");
	}

	#[test]
	fn second_job_is_refused_while_running() {
		let arts = three();
		let notifier = FakeNotifier::default();
		let mut coordinator = BatchCoordinator::new(DownloadConfig::default());
		coordinator.select_all(["1"]);
		let _job = coordinator.begin(&arts, false, &notifier).unwrap();
		assert_eq!(
			coordinator.begin(&arts, false, &notifier).unwrap_err(),
			BatchError::AlreadyRunning
		);
	}

	#[test]
	fn archive_follows_view_order_at_any_concurrency() {
		let arts = three();
		let view: Vec<&Artwork> = vec![&arts[2], &arts[0]];
		for concurrency in [1, 3] {
			let config = DownloadConfig {
				concurrency,
				..DownloadConfig::default()
			};
			let (fetcher, notifier) = (fetcher(), FakeNotifier::default());
			let mut coordinator = BatchCoordinator::new(config);
			coordinator.select_all(["1", "3"]);
			let job = coordinator.begin(view.iter().copied(), false, &notifier).unwrap();
			let report = block_on(job.execute(&fetcher));
			assert_eq!(report.succeeded, ["3", "1"]);
			assert_eq!(*fetcher.requests.borrow(), ["https://img.test/3.jpg", "https://img.test/1.jpg"]);
		}
	}

	#[test]
	fn same_titles_do_not_collide_in_the_archive() {
		let arts = vec![
			sample("1", "Untitled", "Ann Painter", "1901"),
			sample("2", "Untitled", "Bo Etcher", "1902"),
		];
		let fetcher = FakeFetcher::default()
			.serve("https://img.test/1.jpg", b"one", None)
			.serve("https://img.test/2.jpg", b"two", None);
		let notifier = FakeNotifier::default();
		let mut coordinator = BatchCoordinator::new(DownloadConfig::default());
		coordinator.select_all(["1", "2"]);
		let report = block_on(coordinator.begin(&arts, true, &notifier).unwrap().execute(&fetcher));
		assert_eq!(
			report.entries,
			[
				"Untitled_1901_Ann_Painter.jpg",
				"Untitled_info.txt",
				"Untitled_1902_Bo_Etcher.jpg",
				"Untitled_info_2.txt",
			]
		);
		assert_eq!(archive_names(report.package.as_ref().unwrap()).len(), 4);
	}
}
