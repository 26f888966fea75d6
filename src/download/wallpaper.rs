//! Wallpaper picks from a filtered view and sequential wallpaper batches.

use std::future::Future;

use log::{debug, info, warn};

use super::single::download_wallpaper;
use super::{ImageFetcher, Notifier, SaveTarget, Toast};
use crate::catalog::Artwork;

/// Device presets for the wallpaper studio: `(label, resolution)`.
pub const DEVICE_RESOLUTIONS: [(&str, &str); 6] = [
	("Full HD", "1920x1080"),
	("2K", "2560x1440"),
	("4K", "3840x2160"),
	("HD", "1366x768"),
	("Laptop", "1440x900"),
	("Mobile", "1080x1920"),
];

/// The artworks wallpapers are drawn from: the filtered view, or the whole catalog when
/// the filters match nothing.
pub fn wallpaper_pool<'a>(filtered: Vec<&'a Artwork>, catalog: &'a [Artwork]) -> Vec<&'a Artwork> {
	if filtered.is_empty() {
		catalog.iter().collect()
	} else {
		filtered
	}
}

/// Pick from `pool` with `roll` in `[0, 1)`. Out-of-range rolls are clamped.
pub fn random_wallpaper<'a>(pool: &[&'a Artwork], roll: f64) -> Option<&'a Artwork> {
	let last = pool.len().checked_sub(1)?;
	let index = (roll.clamp(0.0, 1.0) * pool.len() as f64) as usize;
	pool.get(index.min(last)).copied()
}

/// Save the first `count` artworks of `pool` one after another, awaiting `pause` between
/// items. A failed item is reported and skipped. Returns how many were saved.
#[allow(clippy::too_many_arguments)]
pub async fn download_wallpaper_batch<F, S, N, P, W>(
	fetcher: &F,
	saver: &S,
	notifier: &N,
	pool: &[&Artwork],
	count: usize,
	resolution: &str,
	fallback_ext: &str,
	mut pause: P,
) -> usize
where
	F: ImageFetcher + ?Sized,
	S: SaveTarget + ?Sized,
	N: Notifier + ?Sized,
	P: FnMut() -> W,
	W: Future<Output = ()>,
{
	let picked = &pool[..count.min(pool.len())];
	if picked.is_empty() {
		warn!("wallpaper batch requested with nothing to download");
		notifier.notify(Toast::error(
			"No artworks to download",
			"Please adjust your filters to see available artworks",
		));
		return 0;
	}

	notifier.notify(Toast::success(
		"Batch download started",
		format!("Downloading {} wallpapers...", picked.len()),
	));
	let mut saved = 0;
	for (i, art) in picked.iter().enumerate() {
		if i > 0 {
			pause().await;
		}
		debug!("wallpaper {} of {}: {}", i + 1, picked.len(), art.id);
		if download_wallpaper(fetcher, saver, notifier, art, resolution, fallback_ext).await {
			saved += 1;
		}
	}
	info!("wallpaper batch at {resolution}: {saved} of {} saved", picked.len());
	saved
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use futures::executor::block_on;

	use super::*;
	use crate::catalog::sample;
	use crate::download::ToastVariant;
	use crate::download::fakes::{FakeFetcher, FakeNotifier, FakeSaver};

	fn artworks() -> Vec<Artwork> {
		vec![
			sample("1", "Dawn", "Ann Painter", "1901"),
			sample("2", "Noon", "Ann Painter", "1902"),
			sample("3", "Dusk", "Bo Sketcher", "1903"),
		]
	}

	#[test]
	fn empty_filter_falls_back_to_the_catalog() {
		let all = artworks();
		assert_eq!(wallpaper_pool(Vec::new(), &all).len(), 3);

		let pool = wallpaper_pool(vec![&all[2]], &all);
		assert_eq!(pool.len(), 1);
		assert_eq!(pool[0].id, "3");
	}

	#[test]
	fn random_pick_covers_the_whole_pool() {
		let all = artworks();
		let pool: Vec<&Artwork> = all.iter().collect();
		assert_eq!(random_wallpaper(&pool, 0.0).unwrap().id, "1");
		assert_eq!(random_wallpaper(&pool, 0.5).unwrap().id, "2");
		assert_eq!(random_wallpaper(&pool, 0.999).unwrap().id, "3");
		assert_eq!(random_wallpaper(&pool, 1.0).unwrap().id, "3");
		assert_eq!(random_wallpaper(&pool, -2.0).unwrap().id, "1");
		assert!(random_wallpaper(&[], 0.3).is_none());
	}

	#[test]
	fn batch_takes_the_first_items_in_order_and_pauses_between_them() {
		let all = artworks();
		let pool: Vec<&Artwork> = all.iter().collect();
		let fetcher = FakeFetcher::default()
			.serve("https://img.test/1.jpg", b"1", None)
			.serve("https://img.test/2.jpg", b"2", None)
			.serve("https://img.test/3.jpg", b"3", None);
		let (saver, notifier) = (FakeSaver::default(), FakeNotifier::default());
		let pauses = Cell::new(0);

		let saved = block_on(download_wallpaper_batch(
			&fetcher,
			&saver,
			&notifier,
			&pool,
			2,
			"2560x1440",
			"jpg",
			|| {
				pauses.set(pauses.get() + 1);
				async {}
			},
		));

		assert_eq!(saved, 2);
		assert_eq!(pauses.get(), 1);
		assert_eq!(*fetcher.requests.borrow(), ["https://img.test/1.jpg", "https://img.test/2.jpg"]);
		let names: Vec<_> = saver.saved.borrow().iter().map(|(name, ..)| name.clone()).collect();
		assert_eq!(names, ["Dawn_wallpaper_2560x1440.jpg", "Noon_wallpaper_2560x1440.jpg"]);
		let toasts = notifier.toasts.borrow();
		assert_eq!(toasts[0].title, "Batch download started");
		assert_eq!(toasts[0].description, "Downloading 2 wallpapers...");
		assert_eq!(toasts.len(), 3);
	}

	#[test]
	fn failed_item_does_not_stop_the_batch() {
		let all = artworks();
		let pool: Vec<&Artwork> = all.iter().collect();
		let fetcher = FakeFetcher::default()
			.serve("https://img.test/1.jpg", b"1", None)
			.serve("https://img.test/3.jpg", b"3", None);
		let (saver, notifier) = (FakeSaver::default(), FakeNotifier::default());

		let saved = block_on(download_wallpaper_batch(
			&fetcher,
			&saver,
			&notifier,
			&pool,
			10,
			"1920x1080",
			"jpg",
			|| async {},
		));

		assert_eq!(saved, 2);
		assert_eq!(fetcher.requests.borrow().len(), 3);
		let destructive = notifier
			.toasts
			.borrow()
			.iter()
			.filter(|t| t.variant == ToastVariant::Destructive)
			.count();
		assert_eq!(destructive, 1);
	}

	#[test]
	fn empty_batch_warns_and_fetches_nothing() {
		let (fetcher, saver, notifier) = (FakeFetcher::default(), FakeSaver::default(), FakeNotifier::default());

		let saved = block_on(download_wallpaper_batch(
			&fetcher,
			&saver,
			&notifier,
			&[],
			10,
			"1920x1080",
			"jpg",
			|| async {},
		));

		assert_eq!(saved, 0);
		assert!(fetcher.requests.borrow().is_empty());
		let toasts = notifier.toasts.borrow();
		assert_eq!(toasts.len(), 1);
		assert_eq!(toasts[0].title, "No artworks to download");
		assert_eq!(toasts[0].variant, ToastVariant::Destructive);
	}
}
