//! Browser implementations of the download and museum collaborators.

use std::time::Duration;

use async_trait::async_trait;
use futures::channel::oneshot;
use leptos::prelude::set_timeout;
use log::debug;
use serde_json::Value;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::download::{FetchedImage, ImageFetcher, SaveTarget};
use crate::error::{GalleryError, Result};
use crate::museum::JsonSource;

/// `fetch`-backed HTTP client. Non-2xx responses are errors.
#[derive(Clone, Debug, Default)]
pub struct HttpClient {
	client: reqwest::Client,
}

impl HttpClient {
	pub fn new() -> Self {
		Self::default()
	}

	async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<reqwest::Response> {
		let response = self
			.client
			.get(url)
			.query(query)
			.send()
			.await
			.map_err(|err| fetch_error(url, err))?;
		let status = response.status();
		if !status.is_success() {
			return Err(GalleryError::HttpStatus {
				url: url.into(),
				status: status.as_u16(),
			});
		}
		Ok(response)
	}
}

fn fetch_error(url: &str, err: reqwest::Error) -> GalleryError {
	GalleryError::Fetch {
		url: url.into(),
		message: err.to_string(),
	}
}

#[async_trait(?Send)]
impl ImageFetcher for HttpClient {
	async fn fetch_image(&self, url: &str) -> Result<FetchedImage> {
		let response = self.get(url, &[]).await?;
		let content_type = response
			.headers()
			.get(reqwest::header::CONTENT_TYPE)
			.and_then(|v| v.to_str().ok())
			.map(str::to_owned);
		let bytes = response.bytes().await.map_err(|err| fetch_error(url, err))?;
		debug!("fetched {url} ({} bytes)", bytes.len());
		Ok(FetchedImage {
			bytes: bytes.to_vec(),
			content_type,
		})
	}
}

#[async_trait(?Send)]
impl JsonSource for HttpClient {
	async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
		self.get(url, query)
			.await?
			.json()
			.await
			.map_err(|err| fetch_error(url, err))
	}
}

const REVOKE_DELAY_MS: i32 = 40_000;

/// Triggers a browser download through a temporary object URL.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserSaver;

fn js_error(context: &str, err: JsValue) -> GalleryError {
	GalleryError::Export(format!("{context}: {err:?}"))
}

impl SaveTarget for BrowserSaver {
	fn save(&self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<()> {
		let window = web_sys::window().ok_or_else(|| GalleryError::Export("no window available".into()))?;
		let document = window
			.document()
			.ok_or_else(|| GalleryError::Export("no document available".into()))?;
		let body = document
			.body()
			.ok_or_else(|| GalleryError::Export("document has no body".into()))?;

		let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
		let options = BlobPropertyBag::new();
		options.set_type(mime);
		let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
			.map_err(|err| js_error("creating blob", err))?;
		let href = Url::create_object_url_with_blob(&blob).map_err(|err| js_error("creating object URL", err))?;

		let anchor: HtmlAnchorElement = document
			.create_element("a")
			.map_err(|err| js_error("creating anchor", err))?
			.unchecked_into();
		anchor.set_href(&href);
		anchor.set_download(file_name);
		let appended = body.append_child(&anchor);
		if appended.is_ok() {
			anchor.click();
			anchor.remove();
		}
		// Revoking right after the click can cancel the download in some browsers.
		let revoke = Closure::once_into_js(move || {
			let _ = Url::revoke_object_url(&href);
		});
		let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(revoke.unchecked_ref(), REVOKE_DELAY_MS);
		appended.map_err(|err| js_error("attaching anchor", err))?;
		debug!("saved {file_name} ({} bytes, {mime})", bytes.len());
		Ok(())
	}
}

/// Resolve after `duration` on the browser's timer queue.
pub async fn sleep(duration: Duration) {
	let (done, wait) = oneshot::channel();
	set_timeout(
		move || {
			let _ = done.send(());
		},
		duration,
	);
	let _ = wait.await;
}
