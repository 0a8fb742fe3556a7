//! Loads the profile dataset with the browser `fetch` API.

use log::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::error::LoadError;
use crate::model::Dataset;

/// Fetches `url` and parses the body as a [`Dataset`].
///
/// Never times out: a request the browser leaves pending keeps the future
/// pending.
pub async fn fetch_dataset(url: &str) -> Result<Dataset, LoadError> {
	let window = web_sys::window().ok_or(LoadError::Unavailable)?;
	let response = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(js_error)?;
	let response: Response = response.dyn_into().map_err(js_error)?;
	if !response.ok() {
		return Err(LoadError::Status(response.status()));
	}

	let body = response.text().map_err(js_error)?;
	let text = JsFuture::from(body)
		.await
		.map_err(js_error)?
		.as_string()
		.ok_or_else(|| LoadError::Request("response body is not text".into()))?;
	debug!("fetched {} bytes from {url}", text.len());
	Dataset::from_json(&text)
}

fn js_error(value: wasm_bindgen::JsValue) -> LoadError {
	LoadError::Request(format!("{value:?}"))
}
