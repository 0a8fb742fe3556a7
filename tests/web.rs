//! Browser-only checks, run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use js_sys::{Function, Reflect};
use leptos::prelude::mount_to_body;
use mypage_network::App;
use mypage_network::legacy::install_window_hooks;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn global(name: &str) -> Function {
	let window = web_sys::window().unwrap();
	Reflect::get(&window, &name.into())
		.unwrap()
		.dyn_into::<Function>()
		.unwrap()
}

#[wasm_bindgen_test]
fn legacy_entry_points_are_window_globals() {
	install_window_hooks().unwrap();
	install_window_hooks().unwrap();

	// Whether or not the app is mounted, these calls change nothing.
	assert!(global("switchUser").call0(&JsValue::NULL).is_ok());
	let added = global("addOrUpdateUser")
		.call1(&JsValue::NULL, &JsValue::from_str("{}"))
		.unwrap();
	assert_eq!(added.as_bool(), Some(false));
}

#[wasm_bindgen_test]
fn page_shows_loading_state_until_profiles_arrive() {
	mount_to_body(App);

	let html = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.document_element())
		.unwrap()
		.inner_html();
	assert!(html.contains("Loading profiles"), "{html}");
	assert!(!html.contains("went wrong"), "{html}");
}
