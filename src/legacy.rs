//! JavaScript entry points for pages that call into the app directly.
//!
//! Legacy pages call `switchUser()` and `addOrUpdateUser(json)` as globals,
//! so both are installed on `window` in addition to the wasm-bindgen module
//! exports.

use std::cell::{Cell, RefCell};

use log::{error, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlSelectElement;

use crate::app_state::AppState;
use crate::model::UserProfile;

const SWITCH_USER: &str = "switchUser";
const ADD_OR_UPDATE_USER: &str = "addOrUpdateUser";

thread_local! {
	static ACTIVE: RefCell<Option<(AppState, String)>> = const { RefCell::new(None) };
	static INSTALLED: Cell<bool> = const { Cell::new(false) };
}

/// Routes the JavaScript entry points to `state` and installs them on
/// `window`. `selector_id` names the `<select>` read by `switchUser()`.
pub fn register(state: AppState, selector_id: String) {
	ACTIVE.with(|active| *active.borrow_mut() = Some((state, selector_id)));
	if let Err(err) = install_window_hooks() {
		error!("could not install legacy entry points: {err:?}");
	}
}

/// Defines `window.switchUser` and `window.addOrUpdateUser`. Installing twice
/// is a no-op.
pub fn install_window_hooks() -> Result<(), JsValue> {
	if INSTALLED.with(Cell::get) {
		return Ok(());
	}
	let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

	let switch = Closure::<dyn Fn()>::new(switch_user);
	js_sys::Reflect::set(&window, &SWITCH_USER.into(), switch.as_ref())?;
	switch.forget();

	let upsert = Closure::<dyn Fn(String) -> bool>::new(|json: String| add_or_update_user(&json));
	js_sys::Reflect::set(&window, &ADD_OR_UPDATE_USER.into(), upsert.as_ref())?;
	upsert.forget();

	INSTALLED.with(|installed| installed.set(true));
	Ok(())
}

fn active() -> Option<(AppState, String)> {
	ACTIVE.with(|active| active.borrow().clone())
}

fn selected_value(selector_id: &str) -> Option<String> {
	let select: HtmlSelectElement = web_sys::window()?
		.document()?
		.get_element_by_id(selector_id)?
		.dyn_into()
		.ok()?;
	Some(select.value())
}

/// `window.switchUser()`: switches to the profile chosen in the selector.
#[wasm_bindgen(js_name = switchUser)]
pub fn switch_user() {
	let Some((state, selector_id)) = active() else {
		warn!("switchUser called before the app was mounted");
		return;
	};
	match selected_value(&selector_id) {
		Some(id) => {
			state.switch_to(&id);
		}
		None => warn!("switchUser: no #{selector_id} select element"),
	}
}

/// `window.addOrUpdateUser(json)`: inserts or replaces a profile given as
/// JSON. Returns `false` when the JSON is not a valid profile.
#[wasm_bindgen(js_name = addOrUpdateUser)]
pub fn add_or_update_user(json: &str) -> bool {
	let Some((state, _)) = active() else {
		warn!("addOrUpdateUser called before the app was mounted");
		return false;
	};
	match serde_json::from_str::<UserProfile>(json) {
		Ok(profile) if profile.id.trim().is_empty() => {
			error!("addOrUpdateUser: profile id is empty");
			false
		}
		Ok(profile) => {
			state.add_or_update(profile);
			true
		}
		Err(err) => {
			error!("addOrUpdateUser: rejected profile: {err}");
			false
		}
	}
}
