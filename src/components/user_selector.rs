use leptos::prelude::*;
use web_sys::Event;

use crate::app_state::AppState;
use crate::config::{AppConfig, FALLBACK_PROFILE_ID};
use crate::registry::Registry;

/// One `<option>` of the profile selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorOption {
	/// Profile id.
	pub value: String,
	/// Visible text.
	pub label: String,
}

/// Options for the profile selector: a fallback entry first, then every other
/// profile in registry order, labelled `name (last word of position)`.
pub fn selector_options(registry: &Registry) -> Vec<SelectorOption> {
	let fallback = registry
		.get(FALLBACK_PROFILE_ID)
		.map_or_else(|| "Guest".to_owned(), |u| u.name.clone());
	let mut options = vec![SelectorOption {
		value: FALLBACK_PROFILE_ID.to_owned(),
		label: fallback,
	}];
	options.extend(
		registry
			.list_all()
			.iter()
			.filter(|u| !u.is_fallback())
			.map(|u| SelectorOption {
				value: u.id.clone(),
				label: format!("{} ({})", u.name, u.position_short()),
			}),
	);
	options
}

/// Profile dropdown bound to the current session.
#[component]
pub fn UserSelector() -> impl IntoView {
	let state = expect_context::<AppState>();
	let config = expect_context::<AppConfig>();
	let options = Memo::new(move |_| state.registry.with(selector_options));
	let selected = Memo::new(move |_| {
		state
			.session
			.with(|s| s.current_id().unwrap_or(FALLBACK_PROFILE_ID).to_owned())
	});

	let on_change = move |ev: Event| {
		let id = event_target_value(&ev);
		state.switch_to(&id);
	};

	view! {
		<select id=config.selector_id class="user-select" prop:value=move || selected.get() on:change=on_change>
			{move || {
				let current = selected.get();
				options
					.get()
					.into_iter()
					.map(|opt| {
						let is_selected = opt.value == current;
						view! {
							<option value=opt.value selected=is_selected>
								{opt.label}
							</option>
						}
					})
					.collect_view()
			}}
		</select>
	}
}
