use leptos::prelude::*;

use crate::app_state::AppState;
use crate::config::AppConfig;

/// Image of the current profile's avatar; renders nothing without one.
#[component]
pub fn Avatar() -> impl IntoView {
	let state = expect_context::<AppState>();
	let avatar_id = expect_context::<AppConfig>().avatar_id;

	move || {
		state.current_profile().map(|user| {
			view! { <img id=avatar_id.clone() class="user-avatar" src=user.avatar alt=user.name /> }
		})
	}
}
