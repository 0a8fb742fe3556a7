//! Leptos client-side app for browsing researcher profiles and their network.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

pub mod app_state;
pub mod config;
pub mod error;
pub mod fetch;
pub mod graph;
pub mod legacy;
pub mod model;
pub mod navigation;
pub mod registry;
pub mod session;
pub mod storage;

// Modules
mod components;
mod pages;

use crate::app_state::AppState;
use crate::config::AppConfig;
use crate::pages::my_page::MyPage;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Root component: loads the profile registry and routes every page, at any
/// depth, to the profile view.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	let config = AppConfig::default();
	let state = AppState::new(config.clone());
	legacy::register(state, config.selector_id.clone());
	provide_context(config);
	provide_context(state);
	state.load();

	view! {
		<Html attr:lang="ja" attr:dir="ltr" attr:data-theme="light" />

		<Title text="My Page" />

		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			// Profile pages live at any depth, e.g. `/src/mypage_alice.html`.
			<Routes fallback=|| view! { <MyPage /> }>
				<Route path=path!("/*page") view=MyPage />
			</Routes>
		</Router>
	}
}

#[cfg(test)]
mod tests {
	use leptos_router::PossibleRouteMatch;
	use leptos_router::path;

	fn matches_whole(route: impl PossibleRouteMatch, page: &str) -> bool {
		route.test(page).is_some_and(|m| m.remaining().is_empty())
	}

	#[test]
	fn profile_route_matches_pages_at_any_depth() {
		for page in [
			"/mypage.html",
			"/src/mypage.html",
			"/src/mypage_alice.html",
			"/app/src/my_library.html",
		] {
			assert!(matches_whole(path!("/*page"), page), "{page}");
		}
	}
}
