//! Reactive registry and session handles shared with every component.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info};

use crate::config::AppConfig;
use crate::model::UserProfile;
use crate::navigation::{BrowserNavigator, Navigator, current_path};
use crate::registry::Registry;
use crate::session::{Session, SwitchOutcome};
use crate::storage::LocalStorage;

/// Page-lifetime application state, provided through Leptos context.
#[derive(Clone, Copy, Debug)]
pub struct AppState {
	/// Loaded profiles and categories.
	pub registry: RwSignal<Registry>,
	/// The active profile.
	pub session: RwSignal<Session>,
	config: StoredValue<AppConfig>,
}

impl AppState {
	/// Empty, not-yet-loaded state.
	pub fn new(config: AppConfig) -> Self {
		Self {
			registry: RwSignal::new(Registry::default()),
			session: RwSignal::new(Session::default()),
			config: StoredValue::new(config),
		}
	}

	/// Loads the registry in the background, then derives the current profile
	/// from the page location.
	pub fn load(self) {
		let config = self.config.get_value();
		spawn_local(async move {
			let registry = Registry::initialize(&config).await;
			if !registry.is_fallback_only() {
				registry.persist(&LocalStorage, &config.storage_key);
			}
			let session = Session::from_location(&registry, &current_path());
			self.registry.set(registry);
			self.session.set(session);
		});
	}

	/// Whether the background load has finished.
	pub fn is_ready(&self) -> bool {
		self.registry.with(Registry::is_ready)
	}

	/// A copy of the current profile.
	pub fn current_profile(&self) -> Option<UserProfile> {
		self.session
			.with(|session| self.registry.with(|r| session.current(r).cloned()))
	}

	/// Switches the current profile, navigating when on a profile page.
	pub fn switch_to(&self, id: &str) -> SwitchOutcome {
		self.switch_on_page(id, &current_path(), &mut BrowserNavigator)
	}

	/// Switches the current profile as if on `page`. The session signal is
	/// left untouched, and so notifies nobody, when `id` is unknown.
	pub fn switch_on_page(
		&self,
		id: &str,
		page: &str,
		navigator: &mut impl Navigator,
	) -> SwitchOutcome {
		let registry = self.registry;
		if !registry.with_untracked(|r| r.get(id).is_some()) {
			error!("cannot switch to unknown profile {id:?}");
			return SwitchOutcome::UnknownProfile;
		}
		self.session
			.try_update(|session| {
				registry.with_untracked(|r| session.switch_to(r, id, page, navigator))
			})
			.unwrap_or(SwitchOutcome::UnknownProfile)
	}

	/// Adds or replaces a profile and refreshes the local cache.
	pub fn add_or_update(&self, profile: UserProfile) {
		let key = self.config.with_value(|c| c.storage_key.clone());
		self.registry.update(|r| {
			if r.add_or_update(profile) {
				info!("registry now holds {} profiles", r.len());
			}
			r.persist(&LocalStorage, &key);
		});
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::*;
	use crate::model::Dataset;
	use crate::navigation::RecordingNavigator;

	fn loaded_state() -> AppState {
		let state = AppState::new(AppConfig::default());
		let registry = Registry::from_load(Ok(Dataset {
			users: vec![
				UserProfile::fallback(),
				UserProfile::new("yohei", "Yohei", "Lab PI", "y.png"),
				UserProfile::new("alice", "Alice", "Lab M1", "a.png"),
			],
			categories: Default::default(),
		}));
		state.session.set(Session::from_location(&registry, "/src/mypage_alice.html"));
		state.registry.set(registry);
		state
	}

	/// A memo over the session and a count of how often it recomputed.
	fn watch_session(state: AppState) -> (Memo<Option<String>>, Arc<AtomicUsize>) {
		let runs = Arc::new(AtomicUsize::new(0));
		let counter = runs.clone();
		let memo = Memo::new(move |_| {
			counter.fetch_add(1, Ordering::SeqCst);
			state.session.with(|s| s.current_id().map(str::to_owned))
		});
		(memo, runs)
	}

	#[test]
	fn unknown_profile_leaves_session_subscribers_alone() {
		let state = loaded_state();
		let (current, runs) = watch_session(state);
		assert_eq!(current.get().as_deref(), Some("alice"));

		let mut nav = RecordingNavigator::default();
		let outcome = state.switch_on_page("zed", "/src/mypage_alice.html", &mut nav);

		assert_eq!(outcome, SwitchOutcome::UnknownProfile);
		assert_eq!(current.get().as_deref(), Some("alice"));
		assert_eq!(runs.load(Ordering::SeqCst), 1);
		assert!(nav.visited.is_empty());
	}

	#[test]
	fn known_profile_updates_session_and_navigates() {
		let state = loaded_state();
		let (current, runs) = watch_session(state);
		assert_eq!(current.get().as_deref(), Some("alice"));

		let mut nav = RecordingNavigator::default();
		let outcome = state.switch_on_page("yohei", "/src/mypage_alice.html", &mut nav);

		assert_eq!(
			outcome,
			SwitchOutcome::Switched {
				redirect: Some("mypage.html".into())
			}
		);
		assert_eq!(current.get().as_deref(), Some("yohei"));
		assert_eq!(runs.load(Ordering::SeqCst), 2);
		assert_eq!(nav.visited, vec!["mypage.html"]);
	}
}
