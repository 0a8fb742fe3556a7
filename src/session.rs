//! Which profile is active, and how switching between profiles navigates.
//!
//! Each profile has its own page: `mypage.html` belongs to the primary
//! profile, `mypage_{id}.html` to every other one, and `my_library.html` to
//! the fallback profile. [`resolve_profile_id`] maps a page path to an id and
//! [`redirect_target`] maps an id back to a page.

use log::{error, info};

use crate::config::{FALLBACK_PROFILE_ID, PRIMARY_PROFILE_ID};
use crate::model::UserProfile;
use crate::navigation::Navigator;
use crate::registry::Registry;

const PRIMARY_PAGE: &str = "mypage.html";
const PROFILE_PAGE_PREFIX: &str = "mypage_";
const PAGE_SUFFIX: &str = ".html";
const LIBRARY_PAGE: &str = "my_library.html";

/// Last path segment with any query string or fragment removed.
pub fn page_name(path: &str) -> &str {
	let path = path.split(['?', '#']).next().unwrap_or("");
	path.rsplit('/').next().unwrap_or("")
}

/// Profile id encoded in a page path.
pub fn resolve_profile_id(path: &str) -> &str {
	let page = page_name(path);
	if page == PRIMARY_PAGE {
		return PRIMARY_PROFILE_ID;
	}
	match page.strip_prefix(PROFILE_PAGE_PREFIX) {
		Some(rest) => {
			let id = rest.strip_suffix(PAGE_SUFFIX).unwrap_or(rest);
			if id.is_empty() { FALLBACK_PROFILE_ID } else { id }
		}
		None => FALLBACK_PROFILE_ID,
	}
}

/// Page to load after switching to `target_id` while on `current_page`.
///
/// Only profile pages redirect; elsewhere a switch stays in memory.
pub fn redirect_target(current_page: &str, target_id: &str) -> Option<String> {
	if !page_name(current_page).starts_with("mypage") {
		return None;
	}
	Some(match target_id {
		PRIMARY_PROFILE_ID => PRIMARY_PAGE.to_owned(),
		FALLBACK_PROFILE_ID => LIBRARY_PAGE.to_owned(),
		id => format!("{PROFILE_PAGE_PREFIX}{id}{PAGE_SUFFIX}"),
	})
}

/// Result of [`Session::switch_to`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SwitchOutcome {
	/// The current profile changed.
	Switched {
		/// The page navigated to, if any.
		redirect: Option<String>,
	},
	/// No profile has the requested id; nothing changed.
	UnknownProfile,
}

/// The active profile, held as an id into a [`Registry`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
	current: Option<String>,
}

impl Session {
	/// A session with an explicitly chosen active profile.
	pub fn new(active: Option<String>) -> Self {
		Self { current: active }
	}

	/// Derives the active profile from a page path, falling back to the first
	/// profile when the encoded id is unknown.
	pub fn from_location(registry: &Registry, path: &str) -> Self {
		let id = resolve_profile_id(path);
		let current = registry.lookup_by_id(id).map(|u| u.id.clone());
		info!("page {} resolved to profile {current:?}", page_name(path));
		Self { current }
	}

	/// Id of the active profile, if any.
	pub fn current_id(&self) -> Option<&str> {
		self.current.as_deref()
	}

	/// The active profile. `None` when unset or no longer in `registry`.
	pub fn current<'a>(&self, registry: &'a Registry) -> Option<&'a UserProfile> {
		self.current.as_deref().and_then(|id| registry.get(id))
	}

	/// Makes `id` the active profile and navigates to its page when on a
	/// profile page.
	pub fn switch_to(
		&mut self,
		registry: &Registry,
		id: &str,
		page: &str,
		navigator: &mut impl Navigator,
	) -> SwitchOutcome {
		let Some(profile) = registry.get(id) else {
			error!("cannot switch to unknown profile {id:?}");
			return SwitchOutcome::UnknownProfile;
		};
		self.current = Some(profile.id.clone());
		info!("switched to profile {}", profile.id);

		let redirect = redirect_target(page, id);
		if let Some(target) = &redirect {
			navigator.navigate(target);
		}
		SwitchOutcome::Switched { redirect }
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use super::*;
	use crate::model::Dataset;
	use crate::navigation::RecordingNavigator;

	fn registry() -> Registry {
		Registry::from_load(Ok(Dataset {
			users: vec![
				UserProfile::fallback(),
				UserProfile::new("yohei", "Yohei", "Lab PI", "y.png"),
				UserProfile::new("alice", "Alice", "Lab M1", "a.png")
					.with_connections(["yohei"]),
			],
			categories: BTreeMap::new(),
		}))
	}

	#[test]
	fn resolves_ids_from_page_paths() {
		assert_eq!(resolve_profile_id("/src/mypage.html"), "yohei");
		assert_eq!(resolve_profile_id("/src/mypage_alice.html"), "alice");
		assert_eq!(resolve_profile_id("mypage_alice.html?tab=books#top"), "alice");
		assert_eq!(resolve_profile_id("/src/other.html"), "default");
		assert_eq!(resolve_profile_id("/src/mypage_.html"), "default");
		assert_eq!(resolve_profile_id("/"), "default");
		assert_eq!(resolve_profile_id(""), "default");
	}

	#[test]
	fn redirect_only_from_profile_pages() {
		assert_eq!(redirect_target("/x/mypage.html", "yohei").as_deref(), Some("mypage.html"));
		assert_eq!(
			redirect_target("mypage_alice.html", "default").as_deref(),
			Some("my_library.html")
		);
		assert_eq!(
			redirect_target("/x/mypage.html", "alice").as_deref(),
			Some("mypage_alice.html")
		);
		assert_eq!(redirect_target("/x/my_library.html", "alice"), None);
		assert_eq!(redirect_target("/index.html", "yohei"), None);
	}

	#[test]
	fn location_selects_matching_profile() {
		let registry = registry();
		let session = Session::from_location(&registry, "/src/mypage_alice.html");
		let current = session.current(&registry).unwrap();
		assert_eq!(current.id, "alice");
		assert_eq!(current.name, "Alice");
	}

	#[test]
	fn unknown_location_falls_back_to_first_profile() {
		let registry = registry();
		let session = Session::from_location(&registry, "/src/mypage_zed.html");
		assert_eq!(session.current_id(), Some("default"));
	}

	#[test]
	fn switch_to_unknown_profile_changes_nothing() {
		let registry = registry();
		let mut session = Session::from_location(&registry, "/src/mypage_alice.html");
		let mut nav = RecordingNavigator::default();
		let outcome = session.switch_to(&registry, "zed", "/src/mypage_alice.html", &mut nav);
		assert_eq!(outcome, SwitchOutcome::UnknownProfile);
		assert_eq!(session.current_id(), Some("alice"));
		assert!(nav.visited.is_empty());
	}

	#[test]
	fn switch_on_profile_page_navigates() {
		let registry = registry();
		let mut session = Session::from_location(&registry, "/src/mypage_alice.html");
		let mut nav = RecordingNavigator::default();
		let outcome = session.switch_to(&registry, "yohei", "/src/mypage_alice.html", &mut nav);
		assert_eq!(
			outcome,
			SwitchOutcome::Switched {
				redirect: Some("mypage.html".into())
			}
		);
		assert_eq!(session.current_id(), Some("yohei"));
		assert_eq!(nav.visited, vec!["mypage.html"]);
	}

	#[test]
	fn switch_elsewhere_stays_in_memory() {
		let registry = registry();
		let mut session = Session::new(None);
		let mut nav = RecordingNavigator::default();
		let outcome = session.switch_to(&registry, "alice", "/src/dashboard.html", &mut nav);
		assert_eq!(outcome, SwitchOutcome::Switched { redirect: None });
		assert_eq!(session.current(&registry).map(|u| u.avatar.as_str()), Some("a.png"));
		assert!(nav.visited.is_empty());
	}
}
