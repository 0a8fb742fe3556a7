//! Application configuration shared through Leptos context.

/// Identifier of the synthesized profile used when nothing else resolves.
pub const FALLBACK_PROFILE_ID: &str = "default";

/// Identifier of the profile served by the bare `mypage.html` page.
pub const PRIMARY_PROFILE_ID: &str = "yohei";

/// Color assigned to categories missing from the lookup table.
pub const UNKNOWN_CATEGORY_COLOR: &str = "#999999";

/// Runtime settings for data loading, caching and DOM hooks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
	/// Relative URL of the `{users, categories}` document.
	pub data_url: String,
	/// `localStorage` key holding the write-through snapshot.
	pub storage_key: String,
	/// DOM id of the profile selector, read by the legacy `switchUser()` hook.
	pub selector_id: String,
	/// DOM id of the avatar image.
	pub avatar_id: String,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			data_url: "data/users.json".into(),
			storage_key: "mypage.users".into(),
			selector_id: "userSelect".into(),
			avatar_id: "userAvatar".into(),
		}
	}
}
