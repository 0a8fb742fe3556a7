//! The in-memory profile registry.

use std::collections::BTreeMap;

use log::{debug, info, warn};
use serde::Serialize;

use crate::config::{AppConfig, UNKNOWN_CATEGORY_COLOR};
use crate::error::{LoadError, PersistError};
use crate::fetch::fetch_dataset;
use crate::model::{CategoryInfo, Dataset, UserProfile};
use crate::storage::KeyValueStore;

/// Ordered profile collection plus the category lookup table.
///
/// Profile ids are unique; re-adding an id replaces the entry in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Registry {
	users: Vec<UserProfile>,
	categories: BTreeMap<String, CategoryInfo>,
	ready: bool,
}

#[derive(Serialize)]
struct Snapshot<'a> {
	users: &'a [UserProfile],
	categories: &'a BTreeMap<String, CategoryInfo>,
}

impl Registry {
	/// Fetches the dataset named by `config` and builds a ready registry.
	///
	/// Always settles ready: any failure yields the single fallback profile.
	pub async fn initialize(config: &AppConfig) -> Self {
		Self::from_load(fetch_dataset(&config.data_url).await)
	}

	/// Builds a ready registry from the outcome of a dataset load.
	pub fn from_load(result: Result<Dataset, LoadError>) -> Self {
		match result {
			Ok(dataset) => {
				let registry = Self::from_dataset(dataset);
				info!(
					"loaded {} profiles and {} categories",
					registry.users.len(),
					registry.categories.len()
				);
				registry
			}
			Err(err) => {
				warn!("profile data unavailable, using fallback profile: {err}");
				Self::fallback()
			}
		}
	}

	/// A ready registry holding only the fallback profile.
	pub fn fallback() -> Self {
		Self {
			users: vec![UserProfile::fallback()],
			categories: BTreeMap::new(),
			ready: true,
		}
	}

	fn from_dataset(dataset: Dataset) -> Self {
		let mut registry = Self {
			users: Vec::with_capacity(dataset.users.len()),
			categories: dataset.categories,
			ready: true,
		};
		for user in dataset.users {
			registry.add_or_update(user);
		}
		registry
	}

	/// Whether a load, successful or not, has completed.
	pub fn is_ready(&self) -> bool {
		self.ready
	}

	/// Whether the registry holds nothing but the fallback profile.
	pub fn is_fallback_only(&self) -> bool {
		matches!(self.users.as_slice(), [only] if only.is_fallback())
	}

	/// Number of profiles.
	pub fn len(&self) -> usize {
		self.users.len()
	}

	/// Whether there are no profiles at all.
	pub fn is_empty(&self) -> bool {
		self.users.is_empty()
	}

	/// Profile with the given id, or the first profile when there is none.
	///
	/// Returns `None` only for an empty registry. Use [`Registry::get`] when a
	/// miss must be distinguishable.
	pub fn lookup_by_id(&self, id: &str) -> Option<&UserProfile> {
		self.get(id).or_else(|| self.users.first())
	}

	/// Exact lookup.
	pub fn get(&self, id: &str) -> Option<&UserProfile> {
		self.users.iter().find(|u| u.id == id)
	}

	/// Zero-based position of `id` in the collection.
	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.users.iter().position(|u| u.id == id)
	}

	/// Every profile, in registry order.
	pub fn list_all(&self) -> &[UserProfile] {
		&self.users
	}

	/// Category metadata, or a gray placeholder named after the id.
	pub fn lookup_category(&self, id: &str) -> CategoryInfo {
		self.categories
			.get(id)
			.cloned()
			.unwrap_or_else(|| CategoryInfo {
				id: id.to_owned(),
				name: id.to_owned(),
				color: UNKNOWN_CATEGORY_COLOR.to_owned(),
				description: "unknown".to_owned(),
			})
	}

	/// Replaces the profile with the same id in place, or appends it.
	///
	/// Returns `true` when the profile was appended.
	pub fn add_or_update(&mut self, profile: UserProfile) -> bool {
		match self.users.iter_mut().find(|u| u.id == profile.id) {
			Some(slot) => {
				debug!("updated profile {}", profile.id);
				*slot = profile;
				false
			}
			None => {
				debug!("added profile {}", profile.id);
				self.users.push(profile);
				true
			}
		}
	}

	/// Serializes `{users, categories}` as JSON.
	pub fn to_json(&self) -> Result<String, serde_json::Error> {
		serde_json::to_string(&Snapshot {
			users: &self.users,
			categories: &self.categories,
		})
	}

	/// Writes a snapshot to `store` under `key`. Failures are logged only.
	pub fn persist(&self, store: &impl KeyValueStore, key: &str) {
		if let Err(err) = self.try_persist(store, key) {
			warn!("could not cache profiles under {key}: {err}");
		}
	}

	fn try_persist(&self, store: &impl KeyValueStore, key: &str) -> Result<(), PersistError> {
		let json = self.to_json()?;
		store.set_item(key, &json)?;
		debug!("cached {} profiles under {key}", self.users.len());
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::storage::MemoryStore;

	struct FailingStore;

	impl KeyValueStore for FailingStore {
		fn set_item(&self, _: &str, _: &str) -> Result<(), PersistError> {
			Err(PersistError::Write("QuotaExceededError".into()))
		}
	}

	fn profile(id: &str) -> UserProfile {
		UserProfile::new(id, id.to_uppercase(), "Researcher", format!("{id}.png"))
	}

	fn sample() -> Registry {
		Registry::from_load(Ok(Dataset {
			users: vec![profile("default"), profile("yohei"), profile("alice")],
			categories: BTreeMap::new(),
		}))
	}

	#[test]
	fn failed_load_yields_single_fallback_profile() {
		let registry = Registry::from_load(Err(LoadError::Status(404)));
		assert!(registry.is_ready());
		assert_eq!(registry.len(), 1);
		assert_eq!(registry.list_all()[0].id, "default");
		assert!(registry.is_fallback_only());
		assert!(!sample().is_fallback_only());
	}

	#[test]
	fn unknown_id_falls_back_to_first_profile() {
		let registry = sample();
		for id in ["nobody", "", "DEFAULT", "alice "] {
			assert_eq!(registry.lookup_by_id(id).map(|u| u.id.as_str()), Some("default"));
		}
		assert_eq!(registry.lookup_by_id("alice").map(|u| u.id.as_str()), Some("alice"));
		assert!(registry.get("nobody").is_none());
	}

	#[test]
	fn lookup_on_empty_registry_is_none() {
		assert!(Registry::default().lookup_by_id("x").is_none());
	}

	#[test]
	fn add_or_update_replaces_in_place() {
		let mut registry = sample();
		let mut renamed = profile("yohei");
		renamed.name = "Yohei".into();
		assert!(!registry.add_or_update(renamed));
		assert_eq!(registry.len(), 3);
		assert_eq!(registry.index_of("yohei"), Some(1));
		assert_eq!(registry.list_all()[1].name, "Yohei");

		assert!(registry.add_or_update(profile("bob")));
		assert_eq!(registry.index_of("bob"), Some(3));
	}

	#[test]
	fn duplicate_ids_in_dataset_collapse() {
		let mut second = profile("alice");
		second.position = "Professor".into();
		let registry = Registry::from_load(Ok(Dataset {
			users: vec![profile("alice"), profile("bob"), second],
			categories: BTreeMap::new(),
		}));
		assert_eq!(registry.len(), 2);
		assert_eq!(registry.list_all()[0].position, "Professor");
	}

	#[test]
	fn unknown_category_is_synthesized() {
		let mut categories = BTreeMap::new();
		categories.insert(
			"ai".to_owned(),
			CategoryInfo {
				id: "ai".into(),
				name: "AI".into(),
				color: "#f00".into(),
				description: "Machine learning".into(),
			},
		);
		let registry = Registry::from_load(Ok(Dataset {
			users: vec![],
			categories,
		}));
		assert_eq!(registry.lookup_category("ai").name, "AI");
		let missing = registry.lookup_category("poetry");
		assert_eq!(missing.name, "poetry");
		assert_eq!(missing.color, UNKNOWN_CATEGORY_COLOR);
		assert_eq!(missing.description, "unknown");
	}

	#[test]
	fn persist_writes_parseable_snapshot() {
		let registry = sample();
		let store = MemoryStore::new();
		registry.persist(&store, "mypage.users");
		let json = store.get_item("mypage.users").unwrap();
		let restored = Dataset::from_json(&json).unwrap();
		assert_eq!(restored.users, registry.list_all());
	}

	#[test]
	fn persist_failure_is_swallowed() {
		let registry = sample();
		registry.persist(&FailingStore, "mypage.users");
		assert_eq!(registry.len(), 3);
	}
}
