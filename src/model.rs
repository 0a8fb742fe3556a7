//! Profile and category records as they appear in `users.json`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::FALLBACK_PROFILE_ID;
use crate::error::LoadError;

/// Reading and output counters attached to a profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadingStats {
	/// Books read overall.
	pub total_books: u32,
	/// Books read in the current year.
	pub this_year_books: u32,
	/// Published papers.
	pub publications: u32,
	/// Talks and posters.
	pub presentations: u32,
	/// Released datasets.
	pub datasets: u32,
	/// Public code repositories.
	pub coderepos: u32,
	/// Awards received.
	pub awards: u32,
}

/// One book or paper in a profile's reading history.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingEntry {
	/// Title of the work.
	pub title: String,
	/// Author or authors, free-form.
	pub author: String,
	/// Key into the category table.
	pub category: String,
	/// Year read, as written in the document.
	pub year: String,
	/// Rating out of five.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub rating: Option<u8>,
	/// Cover image URL.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cover: Option<String>,
	/// Unmodeled fields, kept for round-tripping.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// A user profile.
///
/// `id`, `name`, `position` and `avatar` are required when parsing; a document
/// missing any of them is rejected as a whole. Fields this type does not model
/// are kept in `extra` and written back unchanged on persist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
	/// Unique, non-blank identifier.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Affiliation and role, e.g. `"東京大学 大学院工学系研究科 M2"`.
	pub position: String,
	/// Avatar image URL.
	pub avatar: String,
	/// Ids of related profiles, in document order.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub network_connections: Vec<String>,
	/// Japanese display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name_ja: Option<String>,
	/// Contact address.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Research fields.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub specializations: Vec<String>,
	/// Reading and output counters.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub stats: Option<ReadingStats>,
	/// Books and papers read.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub reading_history: Vec<ReadingEntry>,
	/// Unmodeled fields, kept for round-tripping.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl UserProfile {
	/// Builds a profile with only the required fields set.
	pub fn new(
		id: impl Into<String>,
		name: impl Into<String>,
		position: impl Into<String>,
		avatar: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			position: position.into(),
			avatar: avatar.into(),
			network_connections: Vec::new(),
			name_ja: None,
			email: None,
			specializations: Vec::new(),
			stats: None,
			reading_history: Vec::new(),
			extra: Map::new(),
		}
	}

	/// The profile substituted when the dataset cannot be loaded.
	pub fn fallback() -> Self {
		Self::new(
			FALLBACK_PROFILE_ID,
			"Guest",
			"My Library",
			"images/default-avatar.png",
		)
	}

	/// Adds related profile ids, consuming and returning `self`.
	pub fn with_connections<I, S>(mut self, ids: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.network_connections
			.extend(ids.into_iter().map(Into::into));
		self
	}

	/// Adds specializations, consuming and returning `self`.
	pub fn with_specializations<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.specializations
			.extend(fields.into_iter().map(Into::into));
		self
	}

	/// Last whitespace-separated word of the position, e.g. `"M2"` for
	/// `"東京大学 大学院工学系研究科 M2"`.
	pub fn position_short(&self) -> &str {
		self.position.split_whitespace().last().unwrap_or("")
	}

	/// Whether this is the fallback profile.
	pub fn is_fallback(&self) -> bool {
		self.id == FALLBACK_PROFILE_ID
	}
}

/// Display metadata for a reading category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
	/// Filled from the map key when absent in the document.
	#[serde(default)]
	pub id: String,
	/// Display name.
	pub name: String,
	/// CSS color.
	pub color: String,
	/// Free-form description.
	#[serde(default)]
	pub description: String,
}

/// The `{users, categories}` document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
	/// Profiles in document order.
	pub users: Vec<UserProfile>,
	/// Categories keyed by id.
	pub categories: BTreeMap<String, CategoryInfo>,
}

impl Dataset {
	/// Parses and validates a dataset document.
	pub fn from_json(text: &str) -> Result<Self, LoadError> {
		let mut dataset: Self = serde_json::from_str(text)?;
		dataset.validate()?;
		Ok(dataset)
	}

	fn validate(&mut self) -> Result<(), LoadError> {
		if let Some(pos) = self.users.iter().position(|u| u.id.trim().is_empty()) {
			return Err(LoadError::Invalid(format!("user #{pos} has an empty id")));
		}
		for (key, category) in &mut self.categories {
			if category.id.is_empty() {
				category.id.clone_from(key);
			}
		}
		Ok(())
	}
}
