//! Best-effort local key-value cache.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::PersistError;

/// A durable string key-value store.
pub trait KeyValueStore {
	/// Stores `value` under `key`, replacing any previous value.
	fn set_item(&self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// The browser's `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl KeyValueStore for LocalStorage {
	fn set_item(&self, key: &str, value: &str) -> Result<(), PersistError> {
		let storage = web_sys::window()
			.and_then(|w| w.local_storage().ok().flatten())
			.ok_or(PersistError::Unavailable)?;
		storage
			.set_item(key, value)
			.map_err(|e| PersistError::Write(format!("{e:?}")))
	}
}

/// In-memory store, used off-browser and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
	items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
	/// An empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// The value last stored under `key`.
	pub fn get_item(&self, key: &str) -> Option<String> {
		self.items.borrow().get(key).cloned()
	}
}

impl KeyValueStore for MemoryStore {
	fn set_item(&self, key: &str, value: &str) -> Result<(), PersistError> {
		self.items
			.borrow_mut()
			.insert(key.to_owned(), value.to_owned());
		Ok(())
	}
}
