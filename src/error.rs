//! Error types for loading and caching profile data.

use thiserror::Error;

/// Reasons the profile dataset could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
	/// No browser window or fetch capability.
	#[error("fetch is unavailable in this environment")]
	Unavailable,
	/// The request itself failed (network error, CORS, rejected promise).
	#[error("request failed: {0}")]
	Request(String),
	/// The server answered with a non-success status.
	#[error("unexpected HTTP status {0}")]
	Status(u16),
	/// The body was not a valid dataset document.
	#[error("malformed dataset: {0}")]
	Parse(#[from] serde_json::Error),
	/// The document parsed but violates a dataset rule.
	#[error("invalid dataset: {0}")]
	Invalid(String),
}

/// Reasons a registry snapshot could not be written to the local cache.
#[derive(Debug, Error)]
pub enum PersistError {
	/// No local storage is available (private mode, non-browser target).
	#[error("local storage is unavailable")]
	Unavailable,
	/// The registry could not be serialized.
	#[error("failed to serialize snapshot: {0}")]
	Serialize(#[from] serde_json::Error),
	/// The store rejected the write (quota exceeded, security error).
	#[error("failed to write snapshot: {0}")]
	Write(String),
}
