//! Browser navigation capability.

use log::error;

/// Something that can replace the current document with another page.
pub trait Navigator {
	/// Loads `target`, a URL relative to the current page.
	fn navigate(&mut self, target: &str);
}

/// Navigates `window.location`, replacing the current document.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
	fn navigate(&mut self, target: &str) {
		let Some(window) = web_sys::window() else {
			error!("cannot navigate to {target}: no window");
			return;
		};
		if let Err(err) = window.location().set_href(target) {
			error!("navigation to {target} failed: {err:?}");
		}
	}
}

/// Path of the current page, e.g. `/src/mypage_alice.html`.
pub fn current_path() -> String {
	web_sys::window()
		.and_then(|w| w.location().pathname().ok())
		.unwrap_or_default()
}

/// Records navigation requests instead of performing them.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNavigator {
	pub visited: Vec<String>,
}

#[cfg(test)]
impl Navigator for RecordingNavigator {
	fn navigate(&mut self, target: &str) {
		self.visited.push(target.to_owned());
	}
}
