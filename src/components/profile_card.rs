use std::collections::HashMap;

use leptos::prelude::*;

use crate::app_state::AppState;
use crate::model::{CategoryInfo, UserProfile};
use crate::registry::Registry;

/// Share of a profile's reading history falling in one category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryShare {
	pub category: CategoryInfo,
	pub count: usize,
	/// Rounded percentage of the whole history.
	pub percent: u32,
}

/// Reading history grouped by category, largest first.
pub fn category_breakdown(profile: &UserProfile, registry: &Registry) -> Vec<CategoryShare> {
	let total = profile.reading_history.len();
	if total == 0 {
		return Vec::new();
	}
	let mut counts: HashMap<&str, usize> = HashMap::new();
	for entry in &profile.reading_history {
		*counts.entry(entry.category.as_str()).or_default() += 1;
	}
	let mut shares: Vec<CategoryShare> = counts
		.into_iter()
		.map(|(id, count)| CategoryShare {
			category: registry.lookup_category(id),
			count,
			percent: ((count * 200 + total) / (total * 2)) as u32,
		})
		.collect();
	shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.id.cmp(&b.category.id)));
	shares
}

/// Name, position, fields and reading statistics of the current profile.
#[component]
pub fn ProfileCard() -> impl IntoView {
	let state = expect_context::<AppState>();

	move || {
		let user = state.current_profile()?;
		let shares = state.registry.with(|r| category_breakdown(&user, r));
		let stats = user.stats.clone().unwrap_or_default();
		let subtitle = user.name_ja.clone().filter(|ja| *ja != user.name);

		Some(view! {
			<section class="profile-card">
				<h2>{user.name.clone()}</h2>
				{subtitle.map(|ja| view! { <p class="name-ja">{ja}</p> })}
				<p class="position">{user.position.clone()}</p>
				<ul class="specializations">
					{user
						.specializations
						.iter()
						.map(|field| view! { <li>{field.clone()}</li> })
						.collect_view()}
				</ul>
				<div class="stats">
					<div class="stat-item">
						<span class="number">{stats.total_books}</span>
						<span class="label">"Total books"</span>
					</div>
					<div class="stat-item">
						<span class="number">{stats.this_year_books}</span>
						<span class="label">"This year"</span>
					</div>
					<div class="stat-item">
						<span class="number">{stats.presentations}</span>
						<span class="label">"Presentations"</span>
					</div>
				</div>
				<ul class="categories">
					{shares
						.into_iter()
						.map(|CategoryShare { category, percent, .. }| {
							let style = format!("border-left: 4px solid {};", category.color);
							let text = format!("{} {percent}%", category.name);
							view! {
								<li style=style title=category.description>
									{text}
								</li>
							}
						})
						.collect_view()}
				</ul>
			</section>
		})
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use super::*;
	use crate::model::{Dataset, ReadingEntry};

	fn entry(category: &str) -> ReadingEntry {
		ReadingEntry {
			category: category.to_owned(),
			..Default::default()
		}
	}

	#[test]
	fn breakdown_orders_by_count_and_fills_unknown_categories() {
		let mut categories = BTreeMap::new();
		categories.insert(
			"cs".to_owned(),
			CategoryInfo {
				id: "cs".into(),
				name: "Computer Science".into(),
				color: "#1f77b4".into(),
				description: String::new(),
			},
		);
		let mut alice = UserProfile::new("alice", "Alice", "M1", "");
		alice.reading_history = vec![entry("cs"), entry("art"), entry("cs")];
		let registry = Registry::from_load(Ok(Dataset {
			users: vec![alice.clone()],
			categories,
		}));

		let shares = category_breakdown(&alice, &registry);
		assert_eq!(shares.len(), 2);
		assert_eq!(shares[0].category.name, "Computer Science");
		assert_eq!(shares[0].percent, 67);
		assert_eq!(shares[1].category.name, "art");
		assert_eq!(shares[1].percent, 33);
	}

	#[test]
	fn empty_history_has_no_breakdown() {
		let bob = UserProfile::new("bob", "Bob", "M2", "");
		assert!(category_breakdown(&bob, &Registry::fallback()).is_empty());
	}
}
