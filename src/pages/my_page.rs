use leptos::prelude::*;

use crate::app_state::AppState;
use crate::components::avatar::Avatar;
use crate::components::force_graph::ForceGraphCanvas;
use crate::components::profile_card::ProfileCard;
use crate::components::user_selector::UserSelector;
use crate::graph::{build_graph, shared_field_links};

/// Profile page: selector, avatar and card for the current profile, plus the
/// network of every profile.
#[component]
pub fn MyPage() -> impl IntoView {
	let state = expect_context::<AppState>();
	let show_shared = RwSignal::new(false);

	let graph = Signal::derive(move || {
		let with_shared = show_shared.get();
		state.registry.with(|r| {
			let graph = build_graph(r);
			if with_shared {
				graph.with_links(r, &shared_field_links(r))
			} else {
				graph
			}
		})
	});
	let on_select = Callback::new(move |id: String| {
		state.switch_to(&id);
	});

	view! {
		<Show
			when=move || state.is_ready()
			fallback=|| view! { <p class="loading">"Loading profiles…"</p> }
		>
			<header class="mypage-header">
				<Avatar />
				<UserSelector />
			</header>
			<main class="mypage-body">
				<ProfileCard />
				<section class="network">
					<label class="network-toggle">
						<input
							type="checkbox"
							prop:checked=move || show_shared.get()
							on:change=move |ev| show_shared.set(event_target_checked(&ev))
						/>
						"Show shared research fields"
					</label>
					<div class="network-graph">
						<ForceGraphCanvas graph=graph on_select=on_select />
					</div>
				</section>
			</main>
		</Show>
	}
}
