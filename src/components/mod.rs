pub mod avatar;
pub mod force_graph;
pub mod profile_card;
pub mod user_selector;
