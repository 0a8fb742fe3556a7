//! Node/edge lists describing how profiles relate to each other.

use serde::Serialize;

use crate::config::PRIMARY_PROFILE_ID;
use crate::registry::Registry;

const PRIMARY_NODE_SIZE: u32 = 40;
const PRIMARY_BORDER_WIDTH: u32 = 4;
const NODE_SIZE: u32 = 25;
const BORDER_WIDTH: u32 = 2;

/// One profile in the network view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkNode {
	/// 1-based position of the profile in the registry.
	pub id: usize,
	/// Id of the profile this node stands for.
	pub profile_id: String,
	/// Short caption drawn under the node.
	pub label: String,
	/// Hover text: name and position.
	pub title: String,
	/// Avatar URL.
	pub image: String,
	/// Relative node size; the primary profile is drawn larger.
	pub size: u32,
	/// Width of the ring around the node.
	pub border_width: u32,
}

impl NetworkNode {
	/// Whether this node is the primary profile.
	pub fn is_primary(&self) -> bool {
		self.profile_id == PRIMARY_PROFILE_ID
	}
}

/// Why two nodes are linked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum EdgeKind {
	/// Listed in the source profile's `networkConnections`.
	Declared,
	/// Inferred from specializations both profiles share.
	SharedFields {
		/// Caption naming some of the shared fields.
		label: String,
		/// Number of shared fields.
		strength: usize,
	},
}

/// A directed link between two [`NetworkNode`] ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NetworkEdge {
	/// Source node id.
	pub from: usize,
	/// Target node id.
	pub to: usize,
	/// Declared or inferred.
	#[serde(flatten)]
	pub kind: EdgeKind,
}

/// Nodes and edges ready for the canvas.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NetworkGraph {
	/// One node per non-fallback profile, in registry order.
	pub nodes: Vec<NetworkNode>,
	/// Links between existing nodes.
	pub edges: Vec<NetworkEdge>,
}

/// Builds the network view of `registry`.
///
/// The fallback profile gets no node. Declared connections become edges from
/// the declaring node; connections to unknown ids, to the fallback profile or
/// back to the declaring profile are dropped.
pub fn build_graph(registry: &Registry) -> NetworkGraph {
	let users = registry.list_all();
	let node_id = |pos: usize| pos + 1;

	let nodes = users
		.iter()
		.enumerate()
		.filter(|(_, u)| !u.is_fallback())
		.map(|(pos, u)| {
			let primary = u.id == PRIMARY_PROFILE_ID;
			NetworkNode {
				id: node_id(pos),
				profile_id: u.id.clone(),
				label: u.name.clone(),
				title: u.position.clone(),
				image: u.avatar.clone(),
				size: if primary { PRIMARY_NODE_SIZE } else { NODE_SIZE },
				border_width: if primary { PRIMARY_BORDER_WIDTH } else { BORDER_WIDTH },
			}
		})
		.collect();

	let mut edges = Vec::new();
	for (from, user) in users.iter().enumerate() {
		if user.is_fallback() {
			continue;
		}
		for target in &user.network_connections {
			let Some(to) = registry.index_of(target) else {
				continue;
			};
			if to == from || users[to].is_fallback() {
				continue;
			}
			edges.push(NetworkEdge {
				from: node_id(from),
				to: node_id(to),
				kind: EdgeKind::Declared,
			});
		}
	}

	NetworkGraph { nodes, edges }
}

/// Two profiles with at least one specialization in common.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharedFieldLink {
	/// Profile id listed first in the registry.
	pub from: String,
	/// The other profile id.
	pub to: String,
	/// Shared specializations, in the order `from` lists them.
	pub fields: Vec<String>,
}

impl SharedFieldLink {
	/// Names at most two of the shared fields.
	pub fn label(&self) -> String {
		let shown: Vec<&str> = self.fields.iter().take(2).map(String::as_str).collect();
		format!("Shared fields: {}", shown.join(", "))
	}

	/// Number of shared fields.
	pub fn strength(&self) -> usize {
		self.fields.len()
	}
}

/// Pairs of non-fallback profiles sharing a specialization, each pair once,
/// earlier profile first.
pub fn shared_field_links(registry: &Registry) -> Vec<SharedFieldLink> {
	let users: Vec<_> = registry.list_all().iter().filter(|u| !u.is_fallback()).collect();
	let mut links = Vec::new();
	for (i, a) in users.iter().enumerate() {
		for b in &users[i + 1..] {
			let fields: Vec<String> = a
				.specializations
				.iter()
				.filter(|f| b.specializations.contains(*f))
				.cloned()
				.collect();
			if !fields.is_empty() {
				links.push(SharedFieldLink {
					from: a.id.clone(),
					to: b.id.clone(),
					fields,
				});
			}
		}
	}
	links
}

impl NetworkGraph {
	/// Adds `links` as edges, skipping pairs already joined in either direction.
	pub fn with_links(mut self, registry: &Registry, links: &[SharedFieldLink]) -> Self {
		for link in links {
			let (Some(from), Some(to)) = (registry.index_of(&link.from), registry.index_of(&link.to))
			else {
				continue;
			};
			let (from, to) = (from + 1, to + 1);
			let joined = self
				.edges
				.iter()
				.any(|e| (e.from, e.to) == (from, to) || (e.from, e.to) == (to, from));
			if joined {
				continue;
			}
			self.edges.push(NetworkEdge {
				from,
				to,
				kind: EdgeKind::SharedFields {
					label: link.label(),
					strength: link.strength(),
				},
			});
		}
		self
	}

	/// Node with the given 1-based id.
	pub fn node(&self, id: usize) -> Option<&NetworkNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Whether there is nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}
