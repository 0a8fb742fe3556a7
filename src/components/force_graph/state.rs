use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::graph::{EdgeKind, NetworkGraph};

const COLORS: &[&str] = &[
	"#1f77b4", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22",
	"#17becf",
];
const PRIMARY_COLOR: &str = "#ff7f0e";

/// Canvas radius per unit of network node size.
const RADIUS_PER_SIZE: f64 = 0.25;
/// Extra world-space slack around a node that still counts as a hit.
const HIT_SLACK: f64 = 6.0;
/// Pointer travel below which a press-release is a click, not a drag.
pub const CLICK_TOLERANCE: f64 = 3.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub profile_id: String,
	pub label: String,
	pub color: String,
	pub radius: f64,
	pub ring_width: f64,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	/// Eased 0..1 highlight strength.
	pub highlight_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	inferred: HashSet<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl ForceGraphState {
	pub fn new(data: &NetworkGraph, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 250.0,
			force_spring: 0.04,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut by_id = HashMap::new();

		let count = data.nodes.len().max(1) as f64;
		for (i, node) in data.nodes.iter().enumerate() {
			let primary = node.is_primary();
			let color = if primary {
				PRIMARY_COLOR
			} else {
				COLORS[i % COLORS.len()]
			};
			// Start on a circle so the simulation has something to spread.
			let angle = i as f64 * 2.0 * PI / count;
			let idx = graph.add_node(NodeData {
				x: (120.0 * angle.cos()) as f32,
				y: (120.0 * angle.sin()) as f32,
				mass: if primary { 20.0 } else { 10.0 },
				is_anchor: false,
				user_data: NodeInfo {
					profile_id: node.profile_id.clone(),
					label: node.label.clone(),
					color: color.to_owned(),
					radius: node.size as f64 * RADIUS_PER_SIZE,
					ring_width: node.border_width as f64,
				},
			});
			by_id.insert(node.id, idx);
		}

		let mut edges = Vec::new();
		let mut inferred = HashSet::new();
		for edge in &data.edges {
			let (Some(&src), Some(&tgt)) = (by_id.get(&edge.from), by_id.get(&edge.to)) else {
				continue;
			};
			graph.add_edge(src, tgt, EdgeData::default());
			edges.push((src, tgt));
			if matches!(edge.kind, EdgeKind::SharedFields { .. }) {
				inferred.insert((src, tgt));
			}
		}

		Self {
			graph,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			flow_time: 0.0,
			edges,
			inferred,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under a screen position.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let reach = node.data.user_data.radius + HIT_SLACK;
			if dx * dx + dy * dy < reach * reach {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn profile_at(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.profile_id.clone());
			}
		});
		found
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		self.hover.node = node;
		self.hover.neighbors.clear();
		if let Some(idx) = node {
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.neighbors.contains(&idx)
	}

	pub fn is_inferred(&self, src: DefaultNodeIdx, tgt: DefaultNodeIdx) -> bool {
		self.inferred.contains(&(src, tgt))
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		let target = if self.hover.node.is_some() { 1.0 } else { 0.0 };
		self.hover.highlight_t += (target - self.hover.highlight_t) * 4.0 * dt as f64;
		if self.hover.node.is_none() && self.hover.highlight_t < 0.01 {
			self.hover.highlight_t = 0.0;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{NetworkEdge, NetworkNode};

	fn node(id: usize, profile_id: &str, size: u32) -> NetworkNode {
		NetworkNode {
			id,
			profile_id: profile_id.into(),
			label: profile_id.into(),
			title: String::new(),
			image: String::new(),
			size,
			border_width: 2,
		}
	}

	fn sample() -> ForceGraphState {
		let data = NetworkGraph {
			nodes: vec![node(2, "yohei", 40), node(3, "alice", 25), node(5, "bob", 25)],
			edges: vec![
				NetworkEdge {
					from: 3,
					to: 2,
					kind: EdgeKind::Declared,
				},
				NetworkEdge {
					from: 3,
					to: 5,
					kind: EdgeKind::SharedFields {
						label: "Shared fields: AI".into(),
						strength: 1,
					},
				},
				NetworkEdge {
					from: 9,
					to: 2,
					kind: EdgeKind::Declared,
				},
			],
		};
		ForceGraphState::new(&data, 800.0, 600.0)
	}

	#[test]
	fn hit_test_uses_node_radius() {
		let state = sample();
		// The first node starts at graph (120, 0), centered on screen.
		let idx = state.node_at_position(400.0 + 120.0 + 12.0, 300.0);
		assert_eq!(idx.and_then(|i| state.profile_at(i)).as_deref(), Some("yohei"));
		assert!(state.node_at_position(400.0, 300.0).is_none());
	}

	#[test]
	fn hover_collects_neighbors_and_edge_kinds() {
		let mut state = sample();
		let angle = 2.0 * PI / 3.0;
		let alice = state
			.node_at_position(400.0 + 120.0 * angle.cos(), 300.0 + 120.0 * angle.sin())
			.unwrap();
		assert_eq!(state.profile_at(alice).as_deref(), Some("alice"));
		state.set_hover(Some(alice));
		assert_eq!(state.hover.neighbors.len(), 2);
		let inferred = state.edges.iter().filter(|(s, t)| state.is_inferred(*s, *t)).count();
		assert_eq!(inferred, 1);
		assert_eq!(state.edges.len(), 2);
	}
}
