//! Serializable dump of the computed layouts of a graph
//!
//! Flattens a [`LayoutResult`] per node into plain fields so the output can be
//! inspected or diffed as JSON.

use crate::error::{GraphError, GraphResult};
use crate::nodes::{
    GraphArena, GraphId, LayoutResult, Node, NodeId, NodeStyle, NodeType, Region, RegionKind,
    Treatment,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub graph: GraphId,
    pub active: bool,
    pub breadcrumb: String,
    pub nodes: Vec<NodeDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: NodeId,
    pub title: String,
    pub kind: String,
    pub orientation: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub expanded: Option<bool>,
    pub contents: Option<GraphId>,
    pub disabled_overlay: bool,
    pub elements: Vec<ElementDump>,
    pub regions: Vec<RegionDump>,
}

#[derive(Debug, Serialize)]
pub struct ElementDump {
    pub element: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Serialize)]
pub struct RegionDump {
    pub kind: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub highlighted: bool,
    /// RGBA, unmultiplied
    pub fill: [u8; 4],
    pub border: [u8; 4],
}

impl LayoutDump {
    pub fn from_graph(arena: &GraphArena, graph_id: GraphId) -> GraphResult<Self> {
        let graph = arena
            .graph(graph_id)
            .ok_or(GraphError::GraphNotFound(graph_id))?;
        let nodes = arena
            .layout_graph(graph_id)?
            .into_iter()
            .filter_map(|(id, layout)| graph.node(id).map(|node| NodeDump::new(node, &layout)))
            .collect();

        Ok(Self {
            graph: graph_id,
            active: arena.active_graph_id() == graph_id,
            breadcrumb: arena.breadcrumb(),
            nodes,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl NodeDump {
    fn new(node: &Node, layout: &LayoutResult) -> Self {
        let group = node.as_group();
        let style = node.style();
        let kind = match node.node_type() {
            NodeType::Regular => "regular",
            NodeType::Group(_) => "group",
        };
        Self {
            id: node.id(),
            title: node.title.clone(),
            kind: kind.to_string(),
            orientation: node.orientation().as_str().to_string(),
            x: node.position.x,
            y: node.position.y,
            width: layout.width(),
            height: layout.height(),
            expanded: group.map(|group| group.is_expanded()),
            contents: group.map(|group| group.contents()),
            disabled_overlay: layout.show_disabled_overlay,
            elements: layout
                .placements
                .iter()
                .map(|placement| ElementDump {
                    element: placement.element.to_string(),
                    x: placement.position.x,
                    y: placement.position.y,
                })
                .collect(),
            regions: layout
                .regions
                .iter()
                .map(|region| RegionDump::new(region, &style))
                .collect(),
        }
    }
}

impl RegionDump {
    fn new(region: &Region, style: &NodeStyle) -> Self {
        let colors = match region.kind {
            RegionKind::LabelBacking => region.treatment.label_colors(style),
            RegionKind::BackPlate | RegionKind::Body => region.treatment.body_colors(style),
        };
        Self {
            kind: region_name(region.kind).to_string(),
            x: region.rect.min.x,
            y: region.rect.min.y,
            width: region.rect.width(),
            height: region.rect.height(),
            highlighted: region.treatment == Treatment::Highlight,
            fill: colors.fill.to_srgba_unmultiplied(),
            border: colors.border.to_srgba_unmultiplied(),
        }
    }
}

fn region_name(kind: RegionKind) -> &'static str {
    match kind {
        RegionKind::BackPlate => "back_plate",
        RegionKind::Body => "body",
        RegionKind::LabelBacking => "label_backing",
    }
}
