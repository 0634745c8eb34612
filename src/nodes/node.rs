//! Node types and core node functionality

use super::content::{ContentDescriptor, MetricsProvider, NodeShape, WidgetEntry};
use super::geometry::{compute_layout, LayoutResult, Orientation};
use super::graph::GraphId;
use super::port::{Port, PortId, PortType};
use super::state::{NodeState, NodeStyle};
use crate::theme::colors;
use egui::{Color32, Pos2, Rect, Vec2};

/// Unique identifier for a node within its graph
pub type NodeId = usize;

/// Group part of a node: the nested graph it owns and whether that graph is
/// the active view.
///
/// The nested graph is referenced by id and lives in the
/// [`GraphArena`](super::arena::GraphArena), so a group can be checked against
/// self-containment by comparing ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupNode {
    contents: GraphId,
    expanded: bool,
}

impl GroupNode {
    /// Creates a collapsed group owning `contents`
    pub fn new(contents: GraphId) -> Self {
        Self {
            contents,
            expanded: false,
        }
    }

    /// The nested graph owned by this group
    pub fn contents(&self) -> GraphId {
        self.contents
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Marks the nested graph as the active view. Returns `false` if the group
    /// was already expanded.
    pub(crate) fn expand(&mut self) -> bool {
        !std::mem::replace(&mut self.expanded, true)
    }

    /// Returns the view to the parent graph. Returns `false` if the group was
    /// already collapsed. The nested graph is kept.
    pub(crate) fn collapse(&mut self) -> bool {
        std::mem::replace(&mut self.expanded, false)
    }
}

/// Type of node - regular node or group node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Regular,
    Group(GroupNode),
}

/// Core node structure representing a visual node in the graph
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    pub title: String,
    pub position: Pos2,
    /// Icon name, measured through the metrics provider
    pub icon: Option<String>,
    pub content: ContentDescriptor,
    pub color: Color32,
    pub border_color: Color32,
    pub state: NodeState,
    node_type: NodeType,
    orientation: Orientation,
}

impl Node {
    /// Creates a new regular node with the vertical layout
    pub fn new(id: NodeId, title: impl Into<String>, position: Pos2) -> Self {
        let style = NodeStyle::default();
        Self {
            id,
            title: title.into(),
            position,
            icon: None,
            content: ContentDescriptor::default(),
            color: style.color,
            border_color: style.border_color,
            state: NodeState::Normal,
            node_type: NodeType::Regular,
            orientation: Orientation::Vertical,
        }
    }

    /// Creates a group node owning the graph `contents`
    pub fn new_group(
        id: NodeId,
        title: impl Into<String>,
        position: Pos2,
        contents: GraphId,
        orientation: Orientation,
    ) -> Self {
        let mut node = Self::new(id, title, position).with_orientation(orientation);
        node.color = colors().group_color;
        node.content.shape = NodeShape::Stacked;
        node.node_type = NodeType::Group(GroupNode::new(contents));
        node
    }

    /// Chooses the layout strategy. Only meant for construction; the
    /// orientation of a live node does not change.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Adds an input port to the node
    pub fn add_input(&mut self, name: impl Into<String>) -> &mut Self {
        let port_id = self.content.inputs.len();
        self.content
            .push_port(Port::new(port_id, name, PortType::Input));
        self
    }

    /// Adds an output port to the node
    pub fn add_output(&mut self, name: impl Into<String>) -> &mut Self {
        let port_id = self.content.outputs.len();
        self.content
            .push_port(Port::new(port_id, name, PortType::Output));
        self
    }

    /// Attaches a widget with its measured size
    pub fn add_widget(&mut self, name: impl Into<String>, size: Vec2) -> &mut Self {
        self.content.push_widget(WidgetEntry::new(name, size));
        self
    }

    pub fn port(&self, port_type: PortType, port_id: PortId) -> Option<&Port> {
        self.content.ports(port_type).get(port_id)
    }

    /// Shows or hides a port. Returns `false` if the port does not exist.
    pub fn set_port_visible(&mut self, port_type: PortType, port_id: PortId, visible: bool) -> bool {
        match self.content.ports_mut(port_type).get_mut(port_id) {
            Some(port) => {
                port.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Refreshes every measured size in the content descriptor
    pub fn measure(&mut self, metrics: &impl MetricsProvider) {
        self.content.label = metrics.text_size(&self.title);
        self.content.icon = self.icon.as_deref().map(|icon| metrics.icon_size(icon));
        for port_type in [PortType::Input, PortType::Output] {
            for port in self.content.ports_mut(port_type) {
                port.size = metrics.port_size(port_type);
                port.label_size = metrics.text_size(&port.name);
            }
        }
    }

    /// Renames the node and re-measures its label
    pub fn set_title(&mut self, title: impl Into<String>, metrics: &impl MetricsProvider) {
        self.title = title.into();
        self.content.label = metrics.text_size(&self.title);
        log::debug!("Node {} renamed to '{}'", self.id, self.title);
    }

    /// Computes the node's layout from its current content and state
    pub fn layout(&self) -> LayoutResult {
        compute_layout(&self.content, self.state, self.orientation)
    }

    /// Returns the bounding rectangle of the node in graph coordinates
    pub fn get_rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.layout().size)
    }

    pub fn style(&self) -> NodeStyle {
        NodeStyle {
            color: self.color,
            border_color: self.border_color,
        }
    }

    pub fn is_selected(&self) -> bool {
        self.state == NodeState::Selected
    }

    pub fn is_disabled(&self) -> bool {
        self.state == NodeState::Disabled
    }

    /// Id assigned by the graph holding the node
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: NodeId) {
        self.id = id;
    }

    pub fn node_type(&self) -> &NodeType {
        &self.node_type
    }

    /// Check if this is a group node
    pub fn is_group(&self) -> bool {
        matches!(self.node_type, NodeType::Group(_))
    }

    pub fn as_group(&self) -> Option<&GroupNode> {
        match &self.node_type {
            NodeType::Group(group) => Some(group),
            NodeType::Regular => None,
        }
    }

    pub(crate) fn as_group_mut(&mut self) -> Option<&mut GroupNode> {
        match &mut self.node_type {
            NodeType::Group(group) => Some(group),
            NodeType::Regular => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::content::SimpleMetrics;
    use crate::nodes::geometry::{ElementId, RegionKind};
    use crate::nodes::state::Treatment;

    fn measured(title: &str) -> Node {
        let mut node = Node::new(0, title, Pos2::ZERO);
        node.add_input("a").add_input("b").add_output("out");
        node.measure(&SimpleMetrics::default());
        node
    }

    #[test]
    fn test_group_transitions_are_idempotent() {
        let mut group = GroupNode::new(3);
        assert!(!group.is_expanded());
        assert!(group.expand());
        assert!(!group.expand());
        assert!(group.is_expanded());
        assert!(group.collapse());
        assert!(!group.collapse());
        assert!(!group.is_expanded());
        assert_eq!(group.contents(), 3);
    }

    #[test]
    fn test_measure_fills_descriptor() {
        let node = measured("Add");
        assert_eq!(node.content.label, Vec2::new(21.0, 14.0));
        assert_eq!(node.content.inputs[1].label_size, Vec2::new(7.0, 14.0));
        assert_eq!(node.content.outputs[0].size, Vec2::new(22.0, 22.0));
        assert_eq!(node.content.icon, None);
    }

    #[test]
    fn test_rename_relayouts_label() {
        let metrics = SimpleMetrics::default();
        let mut node = measured("Add");
        let before = node.layout();

        node.set_title("Add Numbers Together", &metrics);
        let after = node.layout();

        assert!(after.width() > before.width());
        let label = after.position(ElementId::Label).unwrap();
        assert_eq!(label.x, after.width() / 2.0 - node.content.label.x / 2.0);
    }

    #[test]
    fn test_selection_changes_only_treatment() {
        let mut node = measured("Mix");
        let normal = node.layout();
        node.state = NodeState::Selected;
        let selected = node.layout();

        assert_eq!(normal.size, selected.size);
        assert_eq!(normal.placements, selected.placements);
        assert_eq!(
            selected.region(RegionKind::Body).unwrap().treatment,
            Treatment::Highlight
        );
        assert!(node.is_selected());
    }

    #[test]
    fn test_port_visibility() {
        let mut node = measured("Mix");
        assert!(node.set_port_visible(PortType::Input, 1, false));
        assert!(!node.set_port_visible(PortType::Input, 9, false));
        assert_eq!(node.layout().port_positions(PortType::Input).len(), 1);
    }

    #[test]
    fn test_group_node_construction() {
        let mut node = Node::new_group(4, "group", Pos2::new(10.0, 20.0), 2, Orientation::Horizontal)
            .with_icon("folder");
        node.measure(&SimpleMetrics::default());

        assert!(node.is_group());
        assert_eq!(node.orientation(), Orientation::Horizontal);
        assert_eq!(node.as_group().map(|g| g.contents()), Some(2));
        assert!(node.layout().region(RegionKind::BackPlate).is_some());
        assert_eq!(node.get_rect().min, Pos2::new(10.0, 20.0));
        assert!(node.layout().position(ElementId::Icon).is_some());
    }
}
