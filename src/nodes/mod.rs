//! Node system - node content, geometry and nested graphs

pub mod arena;
pub mod content;
pub mod geometry;
pub mod graph;
pub mod node;
pub mod port;
pub mod port_layout;
pub mod state;

// Re-export core types
pub use arena::GraphArena;
pub use content::{ContentDescriptor, MetricsProvider, NodeShape, SimpleMetrics, WidgetEntry};
pub use geometry::{
    compute_layout, ElementId, LayoutResult, Orientation, Placement, Region, RegionKind,
};
pub use graph::{Connection, GraphId, GroupRef, NodeGraph};
pub use node::{GroupNode, Node, NodeId, NodeType};
pub use port::{Port, PortId, PortType};
pub use state::{resolve_treatment, NodeState, NodeStyle, RegionTreatments, Treatment, TreatmentColors};
