//! Nodle layout library
//!
//! Node geometry for node-based editors: computes where a node's label, icon,
//! ports and widgets go, which visual treatment its regions receive, and how
//! group nodes own and reveal nested graphs.

pub mod constants;
pub mod editor;
pub mod error;
pub mod layout_dump;
pub mod nodes;
pub mod theme;

// Re-export commonly used types
pub use error::{GraphError, GraphResult};
pub use nodes::{
    compute_layout, resolve_treatment, ContentDescriptor, ElementId, GraphArena, GraphId,
    LayoutResult, MetricsProvider, Node, NodeId, NodeState, Orientation, Port, PortType,
    SimpleMetrics,
};
