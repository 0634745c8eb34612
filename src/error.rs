//! Errors raised by graph-editing operations
//!
//! Layout and state resolution are total; only edits to the graph arena can fail.

use crate::nodes::{GraphId, NodeId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("graph {0} does not exist")]
    GraphNotFound(GraphId),

    #[error("node {node} does not exist in graph {graph}")]
    NodeNotFound { graph: GraphId, node: NodeId },

    #[error("node {0} is not a group node")]
    NotAGroup(NodeId),

    #[error("group contents {contents} cannot be placed inside graph {graph}")]
    SelfContainment { contents: GraphId, graph: GraphId },

    #[error("graph {0} is already owned by another group node")]
    ContentsAlreadyOwned(GraphId),

    #[error("cannot connect node {0} to itself")]
    SelfConnection(NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;
