//! Node graph data structures and operations

use super::node::{Node, NodeId};
use super::port::PortId;
use crate::error::{GraphError, GraphResult};
use std::collections::HashMap;

/// Unique identifier for a graph in the [`GraphArena`](super::arena::GraphArena)
pub type GraphId = usize;

/// Represents a connection between two ports on different nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub from_node: NodeId,
    pub from_port: PortId,
    pub to_node: NodeId,
    pub to_port: PortId,
}

impl Connection {
    /// Creates a new connection
    pub fn new(from_node: NodeId, from_port: PortId, to_node: NodeId, to_port: PortId) -> Self {
        Self {
            from_node,
            from_port,
            to_node,
            to_port,
        }
    }
}

/// The group node that owns a nested graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupRef {
    /// Graph the group node lives in
    pub graph: GraphId,
    /// The group node
    pub node: NodeId,
    /// The nested graph the group owns
    pub contents: GraphId,
}

/// A graph containing nodes and their connections
#[derive(Debug, Clone, Default)]
pub struct NodeGraph {
    id: GraphId,
    nodes: HashMap<NodeId, Node>,
    connections: Vec<Connection>,
    owner: Option<GroupRef>,
    next_node_id: NodeId,
}

impl NodeGraph {
    /// Creates a new empty node graph
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_id(id: GraphId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    /// Group node owning this graph, `None` for top-level graphs
    pub fn owner(&self) -> Option<GroupRef> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: Option<GroupRef>) {
        self.owner = owner;
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Adds a node to the graph and returns its ID. Group placement goes
    /// through [`GraphArena::add_node`](super::arena::GraphArena::add_node),
    /// which checks ownership of the nested graph.
    pub(crate) fn add_node(&mut self, mut node: Node) -> NodeId {
        let id = self.next_node_id;
        node.set_id(id);
        self.nodes.insert(id, node);
        self.next_node_id += 1;
        id
    }

    /// Removes a node and all its connections
    pub(crate) fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        self.connections
            .retain(|conn| conn.from_node != node_id && conn.to_node != node_id);
        self.nodes.remove(&node_id)
    }

    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Node ids in ascending order
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Adds a connection between two ports
    pub fn add_connection(&mut self, connection: Connection) -> GraphResult<()> {
        if connection.from_node == connection.to_node {
            return Err(GraphError::SelfConnection(connection.from_node));
        }

        for node in [connection.from_node, connection.to_node] {
            if !self.nodes.contains_key(&node) {
                return Err(GraphError::NodeNotFound {
                    graph: self.id,
                    node,
                });
            }
        }

        self.connections.push(connection);
        Ok(())
    }
}
