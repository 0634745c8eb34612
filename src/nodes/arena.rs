//! Graph arena
//!
//! Owns every graph of a document, addressed by [`GraphId`]. Group nodes hold
//! the id of their nested graph rather than the graph itself, so a group can
//! never be placed inside its own contents: that is checked by walking owner
//! ids upward. The arena also keeps the group expand/collapse flags in step
//! with the [`ViewManager`].

use super::geometry::{LayoutResult, Orientation};
use super::graph::{Connection, GraphId, GroupRef, NodeGraph};
use super::node::{GroupNode, Node, NodeId};
use crate::editor::ViewManager;
use crate::error::{GraphError, GraphResult};
use egui::Pos2;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct GraphArena {
    graphs: HashMap<GraphId, NodeGraph>,
    next_graph_id: GraphId,
    root: GraphId,
    views: ViewManager,
}

impl GraphArena {
    /// Creates an arena holding an empty root graph
    pub fn new() -> Self {
        let root = 0;
        let mut graphs = HashMap::new();
        graphs.insert(root, NodeGraph::with_id(root));
        Self {
            graphs,
            next_graph_id: root + 1,
            root,
            views: ViewManager::new(root),
        }
    }

    pub fn root(&self) -> GraphId {
        self.root
    }

    pub fn graph(&self, graph_id: GraphId) -> Option<&NodeGraph> {
        self.graphs.get(&graph_id)
    }

    /// Mutable access for editing nodes and connections. Nodes are added and
    /// removed through the arena.
    pub fn graph_mut(&mut self, graph_id: GraphId) -> Option<&mut NodeGraph> {
        self.graphs.get_mut(&graph_id)
    }

    /// Graph ids in ascending order
    pub fn graph_ids(&self) -> Vec<GraphId> {
        let mut ids: Vec<GraphId> = self.graphs.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn views(&self) -> &ViewManager {
        &self.views
    }

    pub fn active_graph_id(&self) -> GraphId {
        self.views.active_graph()
    }

    pub fn active_graph(&self) -> Option<&NodeGraph> {
        self.graphs.get(&self.views.active_graph())
    }

    /// Creates an empty graph that no group owns yet
    pub fn create_graph(&mut self) -> GraphId {
        let id = self.next_graph_id;
        self.next_graph_id += 1;
        self.graphs.insert(id, NodeGraph::with_id(id));
        id
    }

    /// Creates a collapsed group node in `graph_id` together with its empty
    /// nested graph
    pub fn create_group(
        &mut self,
        graph_id: GraphId,
        title: impl Into<String>,
        position: Pos2,
        orientation: Orientation,
    ) -> GraphResult<(NodeId, GraphId)> {
        if !self.graphs.contains_key(&graph_id) {
            return Err(GraphError::GraphNotFound(graph_id));
        }
        let contents = self.create_graph();
        let node = Node::new_group(0, title, position, contents, orientation);
        let node_id = self.add_node(graph_id, node)?;
        Ok((node_id, contents))
    }

    /// Adds a node to a graph. A group node's contents must be an unowned
    /// graph that does not already contain `graph_id`.
    pub fn add_node(&mut self, graph_id: GraphId, mut node: Node) -> GraphResult<NodeId> {
        if !self.graphs.contains_key(&graph_id) {
            return Err(GraphError::GraphNotFound(graph_id));
        }

        let contents = node.as_group().map(GroupNode::contents);
        if let Some(contents) = contents {
            self.check_contents(graph_id, contents)?;
        }
        if let Some(group) = node.as_group_mut() {
            group.collapse();
        }

        let graph = self
            .graphs
            .get_mut(&graph_id)
            .ok_or(GraphError::GraphNotFound(graph_id))?;
        let node_id = graph.add_node(node);

        if let Some(contents) = contents {
            if let Some(nested) = self.graphs.get_mut(&contents) {
                nested.set_owner(Some(GroupRef {
                    graph: graph_id,
                    node: node_id,
                    contents,
                }));
            }
            log::debug!(
                "Added group node {} to graph {} owning graph {}",
                node_id,
                graph_id,
                contents
            );
        } else {
            log::debug!("Added node {} to graph {}", node_id, graph_id);
        }
        Ok(node_id)
    }

    fn check_contents(&self, graph_id: GraphId, contents: GraphId) -> GraphResult<()> {
        let nested = self
            .graphs
            .get(&contents)
            .ok_or(GraphError::GraphNotFound(contents))?;
        if contents == self.root || self.is_descendant(graph_id, contents) {
            log::warn!(
                "Rejected group owning graph {} inside graph {}",
                contents,
                graph_id
            );
            return Err(GraphError::SelfContainment {
                contents,
                graph: graph_id,
            });
        }
        if nested.owner().is_some() {
            log::warn!("Rejected group reusing owned graph {}", contents);
            return Err(GraphError::ContentsAlreadyOwned(contents));
        }
        Ok(())
    }

    /// Removes a node. Removing a group node drops its nested graph and every
    /// graph nested below it.
    pub fn remove_node(&mut self, graph_id: GraphId, node_id: NodeId) -> GraphResult<Node> {
        let graph = self
            .graphs
            .get(&graph_id)
            .ok_or(GraphError::GraphNotFound(graph_id))?;
        let node = graph.node(node_id).ok_or(GraphError::NodeNotFound {
            graph: graph_id,
            node: node_id,
        })?;

        if let Some(contents) = node.as_group().map(GroupNode::contents) {
            let group = GroupRef {
                graph: graph_id,
                node: node_id,
                contents,
            };
            if self.views.contains(&group) {
                let path = self.owner_chain(graph_id);
                self.set_view_path(path);
            }

            let nested: Vec<GraphId> = self
                .graphs
                .keys()
                .copied()
                .filter(|&id| self.is_descendant(id, contents))
                .collect();
            log::debug!(
                "Removing group node {} drops {} nested graph(s)",
                node_id,
                nested.len()
            );
            for id in nested {
                self.graphs.remove(&id);
            }
        }

        self.graphs
            .get_mut(&graph_id)
            .and_then(|graph| graph.remove_node(node_id))
            .ok_or(GraphError::NodeNotFound {
                graph: graph_id,
                node: node_id,
            })
    }

    /// Connects two nodes of the same graph
    pub fn connect(&mut self, graph_id: GraphId, connection: Connection) -> GraphResult<()> {
        self.graphs
            .get_mut(&graph_id)
            .ok_or(GraphError::GraphNotFound(graph_id))?
            .add_connection(connection)
    }

    pub fn group(&self, graph_id: GraphId, node_id: NodeId) -> GraphResult<&GroupNode> {
        let node = self
            .graphs
            .get(&graph_id)
            .ok_or(GraphError::GraphNotFound(graph_id))?
            .node(node_id)
            .ok_or(GraphError::NodeNotFound {
                graph: graph_id,
                node: node_id,
            })?;
        node.as_group().ok_or(GraphError::NotAGroup(node_id))
    }

    /// The nested graph owned by a group node
    pub fn nested_graph(&self, graph_id: GraphId, node_id: NodeId) -> GraphResult<&NodeGraph> {
        let contents = self.group(graph_id, node_id)?.contents();
        self.graphs
            .get(&contents)
            .ok_or(GraphError::GraphNotFound(contents))
    }

    pub fn is_expanded(&self, graph_id: GraphId, node_id: NodeId) -> bool {
        self.group(graph_id, node_id)
            .map(GroupNode::is_expanded)
            .unwrap_or(false)
    }

    /// Makes a group's nested graph the active view.
    ///
    /// Groups on the way down to it are expanded too, and groups that are no
    /// longer on the view path are collapsed. Returns `false` if the group was
    /// already expanded or the node is not a group.
    pub fn expand(&mut self, graph_id: GraphId, node_id: NodeId) -> bool {
        let group = match self.group(graph_id, node_id) {
            Ok(group) => *group,
            Err(err) => {
                log::warn!("Cannot expand: {}", err);
                return false;
            }
        };
        if group.is_expanded() {
            return false;
        }

        let path = self.owner_chain(group.contents());
        self.set_view_path(path);
        if let Some(group) = self.group_node_mut(graph_id, node_id) {
            group.expand();
        }
        log::debug!(
            "Expanded group node {} in graph {}, active graph is now {}",
            node_id,
            graph_id,
            self.active_graph_id()
        );
        true
    }

    /// Returns the active view to the graph containing the group. The nested
    /// graph keeps its contents. Returns `false` if the group was already
    /// collapsed or the node is not a group.
    pub fn collapse(&mut self, graph_id: GraphId, node_id: NodeId) -> bool {
        let group = match self.group(graph_id, node_id) {
            Ok(group) => *group,
            Err(err) => {
                log::warn!("Cannot collapse: {}", err);
                return false;
            }
        };
        if !group.is_expanded() {
            return false;
        }

        let path = self.owner_chain(graph_id);
        self.set_view_path(path);
        if let Some(group) = self.group_node_mut(graph_id, node_id) {
            group.collapse();
        }
        log::debug!(
            "Collapsed group node {} in graph {}, active graph is now {}",
            node_id,
            graph_id,
            self.active_graph_id()
        );
        true
    }

    /// True if `graph_id` is `ancestor` or is nested anywhere inside it
    pub fn is_descendant(&self, graph_id: GraphId, ancestor: GraphId) -> bool {
        graph_id == ancestor
            || self
                .owner_chain(graph_id)
                .iter()
                .any(|owner| owner.graph == ancestor)
    }

    /// Groups owning `graph_id` and its ancestors, outermost first
    pub fn owner_chain(&self, graph_id: GraphId) -> Vec<GroupRef> {
        let mut chain = Vec::new();
        let mut current = graph_id;
        while let Some(owner) = self.graphs.get(&current).and_then(NodeGraph::owner) {
            chain.push(owner);
            current = owner.graph;
        }
        chain.reverse();
        chain
    }

    /// Titles of the expanded groups as a path, e.g. `/Shading/Noise/`
    pub fn breadcrumb(&self) -> String {
        let mut crumb = String::from("/");
        for group in self.views.path() {
            if let Some(node) = self.graph(group.graph).and_then(|g| g.node(group.node)) {
                crumb.push_str(&node.title);
                crumb.push('/');
            }
        }
        crumb
    }

    /// Layouts of every node in a graph, ordered by node id
    pub fn layout_graph(&self, graph_id: GraphId) -> GraphResult<Vec<(NodeId, LayoutResult)>> {
        let graph = self
            .graphs
            .get(&graph_id)
            .ok_or(GraphError::GraphNotFound(graph_id))?;
        Ok(graph
            .node_ids()
            .into_iter()
            .filter_map(|id| graph.node(id).map(|node| (id, node.layout())))
            .collect())
    }

    fn group_node_mut(&mut self, graph_id: GraphId, node_id: NodeId) -> Option<&mut GroupNode> {
        self.graphs
            .get_mut(&graph_id)?
            .node_mut(node_id)?
            .as_group_mut()
    }

    /// Switches the view path and syncs the expanded flag of every group that
    /// enters or leaves it
    fn set_view_path(&mut self, path: Vec<GroupRef>) {
        let old = self.views.set_path(path.clone());
        for group in old.iter().filter(|group| !path.contains(group)) {
            if let Some(node) = self.group_node_mut(group.graph, group.node) {
                node.collapse();
            }
        }
        for group in path.iter().filter(|group| !old.contains(group)) {
            if let Some(node) = self.group_node_mut(group.graph, group.node) {
                node.expand();
            }
        }
    }
}

impl Default for GraphArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::GraphView;

    fn arena_with_group() -> (GraphArena, NodeId, GraphId) {
        let mut arena = GraphArena::new();
        let root = arena.root();
        let (group, contents) = arena
            .create_group(root, "group", Pos2::ZERO, Orientation::Vertical)
            .unwrap();
        (arena, group, contents)
    }

    #[test]
    fn test_new_group_is_collapsed_and_empty() {
        let (arena, group, contents) = arena_with_group();
        let root = arena.root();

        assert!(!arena.is_expanded(root, group));
        assert!(arena.nested_graph(root, group).unwrap().is_empty());
        assert_eq!(arena.graph(contents).unwrap().owner().unwrap().node, group);
        assert_eq!(arena.active_graph_id(), root);
    }

    #[test]
    fn test_expand_and_collapse_switch_active_view() {
        let (mut arena, group, contents) = arena_with_group();
        let root = arena.root();
        arena
            .add_node(contents, Node::new(0, "inner", Pos2::ZERO))
            .unwrap();

        assert!(arena.expand(root, group));
        assert!(!arena.expand(root, group));
        assert!(arena.is_expanded(root, group));
        assert_eq!(arena.active_graph_id(), contents);
        assert_eq!(arena.nested_graph(root, group).unwrap().len(), 1);

        assert!(arena.collapse(root, group));
        assert!(!arena.collapse(root, group));
        assert_eq!(arena.active_graph_id(), root);
        assert_eq!(arena.views().current_view(), GraphView::Root(root));
        assert_eq!(arena.nested_graph(root, group).unwrap().len(), 1);
    }

    #[test]
    fn test_collapsing_outer_group_collapses_inner() {
        let (mut arena, outer, outer_graph) = arena_with_group();
        let root = arena.root();
        let (inner, inner_graph) = arena
            .create_group(outer_graph, "inner", Pos2::ZERO, Orientation::Horizontal)
            .unwrap();

        // entering the inner group directly expands the outer one as well
        assert!(arena.expand(outer_graph, inner));
        assert!(arena.is_expanded(root, outer));
        assert_eq!(arena.active_graph_id(), inner_graph);
        assert_eq!(arena.breadcrumb(), "/group/inner/");

        assert!(arena.collapse(root, outer));
        assert!(!arena.is_expanded(outer_graph, inner));
        assert_eq!(arena.active_graph_id(), root);
        assert_eq!(arena.breadcrumb(), "/");
    }

    #[test]
    fn test_self_containment_is_rejected() {
        let (mut arena, _, contents) = arena_with_group();

        let looped = Node::new_group(0, "loop", Pos2::ZERO, contents, Orientation::Vertical);
        assert_eq!(
            arena.add_node(contents, looped),
            Err(GraphError::SelfContainment {
                contents,
                graph: contents
            })
        );

        let (_, deeper) = arena
            .create_group(contents, "deeper", Pos2::ZERO, Orientation::Vertical)
            .unwrap();
        let looped = Node::new_group(0, "loop", Pos2::ZERO, contents, Orientation::Vertical);
        assert!(matches!(
            arena.add_node(deeper, looped),
            Err(GraphError::SelfContainment { .. })
        ));

        let root = arena.root();
        let reused = Node::new_group(0, "again", Pos2::ZERO, contents, Orientation::Vertical);
        assert_eq!(
            arena.add_node(root, reused),
            Err(GraphError::ContentsAlreadyOwned(contents))
        );
    }

    /// Every group's flag matches its presence on the view path
    fn assert_flags_follow_view(arena: &GraphArena) {
        for graph_id in arena.graph_ids() {
            let graph = arena.graph(graph_id).unwrap();
            for node_id in graph.node_ids() {
                let Some(group) = graph.node(node_id).and_then(Node::as_group) else {
                    continue;
                };
                let group_ref = GroupRef {
                    graph: graph_id,
                    node: node_id,
                    contents: group.contents(),
                };
                assert_eq!(
                    group.is_expanded(),
                    arena.views().contains(&group_ref),
                    "group {node_id} in graph {graph_id}"
                );
            }
        }
        let active = match arena.views().path().last() {
            Some(group) => group.contents,
            None => arena.root(),
        };
        assert_eq!(arena.active_graph_id(), active);
    }

    #[test]
    fn test_expanded_flags_stay_in_step_with_view() {
        let (mut arena, outer, outer_graph) = arena_with_group();
        let root = arena.root();
        let (inner, inner_graph) = arena
            .create_group(outer_graph, "inner", Pos2::ZERO, Orientation::Vertical)
            .unwrap();
        let (sibling, sibling_graph) = arena
            .create_group(root, "sibling", Pos2::ZERO, Orientation::Horizontal)
            .unwrap();
        assert_flags_follow_view(&arena);

        assert!(arena.expand(outer_graph, inner));
        assert_flags_follow_view(&arena);
        assert_eq!(arena.active_graph_id(), inner_graph);

        // switching to a sibling branch collapses the whole previous path
        assert!(arena.expand(root, sibling));
        assert_flags_follow_view(&arena);
        assert!(!arena.is_expanded(root, outer));
        assert!(!arena.is_expanded(outer_graph, inner));
        assert_eq!(arena.active_graph_id(), sibling_graph);

        assert!(arena.expand(root, outer));
        assert_flags_follow_view(&arena);
        assert!(!arena.collapse(outer_graph, inner));
        assert!(arena.collapse(root, outer));
        assert_flags_follow_view(&arena);
        assert_eq!(arena.views().depth(), 0);

        // a group handed in already expanded is stored collapsed
        let prepared = arena.create_graph();
        let mut node = Node::new_group(0, "wrap", Pos2::ZERO, prepared, Orientation::Vertical);
        if let Some(group) = node.as_group_mut() {
            group.expand();
        }
        let wrap = arena.add_node(root, node).unwrap();
        assert!(!arena.is_expanded(root, wrap));
        assert_flags_follow_view(&arena);
    }

    #[test]
    fn test_graph_edits_cannot_orphan_or_nest_groups() {
        let (mut arena, group, contents) = arena_with_group();
        let root = arena.root();

        // placing the group's own node inside its contents is rejected
        let copy = arena.graph(root).unwrap().node(group).unwrap().clone();
        assert_eq!(
            arena.add_node(contents, copy),
            Err(GraphError::SelfContainment {
                contents,
                graph: contents
            })
        );
        assert!(arena.graph(contents).unwrap().is_empty());

        // the root graph can never become a group's contents
        let wrap_root = Node::new_group(0, "root", Pos2::ZERO, root, Orientation::Vertical);
        assert!(matches!(
            arena.add_node(contents, wrap_root),
            Err(GraphError::SelfContainment { .. })
        ));

        // removal through the arena leaves no graph without an owner
        arena.remove_node(root, group).unwrap();
        for graph_id in arena.graph_ids() {
            assert!(graph_id == root || arena.graph(graph_id).unwrap().owner().is_some());
        }
        assert!(arena.graph(contents).is_none());
    }

    #[test]
    fn test_group_from_prepared_graph() {
        let mut arena = GraphArena::new();
        let root = arena.root();
        let prepared = arena.create_graph();
        arena
            .add_node(prepared, Node::new(0, "kept", Pos2::ZERO))
            .unwrap();

        let node = Node::new_group(0, "wrap", Pos2::ZERO, prepared, Orientation::Vertical);
        let id = arena.add_node(root, node).unwrap();
        assert_eq!(arena.group(root, id).unwrap().contents(), prepared);
        assert!(arena.is_descendant(prepared, root));
        assert!(!arena.is_descendant(root, prepared));
    }

    #[test]
    fn test_remove_group_drops_nested_graphs() {
        let (mut arena, outer, outer_graph) = arena_with_group();
        let root = arena.root();
        let (inner, inner_graph) = arena
            .create_group(outer_graph, "inner", Pos2::ZERO, Orientation::Vertical)
            .unwrap();
        arena.expand(outer_graph, inner);

        let removed = arena.remove_node(root, outer).unwrap();
        assert!(removed.is_group());
        assert!(arena.graph(outer_graph).is_none());
        assert!(arena.graph(inner_graph).is_none());
        assert_eq!(arena.active_graph_id(), root);
        assert_eq!(arena.graph_ids(), vec![root]);
    }

    #[test]
    fn test_regular_node_is_not_a_group() {
        let mut arena = GraphArena::new();
        let root = arena.root();
        let id = arena
            .add_node(root, Node::new(0, "plain", Pos2::ZERO))
            .unwrap();

        assert_eq!(arena.group(root, id), Err(GraphError::NotAGroup(id)));
        assert!(!arena.expand(root, id));
        assert!(!arena.collapse(root, id));
        assert_eq!(
            arena.remove_node(root, 99).unwrap_err(),
            GraphError::NodeNotFound { graph: root, node: 99 }
        );
        assert_eq!(arena.layout_graph(root).unwrap().len(), 1);
        assert!(arena.layout_graph(42).is_err());
    }
}
