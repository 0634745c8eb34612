//! View management for nested graphs
//!
//! Tracks which graph is the active view. The path runs from the top-level
//! graph down through every expanded group to the graph being edited.

use crate::nodes::{GraphId, GroupRef};

/// Tracks which graph we're currently viewing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphView {
    /// Viewing the root graph
    Root(GraphId),
    /// Viewing the nested graph of a group node
    Group(GroupRef),
}

/// Manages view state and switching between nested graphs
#[derive(Debug, Clone)]
pub struct ViewManager {
    root: GraphId,
    path: Vec<GroupRef>,
}

impl ViewManager {
    /// Create a new view manager starting with root view
    pub fn new(root: GraphId) -> Self {
        Self {
            root,
            path: Vec::new(),
        }
    }

    /// Get the current view
    pub fn current_view(&self) -> GraphView {
        match self.path.last() {
            Some(group) => GraphView::Group(*group),
            None => GraphView::Root(self.root),
        }
    }

    /// Graph that is currently the active view
    pub fn active_graph(&self) -> GraphId {
        self.path.last().map_or(self.root, |group| group.contents)
    }

    /// Check if currently viewing root graph
    pub fn is_root_view(&self) -> bool {
        self.path.is_empty()
    }

    /// Expanded groups from the outermost inwards
    pub fn path(&self) -> &[GroupRef] {
        &self.path
    }

    /// Number of groups entered below the root
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn contains(&self, group: &GroupRef) -> bool {
        self.path.contains(group)
    }

    /// Replaces the path, returning the previous one
    pub(crate) fn set_path(&mut self, path: Vec<GroupRef>) -> Vec<GroupRef> {
        std::mem::replace(&mut self.path, path)
    }
}
