//! Port types and functionality for node connections

use crate::constants::node::DEFAULT_PORT_SIZE;
use egui::Vec2;
use serde::{Deserialize, Serialize};

/// Index of a port among the ports of the same direction, in declaration order
pub type PortId = usize;

/// Type of port (input or output)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PortType {
    Input,
    Output,
}

impl PortType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortType::Input => "input",
            PortType::Output => "output",
        }
    }
}

/// Represents a connection point on a node
///
/// `size` and `label_size` are measured values supplied by a
/// [`MetricsProvider`](super::content::MetricsProvider).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub id: PortId,
    pub name: String,
    pub port_type: PortType,
    pub visible: bool,
    pub size: Vec2,
    pub label_size: Vec2,
    pub label_visible: bool,
}

impl Port {
    /// Creates a new visible port with the default size and an unmeasured label
    pub fn new(id: PortId, name: impl Into<String>, port_type: PortType) -> Self {
        Self {
            id,
            name: name.into(),
            port_type,
            visible: true,
            size: Vec2::from(DEFAULT_PORT_SIZE),
            label_size: Vec2::ZERO,
            label_visible: true,
        }
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_label_size(mut self, label_size: Vec2) -> Self {
        self.label_size = label_size;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Label size if the label takes part in layout
    pub fn shown_label(&self) -> Option<Vec2> {
        self.label_visible.then_some(self.label_size)
    }
}
