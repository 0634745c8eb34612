//! Content descriptors and the metrics seam
//!
//! A [`ContentDescriptor`] is the snapshot a node hands to the geometry engine
//! for one layout pass. Measured sizes come from a [`MetricsProvider`].

use super::port::{Port, PortType};
use crate::constants::{metrics, node};
use egui::Vec2;
use serde::{Deserialize, Serialize};

/// A widget attached to a node, with its measured size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetEntry {
    pub name: String,
    pub size: Vec2,
}

impl WidgetEntry {
    pub fn new(name: impl Into<String>, size: Vec2) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Outline style of the node body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NodeShape {
    /// A single body rectangle
    #[default]
    Plain,
    /// A front plate over an offset back plate, used by group nodes
    Stacked,
}

/// Everything the geometry engine needs to know about a node's content
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentDescriptor {
    /// Measured size of the node label
    pub label: Vec2,
    /// Measured icon size, if the node shows an icon
    pub icon: Option<Vec2>,
    pub inputs: Vec<Port>,
    pub outputs: Vec<Port>,
    pub widgets: Vec<WidgetEntry>,
    /// Lower bound for the node width; the node grows past it to fit content
    pub width_hint: f32,
    pub shape: NodeShape,
}

impl ContentDescriptor {
    pub fn new(label: Vec2) -> Self {
        Self {
            label,
            ..Default::default()
        }
    }

    pub fn with_icon(mut self, icon: Vec2) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_shape(mut self, shape: NodeShape) -> Self {
        self.shape = shape;
        self
    }

    /// Appends a port to the side matching its type, renumbering it to its
    /// declaration index
    pub fn push_port(&mut self, mut port: Port) -> &mut Self {
        let ports = match port.port_type {
            PortType::Input => &mut self.inputs,
            PortType::Output => &mut self.outputs,
        };
        port.id = ports.len();
        ports.push(port);
        self
    }

    pub fn push_widget(&mut self, widget: WidgetEntry) -> &mut Self {
        self.widgets.push(widget);
        self
    }

    pub fn ports(&self, port_type: PortType) -> &[Port] {
        match port_type {
            PortType::Input => &self.inputs,
            PortType::Output => &self.outputs,
        }
    }

    pub fn ports_mut(&mut self, port_type: PortType) -> &mut Vec<Port> {
        match port_type {
            PortType::Input => &mut self.inputs,
            PortType::Output => &mut self.outputs,
        }
    }

    pub fn has_visible(&self, port_type: PortType) -> bool {
        self.ports(port_type).iter().any(|port| port.visible)
    }
}

/// Supplies measured sizes of text, ports and icons
pub trait MetricsProvider {
    fn text_size(&self, text: &str) -> Vec2;

    fn port_size(&self, port_type: PortType) -> Vec2;

    fn icon_size(&self, icon: &str) -> Vec2;
}

/// Deterministic metrics with a fixed per-character advance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleMetrics {
    pub char_width: f32,
    pub line_height: f32,
    pub port_size: Vec2,
    pub icon_size: Vec2,
}

impl Default for SimpleMetrics {
    fn default() -> Self {
        Self {
            char_width: metrics::CHAR_WIDTH,
            line_height: metrics::LINE_HEIGHT,
            port_size: Vec2::from(node::DEFAULT_PORT_SIZE),
            icon_size: Vec2::from(node::DEFAULT_ICON_SIZE),
        }
    }
}

impl MetricsProvider for SimpleMetrics {
    fn text_size(&self, text: &str) -> Vec2 {
        let widest = text
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let lines = text.lines().count().max(1);
        Vec2::new(
            widest as f32 * self.char_width,
            lines as f32 * self.line_height,
        )
    }

    fn port_size(&self, _port_type: PortType) -> Vec2 {
        self.port_size
    }

    fn icon_size(&self, _icon: &str) -> Vec2 {
        self.icon_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_port_renumbers_per_direction() {
        let mut content = ContentDescriptor::new(Vec2::new(10.0, 14.0));
        content
            .push_port(Port::new(7, "a", PortType::Input))
            .push_port(Port::new(7, "out", PortType::Output))
            .push_port(Port::new(7, "b", PortType::Input));

        assert_eq!(content.inputs[0].id, 0);
        assert_eq!(content.inputs[1].id, 1);
        assert_eq!(content.outputs[0].id, 0);
        assert_eq!(content.inputs[1].name, "b");
    }

    #[test]
    fn test_simple_metrics_text_size() {
        let metrics = SimpleMetrics::default();
        assert_eq!(metrics.text_size("abc"), Vec2::new(21.0, 14.0));
        assert_eq!(metrics.text_size("ab\nabcd"), Vec2::new(28.0, 28.0));
        assert_eq!(metrics.text_size(""), Vec2::new(0.0, 14.0));
    }

    #[test]
    fn test_has_visible() {
        let mut content = ContentDescriptor::default();
        assert!(!content.has_visible(PortType::Input));
        content.push_port(Port::new(0, "in", PortType::Input).with_visible(false));
        assert!(!content.has_visible(PortType::Input));
        content.push_port(Port::new(0, "in2", PortType::Input));
        assert!(content.has_visible(PortType::Input));
    }
}
