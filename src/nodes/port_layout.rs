//! Port layout strategy
//!
//! Ports of one direction are stacked in declaration order. Hidden ports take
//! no space and get no position. The stacking offset only ever moves forward,
//! so two visible ports of the same direction never overlap.

use super::port::{Port, PortId, PortType};
use crate::constants::layout::{
    EDGE_OFFSET, MARGIN, OUTPUT_EDGE_INSET, PORT_LABEL_CORRECTION, PORT_SPACING,
    PORT_TEXT_FALLOFF,
};
use egui::{Pos2, Vec2};

/// Axis ports are stacked along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Stacked top to bottom along the left and right edges
    Vertical,
    /// Stacked left to right along the top and bottom edges
    Horizontal,
}

/// Computed position of one visible port and its label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortPlacement {
    pub port_type: PortType,
    /// Declaration index of the port
    pub index: PortId,
    pub position: Pos2,
    pub size: Vec2,
    pub label: Option<Pos2>,
}

impl PortPlacement {
    /// Position of the far corner of the port
    pub fn end(&self) -> Pos2 {
        self.position + self.size
    }
}

/// Space one port occupies along the stacking axis
fn slot_extent(port: &Port, axis: Axis) -> f32 {
    match axis {
        Axis::Vertical => port.size.y,
        Axis::Horizontal => port
            .shown_label()
            .map_or(port.size.x, |label| port.size.x.max(label.x)),
    }
}

/// Total length of the visible ports stacked along `axis`, spacing included
pub fn stacked_extent(ports: &[Port], axis: Axis) -> f32 {
    let (count, total) = ports
        .iter()
        .filter(|port| port.visible)
        .fold((0usize, 0.0f32), |(count, total), port| {
            (count + 1, total + slot_extent(port, axis))
        });
    if count == 0 {
        0.0
    } else {
        total + PORT_SPACING * (count - 1) as f32
    }
}

/// Width a column of ports adds to the node, including its labels
pub fn column_width(ports: &[Port]) -> f32 {
    ports
        .iter()
        .filter(|port| port.visible)
        .map(|port| {
            let label = port.shown_label().map_or(0.0, |label| label.x / 1.5);
            (port.size.x - crate::constants::layout::PORT_FALLOFF).max(0.0) + label
        })
        .fold(0.0, f32::max)
}

/// Lays out ports down the left (inputs) or right (outputs) edge.
///
/// Stacking starts at `v_offset`; output ports are anchored against
/// `node_width` so they stay flush right as the node grows.
pub fn layout_ports(
    ports: &[Port],
    port_type: PortType,
    v_offset: f32,
    node_width: f32,
) -> Vec<PortPlacement> {
    let mut placements = Vec::new();
    let mut port_y = v_offset;

    for (index, port) in ports.iter().enumerate().filter(|(_, port)| port.visible) {
        let port_x = match port_type {
            PortType::Input => EDGE_OFFSET - port.size.x / 2.0,
            PortType::Output => node_width - port.size.x / 2.0 - OUTPUT_EDGE_INSET,
        };

        let label = port.shown_label().map(|label| {
            let txt_x = match port_type {
                PortType::Input => port.size.x / 2.0 - PORT_TEXT_FALLOFF + EDGE_OFFSET,
                PortType::Output => port_x - (label.x - PORT_TEXT_FALLOFF),
            };
            Pos2::new(txt_x, port_y - PORT_LABEL_CORRECTION)
        });

        placements.push(PortPlacement {
            port_type,
            index,
            position: Pos2::new(port_x, port_y),
            size: port.size,
            label,
        });
        port_y += slot_extent(port, Axis::Vertical) + PORT_SPACING;
    }

    placements
}

/// Lays out ports along the top (inputs) or bottom (outputs) edge.
///
/// The run of ports starts at the left margin, so hiding a port only moves the
/// ports after it. Each port sits in a slot wide enough for its label, which
/// is placed inside the node next to the port.
pub fn layout_ports_along_edge(
    ports: &[Port],
    port_type: PortType,
    node_size: Vec2,
) -> Vec<PortPlacement> {
    let mut placements = Vec::new();
    let mut slot_x = MARGIN;

    for (index, port) in ports.iter().enumerate().filter(|(_, port)| port.visible) {
        let slot = slot_extent(port, Axis::Horizontal);
        let port_x = slot_x + (slot - port.size.x) / 2.0;
        let port_y = match port_type {
            PortType::Input => EDGE_OFFSET - port.size.y / 2.0,
            PortType::Output => node_size.y - port.size.y / 2.0 - OUTPUT_EDGE_INSET,
        };

        let label = port.shown_label().map(|label| {
            let txt_x = slot_x + (slot - label.x) / 2.0;
            let txt_y = match port_type {
                PortType::Input => port_y + port.size.y + PORT_LABEL_CORRECTION,
                PortType::Output => port_y - label.y - PORT_LABEL_CORRECTION,
            };
            Pos2::new(txt_x, txt_y)
        });

        placements.push(PortPlacement {
            port_type,
            index,
            position: Pos2::new(port_x, port_y),
            size: port.size,
            label,
        });
        slot_x += slot + PORT_SPACING;
    }

    placements
}
