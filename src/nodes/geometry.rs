//! Node geometry engine
//!
//! Computes a node's bounding size and the position of every visible
//! sub-element (label, icon, ports, port labels, widgets) from its
//! [`ContentDescriptor`], plus the regions the renderer fills and outlines.
//! [`compute_layout`] is a pure function of its inputs.

use super::content::{ContentDescriptor, NodeShape};
use super::port::{PortId, PortType};
use super::port_layout::{self, Axis, PortPlacement};
use super::state::{resolve_treatment, NodeState, RegionTreatments, Treatment};
use crate::constants::layout::{
    BASE_HEIGHT_PAD, BASE_WIDTH_PAD, ICON_INSET, LABEL_BACKING_PADDING, LABEL_TOP_INSET, MARGIN,
    PLATE_OFFSET, PORT_SPACING, WIDGET_SIDE_INSET,
};
use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Layout strategy of a node, fixed when the node is constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Ports run left to right along the top and bottom edges
    Horizontal,
    /// Ports stack top to bottom along the left and right edges
    #[default]
    Vertical,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

/// Identity of a positioned sub-element
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ElementId {
    Label,
    Icon,
    Port(PortType, PortId),
    PortLabel(PortType, PortId),
    Widget(usize),
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::Label => write!(f, "label"),
            ElementId::Icon => write!(f, "icon"),
            ElementId::Port(port_type, index) => write!(f, "{}:{}", port_type.as_str(), index),
            ElementId::PortLabel(port_type, index) => {
                write!(f, "{}_label:{}", port_type.as_str(), index)
            }
            ElementId::Widget(index) => write!(f, "widget:{}", index),
        }
    }
}

/// Position of one element relative to the node origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub element: ElementId,
    pub position: Pos2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RegionKind {
    /// Offset plate drawn behind the body of stacked nodes
    BackPlate,
    Body,
    LabelBacking,
}

/// A rectangle the renderer paints, tagged with its treatment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Region {
    pub kind: RegionKind,
    pub rect: Rect,
    pub treatment: Treatment,
}

/// Output of one layout pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    pub size: Vec2,
    /// Label, icon, ports (each followed by its label) then widgets
    pub placements: Vec<Placement>,
    /// Regions in paint order
    pub regions: Vec<Region>,
    pub show_disabled_overlay: bool,
}

impl LayoutResult {
    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn position(&self, element: ElementId) -> Option<Pos2> {
        self.placements
            .iter()
            .find(|placement| placement.element == element)
            .map(|placement| placement.position)
    }

    /// Positions of the visible ports of one direction, in stacking order
    pub fn port_positions(&self, port_type: PortType) -> Vec<(PortId, Pos2)> {
        self.placements
            .iter()
            .filter_map(|placement| match placement.element {
                ElementId::Port(kind, index) if kind == port_type => {
                    Some((index, placement.position))
                }
                _ => None,
            })
            .collect()
    }

    pub fn region(&self, kind: RegionKind) -> Option<&Region> {
        self.regions.iter().find(|region| region.kind == kind)
    }
}

/// Size and placements before regions are derived
struct Frame {
    size: Vec2,
    label_y: f32,
    placements: Vec<Placement>,
}

impl Frame {
    fn push(&mut self, element: ElementId, position: Pos2) {
        self.placements.push(Placement { element, position });
    }

    fn push_ports(&mut self, ports: &[PortPlacement]) {
        for port in ports {
            self.push(ElementId::Port(port.port_type, port.index), port.position);
            if let Some(label) = port.label {
                self.push(ElementId::PortLabel(port.port_type, port.index), label);
            }
        }
    }
}

/// Computes the layout of a node.
///
/// Degenerate metrics give degenerate geometry; nothing here fails.
pub fn compute_layout(
    content: &ContentDescriptor,
    state: NodeState,
    orientation: Orientation,
) -> LayoutResult {
    let frame = match orientation {
        Orientation::Vertical => layout_vertical(content),
        Orientation::Horizontal => layout_horizontal(content),
    };
    let treatments = resolve_treatment(state);
    let regions = regions(content, frame.size, frame.label_y, &treatments);

    log::trace!(
        "{} layout: {:.1}x{:.1}, {} placements",
        orientation.as_str(),
        frame.size.x,
        frame.size.y,
        frame.placements.len()
    );

    LayoutResult {
        size: frame.size,
        placements: frame.placements,
        regions,
        show_disabled_overlay: treatments.show_disabled_overlay,
    }
}

fn widest_widget(content: &ContentDescriptor) -> f32 {
    content
        .widgets
        .iter()
        .map(|widget| widget.size.x)
        .fold(0.0, f32::max)
}

/// Ports stacked down the side edges, label centered on top.
fn layout_vertical(content: &ContentDescriptor) -> Frame {
    let label = content.label;
    let label_h = label.y;

    // base size, with room for the taller port column
    let content_w = label.x.max(widest_widget(content))
        + port_layout::column_width(&content.inputs)
        + port_layout::column_width(&content.outputs);
    let width = content.width_hint.max(content_w + BASE_WIDTH_PAD);
    let port_reserve = port_layout::stacked_extent(&content.inputs, Axis::Vertical)
        .max(port_layout::stacked_extent(&content.outputs, Axis::Vertical));
    let base_height = label_h + BASE_HEIGHT_PAD + port_reserve;

    let mut frame = Frame {
        size: Vec2::new(width, base_height),
        label_y: LABEL_TOP_INSET,
        placements: Vec::new(),
    };

    frame.push(
        ElementId::Label,
        Pos2::new(width / 2.0 - label.x / 2.0, LABEL_TOP_INSET),
    );
    if content.icon.is_some() {
        frame.push(ElementId::Icon, Pos2::from(ICON_INSET));
    }

    let port_offset = label_h + label_h / 2.0;
    let inputs = port_layout::layout_ports(&content.inputs, PortType::Input, port_offset, width);
    let outputs = port_layout::layout_ports(&content.outputs, PortType::Output, port_offset, width);
    frame.push_ports(&inputs);
    frame.push_ports(&outputs);

    let has_inputs = !inputs.is_empty();
    let has_outputs = !outputs.is_empty();
    let mut widget_y = label_h + label_h / 2.0;
    let mut bottom = inputs
        .iter()
        .chain(outputs.iter())
        .map(|port| port.end().y)
        .fold(0.0, f32::max);

    for (index, widget) in content.widgets.iter().enumerate() {
        let widget_x = if !has_inputs {
            WIDGET_SIDE_INSET
        } else if !has_outputs {
            width - widget.size.x - WIDGET_SIDE_INSET
        } else {
            width / 2.0 - widget.size.x / 2.0
        };
        frame.push(ElementId::Widget(index), Pos2::new(widget_x, widget_y));
        bottom = bottom.max(widget_y + widget.size.y);
        widget_y += widget.size.y + PORT_SPACING;
    }

    frame.size.y = base_height.max(bottom + MARGIN);
    frame
}

/// Ports along the top and bottom edges, label and widgets in between.
fn layout_horizontal(content: &ContentDescriptor) -> Frame {
    let label = content.label;
    let label_h = label.y;

    let input_band = edge_band(content, PortType::Input);
    let output_band = edge_band(content, PortType::Output);

    let padded = |extent: f32, pad: f32| if extent > 0.0 { extent + pad } else { 0.0 };
    let width = content
        .width_hint
        .max(label.x + BASE_WIDTH_PAD)
        .max(padded(
            port_layout::stacked_extent(&content.inputs, Axis::Horizontal),
            2.0 * MARGIN,
        ))
        .max(padded(
            port_layout::stacked_extent(&content.outputs, Axis::Horizontal),
            2.0 * MARGIN,
        ))
        .max(padded(widest_widget(content), 2.0 * WIDGET_SIDE_INSET));

    let label_y = input_band + LABEL_TOP_INSET;
    let mut frame = Frame {
        size: Vec2::new(width, 0.0),
        label_y,
        placements: Vec::new(),
    };

    frame.push(
        ElementId::Label,
        Pos2::new(width / 2.0 - label.x / 2.0, label_y),
    );
    if content.icon.is_some() {
        frame.push(
            ElementId::Icon,
            Pos2::new(ICON_INSET[0], ICON_INSET[1] + input_band),
        );
    }

    let mut content_bottom = label_y + label_h;
    let mut widget_y = content_bottom + label_h / 2.0;
    let mut widgets = Vec::with_capacity(content.widgets.len());
    for (index, widget) in content.widgets.iter().enumerate() {
        widgets.push((
            index,
            Pos2::new(width / 2.0 - widget.size.x / 2.0, widget_y),
        ));
        content_bottom = widget_y + widget.size.y;
        widget_y += widget.size.y + PORT_SPACING;
    }

    // padding above and below the label adds up to BASE_HEIGHT_PAD
    let bottom_pad = BASE_HEIGHT_PAD - LABEL_TOP_INSET;
    frame.size.y = (label_h + BASE_HEIGHT_PAD).max(content_bottom + output_band + bottom_pad);

    let inputs =
        port_layout::layout_ports_along_edge(&content.inputs, PortType::Input, frame.size);
    let outputs =
        port_layout::layout_ports_along_edge(&content.outputs, PortType::Output, frame.size);
    frame.push_ports(&inputs);
    frame.push_ports(&outputs);
    for (index, position) in widgets {
        frame.push(ElementId::Widget(index), position);
    }

    frame
}

/// Depth the ports of one edge reach into the node, labels included
fn edge_band(content: &ContentDescriptor, port_type: PortType) -> f32 {
    use crate::constants::layout::{EDGE_OFFSET, OUTPUT_EDGE_INSET, PORT_LABEL_CORRECTION};

    let inset = match port_type {
        PortType::Input => EDGE_OFFSET,
        PortType::Output => OUTPUT_EDGE_INSET,
    };
    content
        .ports(port_type)
        .iter()
        .filter(|port| port.visible)
        .map(|port| {
            let label = port
                .shown_label()
                .map_or(0.0, |label| label.y + PORT_LABEL_CORRECTION);
            inset + port.size.y / 2.0 + label
        })
        .fold(0.0, f32::max)
}

fn regions(
    content: &ContentDescriptor,
    size: Vec2,
    label_y: f32,
    treatments: &RegionTreatments,
) -> Vec<Region> {
    let inset = Rect::from_min_size(
        Pos2::new(MARGIN, MARGIN),
        Vec2::new(
            (size.x - MARGIN * 2.0).max(0.0),
            (size.y - MARGIN * 2.0).max(0.0),
        ),
    );

    let mut regions = Vec::with_capacity(3);
    let body = match content.shape {
        NodeShape::Plain => inset,
        NodeShape::Stacked => {
            regions.push(Region {
                kind: RegionKind::BackPlate,
                rect: inset.translate(Vec2::new(PLATE_OFFSET / 2.0, PLATE_OFFSET + 1.0)),
                treatment: Treatment::Intrinsic,
            });
            inset.translate(Vec2::new(-PLATE_OFFSET, -PLATE_OFFSET))
        }
    };
    regions.push(Region {
        kind: RegionKind::Body,
        rect: body,
        treatment: treatments.body,
    });

    let [pad_x, pad_y] = LABEL_BACKING_PADDING;
    regions.push(Region {
        kind: RegionKind::LabelBacking,
        rect: Rect::from_min_size(
            Pos2::new(body.left(), label_y + (MARGIN - LABEL_TOP_INSET) + pad_y),
            Vec2::new(
                (inset.width() - pad_x - MARGIN).max(0.0),
                (content.label.y - pad_y * 2.0).max(0.0),
            ),
        ),
        treatment: treatments.label,
    });

    regions
}
