//! Fixed layout parameters and default values
//!
//! Centralized location for every hard-coded value the geometry engine uses.
//! These are part of the layout algorithm and are not changed at run time.

/// Node body and port layout constants
pub mod layout {
    /// Inset from the bounding box to the drawn node body
    pub const MARGIN: f32 = 6.0;

    /// Inward offset of input ports from the left (or top) edge
    pub const EDGE_OFFSET: f32 = 3.0;

    /// Inward offset of output ports from the right (or bottom) edge
    pub const OUTPUT_EDGE_INSET: f32 = EDGE_OFFSET + MARGIN;

    /// Gap between two consecutive stacked ports or widgets
    pub const PORT_SPACING: f32 = 1.0;

    /// Distance a port's label text falls away from the port
    pub const PORT_FALLOFF: f32 = 15.0;

    /// Horizontal label offset applied relative to the port
    pub const PORT_TEXT_FALLOFF: f32 = PORT_FALLOFF - 2.0;

    /// Vertical correction aligning a port label to its port
    pub const PORT_LABEL_CORRECTION: f32 = 1.5;

    /// Top-left inset of the node icon
    pub const ICON_INSET: [f32; 2] = [5.0, 6.0];

    /// Distance of the node label from the top of the node
    pub const LABEL_TOP_INSET: f32 = 5.0;

    /// Width added to the measured content width
    pub const BASE_WIDTH_PAD: f32 = 8.0;

    /// Height added to the label height
    pub const BASE_HEIGHT_PAD: f32 = 10.0;

    /// Horizontal and vertical padding of the label backing rectangle
    pub const LABEL_BACKING_PADDING: [f32; 2] = [3.0, 2.0];

    /// Offset between the front and back plates of a stacked node
    pub const PLATE_OFFSET: f32 = 3.0;

    /// Side inset of widgets anchored to the left or right
    pub const WIDGET_SIDE_INSET: f32 = 10.0;
}

/// Node defaults
pub mod node {
    /// Default size of a port before it is measured
    pub const DEFAULT_PORT_SIZE: [f32; 2] = [22.0, 22.0];

    /// Default icon size
    pub const DEFAULT_ICON_SIZE: [f32; 2] = [18.0, 18.0];
}

/// Fixed-advance text metrics used when no font backend is available
pub mod metrics {
    /// Horizontal advance per character
    pub const CHAR_WIDTH: f32 = 7.0;

    /// Height of a single line of text
    pub const LINE_HEIGHT: f32 = 14.0;
}
