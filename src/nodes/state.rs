//! Node state and the visual treatment it selects
//!
//! State never moves geometry. It only decides whether the body and label
//! backing regions are painted with the node's own colors or the selection
//! highlight, and whether the disabled overlay is shown.

use crate::theme::colors;
use egui::Color32;
use serde::{Deserialize, Serialize};

/// Interaction state of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NodeState {
    #[default]
    Normal,
    Selected,
    Disabled,
}

/// Which of the two fill/border treatments a region receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Treatment {
    /// The node's own fill and border colors
    Intrinsic,
    /// Selection fill and selection border
    Highlight,
}

/// Treatments for the regions of one node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegionTreatments {
    pub body: Treatment,
    pub label: Treatment,
    pub show_disabled_overlay: bool,
}

/// Maps a node state to its region treatments
pub fn resolve_treatment(state: NodeState) -> RegionTreatments {
    match state {
        NodeState::Selected => RegionTreatments {
            body: Treatment::Highlight,
            label: Treatment::Highlight,
            show_disabled_overlay: false,
        },
        NodeState::Normal => RegionTreatments {
            body: Treatment::Intrinsic,
            label: Treatment::Intrinsic,
            show_disabled_overlay: false,
        },
        NodeState::Disabled => RegionTreatments {
            body: Treatment::Intrinsic,
            label: Treatment::Intrinsic,
            show_disabled_overlay: true,
        },
    }
}

/// A node's intrinsic colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStyle {
    pub color: Color32,
    pub border_color: Color32,
}

impl Default for NodeStyle {
    fn default() -> Self {
        let colors = colors();
        Self {
            color: colors.node_color,
            border_color: colors.node_border,
        }
    }
}

/// Concrete colors for painting one region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreatmentColors {
    pub fill: Color32,
    pub border: Color32,
}

impl Treatment {
    /// Colors for the node body
    pub fn body_colors(self, style: &NodeStyle) -> TreatmentColors {
        match self {
            Treatment::Intrinsic => TreatmentColors {
                fill: style.color,
                border: style.border_color,
            },
            Treatment::Highlight => highlight(),
        }
    }

    /// Colors for the label backing
    pub fn label_colors(self, style: &NodeStyle) -> TreatmentColors {
        match self {
            Treatment::Intrinsic => TreatmentColors {
                fill: colors().label_shade,
                border: style.border_color,
            },
            Treatment::Highlight => highlight(),
        }
    }
}

fn highlight() -> TreatmentColors {
    let colors = colors();
    TreatmentColors {
        fill: colors.selection_fill,
        border: colors.selection_border,
    }
}
