//! Centralized color palette for node treatments
//!
//! Single source of truth for the colors the state resolver hands to the
//! rendering backend.

use egui::Color32;

/// Color palette for nodes
#[derive(Debug, Clone)]
pub struct Colors {
    // Intrinsic node colors
    pub node_color: Color32,
    pub node_border: Color32,
    pub group_color: Color32,

    // Selection and highlighting
    pub selection_fill: Color32,
    pub selection_border: Color32,

    /// Translucent backing drawn behind the node label
    pub label_shade: Color32,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            node_color: Color32::from_rgba_unmultiplied(13, 18, 23, 255),
            node_border: Color32::from_rgba_unmultiplied(46, 57, 66, 255),
            group_color: Color32::from_rgb(80, 100, 120),

            selection_fill: Color32::from_rgba_unmultiplied(255, 255, 255, 30),
            selection_border: Color32::from_rgba_unmultiplied(254, 207, 42, 255),

            label_shade: Color32::from_rgba_unmultiplied(0, 0, 0, 80),
        }
    }
}

/// Complete theme
#[derive(Debug, Clone, Default)]
pub struct Theme {
    pub colors: Colors,
}

/// Global theme instance
static GLOBAL_THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(Theme::default);

/// Get the global theme
pub fn theme() -> &'static Theme {
    &GLOBAL_THEME
}

pub fn colors() -> &'static Colors {
    &theme().colors
}
