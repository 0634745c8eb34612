//! Editor-side state that sits above individual graphs

pub mod view_manager;

pub use view_manager::{GraphView, ViewManager};
