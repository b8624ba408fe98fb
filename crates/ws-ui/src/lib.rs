//! UI chrome for the story viewer: theme, navigation bar, filter controls

mod controls;
mod navigation;
mod theme;

pub use controls::ControlPanel;
pub use navigation::NavigationBar;
pub use theme::{accent_color, apply_theme};
