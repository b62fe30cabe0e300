// UI Layer
pub mod components;
pub mod layout;
pub mod theme;

pub use layout::{calculate_areas, determine_mode, LayoutAreas, LayoutMode, MIN_HEIGHT, MIN_WIDTH};
pub use theme::Theme;

pub use components::{
    CommandBar, Dialog, DialogKind, DialogResult, ExportForm, FormField, InputView, CompactView,
};
