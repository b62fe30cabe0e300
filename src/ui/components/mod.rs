// UI Components
pub mod command_bar;
pub mod compact_view;
pub mod dialog;
pub mod export_form;

// Re-export components for convenience
pub use command_bar::CommandBar;
pub use dialog::{Dialog, DialogKind, DialogResult};
pub use export_form::{ExportForm, FormField, InputView};
pub use compact_view::CompactView;
