// Data Models
pub mod directory_picker;
pub mod export_job;
pub mod file_context;
pub mod project;
pub mod recents;
pub mod settings;

pub use directory_picker::DirectoryPicker;
pub use export_job::{
    ExportEvent, ExportJob, ExportMode, ExportSource, ExportState, ExportSummary,
};
pub use file_context::{FileContext, MenuContext, SourcePaths};
pub use project::ProjectConfig;
pub use recents::{FolderType, RecentEntry, Recents};
pub use settings::{ExportLocation, MoveDirection, Settings};
