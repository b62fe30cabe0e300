// System Layer
pub mod archive;
pub mod context;
pub mod filesystem;
pub mod host;
pub mod settings;
pub mod worker;

pub use context::{provide_context, ContextProvider};
pub use host::{HostServices, LocalHost};
pub use settings::{LoadedSettings, SettingsStore};
pub use worker::ExportWorker;
