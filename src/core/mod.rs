// Core Logic
pub mod actions;
pub mod destinations;
pub mod naming;
pub mod session;

pub use naming::SequenceMode;
pub use session::{confirm_plan, Collision, ExportPlan, ExportSession, OverwritePrompt};
