//! End-to-end command handling: translate, prepare hardware, synthesize,
//! dispatch.

mod runner;
mod types;

pub use runner::CommandOrchestrator;
pub use types::{CommandError, CommandOutcome};
