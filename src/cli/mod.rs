pub mod context;
pub mod entry;
pub mod prompts;
pub mod prune;

pub use context::CliContext;
pub use entry::{Args, GlobalOptions, run, run_with_prompt};
pub use prompts::Prompt;
pub use prune::PruneArgs;
