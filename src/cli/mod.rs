mod args;
mod commands;
mod repl;
pub(crate) mod theme;
#[doc(hidden)]
pub mod test_support;
mod timeline;

pub use args::CliArgs;
pub use repl::{AppState, UiRegions, run_repl};
