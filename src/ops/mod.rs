//! Operations that implement gopass-lookup commands.
//!
//! Each submodule corresponds to a CLI subcommand and exposes a `run()` function.

pub mod completions;
pub mod lookup;
pub mod render;
