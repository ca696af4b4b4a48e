//! Streaming primitives for shell-first SSR.
//!
//! - `Shell` / `HeadContent` - Document opening and closing
//! - `StreamingSink` - Writes the shell, then named page regions, in order

mod shell;
mod sink;

pub use shell::*;
pub use sink::*;
