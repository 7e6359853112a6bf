//! Terminal front end for RetroCalc: key handling, screen rendering and the
//! event loop. The binary in `main.rs` wires these to settings and the CLI.

pub mod logging;
pub mod tui;
mod util;
