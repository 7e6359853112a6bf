//! Process exit codes for the `retrocalc` binary.
//!
//! | Code | Meaning                                         |
//! |------|-------------------------------------------------|
//! | 0    | Session ended with `/SQ`                        |
//! | 1    | Terminal setup or I/O failure during the session |
//! | 2    | CLI usage error (reported by clap)              |
//! | 3    | FILE exists but could not be loaded             |

/// Success - the user quit normally.
pub const EXIT_SUCCESS: u8 = 0;

/// Terminal could not be set up or failed mid-session.
pub const EXIT_ERROR: u8 = 1;

/// Sheet named on the command line is unreadable or not a valid sheet.
pub const EXIT_LOAD: u8 = 3;
