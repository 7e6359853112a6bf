// File I/O operations

pub mod error;
pub mod native;

pub use error::IoError;
