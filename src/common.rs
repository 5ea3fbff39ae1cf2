// Common utilities

pub mod bit;
pub mod log_format;

pub use log_format::LogFormat;
