//! Backend worker: owns the async runtime and the analysis client, off the UI thread.

pub mod commands;
pub mod runtime;
