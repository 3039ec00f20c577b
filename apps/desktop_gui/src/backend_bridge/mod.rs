//! Worker thread that runs thumbnail reads and clipboard access off the UI thread.

pub mod commands;
pub mod runtime;
