pub mod common;
pub mod completions;
pub mod config;
pub mod preview;
pub mod show;
