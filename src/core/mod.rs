// LogScan - core/mod.rs
//
// Core business logic layer.
// Works on `BufRead` / `Write` trait objects only.
// Must NOT depend on: app, platform, or open files itself.

pub mod duration;
pub mod filter;
pub mod lines;
pub mod timestamp;
