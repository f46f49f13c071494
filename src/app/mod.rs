// LogScan - app/mod.rs
//
// Application layer: orchestration of the requested scans.
// Dependencies: core layer, platform::fs for opening files.

pub mod scan;
