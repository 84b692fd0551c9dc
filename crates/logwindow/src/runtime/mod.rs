//! Runtime module — the binary host: boot, run, render.
//!
//! File access and output live here; the analysis itself never touches
//! the file system.

pub mod boot;
pub mod run;
pub mod render;
