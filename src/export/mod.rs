// ABOUTME: Export orchestration module
// ABOUTME: Dump service seam and the two-pass export job

pub mod dump;
pub mod job;

pub use dump::{DumpService, MysqldumpService, WriteMode};
pub use job::ExportJob;
