// ABOUTME: Library module for wp-light-db
// ABOUTME: Exports all core functionality for use in binary and tests

pub mod commands;
pub mod compress;
pub mod export;
pub mod filters;
pub mod mysql;
pub mod stats;
pub mod utils;
