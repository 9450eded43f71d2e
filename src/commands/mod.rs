// ABOUTME: Command implementations for the CLI
// ABOUTME: Exports the light database export command

pub mod export;

pub use export::export;
