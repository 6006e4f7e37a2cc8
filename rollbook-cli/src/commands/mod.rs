//! Command implementations for the rollbook CLI

pub mod serve;

pub use serve::run_serve;
