// Library module for mvn-sweep
// Re-exports modules for use in integration tests and the binary

pub mod cli;
pub mod sweep;
