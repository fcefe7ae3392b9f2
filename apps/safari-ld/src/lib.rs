//! # safari-ld
//!
//! Command line front end of the safari-ld metadata compiler.
//!
//! The binary in `main.rs` only initializes logging and dispatches; the
//! modules here hold everything it runs, so tests can drive them directly.

pub mod cli;
pub mod settings;
