//! CLI command implementations

pub mod send;
