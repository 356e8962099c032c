//! Event log input.

pub mod reader;
