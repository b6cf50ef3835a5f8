//! Policy Server - application approval storage
//!
//! Wires the persistence layer to its configuration, logging and the HTTP
//! approval vendor, and exposes the `policy` command line.

pub mod cli;
pub mod model;
pub mod startup;
pub mod sync;
