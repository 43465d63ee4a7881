//! # Flood election test cases
//!
//! This subproject provides end-to-end scenarios for the flood election running over
//! the in-process management network.

#[macro_use]
extern crate log;
pub mod cases;
mod steps;
