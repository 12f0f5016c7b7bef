//! Step definitions for sync run scenarios.

pub mod world;

mod given;
mod then;
mod when;
