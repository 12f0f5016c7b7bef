//! Habitsync: mirrors a Todoist task list into Habitica.
//!
//! Each run reconciles the Todoist tasks that changed since the previous run
//! with their Habitica counterparts, translating recurrence phrases into
//! dailies and labels into skill attributes, then records what was synced.
//!
//! # Architecture
//!
//! Habitsync follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (HTTP, files, memory)
//!
//! # Modules
//!
//! - [`sync`]: Change detection, translation and the sync run
//! - [`config`]: Command-line settings and their validation

pub mod config;
pub mod sync;
