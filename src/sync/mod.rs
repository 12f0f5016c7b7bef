//! Todoist to Habitica task reconciliation.
//!
//! A sync run loads the previous history, pulls the Todoist delta since the
//! stored cursor, works out which tasks changed, translates each changed task
//! into a Habitica payload and replays the writes one at a time before
//! persisting the new history. The module follows hexagonal architecture:
//!
//! - Domain types and pure parsers in [`domain`]
//! - Port contracts for both services and the history file in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Change detection, translation and the run orchestrator in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
