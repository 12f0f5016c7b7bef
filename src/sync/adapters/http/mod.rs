//! HTTP clients for Todoist and Habitica built on `reqwest`.

mod habitica;
mod todoist;

pub use habitica::{DEFAULT_HABITICA_URL, HabiticaClient};
pub use todoist::{DEFAULT_TODOIST_URL, TodoistClient};
