//! Shared world state for sync run BDD scenarios.

use std::sync::Arc;

use habitsync::sync::{
    adapters::memory::{InMemoryHistoryStore, InMemorySourceService, InMemoryTargetService},
    domain::SourceLabel,
    services::{SyncError, SyncOrchestrator, SyncReport},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Orchestrator type used by the BDD world.
pub type TestOrchestrator = SyncOrchestrator<
    InMemorySourceService,
    InMemoryTargetService,
    InMemoryHistoryStore,
    DefaultClock,
>;

/// Scenario world for sync run behaviour tests.
pub struct SyncWorld {
    pub source: InMemorySourceService,
    pub target: InMemoryTargetService,
    pub history: InMemoryHistoryStore,
    pub labels: Vec<SourceLabel>,
    pub last_result: Option<Result<SyncReport, SyncError>>,
}

impl SyncWorld {
    /// Creates a world with empty Todoist and Habitica accounts.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: InMemorySourceService::new(),
            target: InMemoryTargetService::new(),
            history: InMemoryHistoryStore::new(),
            labels: Vec::new(),
            last_result: None,
        }
    }

    /// Builds an orchestrator sharing this world's adapters.
    pub fn orchestrator(&self) -> TestOrchestrator {
        SyncOrchestrator::new(
            Arc::new(self.source.clone()),
            Arc::new(self.target.clone()),
            Arc::new(self.history.clone()),
            Arc::new(DefaultClock),
        )
    }
}

impl Default for SyncWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SyncWorld {
    SyncWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
