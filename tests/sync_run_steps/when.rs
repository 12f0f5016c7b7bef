//! When steps for sync run BDD scenarios.

use super::world::{SyncWorld, run_async};
use habitsync::sync::domain::{SourceTask, SourceTaskId};
use rstest_bdd_macros::when;

#[when("the sync runs")]
fn sync_runs(world: &mut SyncWorld) {
    world.last_result = Some(run_async(world.orchestrator().run()));
}

#[when(r#"task "{id}" is checked in Todoist"#)]
fn task_checked(world: &mut SyncWorld, id: String) -> Result<(), eyre::Report> {
    let stored = world
        .history
        .snapshot()
        .and_then(|history| history.get(&SourceTaskId::new(id.as_str())).cloned())
        .and_then(|record| record.last_known_source_task)
        .ok_or_else(|| eyre::eyre!("task {id} has not been synced"))?;
    world.source.upsert(SourceTask {
        checked: true,
        ..stored
    });
    Ok(())
}

#[when(r#"task "{id}" is deleted in Todoist"#)]
fn task_deleted(world: &mut SyncWorld, id: String) {
    world.source.delete(&SourceTaskId::new(id));
}
