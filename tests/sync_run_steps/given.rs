//! Given steps for sync run BDD scenarios.

use super::world::{SyncWorld, run_async};
use eyre::WrapErr;
use habitsync::sync::domain::{DueInfo, LabelId, SourceLabel, SourceTask};
use rstest_bdd_macros::given;

#[given(r#"a Todoist label "{id}" named "{name}""#)]
fn todoist_label(world: &mut SyncWorld, id: String, name: String) {
    world.labels.push(SourceLabel::new(id, name));
    world.source.set_labels(world.labels.clone());
}

#[given(r#"a Todoist task "{id}" titled "{content}""#)]
fn todoist_task(world: &mut SyncWorld, id: String, content: String) {
    world.source.upsert(SourceTask::new(id, content));
}

#[given(r#"a labelled Todoist task "{id}" titled "{content}" with label "{label}""#)]
fn todoist_task_with_label(world: &mut SyncWorld, id: String, content: String, label: String) {
    world
        .source
        .upsert(SourceTask::new(id, content).with_labels([LabelId::new(label)]));
}

#[given(r#"a recurring Todoist task "{id}" titled "{content}" due "{date}" "{phrase}""#)]
fn recurring_todoist_task(
    world: &mut SyncWorld,
    id: String,
    content: String,
    date: String,
    phrase: String,
) {
    world
        .source
        .upsert(SourceTask::new(id, content).with_due(DueInfo::recurring(date, phrase)));
}

#[given("the sync has run")]
fn sync_has_run(world: &mut SyncWorld) -> Result<(), eyre::Report> {
    run_async(world.orchestrator().run()).wrap_err("initial sync run")?;
    world.target.clear_calls();
    Ok(())
}
