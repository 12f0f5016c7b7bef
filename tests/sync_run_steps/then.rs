//! Then steps for sync run BDD scenarios.

use super::world::SyncWorld;
use habitsync::sync::{
    adapters::memory::TargetCall,
    domain::{Attribute, ScoreDirection, SourceTaskId},
    services::SyncReport,
};
use rstest_bdd_macros::then;

fn last_report(world: &SyncWorld) -> Result<SyncReport, eyre::Report> {
    match world.last_result.as_ref() {
        Some(Ok(report)) => Ok(*report),
        Some(Err(err)) => Err(eyre::eyre!("sync run failed: {err}")),
        None => Err(eyre::eyre!("the sync has not run")),
    }
}

fn count_calls(world: &SyncWorld, matches: impl Fn(&TargetCall) -> bool) -> u64 {
    let count = world.target.calls().iter().filter(|call| matches(call)).count();
    u64::try_from(count).unwrap_or(u64::MAX)
}

#[then("Habitica received {count:u64} create call")]
fn received_creates(world: &SyncWorld, count: u64) -> Result<(), eyre::Report> {
    last_report(world)?;
    let creates = count_calls(world, |call| matches!(call, TargetCall::Create(_)));
    if creates != count {
        return Err(eyre::eyre!("expected {count} creates, found {creates}"));
    }
    Ok(())
}

#[then("Habitica received {count:u64} delete call")]
fn received_deletes(world: &SyncWorld, count: u64) -> Result<(), eyre::Report> {
    last_report(world)?;
    let calls = world.target.calls();
    let deletes = count_calls(world, |call| matches!(call, TargetCall::Delete(_)));
    if deletes != count || count_calls(world, |_| true) != count {
        return Err(eyre::eyre!("expected only {count} deletes, got {calls:?}"));
    }
    Ok(())
}

#[then("Habitica received no calls")]
fn received_no_calls(world: &SyncWorld) -> Result<(), eyre::Report> {
    let report = last_report(world)?;
    let calls = world.target.calls();
    if !calls.is_empty() || report.writes() != 0 {
        return Err(eyre::eyre!("expected no writes, got {calls:?}"));
    }
    Ok(())
}

#[then(r#"Habitica received a "{direction}" score followed by an update"#)]
fn received_score_then_update(world: &SyncWorld, direction: String) -> Result<(), eyre::Report> {
    last_report(world)?;
    let expected = match direction.as_str() {
        "up" => ScoreDirection::Up,
        "down" => ScoreDirection::Down,
        other => return Err(eyre::eyre!("unknown score direction {other}")),
    };
    match world.target.calls().as_slice() {
        [TargetCall::Score(scored, found), TargetCall::Update(updated, _)]
            if scored == updated && *found == expected =>
        {
            Ok(())
        }
        other => Err(eyre::eyre!("expected score then update, got {other:?}")),
    }
}

#[then(r#"the created task "{text}" has attribute "{attribute}""#)]
fn created_task_attribute(
    world: &SyncWorld,
    text: String,
    attribute: String,
) -> Result<(), eyre::Report> {
    let expected = Attribute::from_label_name(&attribute)
        .ok_or_else(|| eyre::eyre!("unknown attribute {attribute}"))?;
    let calls = world.target.calls();
    let payload = calls
        .iter()
        .find_map(|call| match call {
            TargetCall::Create(payload) if payload.text == text => Some(payload),
            _ => None,
        })
        .ok_or_else(|| eyre::eyre!("no create call for {text}"))?;
    if payload.attribute != Some(expected) {
        return Err(eyre::eyre!(
            "expected attribute {expected}, found {:?}",
            payload.attribute
        ));
    }
    Ok(())
}

#[then(r#"the history tracks task "{id}""#)]
fn history_tracks(world: &SyncWorld, id: String) -> Result<(), eyre::Report> {
    let history = world
        .history
        .snapshot()
        .ok_or_else(|| eyre::eyre!("history was never saved"))?;
    let record = history
        .get(&SourceTaskId::new(id.as_str()))
        .ok_or_else(|| eyre::eyre!("history has no record for {id}"))?;
    if record.target_id().is_none() {
        return Err(eyre::eyre!("record for {id} has no Habitica id"));
    }
    Ok(())
}

#[then(r#"the history no longer tracks task "{id}""#)]
fn history_forgets(world: &SyncWorld, id: String) -> Result<(), eyre::Report> {
    let history = world
        .history
        .snapshot()
        .ok_or_else(|| eyre::eyre!("history was never saved"))?;
    if history.get(&SourceTaskId::new(id.as_str())).is_some() {
        return Err(eyre::eyre!("history still tracks {id}"));
    }
    Ok(())
}
