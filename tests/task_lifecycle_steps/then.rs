//! Then steps for task lifecycle BDD scenarios.

use super::world::TaskLifecycleWorld;
use rstest_bdd_macros::then;
use taskboard::task::domain::TaskStatus;

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = world.task()?;

    eyre::ensure!(
        task.status() == expected,
        "expected status {expected}, found {}",
        task.status()
    );
    Ok(())
}

#[then("the task has a completion time")]
fn task_has_completion_time(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let task = world.task()?;
    eyre::ensure!(
        task.completed_at().is_some(),
        "expected a completion time on {task:?}"
    );
    Ok(())
}

#[then("the task has no completion time")]
fn task_has_no_completion_time(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let task = world.task()?;
    eyre::ensure!(
        task.completed_at().is_none(),
        "expected no completion time on {task:?}"
    );
    Ok(())
}

#[then("the operation fails because the task was not found")]
fn operation_not_found(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the operation to fail"))?;
    eyre::ensure!(err.is_not_found(), "expected not found, got {err:?}");
    Ok(())
}

#[then("the completion time has not moved backwards")]
fn completion_time_not_earlier(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let earlier = world
        .earlier_completion
        .ok_or_else(|| eyre::eyre!("missing earlier completion time"))?;
    let latest = world
        .task()?
        .completed_at()
        .ok_or_else(|| eyre::eyre!("missing completion time"))?;
    eyre::ensure!(
        latest >= earlier,
        "completion time moved from {earlier} back to {latest}"
    );
    Ok(())
}
