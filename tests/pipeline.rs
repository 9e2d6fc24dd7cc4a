use med_lane::agents::runner::{PROGRESS_COMPLETE, PROGRESS_INITIALIZING};
use med_lane::agents::{
    default_pipeline, AgentStatus, RunEvent, RunOutcome, ScriptedFailure, StageRunner, TaskStatus,
};
use med_lane::catalog::Catalog;
use med_lane::controller::RunState;
use med_lane::models::{ThemeMode, View};
use med_lane::{Screen, ViewController};
use std::time::Duration;

fn controller() -> ViewController {
    ViewController::new(Catalog::demo(), default_pipeline(), ThemeMode::Dark)
}

#[tokio::test(start_paused = true)]
async fn test_dashboard_to_processing_and_back() {
    let mut controller = controller();

    let session_id = controller.select_drug(1).unwrap();
    assert!(controller.confirm("new indication").is_err());
    controller.mark_loaded(session_id);

    assert!(controller.confirm("  ").is_err());
    assert_eq!(controller.view(), View::Research);

    let ticket = controller.confirm("low-dose cardioprotection").unwrap();
    assert_eq!(ticket.modification, "low-dose cardioprotection");
    assert_eq!(controller.progress(), PROGRESS_INITIALIZING);

    let runner = StageRunner::new(Duration::from_millis(300))
        .with_policy(ScriptedFailure::demo());
    let mut agents = ticket.agents;
    let mut events: Vec<RunEvent> = Vec::new();

    let started = tokio::time::Instant::now();
    let outcome = runner.run(&mut agents, &mut events).await;
    assert_eq!(started.elapsed(), Duration::from_millis(900));
    assert_eq!(outcome, RunOutcome::Completed { failed_tasks: 1 });

    for event in &events {
        assert!(controller.apply_run_event(ticket.run_id, event));
    }
    assert!(!controller.can_return());
    assert!(controller.finish_run(ticket.run_id, outcome));
    assert!(controller.can_return());

    let screen = Screen::project(&controller);
    assert_eq!(screen.progress, PROGRESS_COMPLETE);
    assert!(screen
        .agents
        .iter()
        .all(|a| a.status == AgentStatus::Completed));
    assert_eq!(screen.agents, agents);
    assert_eq!(screen.agents[1].tasks[3].status, TaskStatus::Failed);
    assert_eq!(screen.task_totals(), (11, 11));

    controller.return_to_dashboard();
    let screen = Screen::project(&controller);
    assert_eq!(screen.view, View::Dashboard);
    assert!(screen.research.is_none());
    assert_eq!(screen.history, ["Aspirin"]);
    assert_eq!(screen.cards.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_second_run_ignores_first_run_events() {
    let mut controller = controller();
    let runner = StageRunner::new(Duration::from_millis(30));

    let session_id = controller.select_drug(2).unwrap();
    controller.mark_loaded(session_id);
    let first = controller.confirm("extended release").unwrap();

    // Abandon the first run before it reports anything
    controller.return_to_dashboard();
    assert_eq!(*controller.run_state(), RunState::Idle);

    let session_id = controller.select_drug(2).unwrap();
    controller.mark_loaded(session_id);
    let second = controller.confirm("pediatric dosing").unwrap();
    assert_ne!(first.run_id, second.run_id);

    let mut stale = first.agents.clone();
    let mut stale_events: Vec<RunEvent> = Vec::new();
    runner.run(&mut stale, &mut stale_events).await;
    assert!(stale_events
        .iter()
        .all(|e| !controller.apply_run_event(first.run_id, e)));
    assert!(controller.agents().iter().all(|a| a.status == AgentStatus::Pending));

    let mut agents = second.agents.clone();
    let mut events: Vec<RunEvent> = Vec::new();
    let outcome = runner.run(&mut agents, &mut events).await;
    assert_eq!(outcome, RunOutcome::Completed { failed_tasks: 0 });
    for event in &events {
        controller.apply_run_event(second.run_id, event);
    }
    assert!(!controller.finish_run(first.run_id, outcome.clone()));
    assert!(controller.finish_run(second.run_id, outcome));
    assert_eq!(controller.history(), ["Metformin"]);
}
