//! Worker and runtime behaviour under paused tokio time.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use game_content::ConfigLoader;
use game_core::{
    AiConfig, BoardSnapshot, BoardView, Ghost, GhostColor, Layout, MoveCommand, PlannerConfig,
    Tile,
};
use runtime::{
    DecisionProvider, DecisionState, Event, HoldPositionProvider, OverlayEvent, Presenter,
    PresenterError, PresenterResult, PotentialFieldMap, Runtime, RuntimeConfig, RuntimeError,
    TickDecision, Topic,
};
use tokio::time::{Instant, timeout};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn config() -> RuntimeConfig {
    RuntimeConfig {
        ai: AiConfig {
            planner: PlannerConfig {
                rng_seed: Some(3),
                ..PlannerConfig::default()
            },
            ..AiConfig::default()
        },
        ..RuntimeConfig::default()
    }
}

fn board() -> BoardSnapshot {
    let layout = Layout::open_rect(Tile::new(1, 1), 10, 10).with_pellet(Tile::new(5, 7));
    BoardSnapshot::builder(layout)
        .agent(Tile::new(5, 5))
        .ghost(Ghost::new(GhostColor::Red, Tile::new(10, 10)))
        .build()
        .expect("board should build")
}

/// Emits a decision on every tick and counts how often it was asked.
struct CountingProvider {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl DecisionProvider for CountingProvider {
    async fn decide(
        &mut self,
        board: &dyn BoardView,
        _now: Instant,
    ) -> runtime::Result<Option<TickDecision>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(TickDecision {
            sequence: board.sequence(),
            command: MoveCommand::None,
            target: board.agent_location(),
            state: DecisionState::Replanning,
        }))
    }
}

/// Rejects everything but remembers that it was called.
#[derive(Default)]
struct FailingPresenter {
    calls: AtomicUsize,
}

impl Presenter for FailingPresenter {
    fn show_potential_field(&self, _field: &PotentialFieldMap) -> PresenterResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(PresenterError::Rejected("display offline".into()))
    }

    fn show_path(&self, _path: &[Tile]) -> PresenterResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(PresenterError::Unavailable)
    }
}

#[tokio::test(start_paused = true)]
async fn first_decision_heads_for_the_pellet() {
    init_tracing();
    let mut runtime = Runtime::builder()
        .config(config())
        .planner()
        .build()
        .await
        .expect("runtime should build");
    let mut events = runtime.subscribe(Topic::Decision);

    runtime
        .handle()
        .publish_snapshot(board())
        .expect("worker is running");
    let decision = runtime.next_decision().await.expect("decision expected");

    assert_eq!(decision.command, MoveCommand::Right);
    assert_eq!(decision.target, Tile::new(5, 6));
    match events.recv().await {
        Ok(Event::Decision(published)) => assert_eq!(published, decision),
        other => panic!("unexpected event {other:?}"),
    }

    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test(start_paused = true)]
async fn motionless_agent_triggers_random_walk() {
    init_tracing();
    let mut runtime = Runtime::builder()
        .config(config())
        .planner()
        .build()
        .await
        .expect("runtime should build");
    let started = Instant::now();

    // The snapshot never changes, so every interval tick sees a stalled agent.
    runtime
        .handle()
        .publish_snapshot(board())
        .expect("worker is running");

    let mut stuck = None;
    for _ in 0..50 {
        let decision = runtime.next_decision().await.expect("decision expected");
        if decision.state == DecisionState::Stuck {
            stuck = Some(decision);
            break;
        }
        assert!(decision.command.is_move());
    }

    let stuck = stuck.expect("stall should be detected");
    assert_eq!(stuck.command, MoveCommand::RandomWalk);
    assert!(stuck.target.is_adjacent(Tile::new(5, 5)));
    assert!(started.elapsed() > Duration::from_millis(2_000));

    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test(start_paused = true)]
async fn ghostless_snapshot_is_skipped() {
    init_tracing();
    let mut runtime = Runtime::builder()
        .config(config())
        .planner()
        .build()
        .await
        .expect("runtime should build");
    let handle = runtime.handle();

    let empty = BoardSnapshot::builder(Layout::open_rect(Tile::new(1, 1), 10, 10))
        .agent(Tile::new(5, 5))
        .build()
        .expect("board should build");
    handle.publish_snapshot(empty).expect("worker is running");
    assert!(
        timeout(Duration::from_secs(1), runtime.next_decision())
            .await
            .is_err()
    );

    handle.publish_snapshot(board()).expect("worker is running");
    let decision = timeout(Duration::from_secs(1), runtime.next_decision())
        .await
        .expect("decision should follow a valid snapshot")
        .expect("decision expected");
    assert!(decision.command.is_move());

    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test(start_paused = true)]
async fn presenter_failures_do_not_change_decisions() {
    init_tracing();
    let presenter = Arc::new(FailingPresenter::default());
    let mut failing = Runtime::builder()
        .config(config())
        .planner()
        .presenter(presenter.clone())
        .build()
        .await
        .expect("runtime should build");
    let mut quiet = Runtime::builder()
        .config(config())
        .planner()
        .presenter(Arc::new(runtime::NullPresenter))
        .build()
        .await
        .expect("runtime should build");

    failing.handle().publish_snapshot(board()).expect("running");
    quiet.handle().publish_snapshot(board()).expect("running");

    let with_failures = failing.next_decision().await.expect("decision expected");
    let without = quiet.next_decision().await.expect("decision expected");

    assert_eq!(with_failures, without);
    assert!(presenter.calls.load(Ordering::SeqCst) >= 2);

    failing.shutdown().await.expect("clean shutdown");
    quiet.shutdown().await.expect("clean shutdown");
}

#[tokio::test(start_paused = true)]
async fn outbound_queue_holds_one_decision() {
    init_tracing();
    let calls = Arc::new(AtomicUsize::new(0));
    let mut runtime = Runtime::builder()
        .config(config())
        .provider(CountingProvider {
            calls: calls.clone(),
        })
        .build()
        .await
        .expect("runtime should build");

    runtime
        .handle()
        .publish_snapshot(board())
        .expect("worker is running");
    tokio::time::sleep(Duration::from_secs(1)).await;

    // One decision queued, one more waiting for capacity.
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    runtime.next_decision().await.expect("queued decision");
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test(start_paused = true)]
async fn overlays_are_broadcast() {
    init_tracing();
    let mut runtime = Runtime::builder()
        .config(config())
        .planner()
        .broadcast_overlays(true)
        .build()
        .await
        .expect("runtime should build");
    let mut overlays = runtime.subscribe(Topic::Overlay);

    runtime
        .handle()
        .publish_snapshot(board())
        .expect("worker is running");
    runtime.next_decision().await.expect("decision expected");

    match overlays.recv().await {
        Ok(Event::Overlay(OverlayEvent::Field { cells })) => assert_eq!(cells.len(), 100),
        other => panic!("unexpected event {other:?}"),
    }
    match overlays.recv().await {
        Ok(Event::Overlay(OverlayEvent::Path { tiles })) => {
            assert_eq!(tiles, vec![Tile::new(5, 6), Tile::new(5, 7)]);
        }
        other => panic!("unexpected event {other:?}"),
    }

    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test(start_paused = true)]
async fn worker_exits_when_snapshot_sender_is_dropped() {
    init_tracing();
    let mut runtime = Runtime::builder()
        .config(config())
        .provider(HoldPositionProvider)
        .build()
        .await
        .expect("runtime should build");
    let mut decisions = runtime.take_decisions().expect("receiver available");
    assert!(matches!(
        runtime.next_decision().await,
        Err(RuntimeError::DecisionChannelClosed)
    ));

    drop(runtime);
    let closed = timeout(Duration::from_secs(5), decisions.recv())
        .await
        .expect("worker should stop");
    assert!(closed.is_none());
}

#[tokio::test(start_paused = true)]
async fn worker_exits_when_decision_receiver_is_dropped() {
    init_tracing();
    let mut runtime = Runtime::builder()
        .config(config())
        .provider(HoldPositionProvider)
        .build()
        .await
        .expect("runtime should build");
    let handle = runtime.handle();

    drop(runtime.take_decisions());
    timeout(Duration::from_secs(5), runtime.shutdown())
        .await
        .expect("worker should stop")
        .expect("clean shutdown");

    assert!(matches!(
        handle.publish_snapshot(board()),
        Err(RuntimeError::SnapshotChannelClosed)
    ));
}

#[tokio::test(start_paused = true)]
async fn tuning_file_drives_the_runtime() {
    init_tracing();
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("tuning.toml");
    let mut ai = config().ai;
    ai.planner.stuck_threshold_ms = 500;
    ConfigLoader::save(&path, &ai).expect("tuning should save");

    let loaded = ConfigLoader::load(&path).expect("tuning should load");
    assert_eq!(loaded, ai);

    let mut runtime = Runtime::builder()
        .config(RuntimeConfig {
            ai: loaded,
            ..RuntimeConfig::default()
        })
        .planner()
        .build()
        .await
        .expect("runtime should build");
    let started = Instant::now();
    runtime
        .handle()
        .publish_snapshot(board())
        .expect("worker is running");

    loop {
        let decision = runtime.next_decision().await.expect("decision expected");
        if decision.state == DecisionState::Stuck {
            break;
        }
    }
    assert!(started.elapsed() < Duration::from_millis(2_000));

    runtime.shutdown().await.expect("clean shutdown");
}

#[test]
fn decisions_serialize_for_transport() {
    let decision = TickDecision {
        sequence: game_core::Tick::new(7),
        command: MoveCommand::RandomWalk,
        target: Tile::new(2, 3),
        state: DecisionState::Stuck,
    };
    let json = serde_json::to_value(decision).expect("serializable");
    assert_eq!(json["state"], "stuck");
    assert_eq!(json["target"]["row"], 2);

    let back: TickDecision = serde_json::from_value(json).expect("deserializable");
    assert_eq!(back, decision);
}
