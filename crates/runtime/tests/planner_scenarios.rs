//! End-to-end planner scenarios on hand-built and bundled boards.

use std::path::PathBuf;
use std::sync::Arc;

use game_content::{MapLoader, ScenarioLoader};
use game_core::{
    AiConfig, BoardSnapshot, BoardView, DistanceMetric, FieldConfig, Ghost, GhostColor, Layout,
    MoveCommand, PlannerConfig, Tile,
};
use runtime::{
    DecisionState, DistanceOracle, DistanceResolver, GhostMotionPredictor, Goal, GoalSelector,
    MazeDistanceTable, NullPresenter, Planner, PotentialField, TickDecision, find_path,
};
use tokio::time::Instant;

fn seeded_config() -> AiConfig {
    AiConfig {
        planner: PlannerConfig {
            rng_seed: Some(42),
            ..PlannerConfig::default()
        },
        ..AiConfig::default()
    }
}

fn open_floor() -> Layout {
    Layout::open_rect(Tile::new(1, 1), 10, 10)
}

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../game/content/data/scenarios")
        .join(name)
}

#[test]
fn lone_pellet_on_open_floor() {
    let board = BoardSnapshot::builder(open_floor().with_pellet(Tile::new(5, 7)))
        .agent(Tile::new(5, 5))
        .build()
        .expect("board should build");
    let config = FieldConfig::default();
    let distances = DistanceResolver::new(DistanceMetric::Euclidean);
    let field = PotentialField::new(&config).compute(&board, &distances);

    let pellet = field.score(Tile::new(5, 7)).expect("pellet tile is walkable");
    assert!(pellet < 0.0);
    assert!(field.iter().all(|(_, score)| score >= pellet));

    let path = find_path(
        Tile::new(5, 5),
        Tile::new(5, 7),
        &board,
        &field,
        &distances,
        &Default::default(),
    );
    assert_eq!(path, vec![Tile::new(5, 6), Tile::new(5, 7)]);
}

#[test]
fn frightened_neighbour_becomes_the_goal() {
    let board = BoardSnapshot::builder(open_floor())
        .agent(Tile::new(5, 5))
        .ghost(Ghost::new(GhostColor::Pink, Tile::new(5, 6)).frightened(true))
        .build()
        .expect("board should build");
    let config = seeded_config();
    let distances = DistanceResolver::new(DistanceMetric::Euclidean);
    let field = PotentialField::new(&config.field);

    let contribution = field.ghost_contribution(&board, Tile::new(5, 6), &distances);
    assert!(contribution < 0.0);

    let map = field.compute(&board, &distances);
    let mut predictor = GhostMotionPredictor::default();
    predictor.observe(&board);
    let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(1);
    let goal = GoalSelector::new(&config.goal)
        .select(&board, &map, &predictor, &distances, &mut rng)
        .expect("goal should be selected");
    assert!(matches!(goal, Goal::Seek { .. }));
    assert_eq!(goal.tile(), Tile::new(5, 6));
}

#[test]
fn three_pellets_left_is_fifty_fold() {
    let layout = open_floor()
        .with_pellet(Tile::new(2, 2))
        .with_pellet(Tile::new(9, 9))
        .with_pellet(Tile::new(2, 9));
    let board = BoardSnapshot::builder(layout)
        .agent(Tile::new(5, 5))
        .build()
        .expect("board should build");
    assert_eq!(board.pellets_remaining(), 3);

    let config = FieldConfig {
        cluster_weight: 0.0,
        ..FieldConfig::default()
    };
    let field = PotentialField::new(&config);
    assert_eq!(
        field.pellet_contribution(&board, Tile::new(2, 2)),
        50.0 * config.pellet_boost
    );
}

#[tokio::test(start_paused = true)]
async fn planner_walks_to_the_pellet_over_several_ticks() {
    let layout = open_floor().with_pellet(Tile::new(5, 8));
    let ghost = Ghost::new(GhostColor::Red, Tile::new(10, 1));
    let mut planner = Planner::new(seeded_config());
    let mut agent = Tile::new(5, 5);
    let mut decisions: Vec<TickDecision> = Vec::new();

    for sequence in 0..3u64 {
        let board = BoardSnapshot::builder(layout.clone())
            .agent(agent)
            .ghost(ghost)
            .sequence(game_core::Tick::new(sequence))
            .build()
            .expect("board should build");
        let decision = planner
            .tick(&board, Instant::now(), &NullPresenter)
            .expect("tick should succeed")
            .expect("ghost present, decision expected");
        assert_eq!(decision.sequence.0, sequence);
        agent = decision.target;
        decisions.push(decision);
    }

    assert!(
        decisions
            .iter()
            .all(|decision| decision.command == MoveCommand::Right)
    );
    assert_eq!(agent, Tile::new(5, 8));
    assert!(
        decisions
            .iter()
            .all(|decision| decision.state == DecisionState::Replanning)
    );
}

#[tokio::test(start_paused = true)]
async fn classic_opening_moves_along_a_corridor() {
    let board = ScenarioLoader::load(&scenario_path("classic_start.ron"))
        .expect("bundled scenario should load");
    let mut planner = Planner::new(seeded_config());

    let decision = planner
        .tick(&board, Instant::now(), &NullPresenter)
        .expect("tick should succeed")
        .expect("ghosts present, decision expected");

    assert!(decision.command.is_move());
    assert!(decision.target.is_adjacent(board.agent_location()));
    assert!(board.is_walkable(decision.target));
}

#[tokio::test(start_paused = true)]
async fn maze_distances_drive_the_planner() {
    let layout = MapLoader::classic().expect("classic maze should load");
    let board = BoardSnapshot::builder(layout)
        .ghost(Ghost::new(GhostColor::Red, Tile::new(11, 13)))
        .build()
        .expect("board should build");

    let table = Arc::new(MazeDistanceTable::build(&board));
    assert!(!table.is_empty());
    // Three columns apart, but the wall between them forces a detour.
    assert_eq!(
        table.lookup(Tile::new(22, 12), Tile::new(22, 15)),
        Some(5.0)
    );
    assert_eq!(
        table.lookup(Tile::new(23, 13), Tile::new(23, 14)),
        Some(1.0)
    );

    let distances = DistanceResolver::with_oracle(DistanceMetric::Euclidean, table);
    let mut planner = Planner::with_distances(seeded_config(), distances);
    let decision = planner
        .tick(&board, Instant::now(), &NullPresenter)
        .expect("tick should succeed")
        .expect("decision expected");
    assert!(decision.command.is_move());
    assert!(decision.target.is_adjacent(Tile::new(23, 13)));
}
