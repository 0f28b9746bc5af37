//! Board scenario loader.
//!
//! A scenario is a RON file naming a layout plus the dynamic entities of one
//! tick. Scenarios seed demos and regression tests with a concrete
//! [`BoardSnapshot`] without a live server.

use std::path::Path;

use game_core::{BoardSnapshot, Direction, Fruit, GameMode, Ghost, Tick, Tile};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, MapLoader, read_file};

/// Scenario structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScenarioRon {
    /// `"classic"` or a layout path relative to the scenario file.
    map: String,
    #[serde(default)]
    agent: Option<Tile>,
    #[serde(default)]
    agent_heading: Option<Direction>,
    #[serde(default)]
    ghosts: Vec<Ghost>,
    #[serde(default)]
    fruit: Option<Fruit>,
    #[serde(default)]
    mode: GameMode,
    #[serde(default = "default_lives")]
    lives: u8,
    #[serde(default)]
    pellets_remaining: Option<u32>,
    #[serde(default)]
    sequence: u64,
}

fn default_lives() -> u8 {
    3
}

/// Loader for board scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario file and assemble its snapshot.
    pub fn load(path: &Path) -> LoadResult<BoardSnapshot> {
        let content = read_file(path)?;
        Self::from_str(&content, path.parent())
    }

    /// Parse scenario text. Relative layout paths resolve against `base`.
    pub fn from_str(content: &str, base: Option<&Path>) -> LoadResult<BoardSnapshot> {
        let data: ScenarioRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;

        let layout = MapLoader::resolve(&data.map, base)?;
        let mut builder = BoardSnapshot::builder(layout)
            .agent_heading(data.agent_heading)
            .ghosts(data.ghosts)
            .mode(data.mode)
            .lives(data.lives)
            .sequence(Tick::new(data.sequence));

        if let Some(agent) = data.agent {
            builder = builder.agent(agent);
        }
        if let Some(fruit) = data.fruit {
            builder = builder.fruit_at(fruit);
        }
        if let Some(count) = data.pellets_remaining {
            builder = builder.pellets_remaining(count);
        }

        builder
            .build()
            .map_err(|e| anyhow::anyhow!("Invalid scenario: {}", e))
    }
}
