//! Board constants and the tunable parameters of the decision core.
//!
//! Every weight used by the potential field, goal selection, ghost prediction
//! and path search is a field here rather than a literal in the algorithms, so
//! that alternative tunings can be loaded from TOML without recompiling.

/// Board-wide compile-time constants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameConfig;

impl GameConfig {
    /// Number of tile rows on the board.
    pub const ROWS: usize = 31;
    /// Number of tile columns on the board.
    pub const COLS: usize = 28;
    /// Ghosts tracked per snapshot.
    pub const MAX_GHOSTS: usize = 4;
    /// Pellets (normal + super) on a fresh level of the classic maze.
    pub const LEVEL_PELLETS: u32 = 244;
}

/// Root of all decision-core tunables.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiConfig {
    pub field: FieldConfig,
    pub goal: GoalConfig,
    pub prediction: PredictionConfig,
    pub search: SearchConfig,
    pub planner: PlannerConfig,
}

// ============================================================================
// Potential field
// ============================================================================

/// Weights of the avoidance map. Lower tile scores are more desirable.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldConfig {
    /// Base reward of a normal pellet.
    pub pellet_boost: f32,
    /// Pellet reward multipliers keyed by pellets remaining, ascending.
    pub pellet_multipliers: Vec<PelletBreakpoint>,
    /// Half-width of the window used for pellet cluster density.
    pub cluster_radius: u32,
    /// Scale of the cluster density term; `0` disables it.
    pub cluster_weight: f32,

    /// Reward of a super pellet while a threatening ghost is near it.
    pub super_pellet_boost: f32,
    /// Reward of a super pellet when nothing threatens it.
    pub suppressed_super_pellet_boost: f32,
    /// Distance within which a ghost makes a super pellet worth eating.
    pub super_pellet_threat_radius: f32,
    /// Pull toward a threatened super pellet from nearby tiles (`lure / d`).
    pub super_pellet_lure: f32,
    pub super_pellet_lure_radius: f32,

    /// Reward of standing on a fresh fruit.
    pub fruit_boost: f32,
    /// Distance beyond which fruit contributes nothing.
    pub fruit_threshold: f32,

    /// Penalty of sharing a tile with a threatening ghost.
    pub ghost_boost: f32,
    /// Distance beyond which ghosts are ignored.
    pub ghost_threshold: f32,
    /// Below this many pellets the ghost threshold is halved.
    pub endgame_pellets: u32,
    pub ghost_decay: GhostDecay,
    pub color_weights: ColorWeights,
    pub mode_multipliers: ModeMultipliers,
    /// Scale applied to the (negated) contribution of frightened ghosts.
    pub frightened_weight: f32,
    /// Divisor applied to ghosts that are still spawning.
    pub spawning_divisor: f32,

    /// Bonus for the tile straight ahead of the agent.
    pub momentum_bonus: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            pellet_boost: 50.0,
            pellet_multipliers: PelletBreakpoint::defaults(),
            cluster_radius: 2,
            cluster_weight: 0.5,
            super_pellet_boost: 200.0,
            suppressed_super_pellet_boost: 0.0,
            super_pellet_threat_radius: 6.0,
            super_pellet_lure: 150.0,
            super_pellet_lure_radius: 10.0,
            fruit_boost: 600.0,
            fruit_threshold: 5.0,
            ghost_boost: 1000.0,
            ghost_threshold: 8.0,
            endgame_pellets: 10,
            ghost_decay: GhostDecay::default(),
            color_weights: ColorWeights::default(),
            mode_multipliers: ModeMultipliers::default(),
            frightened_weight: 1.0,
            spawning_divisor: 10.0,
            momentum_bonus: 10.0,
        }
    }
}

impl FieldConfig {
    /// Pellet reward factor for the given number of remaining pellets.
    ///
    /// Uses the first breakpoint whose `below` exceeds `remaining`, so the
    /// factor never grows as more pellets remain.
    pub fn pellet_multiplier(&self, remaining: u32) -> f32 {
        self.pellet_multipliers
            .iter()
            .find(|breakpoint| remaining < breakpoint.below)
            .map_or(1.0, |breakpoint| breakpoint.factor)
    }

    /// Ghost ignore distance, tightened near the end of a level.
    pub fn effective_ghost_threshold(&self, pellets_remaining: u32) -> f32 {
        if pellets_remaining < self.endgame_pellets {
            self.ghost_threshold / 2.0
        } else {
            self.ghost_threshold
        }
    }
}

/// `factor` applies while fewer than `below` pellets remain.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PelletBreakpoint {
    pub below: u32,
    pub factor: f32,
}

impl PelletBreakpoint {
    pub const fn new(below: u32, factor: f32) -> Self {
        Self { below, factor }
    }

    /// Aggression schedule: a fresh level starts with 244 pellets.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(4, 50.0),
            Self::new(6, 20.0),
            Self::new(8, 10.0),
            Self::new(10, 5.0),
            Self::new(20, 4.0),
            Self::new(50, 3.0),
            Self::new(100, 2.0),
        ]
    }
}

/// Falloff of ghost repulsion with distance `d`; `d = 0` is always full strength.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum GhostDecay {
    /// `boost / (scale · d)`
    InverseLinear { scale: f32 },
    /// `boost / e^(rate · d)`
    Exponential { rate: f32 },
}

impl Default for GhostDecay {
    fn default() -> Self {
        GhostDecay::InverseLinear { scale: 4.0 }
    }
}

impl GhostDecay {
    /// Divisor `f(d)` applied to the ghost boost.
    pub fn divisor(self, distance: f32) -> f32 {
        if distance <= 0.0 {
            return 1.0;
        }
        match self {
            GhostDecay::InverseLinear { scale } => (scale * distance).max(f32::EPSILON),
            GhostDecay::Exponential { rate } => (rate * distance).exp(),
        }
    }
}

/// Per-color scale of ghost repulsion.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ColorWeights {
    pub red: f32,
    pub pink: f32,
    pub cyan: f32,
    pub orange: f32,
}

impl Default for ColorWeights {
    fn default() -> Self {
        Self {
            red: 1.0,
            pink: 1.0,
            cyan: 1.0,
            orange: 1.0,
        }
    }
}

impl ColorWeights {
    pub fn weight(&self, color: crate::GhostColor) -> f32 {
        match color {
            crate::GhostColor::Red => self.red,
            crate::GhostColor::Pink => self.pink,
            crate::GhostColor::Cyan => self.cyan,
            crate::GhostColor::Orange => self.orange,
        }
    }
}

/// Per-mode scale of ghost repulsion.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModeMultipliers {
    pub scatter: f32,
    pub chase: f32,
    pub paused: f32,
}

impl Default for ModeMultipliers {
    fn default() -> Self {
        Self {
            scatter: 0.8,
            chase: 1.0,
            paused: 1.0,
        }
    }
}

impl ModeMultipliers {
    pub fn multiplier(&self, mode: crate::GameMode) -> f32 {
        match mode {
            crate::GameMode::Scatter => self.scatter,
            crate::GameMode::Chase => self.chase,
            crate::GameMode::Paused => self.paused,
        }
    }
}

// ============================================================================
// Goal selection
// ============================================================================

/// Distance function used wherever no cached maze distance is available.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DistanceMetric {
    #[default]
    Euclidean,
    Manhattan,
}

impl DistanceMetric {
    pub fn between(self, from: crate::Tile, to: crate::Tile) -> f32 {
        match self {
            DistanceMetric::Euclidean => from.euclidean(to),
            DistanceMetric::Manhattan => from.manhattan(to) as f32,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GoalConfig {
    /// Scan radius while at least as many pellets remain as every breakpoint.
    pub base_radius: u32,
    /// Smaller radii as the level nears completion, ascending by `below`.
    pub radius_schedule: Vec<RadiusBreakpoint>,
    /// Scan the whole board when nothing attractive lies within the radius.
    pub widen_when_idle: bool,
    /// Penalty per unit of predicted ghost occupancy on a candidate tile.
    pub prediction_weight: f32,
    /// A threatening ghost this close to the agent switches to evasion; `0` disables.
    pub evade_radius: f32,
    pub distance_metric: DistanceMetric,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            base_radius: 8,
            radius_schedule: vec![
                RadiusBreakpoint::new(10, 5),
                RadiusBreakpoint::new(20, 6),
                RadiusBreakpoint::new(100, 7),
            ],
            widen_when_idle: false,
            prediction_weight: 200.0,
            evade_radius: 3.0,
            distance_metric: DistanceMetric::Euclidean,
        }
    }
}

impl GoalConfig {
    /// Scan radius for the given number of remaining pellets.
    pub fn radius_for(&self, pellets_remaining: u32) -> u32 {
        self.radius_schedule
            .iter()
            .find(|breakpoint| pellets_remaining < breakpoint.below)
            .map_or(self.base_radius, |breakpoint| breakpoint.radius)
    }
}

/// `radius` applies while fewer than `below` pellets remain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadiusBreakpoint {
    pub below: u32,
    pub radius: u32,
}

impl RadiusBreakpoint {
    pub const fn new(below: u32, radius: u32) -> Self {
        Self { below, radius }
    }
}

// ============================================================================
// Ghost prediction
// ============================================================================

/// Relative weights of a ghost's next move at each junction shape.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PredictionConfig {
    pub tunnel_forward: f32,
    pub tunnel_backward: f32,
    pub corner_lateral: f32,
    pub corner_backward: f32,
    pub tee_forward: f32,
    pub tee_lateral: f32,
    pub tee_backward: f32,
    pub fork_lateral: f32,
    pub fork_backward: f32,
    pub cross_forward: f32,
    pub cross_lateral: f32,
    pub cross_backward: f32,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            tunnel_forward: 0.9,
            tunnel_backward: 0.1,
            corner_lateral: 0.9,
            corner_backward: 0.1,
            tee_forward: 0.5,
            tee_lateral: 0.3,
            tee_backward: 0.2,
            fork_lateral: 0.4,
            fork_backward: 0.2,
            cross_forward: 0.3,
            cross_lateral: 0.3,
            cross_backward: 0.1,
        }
    }
}

// ============================================================================
// Path search and planner
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Node expansion cap; `None` means four times the walkable tile count.
    pub max_expansions: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Motionless time, while commanded to move, after which the agent is stuck.
    pub stuck_threshold_ms: u64,
    /// Seed for the fallback random moves; `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            stuck_threshold_ms: 2_000,
            rng_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pellet_multiplier_follows_breakpoints() {
        let config = FieldConfig::default();
        assert_eq!(config.pellet_multiplier(0), 50.0);
        assert_eq!(config.pellet_multiplier(3), 50.0);
        assert_eq!(config.pellet_multiplier(4), 20.0);
        assert_eq!(config.pellet_multiplier(9), 5.0);
        assert_eq!(config.pellet_multiplier(99), 2.0);
        assert_eq!(config.pellet_multiplier(100), 1.0);
        assert_eq!(config.pellet_multiplier(240), 1.0);
    }

    #[test]
    fn pellet_multiplier_never_increases_with_more_pellets() {
        let config = FieldConfig::default();
        let mut previous = f32::INFINITY;
        for remaining in 0..=250 {
            let factor = config.pellet_multiplier(remaining);
            assert!(factor <= previous, "factor rose at {remaining}");
            previous = factor;
        }
    }

    #[test]
    fn ghost_threshold_halves_in_endgame() {
        let config = FieldConfig::default();
        assert_eq!(config.effective_ghost_threshold(200), 8.0);
        assert_eq!(config.effective_ghost_threshold(9), 4.0);
    }

    #[test]
    fn decay_is_full_strength_at_zero() {
        assert_eq!(GhostDecay::InverseLinear { scale: 4.0 }.divisor(0.0), 1.0);
        assert_eq!(GhostDecay::Exponential { rate: 0.5 }.divisor(0.0), 1.0);
        assert_eq!(GhostDecay::InverseLinear { scale: 4.0 }.divisor(2.0), 8.0);
        assert!(GhostDecay::Exponential { rate: 0.5 }.divisor(3.0) > 1.0);
    }

    #[test]
    fn goal_radius_shrinks_toward_level_end() {
        let config = GoalConfig::default();
        assert_eq!(config.radius_for(200), 8);
        assert_eq!(config.radius_for(50), 7);
        assert_eq!(config.radius_for(15), 6);
        assert_eq!(config.radius_for(3), 5);
        assert!(!config.widen_when_idle);
    }
}
