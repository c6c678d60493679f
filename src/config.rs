//! Engine and game configuration
//!
//! These are plain values handed to constructors; nothing here is global.

use std::time::Duration;

use crate::board::Stone;

/// Maximum candidate moves searched per node.
pub const DEFAULT_MAX_CANDIDATES: usize = 20;

/// Chebyshev radius around existing stones that candidate moves come from.
pub const DEFAULT_NEIGHBOR_RADIUS: i32 = 2;

/// AI strength. The only strength knob is search depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Map a numeric level (1-3). Anything else falls back to `Medium`.
    pub fn from_level(level: i32) -> Self {
        match level {
            1 => Difficulty::Easy,
            2 => Difficulty::Medium,
            3 => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }

    pub fn level(self) -> i32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Search depth in plies.
    pub fn search_depth(self) -> u8 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        }
    }
}

/// Search engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub difficulty: Difficulty,
    /// Branching factor cap after ranking
    pub max_candidates: usize,
    pub neighbor_radius: i32,
    /// Abort the search with `EngineError::TimedOut` after this long
    pub time_limit: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            max_candidates: DEFAULT_MAX_CANDIDATES,
            neighbor_radius: DEFAULT_NEIGHBOR_RADIUS,
            time_limit: None,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates.max(1);
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }
}

/// Who sits at the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Player vs Player (hotseat)
    PvP,
    /// Player vs Computer
    #[default]
    PvC,
}

/// Game-level settings, passed to the session at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSettings {
    pub mode: GameMode,
    pub ai_difficulty: Difficulty,
    /// Color the computer plays in `PvC`
    pub ai_stone: Stone,
    pub engine: EngineConfig,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            ai_difficulty: Difficulty::default(),
            ai_stone: Stone::White,
            engine: EngineConfig::default(),
        }
    }
}

impl GameSettings {
    /// Engine configuration with the session's difficulty applied.
    pub fn engine_config(&self) -> EngineConfig {
        self.engine.clone().with_difficulty(self.ai_difficulty)
    }
}
