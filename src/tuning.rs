//! Data-driven game balance
//!
//! Defaults reproduce the classic runner schedule. A JSON file may override any
//! subset of fields; missing fields fall back to their defaults.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How ordinary enemies and bonuses share spawn slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// Enemy and bonus each run on their own watermark
    #[default]
    PerCategory,
    /// One shared watermark; each emission is a coin flip between enemy and bonus
    Merged,
}

/// Point values of the ordinary enemy catalog (all negative)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyPoints {
    pub green: i64,
    pub blue: i64,
    pub red: i64,
    pub yellow: i64,
}

impl Default for EnemyPoints {
    fn default() -> Self {
        Self {
            green: -5,
            blue: -10,
            red: -10,
            yellow: -50,
        }
    }
}

/// Point values of the bonus catalog (all positive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusPoints {
    pub red: i64,
    pub blue: i64,
    pub black: i64,
}

impl Default for BonusPoints {
    fn default() -> Self {
        Self {
            red: 10,
            blue: 30,
            black: 50,
        }
    }
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Score a session starts with
    pub start_score: i64,
    /// Reaching or passing this ends the run (upper threshold)
    pub win_score: i64,
    /// Falling to or below this ends the run (lower threshold)
    pub lose_score: i64,

    pub spawn_policy: SpawnPolicy,
    pub enemy_interval_ms: u64,
    pub bonus_interval_ms: u64,
    pub special_interval_ms: u64,
    /// Shared interval under `SpawnPolicy::Merged`
    pub merged_interval_ms: u64,
    /// Elapsed time at which every category first becomes eligible
    pub first_spawn_ms: u64,

    /// Off-screen column new entities appear at
    pub spawn_x: f32,
    /// Vertical spawn range (inclusive). Equal bounds pin every spawn to one lane.
    pub lane_min_y: f32,
    pub lane_max_y: f32,
    /// Leftward entity speed in pixels per second
    pub scroll_speed: f32,
    /// Player jump impulse (negative is up)
    pub jump_velocity: f32,

    pub enemy_points: EnemyPoints,
    pub bonus_points: BonusPoints,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            start_score: START_SCORE,
            win_score: WIN_SCORE,
            lose_score: LOSE_SCORE,

            spawn_policy: SpawnPolicy::PerCategory,
            enemy_interval_ms: ENEMY_INTERVAL_MS,
            bonus_interval_ms: BONUS_INTERVAL_MS,
            special_interval_ms: SPECIAL_INTERVAL_MS,
            merged_interval_ms: ENEMY_INTERVAL_MS,
            first_spawn_ms: 0,

            spawn_x: SPAWN_X,
            // Ground lane (jump over) up to head height (duck under)
            lane_min_y: 440.0,
            lane_max_y: 520.0,
            scroll_speed: SCROLL_SPEED,
            jump_velocity: JUMP_VELOCITY,

            enemy_points: EnemyPoints::default(),
            bonus_points: BonusPoints::default(),
        }
    }
}

/// Failure to load a tuning file
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "failed to read tuning file: {e}"),
            TuningError::Parse(e) => write!(f, "malformed tuning JSON: {e}"),
            TuningError::Invalid(reason) => write!(f, "invalid tuning: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject balance that would end the run before it starts or never spawn
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(reason: &str) -> Result<(), TuningError> {
            Err(TuningError::Invalid(reason.to_string()))
        }

        if self.lose_score >= self.win_score {
            return invalid("lose_score must be below win_score");
        }
        if self.start_score <= self.lose_score || self.start_score >= self.win_score {
            return invalid("start_score must lie strictly between lose_score and win_score");
        }
        let intervals = [
            self.enemy_interval_ms,
            self.bonus_interval_ms,
            self.special_interval_ms,
            self.merged_interval_ms,
        ];
        if intervals.contains(&0) {
            return invalid("spawn intervals must be non-zero");
        }
        if !(self.spawn_x > 0.0) {
            return invalid("spawn_x must be positive");
        }
        if !(self.lane_min_y <= self.lane_max_y) {
            return invalid("lane_min_y must not exceed lane_max_y");
        }
        if !(self.scroll_speed > 0.0) {
            return invalid("scroll_speed must be positive");
        }
        let e = self.enemy_points;
        if [e.green, e.blue, e.red, e.yellow].iter().any(|&p| p >= 0) {
            return invalid("enemy point values must be negative");
        }
        let b = self.bonus_points;
        if [b.red, b.blue, b.black].iter().any(|&p| p <= 0) {
            return invalid("bonus point values must be positive");
        }
        Ok(())
    }
}
