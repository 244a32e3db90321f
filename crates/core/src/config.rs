//! Session configuration
//!
//! Board size, seed and timings for one session. Everything is checked by
//! [`SessionConfig::validate`] before a [`GameState`](crate::GameState) is
//! built from it.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{
    DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DROP_PERIOD_MS, LOCK_DELAY_MS, MIN_BOARD_HEIGHT,
    MIN_BOARD_WIDTH, SMALL_BOARD_HEIGHT, SOFT_DROP_PERIOD_MS, TICK_MS,
};

/// Board size presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoardSize {
    /// 10 x 10
    Small,
    /// 10 x 20
    #[default]
    Normal,
}

impl BoardSize {
    /// `(width, height)` of the preset
    pub fn dimensions(&self) -> (u16, u16) {
        match self {
            BoardSize::Small => (DEFAULT_BOARD_WIDTH, SMALL_BOARD_HEIGHT),
            BoardSize::Normal => (DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT),
        }
    }

    /// Parse preset name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "small" => Some(BoardSize::Small),
            "normal" => Some(BoardSize::Normal),
            _ => None,
        }
    }
}

/// Parameters of one simulation session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub width: u16,
    pub height: u16,
    /// `None` picks a fresh random seed when the session is created.
    pub seed: Option<u32>,
    pub tick_ms: u32,
    pub drop_period_ms: u32,
    pub soft_drop_period_ms: u32,
    pub lock_delay_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            seed: None,
            tick_ms: TICK_MS,
            drop_period_ms: DROP_PERIOD_MS,
            soft_drop_period_ms: SOFT_DROP_PERIOD_MS,
            lock_delay_ms: LOCK_DELAY_MS,
        }
    }
}

impl SessionConfig {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_size(size: BoardSize) -> Self {
        let (width, height) = size.dimensions();
        Self::new(width, height)
    }

    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn tick_ms(mut self, ms: u32) -> Self {
        self.tick_ms = ms;
        self
    }

    pub fn drop_period_ms(mut self, ms: u32) -> Self {
        self.drop_period_ms = ms;
        self
    }

    pub fn soft_drop_period_ms(mut self, ms: u32) -> Self {
        self.soft_drop_period_ms = ms;
        self
    }

    pub fn lock_delay_ms(mut self, ms: u32) -> Self {
        self.lock_delay_ms = ms;
        self
    }

    /// Reject boards smaller than 4x4 and zero timings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_BOARD_WIDTH || self.height < MIN_BOARD_HEIGHT {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
                min_width: MIN_BOARD_WIDTH,
                min_height: MIN_BOARD_HEIGHT,
            });
        }
        let timings = [
            ("tick_ms", self.tick_ms),
            ("drop_period_ms", self.drop_period_ms),
            ("soft_drop_period_ms", self.soft_drop_period_ms),
            ("lock_delay_ms", self.lock_delay_ms),
        ];
        if let Some((name, _)) = timings.iter().find(|(_, ms)| *ms == 0) {
            return Err(ConfigError::ZeroTiming(*name));
        }
        Ok(())
    }

    /// The configured seed, or a random one
    pub fn resolved_seed(&self) -> u32 {
        self.seed.unwrap_or_else(rand::random)
    }
}
