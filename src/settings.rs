//! Simulation settings
//!
//! Loaded from a JSON file by the host; every field has a default so a
//! partial file is fine.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Playfield;

/// Smallest playfield the room generator can lay walls out in
pub const MIN_WIDTH: f32 = 500.0;
pub const MIN_HEIGHT: f32 = 400.0;

/// Which rules the room generator follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Walls plus stationary and pursuit hostiles
    #[default]
    Rooms,
    /// Rooms additionally hold a teleporting boss and pickups
    BossHunt,
}

impl Scenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Rooms => "rooms",
            Scenario::BossHunt => "boss_hunt",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rooms" => Some(Scenario::Rooms),
            "boss_hunt" | "boss" => Some(Scenario::BossHunt),
            _ => None,
        }
    }
}

/// Errors raised while loading settings
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read settings: {e}"),
            Self::Parse(e) => write!(f, "malformed settings: {e}"),
            Self::Invalid(m) => write!(f, "invalid settings: {m}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield width in world units
    pub width: f32,
    /// Playfield height in world units
    pub height: f32,
    /// Fixed simulation rate
    pub tick_rate_hz: u32,
    /// RNG seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
    pub scenario: Scenario,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            tick_rate_hz: TICK_RATE_HZ,
            seed: None,
            scenario: Scenario::Rooms,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file and validate them
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.width >= MIN_WIDTH) || !(self.height >= MIN_HEIGHT) {
            return Err(SettingsError::Invalid(format!(
                "playfield {}x{} is smaller than {MIN_WIDTH}x{MIN_HEIGHT}",
                self.width, self.height
            )));
        }
        if self.tick_rate_hz == 0 {
            return Err(SettingsError::Invalid("tick rate must be positive".into()));
        }
        Ok(())
    }

    /// Fixed tick duration in milliseconds
    pub fn tick_ms(&self) -> u64 {
        (1000 / self.tick_rate_hz.max(1)).max(1) as u64
    }

    pub fn playfield(&self) -> Playfield {
        Playfield::new(self.width, self.height)
    }
}
