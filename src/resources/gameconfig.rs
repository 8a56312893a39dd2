//! Game configuration resource.
//!
//! Manages simulation settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [world]
//! width = 1920
//!
//! [timing]
//! target_fps = 97
//! reference_tick_ms = 11
//! max_frame_delta_ms = 100
//!
//! [ai]
//! aggro_range = 200
//! attack_range = 100
//! patrol_interval_ms = 2500
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_WORLD_WIDTH: i32 = 1920;
const DEFAULT_TARGET_FPS: u32 = 97;
const DEFAULT_REFERENCE_TICK_MS: u32 = 11;
const DEFAULT_MAX_FRAME_DELTA_MS: u32 = 100;
const DEFAULT_AGGRO_RANGE: i32 = 200;
const DEFAULT_ATTACK_RANGE: i32 = 100;
const DEFAULT_PATROL_INTERVAL_MS: u64 = 2500;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// World bounds, frame timing and AI thresholds. Systems read it through
/// `Res<GameConfig>`; it is inserted once by [`crate::game::build_world`].
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// World width in pixels; projectiles leaving `[0, width)` despawn.
    pub world_width: i32,
    /// Frame cap of the driving loop.
    pub target_fps: u32,
    /// Milliseconds in one movement reference tick.
    pub reference_tick_ms: u32,
    /// Raw frame deltas are capped at this value.
    pub max_frame_delta_ms: u32,
    /// Horizontal distance below which an enemy notices the player.
    pub aggro_range: i32,
    /// Horizontal distance below which a chasing enemy attacks.
    pub attack_range: i32,
    /// Time between patrol stand/walk toggles.
    pub patrol_interval_ms: u64,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            world_width: DEFAULT_WORLD_WIDTH,
            target_fps: DEFAULT_TARGET_FPS,
            reference_tick_ms: DEFAULT_REFERENCE_TICK_MS,
            max_frame_delta_ms: DEFAULT_MAX_FRAME_DELTA_MS,
            aggro_range: DEFAULT_AGGRO_RANGE,
            attack_range: DEFAULT_ATTACK_RANGE,
            patrol_interval_ms: DEFAULT_PATROL_INTERVAL_MS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);

        info!(
            "Loaded config: world width {}, fps={}, tick={}ms, aggro={} attack={} patrol={}ms",
            self.world_width,
            self.target_fps,
            self.reference_tick_ms,
            self.aggro_range,
            self.attack_range,
            self.patrol_interval_ms
        );

        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [world] section
        if let Some(width) = int_value(config, "world", "width") {
            self.world_width = width;
        }

        // [timing] section
        if let Some(fps) = uint_value::<u32>(config, "timing", "target_fps") {
            self.target_fps = fps.max(1);
        }
        if let Some(tick) = uint_value::<u32>(config, "timing", "reference_tick_ms") {
            self.reference_tick_ms = tick.max(1);
        }
        if let Some(cap) = uint_value(config, "timing", "max_frame_delta_ms") {
            self.max_frame_delta_ms = cap;
        }

        // [ai] section
        if let Some(range) = int_value(config, "ai", "aggro_range") {
            self.aggro_range = range;
        }
        if let Some(range) = int_value(config, "ai", "attack_range") {
            self.attack_range = range;
        }
        if let Some(interval) = uint_value(config, "ai", "patrol_interval_ms") {
            self.patrol_interval_ms = interval;
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("world", "width", Some(self.world_width.to_string()));

        config.set("timing", "target_fps", Some(self.target_fps.to_string()));
        config.set(
            "timing",
            "reference_tick_ms",
            Some(self.reference_tick_ms.to_string()),
        );
        config.set(
            "timing",
            "max_frame_delta_ms",
            Some(self.max_frame_delta_ms.to_string()),
        );

        config.set("ai", "aggro_range", Some(self.aggro_range.to_string()));
        config.set("ai", "attack_range", Some(self.attack_range.to_string()));
        config.set(
            "ai",
            "patrol_interval_ms",
            Some(self.patrol_interval_ms.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Milliseconds per frame at the target frame rate.
    pub fn frame_budget_ms(&self) -> u64 {
        1000 / u64::from(self.target_fps.max(1))
    }
}

/// Signed integer at `[section] key`, ignored when it does not fit `T`.
fn int_value<T: TryFrom<i64>>(config: &Ini, section: &str, key: &str) -> Option<T> {
    let raw = config.getint(section, key).ok().flatten()?;
    T::try_from(raw)
        .map_err(|_| warn!("[{}] {} = {} is out of range, ignored", section, key, raw))
        .ok()
}

/// Unsigned integer at `[section] key`, ignored when it does not fit `T`.
fn uint_value<T: TryFrom<u64>>(config: &Ini, section: &str, key: &str) -> Option<T> {
    let raw = config.getuint(section, key).ok().flatten()?;
    T::try_from(raw)
        .map_err(|_| warn!("[{}] {} = {} is out of range, ignored", section, key, raw))
        .ok()
}
