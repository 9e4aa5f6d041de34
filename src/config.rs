//! World configuration
//!
//! `WorldConfig` holds the behavior parameters every tick reads. The operator
//! may change `max_speed` and `separation_distance` between ticks through
//! [`ConfigAdjust`]; everything else is fixed once the simulation starts.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading or validating a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Behavior parameters shared by all agents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Speed cap applied after every physics update
    pub max_speed: f32,
    /// Agents closer than this push each other apart
    pub separation_distance: f32,
    pub cohesion_factor: f32,
    pub alignment_factor: f32,
    pub separation_factor: f32,
    /// Radius for cohesion and alignment neighbors
    pub neighbor_radius: f32,
    /// Hunger lost each time the hunger timer rolls over
    pub hunger_decrease_rate: u32,
    /// At or below this hunger an agent forages
    pub hunger_threshold: u32,
    /// Ticks between hunger decreases
    pub hunger_time_max: u32,
    pub world_width: f32,
    pub world_height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
            separation_distance: SEPARATION_DISTANCE,
            cohesion_factor: COHESION_FACTOR,
            alignment_factor: ALIGNMENT_FACTOR,
            separation_factor: SEPARATION_FACTOR,
            neighbor_radius: NEIGHBOR_RADIUS,
            hunger_decrease_rate: HUNGER_DECREASE_RATE,
            hunger_threshold: HUNGER_THRESHOLD,
            hunger_time_max: HUNGER_TIME_MAX,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
        }
    }
}

impl WorldConfig {
    /// Parse a (possibly partial) JSON document; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded world config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_speed > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_speed must be positive, got {}",
                self.max_speed
            )));
        }
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "world dimensions must be positive, got {}x{}",
                self.world_width, self.world_height
            )));
        }
        if !(self.neighbor_radius > 0.0) {
            return Err(ConfigError::Invalid(
                "neighbor_radius must be positive".to_string(),
            ));
        }
        if self.separation_distance < 0.0 {
            return Err(ConfigError::Invalid(
                "separation_distance must not be negative".to_string(),
            ));
        }
        if self.hunger_time_max == 0 {
            return Err(ConfigError::Invalid(
                "hunger_time_max must be greater than 0".to_string(),
            ));
        }
        if self.hunger_threshold > HUNGER_MAX {
            return Err(ConfigError::Invalid(format!(
                "hunger_threshold must be at most {HUNGER_MAX}"
            )));
        }
        Ok(())
    }

    /// Apply an operator adjustment, clamping to the slider ranges
    pub fn apply(&mut self, adjust: &ConfigAdjust) {
        if let Some(speed) = adjust.max_speed {
            let (lo, hi) = MAX_SPEED_RANGE;
            let clamped = speed.clamp(lo, hi);
            if clamped != speed {
                log::warn!("max_speed {speed} out of range, clamped to {clamped}");
            }
            log::debug!("max_speed {} -> {}", self.max_speed, clamped);
            self.max_speed = clamped;
        }
        if let Some(distance) = adjust.separation_distance {
            let (lo, hi) = SEPARATION_DISTANCE_RANGE;
            let clamped = distance.clamp(lo, hi);
            if clamped != distance {
                log::warn!("separation_distance {distance} out of range, clamped to {clamped}");
            }
            log::debug!(
                "separation_distance {} -> {}",
                self.separation_distance,
                clamped
            );
            self.separation_distance = clamped;
        }
    }
}

/// Runtime-adjustable parameters, applied at a tick boundary
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfigAdjust {
    pub max_speed: Option<f32>,
    pub separation_distance: Option<f32>,
}

impl ConfigAdjust {
    pub fn is_empty(&self) -> bool {
        self.max_speed.is_none() && self.separation_distance.is_none()
    }
}

/// An axis-aligned obstacle given by center and half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub center: Vec2,
    pub half_extents: Vec2,
}

/// Setup-only parameters used to build the initial world
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// RNG seed for initial placement
    pub seed: u64,
    pub agent_count: usize,
    pub agent_mass: f32,
    /// Food detection radius
    pub sensing_radius: f32,
    pub obstacles: Vec<ObstacleSpec>,
    pub world: WorldConfig,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            seed: 0,
            agent_count: AGENT_COUNT,
            agent_mass: AGENT_MASS,
            sensing_radius: SENSING_RADIUS,
            obstacles: default_obstacles(),
            world: WorldConfig::default(),
        }
    }
}

impl SimParams {
    /// Parse a (possibly partial) JSON document; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Load and validate a JSON params file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let params = Self::from_json_str(&json)?;
        log::info!("Loaded simulation params from {}", path.display());
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        if !(self.agent_mass > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "agent_mass must be positive, got {}",
                self.agent_mass
            )));
        }
        if self.sensing_radius < 0.0 {
            return Err(ConfigError::Invalid(
                "sensing_radius must not be negative".to_string(),
            ));
        }
        if self
            .obstacles
            .iter()
            .any(|o| o.half_extents.x < 0.0 || o.half_extents.y < 0.0)
        {
            return Err(ConfigError::Invalid(
                "obstacle half extents must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// The two obstacles of the default scene
pub fn default_obstacles() -> Vec<ObstacleSpec> {
    vec![
        ObstacleSpec {
            center: Vec2::new(200.0, 200.0),
            half_extents: Vec2::new(64.0, 64.0),
        },
        ObstacleSpec {
            center: Vec2::new(1050.0, 550.0),
            half_extents: Vec2::new(64.0, 64.0),
        },
    ]
}
