//! Galaxy Flock - flocking and foraging agent simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (forces, foraging, physics, tick)
//! - `config`: Tunable world parameters, loadable from JSON

pub mod config;
pub mod sim;

pub use config::{ConfigAdjust, ConfigError, SimParams, WorldConfig};

use glam::Vec2;

/// Simulation defaults
pub mod consts {
    /// World dimensions
    pub const WORLD_WIDTH: f32 = 1280.0;
    pub const WORLD_HEIGHT: f32 = 720.0;

    /// Movement
    pub const MAX_SPEED: f32 = 2.0;
    /// Operator slider range for max speed
    pub const MAX_SPEED_RANGE: (f32, f32) = (0.0, 10.0);

    /// Flocking weights
    pub const COHESION_FACTOR: f32 = 0.01;
    pub const ALIGNMENT_FACTOR: f32 = 0.1;
    pub const SEPARATION_FACTOR: f32 = 0.05;
    pub const SEPARATION_DISTANCE: f32 = 25.0;
    /// Operator slider range for separation distance
    pub const SEPARATION_DISTANCE_RANGE: (f32, f32) = (5.0, 100.0);
    /// Radius for cohesion and alignment neighbors
    pub const NEIGHBOR_RADIUS: f32 = 100.0;

    /// Hunger
    pub const HUNGER_DECREASE_RATE: u32 = 10;
    pub const HUNGER_THRESHOLD: u32 = 30;
    pub const HUNGER_TIME_MAX: u32 = 100;
    pub const HUNGER_MAX: u32 = 100;
    pub const HUNGER_START: u32 = 30;

    /// Agent defaults
    pub const AGENT_COUNT: usize = 20;
    pub const AGENT_MASS: f32 = 1.0;
    /// Food detection radius (not used for flocking)
    pub const SENSING_RADIUS: f32 = 100.0;

    /// Food
    pub const FOOD_RADIUS: f32 = 10.0;
    /// Agent eats food closer than `FOOD_RADIUS * FOOD_CONSUME_FACTOR`
    pub const FOOD_CONSUME_FACTOR: f32 = 2.5;

    /// Obstacle avoidance force multiplier
    pub const OBSTACLE_REPULSION: f32 = 2.0;

    /// Runner tick rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
}

/// Rescale `v` to `len`, keeping direction. Zero vectors stay zero.
#[inline]
pub fn set_length(v: Vec2, len: f32) -> Vec2 {
    let current = v.length();
    if current > 0.0 {
        v * (len / current)
    } else {
        Vec2::ZERO
    }
}

/// Cap the length of `v` at `max`
#[inline]
pub fn limit_length(v: Vec2, max: f32) -> Vec2 {
    if v.length() > max {
        set_length(v, max)
    } else {
        v
    }
}
