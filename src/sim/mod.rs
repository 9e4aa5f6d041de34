//! Deterministic simulation module
//!
//! All behavior and physics live here. This module must stay pure and
//! deterministic:
//! - One tick per call, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (agent order, food spawn order)
//! - No rendering or platform dependencies

pub mod foraging;
pub mod forces;
pub mod physics;
pub mod spatial;
pub mod state;
pub mod tick;

pub use foraging::{Behavior, ForageDecision};
pub use state::{
    Agent, AgentId, AgentView, Food, FoodId, FoodView, Obstacle, Positioned, SimState,
    WorldSnapshot,
};
pub use tick::{SimEvent, TickInput, TickReport, tick};
