//! Simulation state and core entity types
//!
//! `SimState` owns every agent, food item and obstacle. Components borrow it
//! for the duration of a call and never hold on to references across ticks.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::{ObstacleSpec, SimParams, WorldConfig};
use crate::consts::*;

/// Stable handle for an agent; used for self-exclusion in neighbor queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

/// Stable handle for a food item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FoodId(pub u32);

/// Anything with a position in the world
pub trait Positioned {
    fn position(&self) -> Vec2;
}

/// A flocking agent
#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Accumulated force / mass for the current tick
    pub acceleration: Vec2,
    pub mass: f32,
    /// 0 (starving) ..= 100 (fed)
    pub hunger: u32,
    /// Ticks since hunger last decreased
    pub hunger_timer: u32,
    /// Food detection radius
    pub sensing_radius: f32,
}

impl Agent {
    pub fn new(id: AgentId, position: Vec2, velocity: Vec2) -> Self {
        Self {
            id,
            position,
            velocity,
            acceleration: Vec2::ZERO,
            mass: AGENT_MASS,
            hunger: HUNGER_START,
            hunger_timer: 0,
            sensing_radius: SENSING_RADIUS,
        }
    }

    /// Accumulate a steering force into acceleration
    #[inline]
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force / self.mass;
    }

    /// Whether hunger is at or below the foraging threshold
    pub fn is_hungry(&self, config: &WorldConfig) -> bool {
        self.hunger <= config.hunger_threshold
    }
}

impl Positioned for Agent {
    fn position(&self) -> Vec2 {
        self.position
    }
}

/// A food item dropped into the world
#[derive(Debug, Clone)]
pub struct Food {
    pub id: FoodId,
    pub position: Vec2,
    pub radius: f32,
    /// Eaten during the current tick; removed once the agent pass ends
    pub consumed: bool,
}

impl Food {
    pub fn new(id: FoodId, position: Vec2) -> Self {
        Self {
            id,
            position,
            radius: FOOD_RADIUS,
            consumed: false,
        }
    }

    /// Distance below which an agent eats this item
    pub fn consume_distance(&self) -> f32 {
        self.radius * FOOD_CONSUME_FACTOR
    }
}

impl Positioned for Food {
    fn position(&self) -> Vec2 {
        self.position
    }
}

/// A static axis-aligned obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Vec2,
    pub half_extents: Vec2,
}

impl Obstacle {
    pub fn new(position: Vec2, half_extents: Vec2) -> Self {
        Self {
            position,
            half_extents,
        }
    }

    /// Radius of the circle used to approximate the footprint
    pub fn avoidance_radius(&self) -> f32 {
        self.half_extents.length()
    }
}

impl From<ObstacleSpec> for Obstacle {
    fn from(spec: ObstacleSpec) -> Self {
        Self::new(spec.center, spec.half_extents)
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    /// Current behavior parameters; snapshotted at the start of each tick
    pub config: WorldConfig,
    /// Agents in update order
    pub agents: Vec<Agent>,
    /// Live food, in spawn order
    pub foods: Vec<Food>,
    /// Fixed at construction
    obstacles: Vec<Obstacle>,
    /// Ticks completed
    pub time_ticks: u64,
    /// Next food ID
    next_food_id: u32,
}

impl SimState {
    /// Build a world from params, seeding the RNG from `params.seed`
    pub fn new(params: &SimParams) -> Self {
        let mut rng = Pcg32::seed_from_u64(params.seed);
        Self::with_rng(params, &mut rng)
    }

    /// Build a world drawing the initial population from `rng`
    pub fn with_rng<R: Rng>(params: &SimParams, rng: &mut R) -> Self {
        let config = params.world;
        let speed = config.max_speed;
        let agents = (0..params.agent_count)
            .map(|i| {
                let position = Vec2::new(
                    rng.random_range(0.0..=config.world_width),
                    rng.random_range(0.0..=config.world_height),
                );
                let velocity = Vec2::new(
                    rng.random_range(-speed..=speed),
                    rng.random_range(-speed..=speed),
                );
                let mut agent = Agent::new(AgentId(i as u32), position, velocity);
                agent.mass = params.agent_mass;
                agent.sensing_radius = params.sensing_radius;
                agent
            })
            .collect();

        log::info!(
            "World {}x{} with {} agents, {} obstacles (seed {})",
            config.world_width,
            config.world_height,
            params.agent_count,
            params.obstacles.len(),
            params.seed
        );

        Self {
            config,
            agents,
            foods: Vec::new(),
            obstacles: params.obstacles.iter().copied().map(Obstacle::from).collect(),
            time_ticks: 0,
            next_food_id: 1,
        }
    }

    /// Build a world from explicit parts (no random placement)
    pub fn from_parts(config: WorldConfig, agents: Vec<Agent>, obstacles: Vec<Obstacle>) -> Self {
        Self {
            config,
            agents,
            foods: Vec::new(),
            obstacles,
            time_ticks: 0,
            next_food_id: 1,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Drop a food item at `position`; returns its ID
    pub fn spawn_food(&mut self, position: Vec2) -> FoodId {
        let id = FoodId(self.next_food_id);
        self.next_food_id += 1;
        self.foods.push(Food::new(id, position));
        log::debug!("Food {} spawned at ({:.1}, {:.1})", id.0, position.x, position.y);
        id
    }

    /// Look up an agent by handle
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Drop food marked as consumed during the last agent pass
    pub(crate) fn compact_foods(&mut self) {
        self.foods.retain(|f| !f.consumed);
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.time_ticks,
            agents: self
                .agents
                .iter()
                .map(|a| AgentView {
                    id: a.id,
                    position: a.position,
                    velocity: a.velocity,
                    hunger: a.hunger,
                    hungry: a.is_hungry(&self.config),
                })
                .collect(),
            foods: self
                .foods
                .iter()
                .filter(|f| !f.consumed)
                .map(|f| FoodView {
                    id: f.id,
                    position: f.position,
                    radius: f.radius,
                })
                .collect(),
            obstacles: self.obstacles.clone(),
        }
    }
}

/// Per-agent output for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub id: AgentId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub hunger: u32,
    /// Selects the hungry sprite
    pub hungry: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodView {
    pub id: FoodId,
    pub position: Vec2,
    pub radius: f32,
}

/// Everything the presentation layer may read after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub agents: Vec<AgentView>,
    pub foods: Vec<FoodView>,
    pub obstacles: Vec<Obstacle>,
}
