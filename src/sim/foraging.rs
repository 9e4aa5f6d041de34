//! Hunger state machine
//!
//! A fed agent flocks. Once hunger drops to the threshold it forages: it
//! seeks the nearest food within its sensing radius and eats it on contact.
//! A hungry agent with no food in sight keeps flocking.

use glam::Vec2;

use super::forces;
use super::spatial::{find_within_radius, nearest};
use super::state::{Agent, Food, FoodId};
use crate::config::WorldConfig;
use crate::consts::HUNGER_MAX;

/// What an agent did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Flocking,
    Foraging,
}

/// Outcome of the foraging decision for one agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForageDecision {
    pub behavior: Behavior,
    /// Flocking or seek force, before obstacle avoidance
    pub force: Vec2,
    /// Food the agent reached this tick
    pub eat: Option<FoodId>,
}

/// Nearest uneaten food within the agent's sensing radius
pub fn find_food<'a>(agent: &Agent, foods: &'a [Food]) -> Option<&'a Food> {
    let in_range = find_within_radius(
        agent.position,
        agent.sensing_radius,
        foods.iter().filter(|f| !f.consumed),
    );
    nearest(agent.position, in_range)
}

/// Pick this tick's steering for `agent`
pub fn decide(
    agent: &Agent,
    agents: &[Agent],
    foods: &[Food],
    config: &WorldConfig,
) -> ForageDecision {
    if agent.is_hungry(config) {
        if let Some(food) = find_food(agent, foods) {
            let reached = agent.position.distance(food.position) < food.consume_distance();
            return ForageDecision {
                behavior: Behavior::Foraging,
                force: forces::seek(agent, food.position, config),
                eat: reached.then_some(food.id),
            };
        }
    }

    ForageDecision {
        behavior: Behavior::Flocking,
        force: forces::flocking(agent, agents, config),
        eat: None,
    }
}

/// Refill hunger after eating
pub fn feed(agent: &mut Agent) {
    agent.hunger = HUNGER_MAX;
}

/// Advance the hunger timer; returns true if this tick made the agent hungry
pub fn decay_hunger(agent: &mut Agent, config: &WorldConfig) -> bool {
    agent.hunger_timer += 1;
    if agent.hunger_timer < config.hunger_time_max {
        return false;
    }
    let was_hungry = agent.is_hungry(config);
    agent.hunger = agent.hunger.saturating_sub(config.hunger_decrease_rate);
    agent.hunger_timer = 0;
    !was_hungry && agent.is_hungry(config)
}
