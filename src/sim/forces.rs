//! Steering forces
//!
//! Every function returns a force and leaves the agent untouched; the caller
//! accumulates it with [`Agent::apply_force`]. Neighbors are matched by
//! [`AgentId`](super::state::AgentId), so an agent never counts itself even
//! when another agent shares its exact state.

use glam::Vec2;

use super::state::{Agent, Obstacle};
use crate::config::WorldConfig;
use crate::consts::OBSTACLE_REPULSION;
use crate::set_length;

/// Other agents strictly closer than `radius`
fn neighbors<'a>(
    agent: &'a Agent,
    agents: &'a [Agent],
    radius: f32,
) -> impl Iterator<Item = &'a Agent> {
    agents.iter().filter(move |other| {
        other.id != agent.id && agent.position.distance(other.position) < radius
    })
}

/// Steer toward the centroid of nearby agents
pub fn cohesion(agent: &Agent, agents: &[Agent], config: &WorldConfig) -> Vec2 {
    let (sum, count) = neighbors(agent, agents, config.neighbor_radius)
        .fold((Vec2::ZERO, 0u32), |(sum, count), other| {
            (sum + other.position, count + 1)
        });
    if count == 0 {
        return Vec2::ZERO;
    }
    let centroid = sum / count as f32;
    (centroid - agent.position) * config.cohesion_factor
}

/// Steer toward the mean velocity of nearby agents
pub fn alignment(agent: &Agent, agents: &[Agent], config: &WorldConfig) -> Vec2 {
    let (sum, count) = neighbors(agent, agents, config.neighbor_radius)
        .fold((Vec2::ZERO, 0u32), |(sum, count), other| {
            (sum + other.velocity, count + 1)
        });
    if count == 0 {
        return Vec2::ZERO;
    }
    (sum / count as f32) * config.alignment_factor
}

/// Push away from agents inside the separation distance.
///
/// Offsets are summed, not averaged, so the push grows with local density.
pub fn separation(agent: &Agent, agents: &[Agent], config: &WorldConfig) -> Vec2 {
    let push: Vec2 = neighbors(agent, agents, config.separation_distance)
        .map(|other| agent.position - other.position)
        .sum();
    push * config.separation_factor
}

/// Cohesion, separation and alignment combined
pub fn flocking(agent: &Agent, agents: &[Agent], config: &WorldConfig) -> Vec2 {
    cohesion(agent, agents, config)
        + separation(agent, agents, config)
        + alignment(agent, agents, config)
}

/// Repulsion from every obstacle whose bounding circle contains the agent
pub fn avoid_obstacles(agent: &Agent, obstacles: &[Obstacle], config: &WorldConfig) -> Vec2 {
    obstacles
        .iter()
        .filter(|o| agent.position.distance(o.position) < o.avoidance_radius())
        .map(|o| set_length(agent.position - o.position, config.max_speed) * OBSTACLE_REPULSION)
        .sum()
}

/// Desired velocity toward `target` at full speed, minus current velocity
pub fn seek(agent: &Agent, target: Vec2, config: &WorldConfig) -> Vec2 {
    let desired = set_length(target - agent.position, config.max_speed);
    desired - agent.velocity
}
