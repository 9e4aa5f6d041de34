//! Integration and boundary handling

use glam::Vec2;

use super::state::Agent;
use crate::config::WorldConfig;
use crate::limit_length;

/// Apply acceleration, clamp speed, move, then clear acceleration
pub fn integrate(agent: &mut Agent, config: &WorldConfig) {
    agent.velocity = limit_length(agent.velocity + agent.acceleration, config.max_speed);
    agent.position += agent.velocity;
    agent.acceleration = Vec2::ZERO;
}

/// Toroidal wrap by hard snap: leaving an edge lands exactly on the opposite
/// edge, not at the overshoot remainder.
pub fn wrap_position(agent: &mut Agent, config: &WorldConfig) {
    let pos = &mut agent.position;
    if pos.x > config.world_width {
        pos.x = 0.0;
    } else if pos.x < 0.0 {
        pos.x = config.world_width;
    }
    if pos.y > config.world_height {
        pos.y = 0.0;
    } else if pos.y < 0.0 {
        pos.y = config.world_height;
    }
}
