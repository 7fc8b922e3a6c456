//! Seek steering for the player and the pursuers
//!
//! Both kinds of actor use the same rule: a constant-speed velocity pointed
//! straight at a target, reassigned every tick. There is no acceleration
//! model; the physics engine just integrates whatever velocity was set last.

use glam::Vec2;

use super::host::SceneHost;
use super::state::EntityId;
use crate::{bearing, heading_to_vec};

/// Velocity of magnitude `speed` pointing from `current` toward `target`
pub fn compute_velocity(current: Vec2, target: Vec2, speed: f32) -> Vec2 {
    heading_to_vec(bearing(current, target), speed)
}

/// Whether the player should chase the touch point
///
/// False while the touch lies inside the player's own half-size box, which
/// keeps the sprite from jittering around a pointer resting on it.
pub fn should_move(current: Vec2, touch: Vec2, size: Vec2) -> bool {
    let delta = (current - touch).abs();
    delta.x > size.x / 2.0 || delta.y > size.y / 2.0
}

/// What the player was told to do this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerMotion {
    /// No touch yet (or the player is gone); nothing was commanded
    Idle,
    /// Seeking the touch point with this velocity
    Seeking(Vec2),
    /// Touch is within the dead-zone; the body was put to rest
    Resting,
}

/// Steer the player toward the last touch point
///
/// The camera follows the player whenever it is moving.
pub fn steer_player(
    host: &mut impl SceneHost,
    player: EntityId,
    size: Vec2,
    touch: Option<Vec2>,
    speed: f32,
) -> PlayerMotion {
    let (Some(current), Some(touch)) = (host.position(player), touch) else {
        return PlayerMotion::Idle;
    };

    if should_move(current, touch, size) {
        let velocity = compute_velocity(current, touch, speed);
        host.set_velocity(player, velocity);
        host.set_camera(current);
        PlayerMotion::Seeking(velocity)
    } else {
        host.rest(player);
        PlayerMotion::Resting
    }
}

/// Point every pursuer at `target`. Pursuers never rest.
pub fn steer_pursuers(host: &mut impl SceneHost, pursuers: &[EntityId], target: Vec2, speed: f32) {
    for &id in pursuers {
        if let Some(current) = host.position(id) {
            host.set_velocity(id, compute_velocity(current, target, speed));
        }
    }
}
