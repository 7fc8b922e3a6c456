//! Cloud Chase - flee the pursuers, find the key, open the chest
//!
//! Core modules:
//! - `sim`: Deterministic game logic (steering, contacts, session state)
//! - `scene`: Map layout and the entity registry built from it
//! - `headless`: Kinematic stand-in for the physics engine (demo + tests)
//! - `flow`: Screen flow and HUD state driven by game events

pub mod flow;
pub mod headless;
pub mod scene;
pub mod sim;

pub use flow::{App, Hud, Screen};
pub use scene::{EntityRegistry, SceneLayout, SetupError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one physics step per frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Player seek speed (units/sec)
    pub const PLAYER_SPEED: f32 = 150.0;
    /// Pursuer seek speed (units/sec)
    pub const PURSUER_SPEED: f32 = 60.0;

    /// Lives at the start of every session
    pub const STARTING_LIVES: u8 = 1;
    /// Lives cap; pickups beyond this are wasted
    pub const MAX_LIVES: u8 = 5;

    /// Shown when the chest is touched without the key
    pub const FIND_KEY_MESSAGE: &str = "Find the key first!";
}

/// Heading (radians) of the direction pointing from `from` toward `to`
///
/// Computed as the angle of `from - to` rotated by π, so the result points
/// at the target rather than away from it.
#[inline]
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    std::f32::consts::PI + (from.y - to.y).atan2(from.x - to.x)
}

/// Vector of length `magnitude` along heading `theta`
#[inline]
pub fn heading_to_vec(theta: f32, magnitude: f32) -> Vec2 {
    Vec2::new(magnitude * theta.cos(), magnitude * theta.sin())
}
