//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform code:
//! - Velocities are assigned, never integrated (the host owns physics)
//! - Session state has a single writer (the contact resolver)
//! - Stable iteration order (pursuers in insertion order)

pub mod contact;
pub mod host;
pub mod state;
pub mod steering;
pub mod tick;

pub use contact::{ContactBody, ContactEffect, ContactResolver, canonicalize};
pub use host::SceneHost;
pub use state::{Category, EntityId, GameEvent, Outcome, SessionState};
pub use steering::{PlayerMotion, compute_velocity, should_move, steer_player, steer_pursuers};
pub use tick::GameSession;
