//! Per-frame entry points
//!
//! A [`GameSession`] is what the engine talks to. Each frame it gets pointer
//! events, then the contacts found by the physics step, then one
//! [`GameSession::on_simulation_tick`] after physics has integrated.

use glam::Vec2;

use super::contact::{ContactBody, ContactEffect, ContactResolver};
use super::host::SceneHost;
use super::state::{EntityId, GameEvent, Outcome, SessionState};
use super::steering::{PlayerMotion, steer_player, steer_pursuers};
use crate::consts::*;
use crate::scene::{EntityRegistry, SceneLayout, SetupError};

/// One play-through, from scene entry to a terminal outcome
#[derive(Debug, Clone)]
pub struct GameSession {
    registry: EntityRegistry,
    state: SessionState,
    resolver: ContactResolver,
    /// Last pointer position; only the most recent one matters
    touch: Option<Vec2>,
    /// Ticks run so far
    pub time_ticks: u64,
}

impl GameSession {
    /// Start a session on an already-built registry
    pub fn new(registry: EntityRegistry) -> Self {
        Self {
            registry,
            state: SessionState::new(),
            resolver: ContactResolver::new(),
            touch: None,
            time_ticks: 0,
        }
    }

    pub fn from_layout(layout: &SceneLayout) -> Result<Self, SetupError> {
        Ok(Self::new(EntityRegistry::from_layout(layout)?))
    }

    /// Scene entry: center the camera and announce the starting lives
    pub fn start(&mut self, host: &mut impl SceneHost) {
        if let Some(position) = host.position(self.registry.player()) {
            host.set_camera(position);
        }
        self.state.change_lives(0);
        log::info!(
            "Session started: {} pursuers, {} life pickups",
            self.registry.pursuers().len(),
            self.registry.life_pickups().len()
        );
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome
    }

    pub fn touch(&self) -> Option<Vec2> {
        self.touch
    }

    /// Press, drag or release. Releasing does not clear the target.
    pub fn on_pointer_event(&mut self, position: Vec2) {
        self.touch = Some(position);
    }

    /// Runs after the physics step: player first, then every pursuer
    pub fn on_simulation_tick(&mut self, host: &mut impl SceneHost) -> PlayerMotion {
        if self.state.is_over() {
            return PlayerMotion::Idle;
        }
        self.time_ticks += 1;

        let player = self.registry.player();
        let motion = steer_player(
            host,
            player,
            self.registry.player_size(),
            self.touch,
            PLAYER_SPEED,
        );

        if let Some(target) = host.position(player) {
            steer_pursuers(host, self.registry.pursuers(), target, PURSUER_SPEED);
        }
        motion
    }

    /// A new overlap began between two bodies
    pub fn on_contact_begin(
        &mut self,
        host: &mut impl SceneHost,
        a: ContactBody,
        b: ContactBody,
    ) -> ContactEffect {
        self.resolver.resolve(&mut self.state, host, a, b)
    }

    /// Same as [`GameSession::on_contact_begin`], with categories taken from
    /// the registry. Unknown ids are ignored.
    pub fn on_contact_between(
        &mut self,
        host: &mut impl SceneHost,
        a: EntityId,
        b: EntityId,
    ) -> ContactEffect {
        match (self.registry.category_of(a), self.registry.category_of(b)) {
            (Some(ca), Some(cb)) => {
                self.on_contact_begin(host, ContactBody::new(a, ca), ContactBody::new(b, cb))
            }
            _ => {
                log::warn!("Contact with unknown entity ({} x {})", a, b);
                ContactEffect::Ignored
            }
        }
    }

    /// Take pending notifications for the presentation layer
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}
