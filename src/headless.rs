//! Headless scene: a kinematic stand-in for the physics engine
//!
//! Integrates the velocities the simulation assigns, reports each newly begun
//! overlap exactly once, and honors hide/remove/rest. Good enough to play a
//! full session without a renderer, which is what the demo binary and the
//! scenario tests do.

use std::collections::HashSet;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::SIM_DT;
use crate::scene::EntityRegistry;
use crate::sim::{Category, ContactBody, ContactEffect, EntityId, GameSession, SceneHost};

/// A body in the headless scene
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: EntityId,
    pub category: Category,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Invisible and non-interactive, but still in the scene
    pub hidden: bool,
    /// Gone for good
    pub removed: bool,
}

impl Body {
    fn interactive(&self) -> bool {
        !self.hidden && !self.removed
    }

    fn overlaps(&self, other: &Body) -> bool {
        let delta = (self.pos - other.pos).abs();
        let reach = (self.size + other.size) / 2.0;
        delta.x < reach.x && delta.y < reach.y
    }
}

/// Kinematic world with begin-only contact reporting
#[derive(Debug, Clone)]
pub struct HeadlessWorld {
    bodies: Vec<Body>,
    /// Pairs currently overlapping (lower id first)
    touching: HashSet<(EntityId, EntityId)>,
    camera: Vec2,
}

impl HeadlessWorld {
    /// Spawn one body per registry entry, at rest
    pub fn from_registry(registry: &EntityRegistry) -> Self {
        let bodies = registry
            .entities()
            .iter()
            .map(|e| Body {
                id: e.id,
                category: e.category,
                pos: e.position,
                vel: Vec2::ZERO,
                size: e.size,
                hidden: false,
                removed: false,
            })
            .collect();
        Self {
            bodies,
            touching: HashSet::new(),
            camera: Vec2::ZERO,
        }
    }

    pub fn body(&self, id: EntityId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    fn body_mut(&mut self, id: EntityId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn camera(&self) -> Vec2 {
        self.camera
    }

    /// Move a body without going through velocities
    pub fn teleport(&mut self, id: EntityId, pos: Vec2) {
        if let Some(body) = self.body_mut(id) {
            body.pos = pos;
        }
    }

    /// Integrate one step and return the contacts that began during it
    pub fn step(&mut self, dt: f32) -> Vec<(ContactBody, ContactBody)> {
        for body in self.bodies.iter_mut().filter(|b| !b.removed) {
            body.pos += body.vel * dt;
        }

        let mut began = Vec::new();
        for (i, a) in self.bodies.iter().enumerate() {
            for b in &self.bodies[i + 1..] {
                let key = if a.id < b.id { (a.id, b.id) } else { (b.id, a.id) };
                if a.interactive() && b.interactive() && a.overlaps(b) {
                    if self.touching.insert(key) {
                        began.push((
                            ContactBody::new(a.id, a.category),
                            ContactBody::new(b.id, b.category),
                        ));
                    }
                } else {
                    self.touching.remove(&key);
                }
            }
        }
        began
    }
}

impl SceneHost for HeadlessWorld {
    fn position(&self, id: EntityId) -> Option<Vec2> {
        self.body(id).filter(|b| !b.removed).map(|b| b.pos)
    }

    fn set_velocity(&mut self, id: EntityId, velocity: Vec2) {
        if let Some(body) = self.body_mut(id) {
            body.vel = velocity;
        }
    }

    fn rest(&mut self, id: EntityId) {
        if let Some(body) = self.body_mut(id) {
            body.vel = Vec2::ZERO;
        }
    }

    fn remove_entity(&mut self, id: EntityId) {
        if let Some(body) = self.body_mut(id) {
            body.removed = true;
            body.vel = Vec2::ZERO;
        }
    }

    fn hide_entity(&mut self, id: EntityId) {
        if let Some(body) = self.body_mut(id) {
            body.hidden = true;
        }
    }

    fn set_camera(&mut self, center: Vec2) {
        self.camera = center;
    }
}

/// A session playing on a headless world
#[derive(Debug, Clone)]
pub struct Stage {
    pub world: HeadlessWorld,
    pub session: GameSession,
}

impl Stage {
    pub fn new(mut session: GameSession) -> Self {
        let mut world = HeadlessWorld::from_registry(session.registry());
        session.start(&mut world);
        Self { world, session }
    }

    /// One frame: input, physics (with contacts), then steering
    pub fn frame(&mut self, pointer: Option<Vec2>) -> Vec<ContactEffect> {
        if let Some(point) = pointer {
            self.session.on_pointer_event(point);
        }

        let mut effects = Vec::new();
        for (a, b) in self.world.step(SIM_DT) {
            effects.push(self.session.on_contact_begin(&mut self.world, a, b));
        }

        self.session.on_simulation_tick(&mut self.world);
        effects
    }
}

/// Scripted player: heads for the key, then the chest, dodging pursuers
///
/// Retargets every few frames with seeded jitter so runs are reproducible.
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    retarget_every: u64,
    jitter: f32,
    /// Pursuers closer than this push the target away
    panic_radius: f32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            retarget_every: 15,
            jitter: 40.0,
            panic_radius: 140.0,
        }
    }

    /// Pointer position for this frame, if the autopilot wants to move it
    pub fn pointer(&mut self, stage: &Stage) -> Option<Vec2> {
        let session = &stage.session;
        if session.time_ticks % self.retarget_every != 0 {
            return None;
        }

        let registry = session.registry();
        let player = stage.world.position(registry.player())?;
        let goal_id = if session.state().has_key {
            registry.chest()
        } else {
            registry.key()
        };
        let goal = stage.world.position(goal_id)?;

        // Push away from any pursuer inside the panic radius
        let threat: Vec2 = registry
            .pursuers()
            .iter()
            .filter_map(|&id| stage.world.position(id))
            .filter(|p| p.distance(player) < self.panic_radius)
            .map(|p| (player - p).normalize_or_zero())
            .sum();

        let heading = (goal - player).normalize_or_zero() + threat * 1.5;
        let reach = goal.distance(player).min(300.0);
        let jitter = Vec2::new(
            self.rng.random_range(-self.jitter..self.jitter),
            self.rng.random_range(-self.jitter..self.jitter),
        );
        Some(player + heading.normalize_or_zero() * reach + jitter)
    }
}
