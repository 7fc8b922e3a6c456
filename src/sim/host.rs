//! Boundary to the engine that owns the scene
//!
//! The simulation never touches bodies directly; it reads positions and issues
//! commands through [`SceneHost`].

use glam::Vec2;

use super::state::EntityId;

/// Commands the simulation issues to the scene owner
pub trait SceneHost {
    /// Current position of an entity, `None` if it is no longer in the scene
    fn position(&self, id: EntityId) -> Option<Vec2>;

    /// Assign a velocity (replaces whatever the body had)
    fn set_velocity(&mut self, id: EntityId, velocity: Vec2);

    /// Stop the body with no residual motion
    fn rest(&mut self, id: EntityId);

    /// Take an entity out of the scene permanently
    fn remove_entity(&mut self, id: EntityId);

    /// Make an entity invisible and non-interactive (it stays in the scene)
    fn hide_entity(&mut self, id: EntityId);

    /// Center the viewport
    fn set_camera(&mut self, center: Vec2);
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;

    use super::*;

    /// Command recorded by [`RecordingHost`]
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum Command {
        Velocity(EntityId, Vec2),
        Rest(EntityId),
        Remove(EntityId),
        Hide(EntityId),
        Camera(Vec2),
    }

    /// Host that only remembers positions and logs every command
    #[derive(Debug, Default)]
    pub struct RecordingHost {
        pub positions: HashMap<EntityId, Vec2>,
        pub commands: Vec<Command>,
    }

    impl RecordingHost {
        pub fn with_positions(positions: &[(EntityId, Vec2)]) -> Self {
            Self {
                positions: positions.iter().copied().collect(),
                commands: Vec::new(),
            }
        }

        pub fn velocity_of(&self, id: EntityId) -> Option<Vec2> {
            self.commands.iter().rev().find_map(|c| match *c {
                Command::Velocity(target, v) if target == id => Some(v),
                _ => None,
            })
        }

        pub fn count(&self, wanted: Command) -> usize {
            self.commands.iter().filter(|c| **c == wanted).count()
        }
    }

    impl SceneHost for RecordingHost {
        fn position(&self, id: EntityId) -> Option<Vec2> {
            self.positions.get(&id).copied()
        }

        fn set_velocity(&mut self, id: EntityId, velocity: Vec2) {
            self.commands.push(Command::Velocity(id, velocity));
        }

        fn rest(&mut self, id: EntityId) {
            self.commands.push(Command::Rest(id));
        }

        fn remove_entity(&mut self, id: EntityId) {
            self.positions.remove(&id);
            self.commands.push(Command::Remove(id));
        }

        fn hide_entity(&mut self, id: EntityId) {
            self.commands.push(Command::Hide(id));
        }

        fn set_camera(&mut self, center: Vec2) {
            self.commands.push(Command::Camera(center));
        }
    }
}
