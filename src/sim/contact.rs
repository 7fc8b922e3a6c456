//! Contact resolution
//!
//! Contacts arrive as unordered pairs. They are sorted by [`Category`] so the
//! player (lowest tag) always comes first, then dispatched on the ordered pair.
//! Only player contacts do anything.

use serde::{Deserialize, Serialize};

use super::host::SceneHost;
use super::state::{Category, EntityId, Outcome, SessionState};
use crate::consts::FIND_KEY_MESSAGE;

/// One side of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactBody {
    pub id: EntityId,
    pub category: Category,
}

impl ContactBody {
    pub fn new(id: EntityId, category: Category) -> Self {
        Self { id, category }
    }
}

/// What a contact did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEffect {
    /// Pair has no rule, or the session is already over
    Ignored,
    LifeLost,
    LifeGained,
    /// Pickup was already collected
    PickupGone,
    KeyTaken,
    /// Key was already held
    KeyAlreadyHeld,
    ChestLocked,
    ChestOpened,
}

/// Order a pair by category so rules only need one orientation
pub fn canonicalize(a: ContactBody, b: ContactBody) -> (ContactBody, ContactBody) {
    if a.category <= b.category { (a, b) } else { (b, a) }
}

/// Tracks which one-shot pickups are gone, on top of the session state
#[derive(Debug, Clone, Default)]
pub struct ContactResolver {
    collected: Vec<EntityId>,
}

impl ContactResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a life pickup has already been taken
    pub fn is_collected(&self, id: EntityId) -> bool {
        self.collected.contains(&id)
    }

    /// Apply the effect of a newly begun contact between `a` and `b`
    pub fn resolve(
        &mut self,
        state: &mut SessionState,
        host: &mut impl SceneHost,
        a: ContactBody,
        b: ContactBody,
    ) -> ContactEffect {
        if state.is_over() {
            return ContactEffect::Ignored;
        }

        let (first, second) = canonicalize(a, b);
        let effect = match (first.category, second.category) {
            (Category::Player, Category::Pursuer) => {
                state.change_lives(-1);
                ContactEffect::LifeLost
            }
            (Category::Player, Category::Chest) => {
                if state.has_key {
                    state.finish(Outcome::Won);
                    ContactEffect::ChestOpened
                } else {
                    state.show_message(FIND_KEY_MESSAGE);
                    ContactEffect::ChestLocked
                }
            }
            (Category::Player, Category::LifePickup) => {
                if self.is_collected(second.id) {
                    ContactEffect::PickupGone
                } else {
                    self.collected.push(second.id);
                    host.remove_entity(second.id);
                    state.change_lives(1);
                    ContactEffect::LifeGained
                }
            }
            (Category::Player, Category::Key) => {
                if state.grant_key() {
                    state.clear_message();
                    host.hide_entity(second.id);
                    ContactEffect::KeyTaken
                } else {
                    ContactEffect::KeyAlreadyHeld
                }
            }
            _ => ContactEffect::Ignored,
        };

        log::debug!(
            "contact {:?} {} x {:?} {} -> {:?} (lives {})",
            first.category,
            first.id,
            second.category,
            second.id,
            effect,
            state.lives
        );
        effect
    }
}
