//! Session state and core simulation types
//!
//! Everything the contact resolver is allowed to mutate lives in
//! [`SessionState`]. Presentation code observes it through [`GameEvent`]s.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Stable identity of an entity owned by the external scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Role of an entity, used for contact dispatch
///
/// Declaration order is the total order used to canonicalize contact pairs,
/// so `Player` always sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Player,
    Pursuer,
    Chest,
    Key,
    LifePickup,
}

/// How the session ended (if it has)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Life count changed (already clamped)
    LivesChanged(u8),
    /// Show a persistent message, or clear it with `None`
    Message(Option<String>),
    /// Session reached a terminal outcome
    GameOver { won: bool },
}

/// Mutable state of one play-through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Remaining lives, always within `0..=MAX_LIVES`
    pub lives: u8,
    /// Set once the key is picked up, never cleared
    pub has_key: bool,
    pub outcome: Outcome,
    /// Message currently on screen
    pub message: Option<String>,
    /// Pending notifications (drained by the presentation layer)
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Fresh session, as initialized on scene entry
    pub fn new() -> Self {
        Self {
            lives: STARTING_LIVES,
            has_key: false,
            outcome: Outcome::InProgress,
            message: None,
            events: Vec::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Apply a life gain or loss
    ///
    /// This is the only place lives change during play: it clamps at
    /// `MAX_LIVES`, reports the new count, and ends the session as `Lost`
    /// when the count reaches zero.
    pub fn change_lives(&mut self, delta: i32) {
        if self.is_over() {
            return;
        }
        let lives = (i32::from(self.lives) + delta).clamp(0, i32::from(MAX_LIVES)) as u8;
        self.lives = lives;
        self.events.push(GameEvent::LivesChanged(lives));

        if lives == 0 {
            self.finish(Outcome::Lost);
        }
    }

    /// Grant the key. Returns false if it was already held.
    pub fn grant_key(&mut self) -> bool {
        if self.has_key {
            return false;
        }
        self.has_key = true;
        true
    }

    /// Show a persistent message (no event if it is already showing)
    pub fn show_message(&mut self, text: &str) {
        if self.message.as_deref() == Some(text) {
            return;
        }
        self.message = Some(text.to_string());
        self.events.push(GameEvent::Message(self.message.clone()));
    }

    pub fn clear_message(&mut self) {
        if self.message.take().is_some() {
            self.events.push(GameEvent::Message(None));
        }
    }

    /// Enter a terminal outcome. Returns false if the session already ended.
    ///
    /// Tears down the transient state and resets the life counter to zero;
    /// the next session starts from [`SessionState::new`].
    pub fn finish(&mut self, outcome: Outcome) -> bool {
        if self.is_over() || !outcome.is_terminal() {
            return false;
        }
        self.clear_message();
        self.outcome = outcome;
        self.events.push(GameEvent::GameOver {
            won: outcome == Outcome::Won,
        });
        log::info!("Session over: {:?}", outcome);
        self.reset();
        true
    }

    /// Zero the life counter on teardown
    pub fn reset(&mut self) {
        self.lives = 0;
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
