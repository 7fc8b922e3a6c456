//! Screen flow and HUD
//!
//! The presentation side of the game. It owns the current screen, listens to
//! [`GameEvent`]s from the session, and never mutates session state itself.

use glam::Vec2;

use crate::headless::Stage;
use crate::scene::{SceneLayout, SetupError};
use crate::sim::{GameEvent, GameSession};

/// HUD text shown over the game screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hud {
    /// "Lives: n", `None` once torn down
    pub lives_text: Option<String>,
    /// Persistent message line
    pub message: Option<String>,
}

impl Hud {
    fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::LivesChanged(lives) => {
                self.lives_text = Some(format!("Lives: {}", lives));
            }
            GameEvent::Message(text) => {
                self.message = text.clone();
            }
            GameEvent::GameOver { .. } => {}
        }
    }

    fn tear_down(&mut self) {
        self.lives_text = None;
        self.message = None;
    }
}

/// Which screen is up
#[derive(Debug, Clone)]
pub enum Screen {
    /// A session is being played
    Game(Box<Stage>),
    /// Win or lose screen; a tap starts a new session
    Menu { did_win: bool },
}

/// Top-level game: switches between the play screen and the menu
#[derive(Debug, Clone)]
pub struct App {
    layout: SceneLayout,
    pub screen: Screen,
    pub hud: Hud,
    /// Sessions started so far (including the current one)
    pub sessions: u32,
}

impl App {
    /// Build the first session. Fails if the layout cannot produce a scene.
    pub fn new(layout: SceneLayout) -> Result<Self, SetupError> {
        let mut app = Self {
            screen: Screen::Game(Box::new(Stage::new(GameSession::from_layout(&layout)?))),
            layout,
            hud: Hud::default(),
            sessions: 1,
        };
        app.pump_events();
        Ok(app)
    }

    pub fn stage(&self) -> Option<&Stage> {
        match &self.screen {
            Screen::Game(stage) => Some(stage.as_ref()),
            Screen::Menu { .. } => None,
        }
    }

    /// Advance one frame. Does nothing while the menu is up.
    pub fn frame(&mut self, pointer: Option<Vec2>) {
        if let Screen::Game(stage) = &mut self.screen {
            stage.frame(pointer);
            self.pump_events();
        }
    }

    /// Tap on the menu: start a fresh session
    pub fn tap(&mut self) -> Result<(), SetupError> {
        if let Screen::Menu { .. } = self.screen {
            let session = GameSession::from_layout(&self.layout)?;
            self.screen = Screen::Game(Box::new(Stage::new(session)));
            self.sessions += 1;
            log::info!("Starting session {}", self.sessions);
            self.pump_events();
        }
        Ok(())
    }

    fn pump_events(&mut self) {
        let Screen::Game(stage) = &mut self.screen else {
            return;
        };

        let mut game_over = None;
        for event in stage.session.drain_events() {
            log::debug!("event: {:?}", event);
            self.hud.apply(&event);
            if let GameEvent::GameOver { won } = event {
                game_over = Some(won);
            }
        }

        if let Some(did_win) = game_over {
            self.hud.tear_down();
            self.screen = Screen::Menu { did_win };
            log::info!("Showing {} screen", if did_win { "win" } else { "lose" });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FIND_KEY_MESSAGE;
    use crate::sim::SceneHost;

    fn app() -> App {
        App::new(SceneLayout::default()).unwrap()
    }

    fn stage_mut(app: &mut App) -> &mut Stage {
        match &mut app.screen {
            Screen::Game(stage) => stage.as_mut(),
            Screen::Menu { .. } => panic!("expected game screen"),
        }
    }

    #[test]
    fn test_initial_hud() {
        let app = app();
        assert_eq!(app.hud.lives_text.as_deref(), Some("Lives: 1"));
        assert!(app.hud.message.is_none());
    }

    #[test]
    fn test_locked_chest_message_then_key_clears_it() {
        let mut app = app();
        let stage = stage_mut(&mut app);
        let registry = stage.session.registry().clone();

        let chest = stage.world.position(registry.chest()).unwrap();
        stage.world.teleport(registry.player(), chest);
        app.frame(None);
        assert_eq!(app.hud.message.as_deref(), Some(FIND_KEY_MESSAGE));

        let stage = stage_mut(&mut app);
        let key = stage.world.position(registry.key()).unwrap();
        stage.world.teleport(registry.player(), key);
        app.frame(None);
        assert!(app.hud.message.is_none());
    }

    #[test]
    fn test_loss_shows_menu_and_tap_restarts() {
        let mut app = app();
        let stage = stage_mut(&mut app);
        let registry = stage.session.registry().clone();

        let pursuer = stage.world.position(registry.pursuers()[0]).unwrap();
        stage.world.teleport(registry.player(), pursuer);
        app.frame(None);

        assert!(matches!(app.screen, Screen::Menu { did_win: false }));
        assert_eq!(app.hud, Hud::default());

        // Frames do nothing on the menu
        app.frame(Some(Vec2::ONE));
        assert!(app.stage().is_none());

        app.tap().unwrap();
        assert_eq!(app.sessions, 2);
        let stage = app.stage().unwrap();
        assert_eq!(stage.session.state().lives, 1);
        assert!(!stage.session.state().has_key);
        assert_eq!(app.hud.lives_text.as_deref(), Some("Lives: 1"));
    }

    #[test]
    fn test_win_shows_win_menu() {
        let mut app = app();
        let stage = stage_mut(&mut app);
        let registry = stage.session.registry().clone();

        let key = stage.world.position(registry.key()).unwrap();
        stage.world.teleport(registry.player(), key);
        app.frame(None);

        let stage = stage_mut(&mut app);
        let chest = stage.world.position(registry.chest()).unwrap();
        stage.world.teleport(registry.player(), chest);
        app.frame(None);

        assert!(matches!(app.screen, Screen::Menu { did_win: true }));
    }

    #[test]
    fn test_tap_ignored_during_play() {
        let mut app = app();
        app.tap().unwrap();
        assert_eq!(app.sessions, 1);
        assert!(app.stage().is_some());
    }
}
