//! Screen flow and the object that owns everything a running game needs.
//!
//! ```text
//! Start ──start──▶ Playing ──lives hit 0──▶ GameOver ──restart──▶ Start
//!   │                 │                        │
//!   └──────quit───────┴──────────quit──────────┴──▶ Terminated
//! ```

use rand::Rng;

use crate::audio::{Audio, Cue};
use crate::compute::{init_state, move_basket_left, move_basket_right, tick};
use crate::entities::{GameEvent, GameState, GameStatus};
use crate::persistence::HighScoreStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Start,
    Playing,
    GameOver,
    Terminated,
}

/// One-shot inputs.  Movement is continuous and lives in `FrameInput`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Restart,
    Quit,
}

/// Everything the player asked for during one frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub command: Option<Command>,
}

/// Input-driven transitions.  Commands that make no sense on the current
/// screen are ignored.  Playing → GameOver is not here: it follows from the
/// simulation, not from a key.
pub fn transition(screen: Screen, command: Option<Command>) -> Screen {
    match (screen, command) {
        (Screen::Terminated, _) => Screen::Terminated,
        (_, Some(Command::Quit)) => Screen::Terminated,
        (Screen::Start, Some(Command::Start)) => Screen::Playing,
        (Screen::GameOver, Some(Command::Restart)) => Screen::Start,
        (s, _) => s,
    }
}

/// The game context: current screen, the session being played, the best
/// score and the collaborators it talks to.  One per process.
pub struct Game<A: Audio, R: Rng> {
    screen: Screen,
    state: GameState,
    store: HighScoreStore,
    high_score: u32,
    /// Set when the session that just ended beat the previous best.
    new_record: bool,
    audio: A,
    rng: R,
    width: f32,
    height: f32,
}

impl<A: Audio, R: Rng> Game<A, R> {
    /// Load the high score, start the music, and sit on the start screen.
    pub fn new(store: HighScoreStore, mut audio: A, rng: R, width: f32, height: f32) -> Self {
        let high_score = store.load();
        audio.start_music();
        Self {
            screen: Screen::Start,
            state: init_state(width, height, high_score),
            store,
            high_score,
            new_record: false,
            audio,
            rng,
            width,
            height,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access to the running session, e.g. to stage a scenario.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn new_record(&self) -> bool {
        self.new_record
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Run one frame of whatever screen is active and return the screen
    /// for the next frame.
    pub fn step(&mut self, input: &FrameInput) -> Screen {
        let next = transition(self.screen, input.command);

        self.screen = match (self.screen, next) {
            (Screen::Start, Screen::Playing) => {
                self.state = init_state(self.width, self.height, self.high_score);
                self.new_record = false;
                log::info!("Session started (best {})", self.high_score);
                Screen::Playing
            }
            (Screen::Playing, Screen::Playing) => self.play_frame(input),
            (Screen::GameOver, Screen::Start) => {
                self.state = init_state(self.width, self.height, self.high_score);
                Screen::Start
            }
            (_, s) => s,
        };

        if self.screen == Screen::Terminated {
            log::info!("Quit requested");
        }
        self.screen
    }

    fn play_frame(&mut self, input: &FrameInput) -> Screen {
        if input.left && !input.right {
            self.state = move_basket_left(&self.state);
        } else if input.right && !input.left {
            self.state = move_basket_right(&self.state);
        }

        self.state = tick(&self.state, &mut self.rng);

        for event in &self.state.events {
            match event {
                GameEvent::Caught { .. } => self.audio.play(Cue::Catch),
                GameEvent::HazardHit { lives_left } => {
                    log::debug!("Hazard hit, {} lives left", lives_left);
                    self.audio.play(Cue::Explosion);
                }
                GameEvent::Missed { .. } | GameEvent::GameOver { .. } => {}
            }
        }

        if self.state.status == GameStatus::GameOver {
            self.finish_session();
            Screen::GameOver
        } else {
            Screen::Playing
        }
    }

    /// Record the final score.  A new best is written before the frame ends
    /// so an abrupt exit right after can't lose it.
    fn finish_session(&mut self) {
        let score = self.state.score;
        log::info!("Session over: score {} at level {}", score, self.state.level());
        if score > self.high_score {
            self.high_score = score;
            self.new_record = true;
            if let Err(e) = self.store.save(score) {
                log::warn!(
                    "Could not save high score to {}: {}",
                    self.store.path().display(),
                    e
                );
            }
        }
    }
}
