//! Sound cues.
//!
//! The simulation only reports events; whoever owns the frame loop maps
//! them onto an `Audio` backend.  A terminal can't mix samples, so the
//! shipped backend rings the bell on explosions and stays quiet otherwise.

use std::io::Write;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Good object landed in the basket
    Catch,
    /// Bomb landed in the basket
    Explosion,
}

/// Fire-and-forget playback.
pub trait Audio {
    fn play(&mut self, cue: Cue);

    /// Start the looping background track.  Called once per process.
    fn start_music(&mut self);
}

/// Terminal bell backend.
pub struct Bell<W: Write> {
    out: W,
}

impl<W: Write> Bell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Audio for Bell<W> {
    fn play(&mut self, cue: Cue) {
        log::debug!("cue {:?}", cue);
        if cue != Cue::Explosion {
            return;
        }
        // A failed bell is not worth interrupting the game for.
        let _ = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
    }

    fn start_music(&mut self) {
        log::info!("Background music is not available in the terminal backend");
    }
}

/// Backend used when sound is switched off.
#[derive(Debug, Default)]
pub struct Silent;

impl Audio for Silent {
    fn play(&mut self, _cue: Cue) {}
    fn start_music(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bell_rings_only_on_explosion() {
        let mut bell = Bell::new(Vec::new());
        bell.play(Cue::Catch);
        bell.play(Cue::Explosion);
        bell.start_music();
        assert_eq!(bell.into_inner(), b"\x07".to_vec());
    }

    #[test]
    fn silent_backend_can_drive_a_game() {
        use crate::persistence::HighScoreStore;
        use crate::session::{Command, FrameInput, Game, Screen};
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let path = std::env::temp_dir()
            .join(format!("catch_the_object_silent_{}", std::process::id()));
        let mut game = Game::new(
            HighScoreStore::new(&path),
            Silent,
            StdRng::seed_from_u64(9),
            800.0,
            600.0,
        );
        let start = FrameInput { command: Some(Command::Start), ..FrameInput::default() };
        assert_eq!(game.step(&start), Screen::Playing);
        for _ in 0..60 {
            game.step(&FrameInput::default());
        }
        assert_eq!(game.screen(), Screen::Playing);
    }
}
