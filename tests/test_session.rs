use std::path::PathBuf;

use catch_the_object::audio::{Audio, Cue};
use catch_the_object::entities::{FallingObject, GameStatus, ObjectKind};
use catch_the_object::persistence::HighScoreStore;
use catch_the_object::session::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Default)]
struct Recorder {
    cues: Vec<Cue>,
    music_starts: u32,
}

impl Audio for Recorder {
    fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
    fn start_music(&mut self) {
        self.music_starts += 1;
    }
}

fn scratch(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "catch_the_object_session_{}_{}",
        std::process::id(),
        name
    ));
    let _ = std::fs::remove_file(&path);
    path
}

fn new_game(path: &PathBuf) -> Game<Recorder, StdRng> {
    Game::new(
        HighScoreStore::new(path),
        Recorder::default(),
        StdRng::seed_from_u64(3),
        800.0,
        600.0,
    )
}

fn press(command: Command) -> FrameInput {
    FrameInput { command: Some(command), ..FrameInput::default() }
}

fn idle() -> FrameInput {
    FrameInput::default()
}

/// Put an object right above the basket so the next frame resolves it.
fn drop_on_basket(game: &Game<Recorder, StdRng>, kind: ObjectKind) -> FallingObject {
    let b = &game.state().basket;
    FallingObject { x: b.x, y: b.y - 10.0, kind, speed: 5.0 }
}

/// Run frames, feeding one hazard per frame, until the session ends.
fn lose_all_lives(game: &mut Game<Recorder, StdRng>) -> Vec<Screen> {
    let mut screens = Vec::new();
    while game.screen() == Screen::Playing {
        let obj = drop_on_basket(game, ObjectKind::Hazard);
        game.state_mut().objects = vec![obj];
        screens.push(game.step(&idle()));
    }
    screens
}

// ── transition ────────────────────────────────────────────────────────────────

#[test]
fn transition_table() {
    assert_eq!(transition(Screen::Start, Some(Command::Start)), Screen::Playing);
    assert_eq!(transition(Screen::Start, Some(Command::Restart)), Screen::Start);
    assert_eq!(transition(Screen::Start, None), Screen::Start);
    assert_eq!(transition(Screen::Playing, Some(Command::Start)), Screen::Playing);
    assert_eq!(transition(Screen::GameOver, Some(Command::Restart)), Screen::Start);
    assert_eq!(transition(Screen::GameOver, Some(Command::Start)), Screen::GameOver);
    for s in [Screen::Start, Screen::Playing, Screen::GameOver] {
        assert_eq!(transition(s, Some(Command::Quit)), Screen::Terminated);
    }
    assert_eq!(transition(Screen::Terminated, Some(Command::Start)), Screen::Terminated);
}

// ── Game ──────────────────────────────────────────────────────────────────────

#[test]
fn new_game_loads_score_and_starts_music_once() {
    let path = scratch("load");
    std::fs::write(&path, "12").unwrap();
    let game = new_game(&path);
    assert_eq!(game.screen(), Screen::Start);
    assert_eq!(game.high_score(), 12);
    assert_eq!(game.audio().music_starts, 1);
}

#[test]
fn start_then_quit() {
    let path = scratch("quit");
    let mut game = new_game(&path);
    assert_eq!(game.step(&idle()), Screen::Start);
    assert_eq!(game.step(&press(Command::Start)), Screen::Playing);
    assert_eq!(game.step(&idle()), Screen::Playing);
    assert_eq!(game.step(&press(Command::Quit)), Screen::Terminated);
}

#[test]
fn movement_input_moves_basket() {
    let path = scratch("move");
    let mut game = new_game(&path);
    game.step(&press(Command::Start));
    let x0 = game.state().basket.x;
    game.step(&FrameInput { left: true, ..FrameInput::default() });
    assert_eq!(game.state().basket.x, x0 - 10.0);
    game.step(&FrameInput { left: true, right: true, command: None });
    assert_eq!(game.state().basket.x, x0 - 10.0);
}

#[test]
fn catch_and_hazard_play_cues() {
    let path = scratch("cues");
    let mut game = new_game(&path);
    game.step(&press(Command::Start));

    let obj = drop_on_basket(&game, ObjectKind::Normal);
    game.state_mut().objects = vec![obj];
    game.step(&idle());

    let obj = drop_on_basket(&game, ObjectKind::Hazard);
    game.state_mut().objects = vec![obj];
    game.step(&idle());

    assert_eq!(game.audio().cues, vec![Cue::Catch, Cue::Explosion]);
}

#[test]
fn third_hazard_ends_session_and_saves_record() {
    let path = scratch("record");
    std::fs::write(&path, "2").unwrap();
    let mut game = new_game(&path);
    game.step(&press(Command::Start));

    game.state_mut().score = 9;

    let screens = lose_all_lives(&mut game);
    assert_eq!(screens, vec![Screen::Playing, Screen::Playing, Screen::GameOver]);
    assert_eq!(game.state().lives, 0);
    assert_eq!(game.state().status, GameStatus::GameOver);
    assert!(game.new_record());
    assert_eq!(game.high_score(), 9);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "9");

    // Game over screen waits for a key.
    assert_eq!(game.step(&idle()), Screen::GameOver);
    assert_eq!(game.step(&press(Command::Restart)), Screen::Start);
    assert_eq!(game.step(&press(Command::Start)), Screen::Playing);
    assert_eq!(game.state().score, 0);
    assert_eq!(game.state().lives, 3);
    assert_eq!(game.state().high_score, 9);
}

#[test]
fn lower_score_leaves_file_alone() {
    let path = scratch("lower");
    std::fs::write(&path, "50").unwrap();
    let mut game = new_game(&path);
    game.step(&press(Command::Start));
    lose_all_lives(&mut game);
    assert!(!game.new_record());
    assert_eq!(game.high_score(), 50);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "50");
}

#[test]
fn unwritable_store_does_not_stop_the_game() {
    let mut game = Game::new(
        HighScoreStore::new("/definitely/not/a/dir/score"),
        Recorder::default(),
        StdRng::seed_from_u64(3),
        800.0,
        600.0,
    );
    game.step(&press(Command::Start));
    game.state_mut().score = 5;
    lose_all_lives(&mut game);
    assert_eq!(game.screen(), Screen::GameOver);
    assert_eq!(game.high_score(), 5);
    assert_eq!(game.step(&press(Command::Restart)), Screen::Start);
}
