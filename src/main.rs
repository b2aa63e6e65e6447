mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use catch_the_object::audio::{Audio, Bell, Silent};
use catch_the_object::config::{default_settings_path, Settings};
use catch_the_object::persistence::HighScoreStore;
use catch_the_object::session::{Command, FrameInput, Game, Screen};

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn command_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char(' ') => Some(Command::Start),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        _ => None,
    }
}

/// Send log output to a file; the terminal belongs to the game.
fn init_logging(settings: &Settings) {
    let path = settings.log_path();
    match File::create(&path) {
        Ok(file) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(e) => eprintln!("logging disabled, cannot open {}: {}", path.display(), e),
    }
}

// ── Frame loop ────────────────────────────────────────────────────────────────

/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame we check which keys are still "fresh"
/// (within `HOLD_WINDOW` frames) and move the basket accordingly.  One-shot
/// keys (start, restart, quit) become a `Command` for this frame only.
fn run<W: Write, A: Audio>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    settings: &Settings,
    audio: A,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let (width, height) = display::playfield_size(cols, rows);
    let store = HighScoreStore::new(settings.high_score_path());
    let mut game = Game::new(store, audio, thread_rng(), width, height);
    let frame_len = settings.frame_duration();

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut command = None;
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    // Quit wins over anything else pressed in the same frame
                    if command != Some(Command::Quit) {
                        command = command_for(code, modifiers).or(command);
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let left = is_held(&key_frame, &KeyCode::Left, frame)
            || is_held(&key_frame, &KeyCode::Char('a'), frame)
            || is_held(&key_frame, &KeyCode::Char('A'), frame);
        let right = is_held(&key_frame, &KeyCode::Right, frame)
            || is_held(&key_frame, &KeyCode::Char('d'), frame)
            || is_held(&key_frame, &KeyCode::Char('D'), frame);

        let input = FrameInput { left, right, command };
        match game.step(&input) {
            Screen::Terminated => return Ok(()),
            Screen::Start => display::render_start(out, cols, rows, game.high_score())?,
            Screen::Playing => display::render_play(out, game.state(), cols, rows)?,
            Screen::GameOver => display::render_game_over(
                out,
                game.state(),
                game.high_score(),
                game.new_record(),
                cols,
                rows,
            )?,
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let settings_path = default_settings_path();
    let settings = Settings::load(&settings_path);
    init_logging(&settings);
    log::info!("Catch the Falling Objects starting");

    let (cols, rows) = terminal::size().context("cannot query terminal size")?;
    if cols < display::MIN_COLS || rows < display::MIN_ROWS {
        bail!(
            "terminal is {}x{}, need at least {}x{}",
            cols,
            rows,
            display::MIN_COLS,
            display::MIN_ROWS
        );
    }

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("cannot enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the frame loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = if settings.sound {
        run(&mut out, &rx, &settings, Bell::new(stdout()), cols, rows)
    } else {
        run(&mut out, &rx, &settings, Silent, cols, rows)
    };

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("Exiting");
    result.context("terminal I/O failed")
}
