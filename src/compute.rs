/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::{
    Basket, FallingObject, GameEvent, GameState, GameStatus, ObjectKind, PowerUp,
    BASKET_BASE_WIDTH, BASKET_BOTTOM_OFFSET, BASKET_HEIGHT, MAX_LIVES, OBJECT_SIZE,
    STARTING_LIVES,
};
use crate::particles::{self, CATCH_BURST, HAZARD_BURST};

/// Horizontal basket movement per frame while a direction is held.
pub const BASKET_SPEED: f32 = 10.0;

/// Frames a widen power-up lasts (10 s at 30 FPS).
pub const WIDEN_DURATION: u32 = 300;

/// Frames of screen shake after a hazard hit.
pub const SHAKE_FRAMES: u32 = 12;

// ── Difficulty tables ────────────────────────────────────────────────────────

/// Fall speed before the per-object random factor, in pixels per frame.
pub fn base_speed(level: u32) -> f32 {
    5.0 + 2.5 * level as f32
}

/// Frames between spawns.
pub fn spawn_threshold(level: u32) -> u32 {
    28u32.saturating_sub(2 * level).max(6)
}

/// Combo multiplier for a given streak.
pub fn multiplier_for(combo: u32) -> u32 {
    1 + combo / 3
}

/// Weighted draw over the kind table.
pub fn pick_kind(rng: &mut impl Rng) -> ObjectKind {
    *ObjectKind::ALL
        .choose_weighted(rng, |k| k.info().weight)
        .unwrap_or(&ObjectKind::Normal)
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial state for a playfield of `width` × `height` logical pixels.
pub fn init_state(width: f32, height: f32, high_score: u32) -> GameState {
    GameState {
        basket: Basket {
            x: ((width - BASKET_BASE_WIDTH) / 2.0).max(0.0),
            y: height - BASKET_BOTTOM_OFFSET,
            width: BASKET_BASE_WIDTH,
            height: BASKET_HEIGHT,
        },
        objects: Vec::new(),
        particles: Vec::new(),
        power_up: PowerUp::default(),
        score: 0,
        lives: STARTING_LIVES,
        combo: 0,
        high_score,
        spawn_timer: 0,
        shake: 0,
        status: GameStatus::Playing,
        frame: 0,
        width,
        height,
        events: Vec::new(),
    }
}

/// Create one object at the top of the screen for the given level.
pub fn spawn_object(width: f32, level: u32, rng: &mut impl Rng) -> FallingObject {
    let max_x = (width - OBJECT_SIZE).max(0.0);
    FallingObject {
        x: rng.gen_range(0.0..=max_x),
        y: 0.0,
        kind: pick_kind(rng),
        speed: base_speed(level) * rng.gen_range(0.85..=1.15),
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

fn clamp_basket_x(x: f32, basket_width: f32, screen_width: f32) -> f32 {
    x.min(screen_width - basket_width).max(0.0)
}

pub fn move_basket_left(state: &GameState) -> GameState {
    let x = clamp_basket_x(state.basket.x - BASKET_SPEED, state.basket.width, state.width);
    GameState {
        basket: Basket { x, ..state.basket.clone() },
        ..state.clone()
    }
}

pub fn move_basket_right(state: &GameState) -> GameState {
    let x = clamp_basket_x(state.basket.x + BASKET_SPEED, state.basket.width, state.width);
    GameState {
        basket: Basket { x, ..state.basket.clone() },
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// Once the state is `GameOver` this returns an unchanged copy, so the
/// `GameOver` event is emitted exactly once.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::GameOver {
        return GameState { events: Vec::new(), ..state.clone() };
    }

    let mut next = GameState {
        frame: state.frame + 1,
        events: Vec::new(),
        ..state.clone()
    };

    // ── 1. Power-up timer ────────────────────────────────────────────────────
    if next.power_up.widen_active {
        next.power_up.remaining = next.power_up.remaining.saturating_sub(1);
        if next.power_up.remaining == 0 {
            next.power_up.widen_active = false;
            next.basket.width = BASKET_BASE_WIDTH;
        }
    }

    // ── 2. Spawn ─────────────────────────────────────────────────────────────
    let level = next.level();
    next.spawn_timer += 1;
    if next.spawn_timer >= spawn_threshold(level) {
        next.spawn_timer = 0;
        let obj = spawn_object(next.width, level, rng);
        next.objects.push(obj);
    }

    // ── 3. Particles age before new bursts join them ─────────────────────────
    next.particles = particles::step(&next.particles);

    // ── 4. Move objects and resolve each one at most once ────────────────────
    let moved: Vec<FallingObject> = std::mem::take(&mut next.objects)
        .into_iter()
        .map(|o| FallingObject { y: o.y + o.speed, ..o })
        .collect();

    // Every object this frame is tested against the basket as it was when
    // the frame began; a widen caught mid-loop takes effect next frame.
    let basket = next.basket.rect();
    let mut survivors = Vec::with_capacity(moved.len());
    for obj in moved {
        // The session ends on the hit that took the last life.
        if next.lives == 0 {
            survivors.push(obj);
            continue;
        }
        if obj.rect().overlaps(&basket) {
            resolve_catch(&mut next, &obj, rng);
        } else if obj.y > next.height {
            if obj.kind.is_good() {
                next.combo = 0;
                next.events.push(GameEvent::Missed { kind: obj.kind });
            }
        } else {
            survivors.push(obj);
        }
    }
    next.objects = survivors;

    // ── 5. Shake decays ──────────────────────────────────────────────────────
    if !next.events.iter().any(|e| matches!(e, GameEvent::HazardHit { .. })) {
        next.shake = next.shake.saturating_sub(1);
    }

    // ── 6. Status ────────────────────────────────────────────────────────────
    if next.lives == 0 {
        next.status = GameStatus::GameOver;
        next.events.push(GameEvent::GameOver { score: next.score });
    }

    next
}

/// Apply the outcome of `obj` landing in the basket.
fn resolve_catch(state: &mut GameState, obj: &FallingObject, rng: &mut impl Rng) {
    let info = obj.kind.info();
    let cx = obj.x + OBJECT_SIZE / 2.0;
    let cy = obj.y + OBJECT_SIZE / 2.0;

    if info.hazard {
        state.lives = state.lives.saturating_sub(1);
        state.combo = 0;
        state.shake = SHAKE_FRAMES;
        state
            .particles
            .extend(particles::burst(rng, cx, cy, HAZARD_BURST, info.spark));
        state.events.push(GameEvent::HazardHit { lives_left: state.lives });
        return;
    }

    state.combo += 1;
    let points = info.points.max(1) * multiplier_for(state.combo);
    state.score += points;
    state
        .particles
        .extend(particles::burst(rng, cx, cy, CATCH_BURST, info.spark));

    if info.grants_life {
        state.lives = (state.lives + 1).min(MAX_LIVES);
    }
    if info.grants_widen {
        state.power_up = PowerUp { widen_active: true, remaining: WIDEN_DURATION };
        state.basket.width = BASKET_BASE_WIDTH * 2.0;
        state.basket.x = clamp_basket_x(state.basket.x, state.basket.width, state.width);
    }

    state.events.push(GameEvent::Caught {
        kind: obj.kind,
        points,
        combo: state.combo,
    });
}
