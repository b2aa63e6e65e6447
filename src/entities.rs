/// All game entity types — pure data, no logic.

/// Falling objects are square, in logical pixels.
pub const OBJECT_SIZE: f32 = 50.0;

pub const BASKET_BASE_WIDTH: f32 = 100.0;
pub const BASKET_HEIGHT: f32 = 50.0;
/// Distance from the basket's top edge to the bottom of the screen.
pub const BASKET_BOTTOM_OFFSET: f32 = 80.0;

pub const STARTING_LIVES: u32 = 3;
pub const MAX_LIVES: u32 = 7;

/// A plain RGB triple; the renderer decides how to show it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Plain apple, one point.
    Normal,
    /// Golden apple, worth more.
    Bonus,
    /// Heart — one extra life (up to MAX_LIVES).
    Life,
    /// Doubles the basket width for WIDEN_DURATION frames.
    Widen,
    /// Bomb — costs a life and breaks the combo.
    Hazard,
}

/// Static per-kind data.
#[derive(Clone, Copy, Debug)]
pub struct KindInfo {
    /// Relative spawn weight.
    pub weight: u32,
    /// Base points before the combo multiplier (zero for pure power-ups).
    pub points: u32,
    pub grants_life: bool,
    pub grants_widen: bool,
    pub hazard: bool,
    /// Colour of the particle burst when this kind resolves against the basket.
    pub spark: Rgb,
}

const NORMAL: KindInfo = KindInfo {
    weight: 50,
    points: 1,
    grants_life: false,
    grants_widen: false,
    hazard: false,
    spark: Rgb(235, 64, 52),
};

const BONUS: KindInfo = KindInfo {
    weight: 15,
    points: 3,
    grants_life: false,
    grants_widen: false,
    hazard: false,
    spark: Rgb(255, 215, 0),
};

const LIFE: KindInfo = KindInfo {
    weight: 10,
    points: 0,
    grants_life: true,
    grants_widen: false,
    hazard: false,
    spark: Rgb(255, 105, 180),
};

const WIDEN: KindInfo = KindInfo {
    weight: 8,
    points: 0,
    grants_life: false,
    grants_widen: true,
    hazard: false,
    spark: Rgb(64, 224, 208),
};

const HAZARD: KindInfo = KindInfo {
    weight: 17,
    points: 0,
    grants_life: false,
    grants_widen: false,
    hazard: true,
    spark: Rgb(255, 140, 0),
};

impl ObjectKind {
    pub const ALL: [ObjectKind; 5] = [
        ObjectKind::Normal,
        ObjectKind::Bonus,
        ObjectKind::Life,
        ObjectKind::Widen,
        ObjectKind::Hazard,
    ];

    pub fn info(self) -> &'static KindInfo {
        match self {
            ObjectKind::Normal => &NORMAL,
            ObjectKind::Bonus => &BONUS,
            ObjectKind::Life => &LIFE,
            ObjectKind::Widen => &WIDEN,
            ObjectKind::Hazard => &HAZARD,
        }
    }

    pub fn is_good(self) -> bool {
        !self.info().hazard
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Falling objects & basket ─────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct FallingObject {
    /// Left edge (logical pixels).
    pub x: f32,
    /// Top edge (logical pixels).
    pub y: f32,
    pub kind: ObjectKind,
    /// Pixels per frame.
    pub speed: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Basket {
    pub x: f32,
    pub y: f32,
    /// BASKET_BASE_WIDTH, or twice that while a widen power-up runs.
    pub width: f32,
    pub height: f32,
}

/// Axis-aligned rectangle used for overlap tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Strict overlap: rectangles that merely touch do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

impl FallingObject {
    pub fn rect(&self) -> Rect {
        Rect { x: self.x, y: self.y, w: OBJECT_SIZE, h: OBJECT_SIZE }
    }
}

impl Basket {
    pub fn rect(&self) -> Rect {
        Rect { x: self.x, y: self.y, w: self.width, h: self.height }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PowerUp {
    pub widen_active: bool,
    /// Frames left on the widen timer.
    pub remaining: u32,
}

// ── Particles ────────────────────────────────────────────────────────────────

/// A decorative dot. Has no effect on gameplay.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: Rgb,
    pub radius: f32,
    /// Frames left to live.
    pub life: u32,
    pub max_life: u32,
}

impl Particle {
    /// Remaining lifetime as a fraction in [0, 1].
    pub fn life_fraction(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

// ── Events ───────────────────────────────────────────────────────────────────

/// Something that happened during the last frame.  The caller turns these
/// into sounds and log lines; the simulation never plays audio itself.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Caught { kind: ObjectKind, points: u32, combo: u32 },
    HazardHit { lives_left: u32 },
    /// A good object fell past the bottom edge.
    Missed { kind: ObjectKind },
    GameOver { score: u32 },
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire state of one playthrough.  Cloneable so pure update functions
/// can return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub basket: Basket,
    pub objects: Vec<FallingObject>,
    pub particles: Vec<Particle>,
    pub power_up: PowerUp,
    pub score: u32,
    pub lives: u32,
    /// Consecutive good catches since the last miss or hazard.
    pub combo: u32,
    /// Best score known when this session started.
    pub high_score: u32,
    /// Frames since the last spawn.
    pub spawn_timer: u32,
    /// Frames of screen shake left.
    pub shake: u32,
    pub status: GameStatus,
    pub frame: u64,
    pub width: f32,
    pub height: f32,
    /// Events produced by the most recent tick.
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Difficulty level, derived from the score.
    pub fn level(&self) -> u32 {
        self.score / 20
    }

    pub fn multiplier(&self) -> u32 {
        1 + self.combo / 3
    }
}
