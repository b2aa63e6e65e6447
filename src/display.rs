/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.  The simulation works in logical pixels;
/// one terminal cell covers CELL_W × CELL_H of them.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use catch_the_object::entities::{
    FallingObject, GameState, ObjectKind, Particle, Rgb, OBJECT_SIZE,
};
use catch_the_object::particles::current_radius;

pub const CELL_W: f32 = 10.0;
pub const CELL_H: f32 = 20.0;

/// Smallest terminal the game agrees to run in (columns, rows).
pub const MIN_COLS: u16 = 40;
pub const MIN_ROWS: u16 = 16;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_LEVEL: Color = Color::Cyan;
const C_COMBO: Color = Color::Magenta;
const C_POWERUP_ACTIVE: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;
const C_BASKET: Color = Color::Rgb { r: 181, g: 121, b: 62 };
const C_BASKET_WIDE: Color = Color::Rgb { r: 64, g: 224, b: 208 };

/// Background per level, cycling once the list runs out.
const BACKGROUNDS: [Color; 6] = [
    Color::Rgb { r: 12, g: 18, b: 32 },
    Color::Rgb { r: 14, g: 30, b: 22 },
    Color::Rgb { r: 34, g: 20, b: 40 },
    Color::Rgb { r: 40, g: 26, b: 12 },
    Color::Rgb { r: 10, g: 30, b: 40 },
    Color::Rgb { r: 42, g: 12, b: 16 },
];

fn rgb(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

/// `c` dimmed by `f` in [0, 1]; the terminal's stand-in for alpha.
fn faded(c: Rgb, f: f32) -> Color {
    let f = f.clamp(0.0, 1.0);
    Color::Rgb {
        r: (c.0 as f32 * f) as u8,
        g: (c.1 as f32 * f) as u8,
        b: (c.2 as f32 * f) as u8,
    }
}

pub fn background_for(level: u32) -> Color {
    BACKGROUNDS[level as usize % BACKGROUNDS.len()]
}

/// Logical playfield size for a terminal of `cols` × `rows`.  Row 0 holds the
/// HUD and the last row the controls hint.
pub fn playfield_size(cols: u16, rows: u16) -> (f32, f32) {
    (
        cols as f32 * CELL_W,
        rows.saturating_sub(2) as f32 * CELL_H,
    )
}

fn print_centered<W: Write>(
    out: &mut W,
    cols: u16,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn finish<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Start screen ──────────────────────────────────────────────────────────────

pub fn render_start<W: Write>(
    out: &mut W,
    cols: u16,
    rows: u16,
    high_score: u32,
) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(background_for(0)))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let cy = rows / 2;
    print_centered(out, cols, cy.saturating_sub(6), "★  CATCH THE FALLING OBJECTS  ★", Color::Cyan)?;

    let hs = format!("High Score: {}", high_score);
    print_centered(out, cols, cy.saturating_sub(4), &hs, Color::Yellow)?;

    let legend: [(ObjectKind, &str); 5] = [
        (ObjectKind::Normal, "apple     +1"),
        (ObjectKind::Bonus, "gold      +3"),
        (ObjectKind::Life, "heart     +1 life"),
        (ObjectKind::Widen, "widener   wide basket 10s"),
        (ObjectKind::Hazard, "bomb      -1 life, breaks combo"),
    ];
    let lx = (cols / 2).saturating_sub(16);
    for (i, (kind, desc)) in legend.iter().enumerate() {
        out.queue(cursor::MoveTo(lx, cy.saturating_sub(2) + i as u16))?;
        out.queue(style::SetForegroundColor(rgb(kind.info().spark)))?;
        out.queue(Print(glyph_for(*kind)))?;
        out.queue(style::SetForegroundColor(Color::Grey))?;
        out.queue(Print(format!("  {}", desc)))?;
    }

    print_centered(out, cols, cy + 4, "Every 3 catches in a row raises the multiplier", C_COMBO)?;
    print_centered(out, cols, cy + 6, "SPACE : Start    Q : Quit", Color::White)?;
    print_centered(out, cols, cy + 7, "← → / A D : Move", C_HINT)?;

    finish(out, rows)
}

// ── Play screen ───────────────────────────────────────────────────────────────

/// Render one complete frame of play.
pub fn render_play<W: Write>(out: &mut W, state: &GameState, cols: u16, rows: u16) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(background_for(state.level())))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let view = View::new(state, cols, rows);

    for obj in &state.objects {
        draw_object(out, &view, obj)?;
    }
    draw_basket(out, &view, state)?;
    for p in &state.particles {
        draw_particle(out, &view, p)?;
    }

    draw_hud(out, state, cols)?;
    draw_controls_hint(out, rows)?;

    finish(out, rows)
}

/// Maps logical pixels to cells, applying screen shake.
struct View {
    cols: u16,
    rows: u16,
    shake: i32,
}

impl View {
    fn new(state: &GameState, cols: u16, rows: u16) -> Self {
        let shake = if state.shake == 0 {
            0
        } else if state.frame % 2 == 0 {
            1
        } else {
            -1
        };
        Self { cols, rows, shake }
    }

    /// Cell for a logical point, or None when it falls outside the playfield.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = (x / CELL_W).floor() as i32 + self.shake;
        let row = 1 + (y / CELL_H).floor() as i32;
        let in_cols = col >= 0 && col < self.cols as i32;
        let in_rows = row >= 1 && row < self.rows as i32 - 1;
        if in_cols && in_rows {
            Some((col as u16, row as u16))
        } else {
            None
        }
    }
}

fn glyph_for(kind: ObjectKind) -> &'static str {
    match kind {
        ObjectKind::Normal => "●",
        ObjectKind::Bonus => "$",
        ObjectKind::Life => "♥",
        ObjectKind::Widen => "↔",
        ObjectKind::Hazard => "✹",
    }
}

/// Two-row sprites, five cells wide (OBJECT_SIZE / CELL_W).
fn sprite_for(kind: ObjectKind) -> [&'static str; 2] {
    match kind {
        ObjectKind::Normal => ["  ,  ", " (●) "],
        ObjectKind::Bonus => ["  ,  ", " ($) "],
        ObjectKind::Life => [" ♥ ♥ ", "  ▼  "],
        ObjectKind::Widen => ["<-+->", " <=> "],
        ObjectKind::Hazard => ["  ✹  ", " (B) "],
    }
}

fn draw_object<W: Write>(out: &mut W, view: &View, obj: &FallingObject) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(rgb(obj.kind.info().spark)))?;
    for (i, line) in sprite_for(obj.kind).iter().enumerate() {
        // Second row sits in the lower half of the object's box
        let y = obj.y + i as f32 * (OBJECT_SIZE / 2.0);
        if let Some((col, row)) = view.cell(obj.x, y) {
            let room = view.cols.saturating_sub(col) as usize;
            let clipped: String = line.chars().take(room).collect();
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print(clipped))?;
        }
    }
    Ok(())
}

fn draw_basket<W: Write>(out: &mut W, view: &View, state: &GameState) -> std::io::Result<()> {
    let b = &state.basket;
    let n = ((b.width / CELL_W).round() as usize).max(2);
    let color = if state.power_up.widen_active { C_BASKET_WIDE } else { C_BASKET };
    out.queue(style::SetForegroundColor(color))?;

    let rim = format!("\\{}/", "~".repeat(n - 2));
    let base = format!(" {} ", "▀".repeat(n - 2));
    for (i, line) in [rim, base].iter().enumerate() {
        if let Some((col, row)) = view.cell(b.x, b.y + i as f32 * CELL_H) {
            let room = view.cols.saturating_sub(col) as usize;
            let clipped: String = line.chars().take(room).collect();
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print(clipped))?;
        }
    }
    Ok(())
}

fn draw_particle<W: Write>(out: &mut W, view: &View, p: &Particle) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(p.x, p.y) else {
        return Ok(());
    };
    let r = current_radius(p);
    let glyph = if r > 4.5 {
        "●"
    } else if r > 2.5 {
        "•"
    } else {
        "·"
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(faded(p.color, p.life_fraction())))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, cols: u16) -> std::io::Result<()> {
    // Score and high score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>5}  Hi:{:>5}",
        state.score,
        state.high_score.max(state.score)
    )))?;

    // Level and combo — centre
    let centre = format!("Lv {}  x{}", state.level(), state.multiplier());
    let cx = (cols / 2).saturating_sub(centre.len() as u16 / 2);
    out.queue(cursor::MoveTo(cx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(format!("Lv {}  ", state.level())))?;
    out.queue(style::SetForegroundColor(C_COMBO))?;
    out.queue(Print(format!("x{}", state.multiplier())))?;

    // Active power-up indicator + lives — right side
    let power_tag = if state.power_up.widen_active {
        format!("[↔ WIDE {:>2}s] ", state.power_up.remaining / 30 + 1)
    } else {
        String::new()
    };
    let lives_str = format!("Lives:{}", "♥".repeat(state.lives as usize));
    let right_len = (power_tag.chars().count() + lives_str.chars().count()) as u16;

    out.queue(cursor::MoveTo(cols.saturating_sub(right_len + 1), 0))?;
    if !power_tag.is_empty() {
        out.queue(style::SetForegroundColor(C_POWERUP_ACTIVE))?;
        out.queue(Print(&power_tag))?;
    }
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   Q : Quit"))?;
    Ok(())
}

// ── Game-over screen ──────────────────────────────────────────────────────────

pub fn render_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    best: u32,
    new_record: bool,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(background_for(state.level())))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let score_line = format!("Final Score: {:>6}", state.score);
    let (best_line, best_color) = if new_record {
        (format!("★ NEW BEST: {:>6} ★", best), Color::Yellow)
    } else {
        (format!("Best Score:  {:>6}", best), Color::DarkGrey)
    };

    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];

    let total_rows = lines.len() + 3; // 3 box lines + score + best + hint
    let start_row = (rows / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        print_centered(out, cols, start_row + i as u16, msg, *color)?;
    }

    let score_row = start_row + lines.len() as u16;
    print_centered(out, cols, score_row, &score_line, Color::Yellow)?;
    print_centered(out, cols, score_row + 1, &best_line, best_color)?;
    print_centered(out, cols, score_row + 2, "R - Play Again  Q - Quit", Color::White)?;

    finish(out, rows)
}
