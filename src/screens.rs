//! The three screens: variant menu, the board itself, and game over.
//!
//! Screens only draw; they never advance state or read input. The app
//! decides which one is showing and hit-tests clicks against the button
//! rectangles exported here.

use crate::config::{GameConfig, SPRITE_SIZE, Variant};
use crate::geom::Rect;
use crate::render::{BLACK, BUTTON, Canvas, OBSTACLE_FAR, OBSTACLE_NEAR, TextSize, WHITE};
use crate::sim::{Phase, Session};
use crate::sprite::Sprite;

pub const CLASSIC_BUTTON: Rect = Rect::new(125.0, 300.0, 150.0, 50.0);
pub const SIDEWAYS_BUTTON: Rect = Rect::new(125.0, 370.0, 150.0, 50.0);
pub const AGAIN_BUTTON: Rect = Rect::new(100.0, 320.0, 200.0, 50.0);

/// Ring thickness around the focused button, logical units.
const FOCUS_RING: f64 = 4.0;

fn draw_button(canvas: &mut Canvas, rect: Rect, label: &str, focused: bool) {
    if focused {
        canvas.fill_rect(rect.inset(-FOCUS_RING), WHITE);
    }
    canvas.fill_rect(rect, BUTTON);
    canvas.draw_text(label, TextSize::Small, BLACK, rect.center_x(), rect.center_y());
}

pub fn draw_menu(canvas: &mut Canvas, selected: Variant) {
    canvas.clear_background();
    canvas.draw_text("CLAPPY BIRD", TextSize::Title, WHITE, 200.0, 200.0);
    draw_button(
        canvas,
        CLASSIC_BUTTON,
        "CLASSIC",
        selected == Variant::Classic,
    );
    draw_button(
        canvas,
        SIDEWAYS_BUTTON,
        "SIDEWAYS",
        selected == Variant::Sideways,
    );
}

pub fn draw_over(canvas: &mut Canvas, score: u32) {
    canvas.clear_background();
    canvas.draw_text("GAME OVER", TextSize::Title, WHITE, 200.0, 200.0);
    canvas.draw_text(
        &format!("SCORE: {score}"),
        TextSize::Label,
        WHITE,
        200.0,
        280.0,
    );
    draw_button(canvas, AGAIN_BUTTON, "PLAY AGAIN", true);
}

/// Draw the board for any in-session phase. During the crash freeze this
/// keeps rendering the final frame unchanged.
pub fn draw_session(canvas: &mut Canvas, session: &Session, sprite: &Sprite) {
    canvas.clear_background();
    draw_board(canvas, session, sprite);
    match session.phase() {
        Phase::NotStarted => {
            if session.prompt_visible {
                canvas.draw_text("TAP TO PLAY", TextSize::Title, WHITE, 200.0, 200.0);
            }
        }
        _ => {
            canvas.draw_text(
                &format!("SCORE: {}", session.score),
                TextSize::Label,
                WHITE,
                200.0,
                50.0,
            );
        }
    }
}

fn draw_board(canvas: &mut Canvas, session: &Session, sprite: &Sprite) {
    let cfg: &GameConfig = &session.cfg;
    for pair in session.obstacles.pairs() {
        let [near, far] = pair.rects(cfg);
        canvas.fill_rect(near, OBSTACLE_NEAR);
        canvas.fill_rect(far, OBSTACLE_FAR);
    }
    let (cx, cy) = cfg
        .variant
        .point(cfg.player_travel_pos, session.player.cross_pos);
    canvas.draw_sprite(sprite, cx, cy, SPRITE_SIZE);
}
