//! Player motion. The player never moves along the travel axis; gravity
//! and flaps act purely on the perpendicular axis.

use crate::config::{GameConfig, SPRITE_SIZE};
use crate::geom::Rect;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    /// Center position on the perpendicular axis.
    pub cross_pos: f64,
    /// Perpendicular velocity in canvas units per frame. Negative is toward
    /// the low edge.
    pub velocity: f64,
}

impl Player {
    pub fn new(cfg: &GameConfig) -> Self {
        Self {
            cross_pos: cfg.variant.cross_extent() / 2.0,
            velocity: 0.0,
        }
    }

    /// One frame of motion: accelerate, then move by the updated velocity.
    /// Deliberately frame-coupled rather than delta-time scaled; the loop
    /// runs at a fixed rate and the game feel depends on it.
    pub fn step(&mut self, gravity: f64) {
        self.velocity += gravity;
        self.cross_pos += self.velocity;
    }

    /// A flap assigns the impulse outright instead of adding it, so mashing
    /// the key cannot stack lift.
    pub fn flap(&mut self, impulse: f64) {
        self.velocity = impulse;
    }

    /// Collision box: the sprite square shrunk by the same inset on every
    /// side, centered on the player, in canvas coordinates.
    pub fn hitbox(&self, cfg: &GameConfig) -> Rect {
        let (cx, cy) = cfg.variant.point(cfg.player_travel_pos, self.cross_pos);
        let side = SPRITE_SIZE - 2.0 * cfg.hitbox_inset;
        Rect::centered(cx, cy, side, side)
    }
}
