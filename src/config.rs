//! Game tuning: the two board orientations and every constant the
//! simulation reads, validated once at startup.

use std::error::Error;
use std::fmt;

use crate::geom::Rect;

/// Logical canvas size. The whole game is positioned in these units and
/// scaled to the terminal at draw time.
pub const CANVAS_W: f64 = 400.0;
pub const CANVAS_H: f64 = 600.0;

/// Side of the square player sprite, in canvas units.
pub const SPRITE_SIZE: f64 = 50.0;

pub const FRAME_RATE: u32 = 60;

/// Nominal duration of one frame in milliseconds. The blink and freeze
/// timers advance by this much per tick.
pub const FRAME_MS: f64 = 1000.0 / FRAME_RATE as f64;

/// Board orientation. The simulation itself only knows a travel axis (the
/// axis obstacles move along, toward coordinate zero) and a perpendicular
/// axis (the axis gravity acts on); the variant says which canvas axis is
/// which.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Vertical pipe pairs travelling right to left; the player falls down.
    Classic,
    /// Horizontal bars travelling bottom to top; the player drifts right.
    Sideways,
}

impl Variant {
    pub fn label(self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Sideways => "sideways",
        }
    }

    /// Length of the travel axis.
    pub const fn travel_extent(self) -> f64 {
        match self {
            Variant::Classic => CANVAS_W,
            Variant::Sideways => CANVAS_H,
        }
    }

    /// Length of the perpendicular axis.
    pub const fn cross_extent(self) -> f64 {
        match self {
            Variant::Classic => CANVAS_H,
            Variant::Sideways => CANVAS_W,
        }
    }

    /// Map a (travel, cross) point to canvas (x, y).
    pub const fn point(self, travel: f64, cross: f64) -> (f64, f64) {
        match self {
            Variant::Classic => (travel, cross),
            Variant::Sideways => (cross, travel),
        }
    }

    /// Map a (travel, cross) span to a canvas rectangle.
    pub const fn rect(self, travel: f64, cross: f64, travel_len: f64, cross_len: f64) -> Rect {
        match self {
            Variant::Classic => Rect::new(travel, cross, travel_len, cross_len),
            Variant::Sideways => Rect::new(cross, travel, cross_len, travel_len),
        }
    }

    /// The (min, max) span of a canvas rectangle along the perpendicular
    /// axis.
    pub fn cross_span(self, r: &Rect) -> (f64, f64) {
        match self {
            Variant::Classic => (r.y, r.bottom()),
            Variant::Sideways => (r.x, r.right()),
        }
    }
}

/// Everything tunable about a game, grouped so nothing lives in globals.
/// Build with [`GameConfig::for_variant`]; check hand-edited values with
/// [`GameConfig::validate`] before starting a session.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    pub variant: Variant,
    /// Per-frame acceleration along the perpendicular axis.
    pub gravity: f64,
    /// Velocity assigned (never added) by a flap. Negative, toward the low
    /// edge of the perpendicular axis.
    pub flap_impulse: f64,
    /// Per-frame advance of every obstacle toward the player.
    pub obstacle_velocity: f64,
    /// Obstacle size along the travel axis.
    pub obstacle_thickness: f64,
    /// Opening between the two segments of a pair, perpendicular units.
    pub gap_length: f64,
    /// Minimum length of the near segment (low perpendicular side).
    pub gap_margin_near: f64,
    /// Minimum length of the far segment.
    pub gap_margin_far: f64,
    /// A new pair spawns once the newest one has advanced this far from the
    /// spawn edge; consecutive pairs end up exactly this far apart.
    pub spawn_threshold: f64,
    /// The player's fixed coordinate on the travel axis.
    pub player_travel_pos: f64,
    /// Hit box shrink on every side of the sprite square.
    pub hitbox_inset: f64,
    /// Idle-prompt blink half-period.
    pub blink_interval_ms: f64,
    /// How long a collided frame stays frozen before the game ends.
    pub freeze_delay_ms: f64,
}

impl GameConfig {
    pub fn for_variant(variant: Variant) -> Self {
        let (gap_margin_near, gap_margin_far, player_travel_pos) = match variant {
            Variant::Classic => (0.0, 150.0, 100.0),
            Variant::Sideways => (100.0, 100.0, 300.0),
        };
        Self {
            variant,
            gravity: 0.5,
            flap_impulse: -8.0,
            obstacle_velocity: 3.0,
            obstacle_thickness: 60.0,
            gap_length: 150.0,
            gap_margin_near,
            gap_margin_far,
            spawn_threshold: 200.0,
            player_travel_pos,
            hitbox_inset: 5.0,
            blink_interval_ms: 500.0,
            freeze_delay_ms: 1000.0,
        }
    }

    pub fn travel_extent(&self) -> f64 {
        self.variant.travel_extent()
    }

    pub fn cross_extent(&self) -> f64 {
        self.variant.cross_extent()
    }

    /// Inclusive range the gap offset is sampled from. Validation keeps the
    /// range non-empty, so both segments always have non-negative length.
    pub fn gap_offset_range(&self) -> (f64, f64) {
        (
            self.gap_margin_near,
            self.cross_extent() - self.gap_length - self.gap_margin_far,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("gravity", self.gravity),
            ("obstacle_velocity", self.obstacle_velocity),
            ("obstacle_thickness", self.obstacle_thickness),
            ("gap_length", self.gap_length),
            ("spawn_threshold", self.spawn_threshold),
            ("blink_interval_ms", self.blink_interval_ms),
            ("freeze_delay_ms", self.freeze_delay_ms),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::NotPositive(name));
            }
        }
        for (name, value) in [
            ("gap_margin_near", self.gap_margin_near),
            ("gap_margin_far", self.gap_margin_far),
            ("hitbox_inset", self.hitbox_inset),
        ] {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(ConfigError::Negative(name));
            }
        }
        if !(self.flap_impulse < 0.0) {
            return Err(ConfigError::FlapNotUpward);
        }
        if self.hitbox_inset * 2.0 >= SPRITE_SIZE {
            return Err(ConfigError::InsetTooLarge(self.hitbox_inset));
        }
        let needed = self.gap_length + self.gap_margin_near + self.gap_margin_far;
        if needed > self.cross_extent() {
            return Err(ConfigError::GapTooLarge {
                needed,
                extent: self.cross_extent(),
            });
        }
        if self.player_travel_pos <= 0.0 || self.player_travel_pos >= self.travel_extent() {
            return Err(ConfigError::PlayerOffBoard {
                pos: self.player_travel_pos,
                extent: self.travel_extent(),
            });
        }
        Ok(())
    }
}

/// A configuration the game cannot run with. Only reachable by editing the
/// presets, so it is reported once at startup and never at runtime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    NotPositive(&'static str),
    Negative(&'static str),
    FlapNotUpward,
    InsetTooLarge(f64),
    GapTooLarge { needed: f64, extent: f64 },
    PlayerOffBoard { pos: f64, extent: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotPositive(name) => write!(f, "{name} must be a positive number"),
            ConfigError::Negative(name) => write!(f, "{name} must not be negative"),
            ConfigError::FlapNotUpward => write!(f, "flap_impulse must be negative"),
            ConfigError::InsetTooLarge(inset) => {
                write!(f, "hitbox_inset {inset} leaves no hit box")
            }
            ConfigError::GapTooLarge { needed, extent } => write!(
                f,
                "gap plus margins need {needed} units but the perpendicular axis has {extent}"
            ),
            ConfigError::PlayerOffBoard { pos, extent } => write!(
                f,
                "player_travel_pos {pos} is outside the travel axis (0..{extent})"
            ),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        assert_eq!(GameConfig::for_variant(Variant::Classic).validate(), Ok(()));
        assert_eq!(
            GameConfig::for_variant(Variant::Sideways).validate(),
            Ok(())
        );
    }

    #[test]
    fn gap_offset_ranges_match_the_board() {
        let classic = GameConfig::for_variant(Variant::Classic);
        assert_eq!(classic.gap_offset_range(), (0.0, 300.0));
        let sideways = GameConfig::for_variant(Variant::Sideways);
        assert_eq!(sideways.gap_offset_range(), (100.0, 150.0));
    }

    #[test]
    fn oversized_gap_is_rejected() {
        let mut cfg = GameConfig::for_variant(Variant::Sideways);
        cfg.gap_length = 250.0;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::GapTooLarge {
                needed: 450.0,
                extent: 400.0
            })
        );
    }

    #[test]
    fn downward_flap_is_rejected() {
        let mut cfg = GameConfig::for_variant(Variant::Classic);
        cfg.flap_impulse = 8.0;
        assert_eq!(cfg.validate(), Err(ConfigError::FlapNotUpward));
    }

    #[test]
    fn inset_cannot_consume_the_sprite() {
        let mut cfg = GameConfig::for_variant(Variant::Classic);
        cfg.hitbox_inset = 25.0;
        assert_eq!(cfg.validate(), Err(ConfigError::InsetTooLarge(25.0)));
    }

    #[test]
    fn zero_velocity_is_rejected() {
        let mut cfg = GameConfig::for_variant(Variant::Classic);
        cfg.obstacle_velocity = 0.0;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::NotPositive("obstacle_velocity"))
        );
    }

    #[test]
    fn axes_swap_between_variants() {
        assert_eq!(Variant::Classic.travel_extent(), 400.0);
        assert_eq!(Variant::Classic.cross_extent(), 600.0);
        assert_eq!(Variant::Sideways.travel_extent(), 600.0);
        assert_eq!(Variant::Sideways.cross_extent(), 400.0);

        assert_eq!(Variant::Classic.point(100.0, 300.0), (100.0, 300.0));
        assert_eq!(Variant::Sideways.point(300.0, 200.0), (200.0, 300.0));

        assert_eq!(
            Variant::Classic.rect(10.0, 20.0, 60.0, 80.0),
            Rect::new(10.0, 20.0, 60.0, 80.0)
        );
        assert_eq!(
            Variant::Sideways.rect(10.0, 20.0, 60.0, 80.0),
            Rect::new(20.0, 10.0, 80.0, 60.0)
        );
    }

    #[test]
    fn cross_span_follows_the_gravity_axis() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(Variant::Classic.cross_span(&r), (20.0, 60.0));
        assert_eq!(Variant::Sideways.cross_span(&r), (10.0, 40.0));
    }
}
