//! One game session from first prompt to game over.
//!
//! The session is a fixed-step machine: the caller feeds it input edges via
//! [`Session::activate`] and time via [`Session::tick`], and reads back what
//! happened from the returned [`TickReport`]. It never touches the terminal,
//! the clock, or the audio device, which keeps every transition testable.

use crate::config::GameConfig;
use crate::sim::collision;
use crate::sim::obstacles::ObstacleField;
use crate::sim::player::Player;

/// Where the session is in its life cycle.
///
/// `Collided` is the crash freeze: the board keeps its final frame on screen
/// while a short delay runs out, then the session moves to `Over`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Playing,
    Collided,
    Over,
}

/// What one tick produced, for the caller to react to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Pairs crossed this tick. The session has already added them to the
    /// score.
    pub scored: u32,
    /// Set on the single tick the crash happens.
    pub collided: bool,
}

#[derive(Clone, Debug)]
pub struct Session {
    pub cfg: GameConfig,
    pub player: Player,
    pub obstacles: ObstacleField,
    pub score: u32,
    /// Whether the idle prompt is currently shown. Meaningful only while
    /// the phase is `NotStarted`.
    pub prompt_visible: bool,
    phase: Phase,
    blink_ms: f64,
    freeze_ms: f64,
}

impl Session {
    pub fn new(cfg: GameConfig, seed: u64) -> Self {
        Self {
            player: Player::new(&cfg),
            obstacles: ObstacleField::new(seed),
            score: 0,
            prompt_visible: true,
            phase: Phase::NotStarted,
            blink_ms: 0.0,
            freeze_ms: 0.0,
            cfg,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    /// A press or click. Starts the session on the first one; every one
    /// while playing is a flap. Returns whether a flap happened, so the
    /// caller can voice it.
    pub fn activate(&mut self) -> bool {
        match self.phase {
            Phase::NotStarted => {
                self.phase = Phase::Playing;
                self.player.flap(self.cfg.flap_impulse);
                true
            }
            Phase::Playing => {
                self.player.flap(self.cfg.flap_impulse);
                true
            }
            Phase::Collided | Phase::Over => false,
        }
    }

    /// Advance the session by `dt_ms` of game time.
    pub fn tick(&mut self, dt_ms: f64) -> TickReport {
        let mut report = TickReport::default();
        match self.phase {
            Phase::NotStarted => {
                // The prompt blinks; nothing on the board moves yet.
                self.blink_ms += dt_ms;
                while self.blink_ms >= self.cfg.blink_interval_ms {
                    self.blink_ms -= self.cfg.blink_interval_ms;
                    self.prompt_visible = !self.prompt_visible;
                }
            }
            Phase::Playing => {
                self.player.step(self.cfg.gravity);
                self.obstacles.tick(&self.cfg);
                report.scored = self.obstacles.take_crossings(self.cfg.player_travel_pos);
                self.score += report.scored;
                let hitbox = self.player.hitbox(&self.cfg);
                if collision::collides(&self.cfg, &hitbox, self.obstacles.pairs()) {
                    self.phase = Phase::Collided;
                    self.freeze_ms = 0.0;
                    report.collided = true;
                }
            }
            Phase::Collided => {
                self.freeze_ms += dt_ms;
                if self.freeze_ms >= self.cfg.freeze_delay_ms {
                    self.phase = Phase::Over;
                }
            }
            Phase::Over => {}
        }
        report
    }
}
