//! Obstacle pairs: spawn, advance, cull, and score bookkeeping.
//!
//! Spawning is gated by distance, not time: a new pair appears once the
//! newest one has advanced `spawn_threshold` units from the spawn edge, and
//! it is placed exactly that far behind it. Consecutive pairs therefore
//! keep a constant spacing no matter how the frames land.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::geom::Rect;

/// One obstacle pair: two segments either side of a gap, sharing a leading
/// edge on the travel axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObstaclePair {
    /// Leading edge on the travel axis (the side facing the player).
    pub lead: f64,
    /// Where the gap begins on the perpendicular axis.
    pub gap_offset: f64,
    /// Set once the pair has been counted, so it never scores twice.
    pub scored: bool,
}

impl ObstaclePair {
    /// Canvas rectangles for the near segment (low perpendicular side) and
    /// the far segment, in that order.
    pub fn rects(&self, cfg: &GameConfig) -> [Rect; 2] {
        let far_start = self.gap_offset + cfg.gap_length;
        [
            cfg.variant
                .rect(self.lead, 0.0, cfg.obstacle_thickness, self.gap_offset),
            cfg.variant.rect(
                self.lead,
                far_start,
                cfg.obstacle_thickness,
                cfg.cross_extent() - far_start,
            ),
        ]
    }
}

/// All live pairs, oldest first, plus the generator that places gaps.
#[derive(Clone, Debug)]
pub struct ObstacleField {
    pairs: Vec<ObstaclePair>,
    rng: Pcg32,
}

impl ObstacleField {
    pub fn new(seed: u64) -> Self {
        Self {
            pairs: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Live pairs in spawn order, which is also travel-axis order.
    pub fn pairs(&self) -> &[ObstaclePair] {
        &self.pairs
    }

    /// One frame of obstacle motion: spawn if due, advance everything, then
    /// drop pairs whose trailing edge has left the board.
    pub fn tick(&mut self, cfg: &GameConfig) {
        if let Some(lead) = self.spawn_position(cfg) {
            let (lo, hi) = cfg.gap_offset_range();
            let gap_offset = self.rng.random_range(lo..=hi);
            self.pairs.push(ObstaclePair {
                lead,
                gap_offset,
                scored: false,
            });
        }
        for pair in &mut self.pairs {
            pair.lead -= cfg.obstacle_velocity;
        }
        self.pairs
            .retain(|pair| pair.lead >= -cfg.obstacle_thickness);
    }

    /// Count pairs whose leading edge reached the player's travel
    /// coordinate this frame. Each pair counts exactly once over its life.
    pub fn take_crossings(&mut self, player_travel: f64) -> u32 {
        let mut crossed = 0;
        for pair in &mut self.pairs {
            if !pair.scored && pair.lead <= player_travel {
                pair.scored = true;
                crossed += 1;
            }
        }
        crossed
    }

    /// Where the next pair spawns, or None while the newest pair is still
    /// within the threshold of the spawn edge.
    fn spawn_position(&self, cfg: &GameConfig) -> Option<f64> {
        let extent = cfg.travel_extent();
        match self.pairs.last() {
            None => Some(extent),
            Some(last) if extent - last.lead >= cfg.spawn_threshold => {
                Some(last.lead + cfg.spawn_threshold)
            }
            Some(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;

    fn classic() -> GameConfig {
        GameConfig::for_variant(Variant::Classic)
    }

    #[test]
    fn first_pair_spawns_at_the_travel_edge() {
        let cfg = classic();
        let mut field = ObstacleField::new(7);
        field.tick(&cfg);
        assert_eq!(field.pairs().len(), 1);
        // Spawned at the edge, then advanced once in the same tick.
        assert_eq!(field.pairs()[0].lead, 400.0 - 3.0);
        assert!(!field.pairs()[0].scored);
    }

    #[test]
    fn consecutive_pairs_keep_exactly_the_spawn_threshold() {
        let cfg = classic();
        let mut field = ObstacleField::new(7);
        for _ in 0..480 {
            field.tick(&cfg);
        }
        assert!(field.pairs().len() >= 3);
        for pair in field.pairs().windows(2) {
            assert_eq!(pair[1].lead - pair[0].lead, cfg.spawn_threshold);
        }
    }

    #[test]
    fn pairs_stay_sorted_by_travel_coordinate() {
        let cfg = classic();
        let mut field = ObstacleField::new(41);
        for _ in 0..1000 {
            field.tick(&cfg);
            for pair in field.pairs().windows(2) {
                assert!(pair[0].lead < pair[1].lead);
            }
        }
    }

    #[test]
    fn culled_exactly_when_past_the_trailing_edge() {
        let cfg = classic();
        let mut field = ObstacleField::new(1);
        field.pairs.push(ObstaclePair {
            lead: -cfg.obstacle_thickness + cfg.obstacle_velocity,
            gap_offset: 100.0,
            scored: true,
        });
        // Push the live edge far along so no spawn interferes.
        field.pairs.push(ObstaclePair {
            lead: 390.0,
            gap_offset: 100.0,
            scored: false,
        });
        field.tick(&cfg);
        // Now sitting exactly on -thickness: still alive.
        assert_eq!(field.pairs()[0].lead, -cfg.obstacle_thickness);
        assert_eq!(field.pairs().len(), 2);
        field.tick(&cfg);
        // One more step is strictly past it: gone.
        assert_eq!(field.pairs().len(), 1);
        assert_eq!(field.pairs()[0].lead, 390.0 - 2.0 * cfg.obstacle_velocity);
    }

    #[test]
    fn gap_offsets_respect_the_margins() {
        for variant in [Variant::Classic, Variant::Sideways] {
            let cfg = GameConfig::for_variant(variant);
            let (lo, hi) = cfg.gap_offset_range();
            let mut field = ObstacleField::new(99);
            let mut most_alive = 0;
            for _ in 0..4000 {
                field.tick(&cfg);
                for pair in field.pairs() {
                    assert!(
                        pair.gap_offset >= lo && pair.gap_offset <= hi,
                        "{variant:?}: offset {} outside {lo}..{hi}",
                        pair.gap_offset
                    );
                }
                most_alive = most_alive.max(field.pairs().len());
            }
            assert!(most_alive >= 3);
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_field() {
        let cfg = classic();
        let mut a = ObstacleField::new(1234);
        let mut b = ObstacleField::new(1234);
        for _ in 0..700 {
            a.tick(&cfg);
            b.tick(&cfg);
        }
        assert_eq!(a.pairs(), b.pairs());
    }

    #[test]
    fn crossings_count_once_per_pair() {
        let mut field = ObstacleField::new(5);
        field.pairs.push(ObstaclePair {
            lead: 101.0,
            gap_offset: 50.0,
            scored: false,
        });
        assert_eq!(field.take_crossings(100.0), 0);
        field.pairs[0].lead = 98.0;
        assert_eq!(field.take_crossings(100.0), 1);
        assert_eq!(field.take_crossings(100.0), 0);
        field.pairs[0].lead = 10.0;
        assert_eq!(field.take_crossings(100.0), 0);
    }

    #[test]
    fn crossing_exactly_on_the_player_counts() {
        let mut field = ObstacleField::new(5);
        field.pairs.push(ObstaclePair {
            lead: 100.0,
            gap_offset: 50.0,
            scored: false,
        });
        assert_eq!(field.take_crossings(100.0), 1);
    }

    #[test]
    fn segment_rects_surround_the_gap() {
        let cfg = classic();
        let pair = ObstaclePair {
            lead: 250.0,
            gap_offset: 120.0,
            scored: false,
        };
        let [near, far] = pair.rects(&cfg);
        assert_eq!(near, Rect::new(250.0, 0.0, 60.0, 120.0));
        assert_eq!(far, Rect::new(250.0, 270.0, 60.0, 330.0));

        let cfg = GameConfig::for_variant(Variant::Sideways);
        let pair = ObstaclePair {
            lead: 300.0,
            gap_offset: 110.0,
            scored: false,
        };
        let [near, far] = pair.rects(&cfg);
        assert_eq!(near, Rect::new(0.0, 300.0, 110.0, 60.0));
        assert_eq!(far, Rect::new(260.0, 300.0, 140.0, 60.0));
    }
}
