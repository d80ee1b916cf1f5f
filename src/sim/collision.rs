//! Collision checks for one frame: board edges and obstacle segments.
//!
//! Edge contact is asymmetric on purpose. Touching the top or bottom of the
//! board already counts as a crash, while merely grazing an obstacle edge
//! does not; the hit box must actually overlap a segment.

use crate::config::GameConfig;
use crate::geom::Rect;
use crate::sim::obstacles::ObstaclePair;

/// True if the hit box has crashed, either off the board or into a segment.
pub fn collides(cfg: &GameConfig, hitbox: &Rect, pairs: &[ObstaclePair]) -> bool {
    out_of_bounds(cfg, hitbox) || hits_obstacle(cfg, hitbox, pairs)
}

/// The board only bounds the perpendicular axis; obstacles provide all the
/// danger along the travel axis.
pub fn out_of_bounds(cfg: &GameConfig, hitbox: &Rect) -> bool {
    let (near, far) = cfg.variant.cross_span(hitbox);
    near <= 0.0 || far >= cfg.cross_extent()
}

pub fn hits_obstacle(cfg: &GameConfig, hitbox: &Rect, pairs: &[ObstaclePair]) -> bool {
    pairs
        .iter()
        .flat_map(|pair| pair.rects(cfg))
        .any(|segment| hitbox.overlaps(&segment))
}
