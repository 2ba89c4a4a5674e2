// Score <-> radius mapping.
//
// Higher scores sit closer to the center: a score of `score_max` lands on the
// center point, a score of 0 lands on the outer ring. Out-of-range scores are
// clamped before mapping, so nothing here can fail.

/// Map a proximity score to a distance from the radar center.
///
/// `score` is clamped into `[0, score_max]` first; NaN counts as 0.
/// A non-positive or NaN `score_max` puts everything on the outer ring.
pub fn radius_for_score(score: f64, max_radius: f64, score_max: f64) -> f64 {
    if !(score_max > 0.0) {
        return max_radius;
    }
    let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, score_max) };
    max_radius * (1.0 - score / score_max)
}

/// Inverse of [`radius_for_score`], used to label grid rings.
pub fn score_at_radius(radius: f64, max_radius: f64, score_max: f64) -> f64 {
    if !(max_radius > 0.0) {
        return score_max;
    }
    let radius = if radius.is_nan() { max_radius } else { radius.clamp(0.0, max_radius) };
    score_max * (1.0 - radius / max_radius)
}

/// Most grid rings a radar will draw.
pub const MAX_RINGS: usize = 64;

/// Radii of `count` evenly spaced grid rings, innermost first.
/// The last ring is always the outer ring itself. `count` is capped at
/// [`MAX_RINGS`].
pub fn grid_rings(count: usize, max_radius: f64) -> Vec<f64> {
    let count = count.min(MAX_RINGS);
    (1..=count)
        .map(|i| max_radius * i as f64 / count as f64)
        .collect()
}
