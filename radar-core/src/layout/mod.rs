// Proximity radar layout.
//
// Places scored, categorized entities on a disc:
// - angle comes from the entity's category, plus bounded random jitter
// - distance from center comes from its score (higher score = closer)
// - a fixed number of repulsion passes spreads crowded nodes apart along
//   their rings without ever changing their distance from center
//
// Submodules:
// - radius: score <-> radius mapping, grid rings
// - angles: category angle table and jitter
// - relax: pairwise repulsion with radial re-projection
//
// Output:
// - RadarLayout with one PlacedNode per entity, in input order.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entity::Plottable;
use crate::error::{RadarError, Result};

mod angles;
mod radius;
mod relax;

pub use angles::{CategoryAngleTable, MAX_JITTER_DEG, normalize_degrees};
pub use radius::{MAX_RINGS, grid_rings, radius_for_score, score_at_radius};

use relax::{Node, RelaxParams};

/// Upper bound on relaxation passes accepted from outside callers.
pub const MAX_ITERATIONS: usize = 10_000;

#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &PointF) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Canvas sizing, score range and solver tuning for one radar.
///
/// Every field is optional when deserialized; missing fields keep their
/// default value.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RadarConfig {
    /// Width and height of the square canvas.
    pub canvas_size: f64,
    /// Space kept free between the outer ring and the canvas edge.
    pub margin: f64,
    /// Scores live in `[0, score_max]`.
    pub score_max: f64,
    /// Visual radius of a node marker.
    pub node_radius: f64,
    /// Marker radius while hovered; the usual hit-test tolerance.
    pub hover_radius: f64,
    /// Minimum center distance between nodes, as a multiple of `node_radius`.
    pub separation_factor: f64,
    /// Jitter is drawn from `[-jitter_deg, jitter_deg]`.
    pub jitter_deg: f64,
    /// Relaxation passes.
    pub iterations: usize,
    /// Fraction of the overlap each node of a pair is pushed per pass.
    pub repulsion_strength: f64,
    /// Added to every angle before converting to x/y. With a y-down canvas,
    /// -90 puts 0° at the top.
    pub angle_offset_deg: f64,
    pub angles: CategoryAngleTable,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            canvas_size: 400.0,
            margin: 20.0,
            score_max: 10.0,
            node_radius: 4.0,
            hover_radius: 8.0,
            separation_factor: 2.5,
            jitter_deg: 20.0,
            iterations: 120,
            repulsion_strength: 0.5,
            angle_offset_deg: -90.0,
            angles: CategoryAngleTable::default(),
        }
    }
}

impl RadarConfig {
    pub fn center(&self) -> PointF {
        PointF::new(self.canvas_size / 2.0, self.canvas_size / 2.0)
    }

    /// Radius of the outer ring.
    pub fn max_radius(&self) -> f64 {
        self.canvas_size / 2.0 - self.margin
    }

    pub fn min_distance(&self) -> f64 {
        self.node_radius * self.separation_factor
    }

    pub fn target_radius(&self, score: f64) -> f64 {
        radius_for_score(score, self.max_radius(), self.score_max)
    }

    /// Reject configurations the engine cannot draw sensibly.
    ///
    /// The engine itself tolerates any config; this is for callers that
    /// accept configuration from outside, like the JSON boundary.
    pub fn validate(&self) -> Result<()> {
        fn check(field: &'static str, value: f64, ok: bool, reason: &'static str) -> Result<()> {
            if ok && value.is_finite() {
                Ok(())
            } else {
                Err(RadarError::InvalidConfig { field, value, reason })
            }
        }

        check("canvasSize", self.canvas_size, self.canvas_size > 0.0, "must be positive")?;
        check("margin", self.margin, self.margin >= 0.0, "must not be negative")?;
        check("margin", self.margin, self.max_radius() > 0.0, "leaves no room for the radar")?;
        check("scoreMax", self.score_max, self.score_max > 0.0, "must be positive")?;
        check("nodeRadius", self.node_radius, self.node_radius >= 0.0, "must not be negative")?;
        check("hoverRadius", self.hover_radius, self.hover_radius >= 0.0, "must not be negative")?;
        check(
            "separationFactor",
            self.separation_factor,
            self.separation_factor >= 0.0,
            "must not be negative",
        )?;
        check("jitterDeg", self.jitter_deg, self.jitter_deg >= 0.0, "must not be negative")?;
        check(
            "jitterDeg",
            self.jitter_deg,
            self.jitter_deg <= MAX_JITTER_DEG,
            "must not exceed 180 degrees",
        )?;
        check(
            "iterations",
            self.iterations as f64,
            self.iterations <= MAX_ITERATIONS,
            "must not exceed 10000",
        )?;
        check(
            "repulsionStrength",
            self.repulsion_strength,
            self.repulsion_strength >= 0.0,
            "must not be negative",
        )?;
        check("angleOffsetDeg", self.angle_offset_deg, true, "must be finite")?;
        Ok(())
    }
}

/// One entity's final place on the radar.
#[derive(Debug)]
pub struct PlacedNode<'a, E> {
    /// The record this node was built from.
    pub entity: &'a E,
    /// Canvas coordinates.
    pub position: PointF,
    /// Distance from the radar center, derived from the score.
    pub radius: f64,
    /// Canvas-frame angle in degrees, `[0, 360)`, measured from +x toward +y.
    pub angle_deg: f64,
}

impl<E: Plottable> PlacedNode<'_, E> {
    pub fn id(&self) -> &str {
        self.entity.id()
    }
}

#[derive(Debug)]
pub struct RadarLayout<'a, E> {
    pub center: PointF,
    pub max_radius: f64,
    /// Same order as the input entities.
    pub nodes: Vec<PlacedNode<'a, E>>,
}

impl<'a, E: Plottable> RadarLayout<'a, E> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlacedNode<'a, E>> {
        self.nodes.iter()
    }

    pub fn get(&self, id: &str) -> Option<&PlacedNode<'a, E>> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    /// The node nearest to `point` among those whose center lies within
    /// `tolerance`. Ties go to the earlier node.
    pub fn hit_test(&self, point: PointF, tolerance: f64) -> Option<&PlacedNode<'a, E>> {
        let mut best: Option<(f64, &PlacedNode<'a, E>)> = None;
        for node in &self.nodes {
            let d = node.position.distance(&point);
            if d > tolerance {
                continue;
            }
            match best {
                Some((best_d, _)) if best_d <= d => {}
                _ => best = Some((d, node)),
            }
        }
        best.map(|(_, node)| node)
    }
}

/// Lay out `entities` on the radar described by `cfg`.
///
/// `rng` supplies the angular jitter and the fallback angles for unknown
/// categories; the same generator state always yields the same layout.
pub fn compute_layout<'a, E, R>(entities: &'a [E], cfg: &RadarConfig, rng: &mut R) -> RadarLayout<'a, E>
where
    E: Plottable,
    R: Rng + ?Sized,
{
    let center = cfg.center();
    let max_radius = cfg.max_radius();

    if entities.is_empty() {
        return RadarLayout { center, max_radius, nodes: Vec::new() };
    }

    let mut nodes: Vec<Node> = entities
        .iter()
        .map(|e| {
            let radius = cfg.target_radius(e.score());
            let angle = angles::assign_angle(&cfg.angles, e.category_key(), cfg.jitter_deg, &mut *rng);
            Node::from_polar(radius, (angle + cfg.angle_offset_deg).to_radians())
        })
        .collect();

    let params = RelaxParams {
        min_distance: cfg.min_distance(),
        strength: cfg.repulsion_strength,
        iterations: cfg.iterations,
    };
    relax::relax(&mut nodes, &params);

    debug!(
        nodes = nodes.len(),
        iterations = params.iterations,
        min_distance = params.min_distance,
        "radar layout computed"
    );

    let nodes = entities
        .iter()
        .zip(nodes)
        .map(|(entity, node)| PlacedNode {
            entity,
            position: PointF::new(center.x + node.x, center.y + node.y),
            radius: node.target_radius,
            angle_deg: node.angle_deg(),
        })
        .collect();

    RadarLayout { center, max_radius, nodes }
}

/// [`compute_layout`] with a generator seeded from `seed`.
pub fn compute_layout_seeded<'a, E: Plottable>(
    entities: &'a [E],
    cfg: &RadarConfig,
    seed: u64,
) -> RadarLayout<'a, E> {
    let mut rng = StdRng::seed_from_u64(seed);
    compute_layout(entities, cfg, &mut rng)
}
