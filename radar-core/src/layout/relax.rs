// Repulsion relaxation on fixed rings.
//
// Every node lives on a circle around the origin whose radius is fixed by its
// score. Each pass:
// 1. pushes apart every pair closer than `min_distance` (in place, index order)
// 2. snaps every node back onto its own circle, keeping only the new angle
//
// Radius is therefore a hard constraint; repulsion can only move nodes along
// their ring. The pass count is fixed, cost is O(iterations * n^2).
//
// Pairs at exactly zero distance are skipped: there is no direction to push
// them in, so true duplicates stay stacked.

/// Solver state for one node, in coordinates relative to the radar center.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Node {
    pub target_radius: f64,
    pub x: f64,
    pub y: f64,
}

impl Node {
    /// Place a node on its ring at `angle` (radians).
    pub fn from_polar(target_radius: f64, angle: f64) -> Self {
        Self {
            target_radius,
            x: target_radius * angle.cos(),
            y: target_radius * angle.sin(),
        }
    }

    /// Current polar angle in degrees, `[0, 360)`.
    pub fn angle_deg(&self) -> f64 {
        super::angles::normalize_degrees(self.y.atan2(self.x).to_degrees())
    }

    fn reproject(&mut self) {
        if self.target_radius == 0.0 {
            self.x = 0.0;
            self.y = 0.0;
            return;
        }
        let theta = self.y.atan2(self.x);
        self.x = self.target_radius * theta.cos();
        self.y = self.target_radius * theta.sin();
    }
}

#[derive(Debug, Copy, Clone)]
pub struct RelaxParams {
    pub min_distance: f64,
    pub strength: f64,
    pub iterations: usize,
}

/// Run the fixed number of relaxation passes over `nodes`.
pub fn relax(nodes: &mut [Node], params: &RelaxParams) {
    if nodes.len() < 2 || !(params.min_distance > 0.0) || !(params.strength > 0.0) {
        return;
    }

    for _ in 0..params.iterations {
        let pushed = repel_pass(nodes, params);
        for node in nodes.iter_mut() {
            node.reproject();
        }
        // A pass with no pushes leaves every node where reprojection put it,
        // so the remaining passes would be no-ops.
        if pushed == 0 {
            break;
        }
    }
}

/// One sweep over all unordered pairs. Returns the number of pairs pushed.
fn repel_pass(nodes: &mut [Node], params: &RelaxParams) -> usize {
    let mut pushed = 0;
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let dx = nodes[j].x - nodes[i].x;
            let dy = nodes[j].y - nodes[i].y;
            let dist = dx.hypot(dy);
            if dist == 0.0 || dist >= params.min_distance {
                continue;
            }

            let f = (params.min_distance - dist) / dist * params.strength;
            let (ox, oy) = (dx * f, dy * f);
            nodes[i].x -= ox;
            nodes[i].y -= oy;
            nodes[j].x += ox;
            nodes[j].y += oy;
            pushed += 1;
        }
    }
    pushed
}
