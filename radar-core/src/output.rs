//! JSON request/response types for the frontend.
//!
//! The frontend sends a request with the entities to plot (plus optional
//! config overrides and a seed) and gets back canvas coordinates for every
//! node along with the grid rings to draw.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Plottable};
use crate::error::{RadarError, Result};
use crate::layout::{MAX_RINGS, PointF, RadarConfig, RadarLayout, compute_layout_seeded, grid_rings};

fn default_ring_count() -> usize {
    5
}

/// A layout request from the frontend.
#[derive(Debug, Clone, Deserialize)]
pub struct RadarInput {
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub config: RadarConfig,
    /// Jitter seed. Reusing a seed reproduces the previous layout.
    #[serde(default)]
    pub seed: u64,
    /// Number of grid rings to report, at most [`MAX_RINGS`].
    #[serde(default = "default_ring_count")]
    pub rings: usize,
}

/// A placed node ready for the frontend to draw
#[derive(Debug, Clone, Serialize)]
pub struct NodeOutput {
    pub id: String,
    pub category: String,
    pub score: f64,
    pub x: f64,
    pub y: f64,
    /// Distance from the radar center
    pub radius: f64,
    /// Canvas-frame angle in degrees
    pub angle: f64,
}

/// Error information for the frontend
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub message: String,
}

/// The combined output sent to the frontend
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarOutput {
    pub center: PointF,
    pub max_radius: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rings: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<NodeOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl RadarOutput {
    pub fn from_layout<E: Plottable>(layout: &RadarLayout<'_, E>, rings: Vec<f64>) -> Self {
        let nodes = layout
            .iter()
            .map(|n| NodeOutput {
                id: n.id().to_string(),
                category: n.entity.category_key().to_string(),
                score: n.entity.score(),
                x: n.position.x,
                y: n.position.y,
                radius: n.radius,
                angle: n.angle_deg,
            })
            .collect();

        Self {
            center: layout.center,
            max_radius: layout.max_radius,
            rings,
            nodes,
            error: None,
        }
    }

    pub fn from_error(err: &RadarError) -> Self {
        Self {
            center: PointF::default(),
            max_radius: 0.0,
            rings: vec![],
            nodes: vec![],
            error: Some(ErrorInfo { message: err.to_string() }),
        }
    }
}

/// Parse a layout request, run the layout, and encode the result.
pub fn layout_json(input: &str) -> Result<String> {
    let request: RadarInput = serde_json::from_str(input)?;
    request.config.validate()?;
    if request.rings > MAX_RINGS {
        return Err(RadarError::InvalidConfig {
            field: "rings",
            value: request.rings as f64,
            reason: "must not exceed 64",
        });
    }

    let layout = compute_layout_seeded(&request.entities, &request.config, request.seed);
    let rings = grid_rings(request.rings, layout.max_radius);
    let output = RadarOutput::from_layout(&layout, rings);

    serde_json::to_string(&output).map_err(RadarError::Encode)
}

/// Encode an error for the frontend.
pub fn error_json(err: &RadarError) -> String {
    serde_json::to_string(&RadarOutput::from_error(err))
        .unwrap_or_else(|_| "{\"error\": {\"message\": \"Layout error\"}}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn parse(json: &str) -> Value {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_layout_json_scenario() {
        let input = r#"{
            "entities": [
                {"id": 1, "category": "EUROPE", "score": 8.5},
                {"id": 2, "category": "EUROPE", "score": "8.5"},
                {"id": 3, "category": "USA", "score": 1.0}
            ],
            "config": {"angles": {"EUROPE": 51, "USA": 0}},
            "seed": 42
        }"#;
        let out = parse(&layout_json(input).unwrap());

        assert_eq!(out["maxRadius"], 180.0);
        assert_eq!(out["center"]["x"], 200.0);
        assert_eq!(out["rings"].as_array().unwrap().len(), 5);
        assert!(out.get("error").is_none());

        let nodes = out["nodes"].as_array().unwrap();
        let ids: Vec<&str> = nodes.iter().map(|n| n["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert!((nodes[2]["radius"].as_f64().unwrap() - 162.0).abs() < 1e-9);

        let (x1, y1) = (nodes[0]["x"].as_f64().unwrap(), nodes[0]["y"].as_f64().unwrap());
        let (x2, y2) = (nodes[1]["x"].as_f64().unwrap(), nodes[1]["y"].as_f64().unwrap());
        assert!((x1 - x2).hypot(y1 - y2) >= 10.0 - 1e-6);
    }

    #[test]
    fn test_layout_json_is_reproducible() {
        let input = r#"{"entities": [{"id": "a", "category": "AFRICA", "score": 4}], "seed": 9}"#;
        assert_eq!(layout_json(input).unwrap(), layout_json(input).unwrap());
    }

    #[test]
    fn test_layout_json_empty() {
        let out = parse(&layout_json("{}").unwrap());
        assert!(out.get("nodes").is_none());
        assert_eq!(out["maxRadius"], 180.0);
    }

    #[test]
    fn test_layout_json_rejects_malformed_input() {
        let err = layout_json("{\"entities\": [").unwrap_err();
        assert!(matches!(err, RadarError::InvalidInput(_)));
    }

    #[test]
    fn test_layout_json_rejects_bad_config() {
        let err = layout_json(r#"{"config": {"scoreMax": 0}}"#).unwrap_err();
        assert!(matches!(err, RadarError::InvalidConfig { field: "scoreMax", .. }));
    }

    #[test]
    fn test_layout_json_rejects_huge_jitter() {
        let input = r#"{"entities": [{"id": 1, "category": "EUROPA", "score": 5}], "config": {"jitterDeg": 1e308}}"#;
        let err = layout_json(input).unwrap_err();
        assert!(matches!(err, RadarError::InvalidConfig { field: "jitterDeg", .. }));
    }

    #[test]
    fn test_layout_json_rejects_too_many_rings() {
        let err = layout_json(r#"{"entities": [], "rings": 18446744073709551615}"#).unwrap_err();
        assert!(matches!(err, RadarError::InvalidConfig { field: "rings", .. }));

        let out = parse(&layout_json(r#"{"rings": 64}"#).unwrap());
        assert_eq!(out["rings"].as_array().unwrap().len(), MAX_RINGS);
    }

    #[test]
    fn test_layout_json_rejects_too_many_iterations() {
        let err = layout_json(r#"{"config": {"iterations": 1000000000000}}"#).unwrap_err();
        assert!(matches!(err, RadarError::InvalidConfig { field: "iterations", .. }));
    }

    #[test]
    fn test_layout_json_keeps_entities_with_odd_scores() {
        let input = r#"{"entities": [
            {"id": 1, "category": "EUROPA", "score": true},
            {"id": 2, "category": "EUROPA", "score": 4}
        ]}"#;
        let out = parse(&layout_json(input).unwrap());
        let nodes = out["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0]["radius"], 180.0);
    }

    #[test]
    fn test_error_json() {
        let err = layout_json("not json").unwrap_err();
        let out = parse(&error_json(&err));
        let message = out["error"]["message"].as_str().unwrap();
        assert!(message.starts_with("invalid radar input"));
        assert!(out.get("nodes").is_none());
    }
}
