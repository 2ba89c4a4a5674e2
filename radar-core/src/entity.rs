//! Input records for the radar.
//!
//! The layout only needs three things from a record: a stable id, the
//! category that picks its direction, and the score that picks its distance.
//! Callers can plot their own types through [`Plottable`]; [`Entity`] is the
//! plain record used at the JSON boundary.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A record the radar can place.
pub trait Plottable {
    /// Unique within one layout call.
    fn id(&self) -> &str;
    /// Region/bloc key looked up in the angle table.
    fn category_key(&self) -> &str;
    /// Proximity score; out-of-range values are clamped by the layout.
    fn score(&self) -> f64;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    /// Missing keys deserialize as empty and fall back to a random angle.
    #[serde(default, alias = "category")]
    pub category_key: String,
    /// Missing or unparsable scores deserialize as NaN and land on the outer ring.
    #[serde(default = "nan", deserialize_with = "lenient_score")]
    pub score: f64,
}

impl Entity {
    pub fn new(id: impl Into<String>, category_key: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            category_key: category_key.into(),
            score,
        }
    }
}

impl Plottable for Entity {
    fn id(&self) -> &str {
        &self.id
    }

    fn category_key(&self) -> &str {
        &self.category_key
    }

    fn score(&self) -> f64 {
        self.score
    }
}

fn nan() -> f64 {
    f64::NAN
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
}

/// Frontend ids are sometimes numbers; keep them as their decimal text.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => n.to_string(),
        NumberOrText::Text(s) => s,
    })
}

/// Scores arrive either as numbers or as formatted strings like `"8.5"`.
/// Any other JSON value becomes NaN instead of failing the whole request.
fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    })
}
