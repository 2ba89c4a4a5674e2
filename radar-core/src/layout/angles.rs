//! Category → angle lookup and jitter.
//!
//! Each category (region bloc) owns a base direction on the radar. Nodes get
//! their category's base angle plus a bounded random jitter so that entities
//! from the same bloc start from distinct angles before relaxation.

use std::collections::HashMap;

use rand::Rng;
use serde::Deserialize;
use tracing::trace;

/// Base angles in degrees, keyed by category.
///
/// Stored angles are always normalized into `[0, 360)`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "HashMap<String, f64>")]
pub struct CategoryAngleTable {
    angles: HashMap<String, f64>,
}

impl CategoryAngleTable {
    /// An empty table: every category falls back to a random angle.
    pub fn new() -> Self {
        Self { angles: HashMap::new() }
    }

    /// The seven regional blocs of the news radar, roughly 51.4° apart.
    pub fn regional_blocs() -> Self {
        [
            ("NORTEAMERICA", 0.0),
            ("EUROPA", 51.0),
            ("RUSIA_CIS", 102.0),
            ("ASIA_PACIFICO", 154.0),
            ("MEDIO_ORIENTE", 205.0),
            ("AFRICA", 257.0),
            ("LATINOAMERICA", 308.0),
        ]
        .into_iter()
        .collect()
    }

    /// Set the base angle of a category. Non-finite angles are ignored.
    /// Returns the previous angle, if any.
    pub fn insert(&mut self, key: impl Into<String>, degrees: f64) -> Option<f64> {
        let key = key.into();
        if !degrees.is_finite() {
            trace!(category = %key, degrees, "ignoring non-finite base angle");
            return None;
        }
        self.angles.insert(key, normalize_degrees(degrees))
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, degrees: f64) -> Self {
        self.insert(key, degrees);
        self
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.angles.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }
}

impl Default for CategoryAngleTable {
    fn default() -> Self {
        Self::regional_blocs()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for CategoryAngleTable {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, degrees) in iter {
            table.insert(key, degrees);
        }
        table
    }
}

impl From<HashMap<String, f64>> for CategoryAngleTable {
    fn from(map: HashMap<String, f64>) -> Self {
        map.into_iter().collect()
    }
}

/// Jitter wider than a half turn only repeats directions already covered.
pub const MAX_JITTER_DEG: f64 = 180.0;

/// Wrap an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Pick the starting angle (degrees) for one entity.
///
/// Draw order is fixed: the random base angle for an unknown category is
/// drawn before the jitter, so a seeded generator reproduces the same angles.
pub(crate) fn assign_angle<R: Rng + ?Sized>(
    table: &CategoryAngleTable,
    category: &str,
    jitter_deg: f64,
    rng: &mut R,
) -> f64 {
    let base = match table.get(category) {
        Some(angle) => angle,
        None => {
            trace!(category, "unknown category, using random base angle");
            rng.random_range(0.0..360.0)
        }
    };
    let jitter = if jitter_deg.is_finite() && jitter_deg > 0.0 {
        let jitter_deg = jitter_deg.min(MAX_JITTER_DEG);
        rng.random_range(-jitter_deg..=jitter_deg)
    } else {
        0.0
    };
    base + jitter
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_regional_blocs() {
        let table = CategoryAngleTable::default();
        assert_eq!(table.len(), 7);
        assert_eq!(table.get("NORTEAMERICA"), Some(0.0));
        assert_eq!(table.get("EUROPA"), Some(51.0));
        assert_eq!(table.get("LATINOAMERICA"), Some(308.0));
        assert_eq!(table.get("GLOBAL"), None);
    }

    #[test]
    fn test_insert_normalizes() {
        let mut table = CategoryAngleTable::new();
        table.insert("A", 370.0);
        table.insert("B", -90.0);
        table.insert("C", 360.0);
        assert_eq!(table.get("A"), Some(10.0));
        assert_eq!(table.get("B"), Some(270.0));
        assert_eq!(table.get("C"), Some(0.0));
    }

    #[test]
    fn test_insert_ignores_non_finite() {
        let mut table = CategoryAngleTable::new();
        assert_eq!(table.insert("A", f64::NAN), None);
        assert_eq!(table.insert("B", f64::INFINITY), None);
        assert!(table.is_empty());
    }

    #[test]
    fn test_insert_returns_previous() {
        let mut table = CategoryAngleTable::new().with("A", 10.0);
        assert_eq!(table.insert("A", 20.0), Some(10.0));
        assert_eq!(table.get("A"), Some(20.0));
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(-1.0), 359.0);
        let tiny = normalize_degrees(-1e-20);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_deserialize_from_json_map() {
        let table: CategoryAngleTable =
            serde_json::from_str(r#"{"EUROPE": 45, "USA": -30}"#).unwrap();
        assert_eq!(table.get("EUROPE"), Some(45.0));
        assert_eq!(table.get("USA"), Some(330.0));
    }

    #[test]
    fn test_jitter_stays_in_bounds() {
        let table = CategoryAngleTable::new().with("EUROPE", 90.0);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            let angle = assign_angle(&table, "EUROPE", 20.0, &mut rng);
            assert!((70.0..=110.0).contains(&angle), "angle {angle} outside jitter band");
        }
    }

    #[test]
    fn test_zero_jitter_returns_base() {
        let table = CategoryAngleTable::new().with("EUROPE", 90.0);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(assign_angle(&table, "EUROPE", 0.0, &mut rng), 90.0);
        assert_eq!(assign_angle(&table, "EUROPE", f64::NAN, &mut rng), 90.0);
    }

    #[test]
    fn test_huge_jitter_is_capped() {
        let table = CategoryAngleTable::new().with("EUROPE", 90.0);
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..200 {
            let angle = assign_angle(&table, "EUROPE", 1e308, &mut rng);
            assert!((-90.0..=270.0).contains(&angle), "angle {angle} outside capped band");
        }
    }

    #[test]
    fn test_unknown_category_gets_random_angle() {
        let table = CategoryAngleTable::new();
        let mut rng = StdRng::seed_from_u64(9);
        let angles: Vec<f64> = (0..50)
            .map(|_| assign_angle(&table, "ATLANTIS", 0.0, &mut rng))
            .collect();
        assert!(angles.iter().all(|a| (0.0..360.0).contains(a)));
        assert!(angles.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_same_seed_same_angles() {
        let table = CategoryAngleTable::default();
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..10)
                .map(|i| assign_angle(&table, if i % 2 == 0 { "EUROPA" } else { "?" }, 20.0, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(3), draw(3));
    }
}
