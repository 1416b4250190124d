// oracle.rs - Symmetric sketch-distance lookup

use std::collections::HashMap;

/// Symmetric, immutable-after-build distance lookup. Keyed on a sorted id
/// pair so both insertion order and lookup order are direction-independent,
/// giving O(1) expected lookup with half the memory of a nested
/// `HashMap<String, HashMap<String, f64>>`.
#[derive(Debug, Default)]
pub struct DistanceOracle {
    distances: HashMap<(String, String), f64>,
}

fn key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl DistanceOracle {
    pub fn new() -> Self {
        Self {
            distances: HashMap::new(),
        }
    }

    /// Insert a distance for an unordered pair. Later inserts for the same
    /// pair overwrite earlier ones.
    pub fn insert(&mut self, a: &str, b: &str, distance: f64) {
        self.distances.insert(key(a, b), distance);
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// `dist(a, b)`: `Some(0.0)` when `a == b`, the stored distance when a
    /// record exists, `None` ("no information") otherwise.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        if a == b {
            return Some(0.0);
        }
        self.distances.get(&key(a, b)).copied()
    }
}
