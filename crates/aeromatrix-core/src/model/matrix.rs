use serde::{Deserialize, Serialize};

use super::MatrixId;

/// Rectangular flight area
///
/// Bounds are inclusive: legal coordinates are `0..=max_x` by `0..=max_y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matrix {
    pub id: MatrixId,
    pub max_x: i64,
    pub max_y: i64,
}

impl Matrix {
    pub fn new(id: MatrixId, max_x: i64, max_y: i64) -> Self {
        Self { id, max_x, max_y }
    }

    /// Whether `(x, y)` is a legal cell of this matrix
    pub fn contains(&self, x: i64, y: i64) -> bool {
        (0..=self.max_x).contains(&x) && (0..=self.max_y).contains(&y)
    }
}
