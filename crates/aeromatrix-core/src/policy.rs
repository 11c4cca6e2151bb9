//! Fleet policy values
//!
//! Limits that the original deployment hard-coded are carried here so that a
//! deployment can tune them from configuration.

use serde::{Deserialize, Serialize};

/// Default upper bound for either matrix dimension on resize
pub const DEFAULT_MAX_DIMENSION: i64 = 100;

/// Default maximum length of a drone name or model
pub const DEFAULT_MAX_LABEL_LEN: usize = 50;

/// Policy applied by the validation layer
///
/// # Example
/// ```
/// use aeromatrix_core::policy::FleetPolicy;
///
/// let policy = FleetPolicy::default();
/// assert_eq!(policy.max_dimension, 100);
/// assert!(policy.allows_dimension(100));
/// assert!(!policy.allows_dimension(101));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetPolicy {
    /// Largest `max_x` / `max_y` a matrix may be resized to
    pub max_dimension: i64,
    /// Largest number of characters in a drone name or model
    pub max_label_len: usize,
}

impl FleetPolicy {
    pub fn with_max_dimension(mut self, max_dimension: i64) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    pub fn allows_dimension(&self, value: i64) -> bool {
        value <= self.max_dimension
    }
}

impl Default for FleetPolicy {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            max_label_len: DEFAULT_MAX_LABEL_LEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_override() {
        let policy = FleetPolicy::default().with_max_dimension(10);
        assert!(policy.allows_dimension(10));
        assert!(!policy.allows_dimension(11));
        assert_eq!(policy.max_label_len, DEFAULT_MAX_LABEL_LEN);
    }
}
