use serde::{Deserialize, Serialize};

/// Thresholds for the confirmation gate trigger predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Confidence scores strictly below this value trigger the gate.
    pub low_confidence_threshold: u8,
    pub multiple_condition_threshold: usize,
    pub overlapping_cluster_threshold: usize,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            low_confidence_threshold: 60,
            multiple_condition_threshold: 2,
            overlapping_cluster_threshold: 3,
        }
    }
}
