use serde::{Deserialize, Serialize};

use super::defaults;

/// Causal graph engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CausalConfig {
    /// Transitions at or below this probability are not candidates.
    pub epsilon: f64,
    /// Upper bound on refinement passes.
    pub max_refine_iterations: usize,
    /// Multiplier applied to an edge weight per evidence hit.
    pub boost_factor: f64,
    /// Weight given to clinician-added edges.
    pub clinician_edge_weight: f64,
    /// Candidates used to seed a new graph.
    pub dag_candidate_limit: usize,
}

impl Default for CausalConfig {
    fn default() -> Self {
        Self {
            epsilon: defaults::DEFAULT_CANDIDATE_EPSILON,
            max_refine_iterations: defaults::DEFAULT_MAX_REFINE_ITERATIONS,
            boost_factor: defaults::DEFAULT_BOOST_FACTOR,
            clinician_edge_weight: defaults::DEFAULT_CLINICIAN_EDGE_WEIGHT,
            dag_candidate_limit: defaults::DEFAULT_DAG_CANDIDATE_LIMIT,
        }
    }
}
