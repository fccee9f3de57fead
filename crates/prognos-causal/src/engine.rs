//! CausalGraphEngine: borrows the statistics stores and runs every graph
//! operation with the configured parameters.

use prognos_core::config::CausalConfig;
use prognos_core::errors::PrognosResult;
use prognos_core::models::{CandidateSet, CausalGraph, ClinicianEdit, DiseaseCode, DocumentSummary};
use prognos_core::traits::{ICoOccurrenceStore, ITransitionStore};

use crate::graph::{builder, cycles};
use crate::{candidates, edits, fit, refine};

/// Graph operations over one pair of statistics stores.
pub struct CausalGraphEngine<'a> {
    transitions: &'a dyn ITransitionStore,
    co_occurrence: &'a dyn ICoOccurrenceStore,
    config: CausalConfig,
}

impl<'a> CausalGraphEngine<'a> {
    /// Create an engine with default parameters.
    pub fn new(
        transitions: &'a dyn ITransitionStore,
        co_occurrence: &'a dyn ICoOccurrenceStore,
    ) -> Self {
        Self::with_config(transitions, co_occurrence, CausalConfig::default())
    }

    pub fn with_config(
        transitions: &'a dyn ITransitionStore,
        co_occurrence: &'a dyn ICoOccurrenceStore,
        config: CausalConfig,
    ) -> Self {
        Self {
            transitions,
            co_occurrence,
            config,
        }
    }

    pub fn config(&self) -> &CausalConfig {
        &self.config
    }

    /// Next-diagnosis candidates for `current` above the configured epsilon.
    pub fn build_candidate_set(&self, current: &[DiseaseCode]) -> PrognosResult<CandidateSet> {
        candidates::build_candidate_set(self.transitions, current, self.config.epsilon)
    }

    /// Initial graph over at most `dag_candidate_limit` leading candidates.
    pub fn initial_graph_for(&self, candidates: &CandidateSet) -> PrognosResult<CausalGraph> {
        self.generate_initial_dag(&candidates.top_codes(self.config.dag_candidate_limit))
    }

    pub fn generate_initial_dag(&self, entities: &[DiseaseCode]) -> PrognosResult<CausalGraph> {
        builder::generate_initial_dag(self.transitions, entities)
    }

    pub fn fit_graph_with_data(&self, mut graph: CausalGraph) -> PrognosResult<CausalGraph> {
        fit::fit_graph_with_data(self.co_occurrence, &mut graph)?;
        Ok(graph)
    }

    pub fn iterative_refine(
        &self,
        mut graph: CausalGraph,
        summaries: &[DocumentSummary],
    ) -> PrognosResult<CausalGraph> {
        refine::iterative_refine(
            self.co_occurrence,
            &mut graph,
            summaries,
            self.config.max_refine_iterations,
            self.config.boost_factor,
        )?;
        Ok(graph)
    }

    pub fn apply_clinician_edit(
        &self,
        mut graph: CausalGraph,
        edit: &ClinicianEdit,
    ) -> PrognosResult<CausalGraph> {
        edits::apply_edit(
            self.co_occurrence,
            &mut graph,
            edit,
            self.config.clinician_edge_weight,
        )?;
        Ok(graph)
    }

    /// Multi-node strongly connected components of `graph`.
    pub fn cycle_report(&self, graph: &CausalGraph) -> Vec<Vec<DiseaseCode>> {
        cycles::cycle_report(graph)
    }
}
