//! Clinician edits: add, remove, or reverse a single edge.

use tracing::debug;

use prognos_core::errors::{PrognosError, PrognosResult};
use prognos_core::models::{CausalEdge, CausalGraph, ClinicianAction, ClinicianEdit};
use prognos_core::traits::ICoOccurrenceStore;

use crate::fit::fit_graph_with_data;

/// Apply `edit` to `graph` and refit.
///
/// Removal and reversal touch only the first exact `(from, to)` match; a
/// missing match leaves the edges unchanged. Added edges carry
/// `edge_weight` and the clinician's reason.
pub fn apply_edit(
    store: &dyn ICoOccurrenceStore,
    graph: &mut CausalGraph,
    edit: &ClinicianEdit,
    edge_weight: f64,
) -> PrognosResult<()> {
    if edit.from.as_str().trim().is_empty() || edit.to.as_str().trim().is_empty() {
        return Err(PrognosError::InvalidEdit {
            reason: format!("{} requires both endpoints", edit.action),
        });
    }

    let applied = match edit.action {
        ClinicianAction::AddEdge => {
            let mut edge = CausalEdge::new(edit.from.clone(), edit.to.clone(), edge_weight);
            edge.clinician_added = true;
            edge.reason = Some(edit.reason.clone());
            graph.push_edge(edge);
            true
        }
        ClinicianAction::RemoveEdge => graph.remove_first_edge(&edit.from, &edit.to).is_some(),
        ClinicianAction::ReverseEdge => match graph.find_edge_mut(&edit.from, &edit.to) {
            Some(edge) => {
                std::mem::swap(&mut edge.from, &mut edge.to);
                edge.clinician_reversed = true;
                edge.reason = Some(edit.reason.clone());
                true
            }
            None => false,
        },
    };

    debug!(
        action = %edit.action,
        from = %edit.from,
        to = %edit.to,
        applied,
        "applied clinician edit"
    );
    fit_graph_with_data(store, graph)?;
    Ok(())
}
