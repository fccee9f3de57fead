//! Retrieval query construction.

use prognos_core::models::DiseaseCode;

/// `"patient history {recent history} risk factors progression {top candidates}"`.
///
/// Uses the last `history_window` history codes and the first
/// `candidate_window` candidates, space separated.
pub fn build_query(
    history: &[DiseaseCode],
    candidates: &[DiseaseCode],
    history_window: usize,
    candidate_window: usize,
) -> String {
    let skip = history.len().saturating_sub(history_window);
    let recent = join(&history[skip..]);
    let top = join(&candidates[..candidates.len().min(candidate_window)]);
    format!("patient history {recent} risk factors progression {top}")
}

fn join(codes: &[DiseaseCode]) -> String {
    codes
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(raw: &[&str]) -> Vec<DiseaseCode> {
        raw.iter().map(|c| DiseaseCode::new(*c)).collect()
    }

    #[test]
    fn windows_history_and_candidates() {
        let q = build_query(
            &codes(&["A", "B", "C", "D"]),
            &codes(&["X1", "X2", "X3", "X4", "X5", "X6"]),
            3,
            5,
        );
        assert_eq!(q, "patient history B C D risk factors progression X1 X2 X3 X4 X5");
    }

    #[test]
    fn empty_inputs_still_form_a_query() {
        assert_eq!(
            build_query(&[], &[], 3, 5),
            "patient history  risk factors progression "
        );
    }
}
