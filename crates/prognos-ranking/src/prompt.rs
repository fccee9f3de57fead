//! Prompt construction for the model ranking path.

use prognos_core::models::{DiseaseCode, DocumentSummary};

use crate::text::truncate_chars;

const PROMPT_CANDIDATES: usize = 5;
const PROMPT_EVIDENCE: usize = 3;
const PROMPT_SNIPPET_CHARS: usize = 100;

const OUTPUT_INSTRUCTIONS: &str = r#"

Output ONLY this JSON structure (no other text):
{
  "predictions": [
    {"code": "DISEASE_CODE", "score": 0.XX, "rank": 1}
  ],
  "explanation": "Brief clinical reasoning in 1-2 sentences",
  "evidence": [
    {"disease_code": "CODE", "snippet": "relevant text"}
  ]
}

IMPORTANT:
- Use double quotes for all strings
- No trailing commas
- Keep explanation under 200 characters
- If uncertain, output valid JSON with empty arrays

JSON:"#;

/// Prompt with the patient summary, the five leading candidates, the three
/// leading evidence snippets, an optional clinician note, and strict JSON
/// output instructions.
pub fn build_prompt(
    patient_summary: &str,
    candidates: &[(DiseaseCode, f64)],
    summaries: &[DocumentSummary],
    clinician_comment: Option<&str>,
) -> String {
    let candidates_line = candidates
        .iter()
        .take(PROMPT_CANDIDATES)
        .map(|(code, score)| format!("{code} ({score:.2})"))
        .collect::<Vec<_>>()
        .join(", ");

    let evidence_line = summaries
        .iter()
        .take(PROMPT_EVIDENCE)
        .map(|s| {
            format!(
                "{}: {}",
                s.disease_code,
                truncate_chars(&s.summary, PROMPT_SNIPPET_CHARS)
            )
        })
        .collect::<Vec<_>>()
        .join(" ");

    let mut prompt = format!(
        "You are a medical AI assistant. \n\n\
         CRITICAL: Respond with STRICT JSON ONLY. No extra text before or after JSON.\n\n\
         Patient: {patient_summary}\n\
         Candidate diseases: {candidates_line}\n\
         Medical evidence: {evidence_line}"
    );
    if let Some(comment) = clinician_comment.filter(|c| !c.is_empty()) {
        prompt.push_str("\nClinician note: ");
        prompt.push_str(comment);
    }
    prompt.push_str(OUTPUT_INSTRUCTIONS);
    prompt
}
