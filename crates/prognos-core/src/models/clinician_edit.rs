use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::disease::DiseaseCode;
use crate::errors::PrognosError;

/// Structural change a clinician can make to a causal graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinicianAction {
    AddEdge,
    RemoveEdge,
    ReverseEdge,
}

impl ClinicianAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddEdge => "add_edge",
            Self::RemoveEdge => "remove_edge",
            Self::ReverseEdge => "reverse_edge",
        }
    }
}

impl fmt::Display for ClinicianAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClinicianAction {
    type Err = PrognosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add_edge" => Ok(Self::AddEdge),
            "remove_edge" => Ok(Self::RemoveEdge),
            "reverse_edge" => Ok(Self::ReverseEdge),
            other => Err(PrognosError::InvalidEdit {
                reason: format!("unknown action '{other}'"),
            }),
        }
    }
}

/// A clinician's edit with its free-text justification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicianEdit {
    pub action: ClinicianAction,
    pub from: DiseaseCode,
    pub to: DiseaseCode,
    pub reason: String,
}

impl ClinicianEdit {
    pub fn new(
        action: ClinicianAction,
        from: impl Into<DiseaseCode>,
        to: impl Into<DiseaseCode>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            action,
            from: from.into(),
            to: to.into(),
            reason: reason.into(),
        }
    }
}
