//! Per-patient mutual exclusion via DashMap.

use std::sync::{Arc, Mutex};

use dashmap::DashMap;

/// One mutex per patient, created on first use.
#[derive(Default)]
pub struct PatientLocks {
    locks: DashMap<i64, Arc<Mutex<()>>>,
}

impl PatientLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock guarding `patient_id`'s graph and predictions.
    pub fn for_patient(&self, patient_id: i64) -> Arc<Mutex<()>> {
        self.locks
            .entry(patient_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Number of patients seen so far.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
