//! StorageEngine: owns the connection, implements every collaborator store
//! trait, and runs migrations on open.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::debug;

use prognos_core::config::StorageConfig;
use prognos_core::errors::{PrognosResult, StorageError};
use prognos_core::models::{
    CausalGraph, CoOccurrence, DiseaseCode, DocumentSummary, PatientHistory, Prediction,
    PredictionCommit, StoredDocument, TransitionEdge,
};
use prognos_core::traits::{
    ICoOccurrenceStore, IDocumentStore, IPatientHistory, IPredictionStore, ITransitionStore,
};

use crate::migrations;
use crate::pool::WriteConnection;
use crate::queries::{self, matrices::MatrixCounts};
use crate::to_storage_err;

/// The main storage engine.
pub struct StorageEngine {
    writer: WriteConnection,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> PrognosResult<Self> {
        Self::open_with(path, &StorageConfig::default())
    }

    /// Open with explicit storage settings.
    pub fn open_with(path: &Path, config: &StorageConfig) -> PrognosResult<Self> {
        let writer = WriteConnection::open(path, config.busy_timeout_ms)?;
        let engine = Self { writer };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> PrognosResult<Self> {
        let engine = Self {
            writer: WriteConnection::open_in_memory()?,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> PrognosResult<()> {
        self.writer.with_conn_sync(|conn| {
            let version = migrations::run_migrations(conn)?;
            debug!(version, "storage ready");
            Ok(())
        })
    }

    /// Run a closure on the connection (for advanced operations and tests).
    pub fn with_conn<F, T>(&self, f: F) -> PrognosResult<T>
    where
        F: FnOnce(&Connection) -> PrognosResult<T>,
    {
        self.writer.with_conn_sync(f)
    }

    // --- Seeding ---

    pub fn insert_patient(&self, patient_id: i64, name: Option<&str>) -> PrognosResult<()> {
        self.with_conn(|conn| queries::history::insert_patient(conn, patient_id, name))
    }

    pub fn insert_visit(&self, visit_id: i64, patient_id: i64, visit_date: NaiveDate) -> PrognosResult<()> {
        self.with_conn(|conn| queries::history::insert_visit(conn, visit_id, patient_id, visit_date))
    }

    pub fn insert_diagnosis(
        &self,
        visit_id: i64,
        disease_code: &str,
        disease_name: Option<&str>,
    ) -> PrognosResult<()> {
        self.with_conn(|conn| {
            queries::history::insert_diagnosis(conn, visit_id, disease_code, disease_name)
        })
    }

    pub fn upsert_transition(
        &self,
        from: &str,
        to: &str,
        probability: f64,
        support_count: u64,
    ) -> PrognosResult<()> {
        self.with_conn(|conn| {
            queries::statistics::upsert_transition(conn, from, to, probability, support_count)
        })
    }

    pub fn upsert_co_occurrence(
        &self,
        a: &str,
        b: &str,
        count: u64,
        total_population: u64,
    ) -> PrognosResult<()> {
        self.with_conn(|conn| {
            queries::statistics::upsert_co_occurrence(conn, a, b, count, total_population)
        })
    }

    /// Rebuild both statistics matrices from visit history in one transaction.
    pub fn recompute_matrices(&self) -> PrognosResult<MatrixCounts> {
        self.with_conn(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| to_storage_err(e.to_string()))?;
            let counts = queries::matrices::recompute_matrices(&tx)?;
            tx.commit().map_err(|e| StorageError::TransactionFailed {
                reason: e.to_string(),
            })?;
            Ok(counts)
        })
    }

    // --- Inspection ---

    pub fn latest_prediction(&self, patient_id: i64) -> PrognosResult<Option<Prediction>> {
        self.with_conn(|conn| queries::predictions::latest_prediction(conn, patient_id))
    }

    pub fn count_predictions(&self, patient_id: i64) -> PrognosResult<u64> {
        self.with_conn(|conn| queries::predictions::count_predictions(conn, patient_id))
    }

    fn write_commit(conn: &Connection, commit: &PredictionCommit) -> PrognosResult<i64> {
        queries::memory::upsert_graph(
            conn,
            commit.patient_id,
            &commit.prediction.dag,
            commit.edit.as_ref(),
        )?;
        if let Some(visit_id) = commit.visit_id {
            queries::summary_cache::insert_summaries(
                conn,
                commit.patient_id,
                visit_id,
                &commit.summaries_to_cache,
            )?;
        }
        queries::predictions::insert_prediction(
            conn,
            commit.patient_id,
            commit.visit_id,
            &commit.prediction,
        )
    }
}

impl ITransitionStore for StorageEngine {
    fn outgoing(&self, from: &DiseaseCode) -> PrognosResult<Vec<TransitionEdge>> {
        self.with_conn(|conn| queries::statistics::outgoing_transitions(conn, from))
    }

    fn probability(&self, from: &DiseaseCode, to: &DiseaseCode) -> PrognosResult<Option<f64>> {
        self.with_conn(|conn| queries::statistics::transition_probability(conn, from, to))
    }
}

impl ICoOccurrenceStore for StorageEngine {
    fn lookup(&self, a: &DiseaseCode, b: &DiseaseCode) -> PrognosResult<Option<CoOccurrence>> {
        self.with_conn(|conn| queries::statistics::co_occurrence(conn, a, b))
    }
}

impl IDocumentStore for StorageEngine {
    fn list_all(&self) -> PrognosResult<Vec<StoredDocument>> {
        self.with_conn(queries::documents::list_documents)
    }

    fn insert(
        &self,
        disease_code: &DiseaseCode,
        section: &str,
        content: &str,
        embedding: &[f32],
    ) -> PrognosResult<i64> {
        self.with_conn(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| to_storage_err(e.to_string()))?;
            let doc_id =
                queries::documents::insert_document(&tx, disease_code, section, content, embedding)?;
            tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
            Ok(doc_id)
        })
    }
}

impl IPatientHistory for StorageEngine {
    fn history(&self, patient_id: i64) -> PrognosResult<PatientHistory> {
        self.with_conn(|conn| queries::history::load_history(conn, patient_id))
    }
}

impl IPredictionStore for StorageEngine {
    fn load_graph(&self, patient_id: i64) -> PrognosResult<Option<CausalGraph>> {
        self.with_conn(|conn| queries::memory::load_graph(conn, patient_id))
    }

    fn cached_summaries(&self, patient_id: i64, visit_id: i64) -> PrognosResult<Vec<DocumentSummary>> {
        self.with_conn(|conn| queries::summary_cache::cached_summaries(conn, patient_id, visit_id))
    }

    fn commit(&self, commit: &PredictionCommit) -> PrognosResult<i64> {
        self.with_conn(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| to_storage_err(e.to_string()))?;
            // Dropping `tx` on error rolls every statement back.
            let prediction_id =
                Self::write_commit(&tx, commit).map_err(|e| StorageError::TransactionFailed {
                    reason: e.to_string(),
                })?;
            tx.commit().map_err(|e| StorageError::TransactionFailed {
                reason: e.to_string(),
            })?;
            debug!(
                patient_id = commit.patient_id,
                prediction_id,
                cached = commit.summaries_to_cache.len(),
                "committed prediction"
            );
            Ok(prediction_id)
        })
    }
}
