// ⚖️ Comparison Engine - Side-by-side institution comparison
// Resolves candidate names through the catalog, drops the ones that do not
// resolve, and builds per-field maps for display. Fewer than two resolved
// records is an error, never a partial comparison.

use crate::catalog::{CatalogStore, InstitutionRecord, Tuition};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Side-by-side comparison of two or more institutions. The maps are keyed
/// by display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub institutions: Vec<InstitutionRecord>,
    pub tuition: HashMap<String, Tuition>,
    pub acceptance_rate: HashMap<String, f64>,
    pub ranking: HashMap<String, u32>,
    pub student_population: HashMap<String, u32>,
}

/// Comparison rejection, carrying a message the caller can surface as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum CompareError {
    InsufficientInputs(String),
}

impl std::fmt::Display for CompareError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompareError::InsufficientInputs(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CompareError {}

pub struct ComparisonEngine<'a> {
    catalog: &'a CatalogStore,
}

impl<'a> ComparisonEngine<'a> {
    pub fn new(catalog: &'a CatalogStore) -> Self {
        ComparisonEngine { catalog }
    }

    /// Compare the named institutions. Names that do not resolve are
    /// silently discarded; at least two must survive.
    pub fn compare<S: AsRef<str>>(&self, names: &[S]) -> Result<ComparisonResult, CompareError> {
        let resolved: Vec<InstitutionRecord> = names
            .iter()
            .filter_map(|name| self.catalog.lookup(name.as_ref()))
            .collect();

        if resolved.len() < 2 {
            return Err(CompareError::InsufficientInputs(
                "Need at least 2 institutions to compare".to_string(),
            ));
        }

        let mut tuition = HashMap::new();
        let mut acceptance_rate = HashMap::new();
        let mut ranking = HashMap::new();
        let mut student_population = HashMap::new();

        for record in &resolved {
            tuition.insert(record.name.clone(), record.tuition.clone());
            acceptance_rate.insert(record.name.clone(), record.acceptance_rate);
            ranking.insert(record.name.clone(), record.ranking);
            student_population.insert(record.name.clone(), record.campus_life.student_population);
        }

        Ok(ComparisonResult {
            institutions: resolved,
            tuition,
            acceptance_rate,
            ranking,
            student_population,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
