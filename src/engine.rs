// 🧭 Dispatch Engine - classify → extract → query
// One synchronous pipeline per utterance: the classifier picks an intent,
// the matching handler resolves entities and queries the catalog, and a
// typed Reply goes back to the caller. Rendering is the caller's job; no
// variant carries display text. The engine never errors - unresolvable
// input degrades to the Unknown*/fallback variants.

use crate::admission::{AdmissionAssessment, AdmissionScorer, ScoreError};
use crate::catalog::{CatalogStore, InstitutionRecord};
use crate::compare::{ComparisonEngine, ComparisonResult};
use crate::conversation::ConversationTurn;
use crate::extract::EntityExtractor;
use crate::intent::{Intent, IntentClassifier};
use crate::query::QueryEngine;
use chrono::{DateTime, Local};
use std::sync::Arc;

/// Typed outcome of one dispatched utterance.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Greeting,
    Farewell,
    Help,
    CatalogListing(Vec<InstitutionRecord>),
    Institution(InstitutionRecord),
    Programs {
        keyword: String,
        matches: Vec<InstitutionRecord>,
    },
    Comparison(ComparisonResult),
    /// Comparison could not run; carries the engine's message.
    ComparisonUnavailable(String),
    /// Admission-requirement view of a resolved institution.
    Admission(InstitutionRecord),
    /// Tuition view of a resolved institution.
    Financial(InstitutionRecord),
    Locations {
        keyword: String,
        matches: Vec<InstitutionRecord>,
    },
    Time(DateTime<Local>),
    Date(DateTime<Local>),
    /// Input ended in a question mark but fired no rule.
    Question,
    /// Input fired no rule at all.
    Fallback,
    /// The handler needed an institution and none was named.
    UnknownInstitution,
    /// The handler needed a program keyword and none was named.
    UnknownProgram,
    /// The handler needed a location keyword and none was named.
    UnknownLocation,
}

/// The conversational front door. Owns the classifier and extractor, shares
/// the catalog with whoever else holds it.
pub struct Engine {
    catalog: Arc<CatalogStore>,
    classifier: IntentClassifier,
    extractor: EntityExtractor,
}

impl Engine {
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        Engine {
            catalog,
            classifier: IntentClassifier::new(),
            extractor: EntityExtractor::new(),
        }
    }

    /// Dispatch one utterance. `_history` is the caller-supplied dialogue
    /// context; the current rule set is stateless and does not consult it.
    pub fn handle(&self, text: &str, _history: &[ConversationTurn]) -> Reply {
        match self.classifier.classify(text) {
            Intent::Greeting => Reply::Greeting,
            Intent::Farewell => Reply::Farewell,
            Intent::Help => Reply::Help,
            Intent::CatalogListing => Reply::CatalogListing(self.catalog.all()),
            Intent::Comparison => self.handle_comparison(text),
            Intent::Institution => self.handle_institution(text),
            Intent::Program => self.handle_program(text),
            Intent::Admission => self.handle_admission(text),
            Intent::Financial => self.handle_financial(text),
            Intent::Location => self.handle_location(text),
            Intent::Time => Reply::Time(Local::now()),
            Intent::Date => Reply::Date(Local::now()),
            Intent::Question => Reply::Question,
            Intent::Fallback => Reply::Fallback,
        }
    }

    pub fn classify(&self, text: &str) -> Intent {
        self.classifier.classify(text)
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    fn handle_comparison(&self, text: &str) -> Reply {
        let keys = self.extractor.extract_all_institutions(text);
        match ComparisonEngine::new(&self.catalog).compare(&keys) {
            Ok(result) => Reply::Comparison(result),
            Err(error) => Reply::ComparisonUnavailable(error.to_string()),
        }
    }

    fn handle_institution(&self, text: &str) -> Reply {
        match self
            .extractor
            .extract_institution(text)
            .and_then(|key| self.catalog.get(key))
        {
            Some(record) => Reply::Institution(record),
            None => Reply::UnknownInstitution,
        }
    }

    fn handle_program(&self, text: &str) -> Reply {
        match self.extractor.extract_program(text) {
            Some(keyword) => Reply::Programs {
                keyword: keyword.to_string(),
                matches: QueryEngine::new(&self.catalog).search_by_program(keyword),
            },
            None => Reply::UnknownProgram,
        }
    }

    fn handle_admission(&self, text: &str) -> Reply {
        match self
            .extractor
            .extract_institution(text)
            .and_then(|key| self.catalog.get(key))
        {
            Some(record) => Reply::Admission(record),
            None => Reply::UnknownInstitution,
        }
    }

    fn handle_financial(&self, text: &str) -> Reply {
        match self
            .extractor
            .extract_institution(text)
            .and_then(|key| self.catalog.get(key))
        {
            Some(record) => Reply::Financial(record),
            None => Reply::UnknownInstitution,
        }
    }

    fn handle_location(&self, text: &str) -> Reply {
        match self.extractor.extract_location(text) {
            Some(keyword) => Reply::Locations {
                keyword: keyword.to_string(),
                matches: QueryEngine::new(&self.catalog).search_by_location(keyword),
            },
            None => Reply::UnknownLocation,
        }
    }

    /// Score applicant stats against an institution. Thin passthrough so
    /// request handlers can stay on one entry point.
    pub fn score_admission(
        &self,
        alias: &str,
        gpa: f64,
        sat: Option<u32>,
        act: Option<u32>,
    ) -> Result<AdmissionAssessment, ScoreError> {
        AdmissionScorer::new(&self.catalog).score(alias, gpa, sat, act)
    }
}

// ============================================================================
// TESTS
// ============================================================================
