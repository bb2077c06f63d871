// 🎯 Admission Scoring - Weighted components with banding
// Scores applicant stats against an institution's published thresholds.
// GPA carries 40 points, SAT and ACT 30 each; every component is capped at
// its weight, so beating a threshold cannot overflow the component. An
// omitted SAT or ACT contributes zero, which lowers the maximum achievable
// score - the result is reported as-is, never rescaled.

use crate::catalog::{AdmissionRequirements, CatalogStore};
use serde::{Deserialize, Serialize};

/// Qualitative likelihood band for a summed score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "Very High")]
    VeryHigh,
    High,
    Moderate,
    Low,
    #[serde(rename = "Very Low")]
    VeryLow,
}

impl Band {
    /// Band for a 0-100 score, inclusive lower bounds.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Band::VeryHigh
        } else if score >= 80.0 {
            Band::High
        } else if score >= 70.0 {
            Band::Moderate
        } else if score >= 60.0 {
            Band::Low
        } else {
            Band::VeryLow
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Band::VeryHigh => "Very High",
            Band::High => "High",
            Band::Moderate => "Moderate",
            Band::Low => "Low",
            Band::VeryLow => "Very Low",
        }
    }

    /// Display hint associated with the band.
    pub fn hint(&self) -> &'static str {
        match self {
            Band::VeryHigh => "green",
            Band::High => "lightgreen",
            Band::Moderate => "yellow",
            Band::Low => "orange",
            Band::VeryLow => "red",
        }
    }
}

/// Result of scoring one applicant against one institution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdmissionAssessment {
    /// Display name of the institution scored against
    pub institution: String,

    /// Summed weighted score, 0-100, rounded to one decimal
    pub score: f64,

    pub band: Band,

    /// Band display hint
    pub hint: String,

    /// Echoed from the record for context
    pub acceptance_rate: f64,
    pub requirements: AdmissionRequirements,
}

/// Why a scoring request was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreError {
    /// The institution alias did not resolve.
    NotFound(String),
    /// GPA missing or zero - scoring needs it.
    MissingInput,
}

impl std::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreError::NotFound(alias) => write!(f, "institution not found: {}", alias),
            ScoreError::MissingInput => write!(f, "GPA is required"),
        }
    }
}

impl std::error::Error for ScoreError {}

pub struct AdmissionScorer<'a> {
    catalog: &'a CatalogStore,
}

impl<'a> AdmissionScorer<'a> {
    pub fn new(catalog: &'a CatalogStore) -> Self {
        AdmissionScorer { catalog }
    }

    /// Score applicant stats against the named institution's thresholds.
    pub fn score(
        &self,
        alias: &str,
        gpa: f64,
        sat: Option<u32>,
        act: Option<u32>,
    ) -> Result<AdmissionAssessment, ScoreError> {
        if gpa <= 0.0 {
            return Err(ScoreError::MissingInput);
        }

        let record = self
            .catalog
            .lookup(alias)
            .ok_or_else(|| ScoreError::NotFound(alias.to_string()))?;
        let requirements = &record.admission_requirements;

        let mut score = (gpa / requirements.gpa * 40.0).min(40.0);

        if let Some(sat) = sat {
            score += (sat as f64 / requirements.sat_score as f64 * 30.0).min(30.0);
        }

        if let Some(act) = act {
            score += (act as f64 / requirements.act_score as f64 * 30.0).min(30.0);
        }

        let score = (score * 10.0).round() / 10.0;
        let band = Band::from_score(score);

        Ok(AdmissionAssessment {
            institution: record.name.clone(),
            score,
            band,
            hint: band.hint().to_string(),
            acceptance_rate: record.acceptance_rate,
            requirements: record.admission_requirements.clone(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
