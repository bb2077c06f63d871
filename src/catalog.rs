// 🏛️ Institution Catalog - Records + alias resolution
// Owns every institution record (definition order preserved) and the alias
// index that maps nicknames and shorthands to canonical keys.

use anyhow::{Context as AnyhowContext, Result};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::RwLock;

/// Seeded catalog, embedded at build time. The catalog is configuration:
/// editing the JSON is how records are added to the default data set.
const SEED_CATALOG: &str = include_str!("../data/institutions.json");

/// Alias table seeds: (normalized alias, canonical key). Many aliases map to
/// one key. Evaluated via exact match after normalization; order here also
/// fixes the scan order used by entity extraction.
pub const ALIAS_TABLE: &[(&str, &str)] = &[
    ("harvard", "harvard"),
    ("mit", "mit"),
    ("stanford", "stanford"),
    ("berkeley", "berkeley"),
    ("yale", "yale"),
    ("princeton", "princeton"),
    ("caltech", "caltech"),
    ("columbia", "columbia"),
    ("upenn", "upenn"),
    ("penn", "upenn"),
    ("duke", "duke"),
    ("northwestern", "northwestern"),
    ("jhu", "jhu"),
    ("johnshopkins", "jhu"),
    ("johns", "jhu"),
    ("cornell", "cornell"),
    ("rice", "rice"),
    ("vanderbilt", "vanderbilt"),
    ("ucberkeley", "berkeley"),
    ("uc", "berkeley"),
    ("massachusetts", "mit"),
    ("california", "stanford"),
    ("pennsylvania", "upenn"),
    ("texas", "rice"),
    ("tennessee", "vanderbilt"),
    ("illinois", "northwestern"),
    ("maryland", "jhu"),
    ("newyork", "columbia"),
    ("northcarolina", "duke"),
];

// ============================================================================
// RECORD TYPES
// ============================================================================

/// Published tuition figures. Public institutions split the undergraduate
/// figure in-state/out-of-state; private ones publish a single number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub undergraduate: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub undergraduate_in_state: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub undergraduate_out_state: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduate: Option<u32>,

    pub room_board: u32,
}

impl Tuition {
    /// Single undergraduate figure for aggregate reporting. Split-tuition
    /// records contribute their out-of-state number.
    pub fn undergraduate_figure(&self) -> Option<u32> {
        self.undergraduate.or(self.undergraduate_out_state)
    }
}

/// Ordered program lists by level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Programs {
    pub undergraduate: Vec<String>,
    pub graduate: Vec<String>,
}

/// Published admission thresholds. Recommended minimums, not cutoffs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdmissionRequirements {
    pub gpa: f64,
    pub sat_score: u32,
    pub act_score: u32,
    pub toefl: u32,
    pub ielts: f64,
    pub essays: u32,
    pub recommendations: u32,
    pub deadline: String,
}

/// Campus population counts and ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampusLife {
    pub student_population: u32,
    pub undergraduate: u32,
    pub graduate: u32,
    pub international_students: u32,
    pub student_faculty_ratio: u32,
    pub housing: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub phone: String,
    pub email: String,
}

/// One institution. Immutable after load: identity is (key, name), the rest
/// are published values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionRecord {
    /// Canonical key - unique across the catalog. Derived from the name on
    /// administrative insert, so submitted records may omit it.
    #[serde(default)]
    pub key: String,

    /// Display name
    pub name: String,

    /// "City, State"
    pub location: String,

    /// Public/private research university
    pub category: String,

    /// Founding year
    pub founded: i32,

    /// National ranking (1 = best)
    pub ranking: u32,

    /// Acceptance rate in percent, 0-100
    pub acceptance_rate: f64,

    pub tuition: Tuition,
    pub programs: Programs,
    pub admission_requirements: AdmissionRequirements,
    pub campus_life: CampusLife,
    pub notable_features: Vec<String>,
    pub website: String,
    pub contact: Contact,
}

/// Normalize a name or alias to its lookup form: lowercase, all whitespace
/// removed, and the literal substrings "university"/"college" stripped.
pub fn normalize_name(name: &str) -> String {
    let lowered: String = name
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    lowered.replace("university", "").replace("college", "")
}

// ============================================================================
// VALIDATION
// ============================================================================

/// One violated field rule. Administrative inserts report every violation,
/// not just the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Why an administrative insert was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertError {
    /// The derived canonical key is already present in the catalog.
    AlreadyExists(String),
    /// One message per violated field rule.
    ValidationFailed(Vec<ValidationError>),
}

impl std::fmt::Display for InsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InsertError::AlreadyExists(key) => {
                write!(f, "institution already exists: {}", key)
            }
            InsertError::ValidationFailed(errors) => {
                let joined: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                write!(f, "validation failed: {}", joined.join("; "))
            }
        }
    }
}

impl std::error::Error for InsertError {}

/// Check every field rule and collect all violations.
pub fn validate_record(record: &InstitutionRecord) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if record.name.trim().is_empty() {
        errors.push(ValidationError {
            field: "name".to_string(),
            message: "Required field is empty".to_string(),
        });
    }

    if record.location.trim().is_empty() {
        errors.push(ValidationError {
            field: "location".to_string(),
            message: "Required field is empty".to_string(),
        });
    }

    if record.category.trim().is_empty() {
        errors.push(ValidationError {
            field: "category".to_string(),
            message: "Required field is empty".to_string(),
        });
    }

    if record.ranking < 1 {
        errors.push(ValidationError {
            field: "ranking".to_string(),
            message: "Ranking must be a positive integer".to_string(),
        });
    }

    if record.acceptance_rate < 0.0 || record.acceptance_rate > 100.0 {
        errors.push(ValidationError {
            field: "acceptance_rate".to_string(),
            message: format!(
                "Acceptance rate must be between 0 and 100, got {}",
                record.acceptance_rate
            ),
        });
    }

    let current_year = Utc::now().year();
    if record.founded < 1000 || record.founded > current_year {
        errors.push(ValidationError {
            field: "founded".to_string(),
            message: format!(
                "Founded year must be between 1000 and {}, got {}",
                current_year, record.founded
            ),
        });
    }

    errors
}

// ============================================================================
// STATISTICS
// ============================================================================

/// Aggregate view of the catalog for the administrative interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogStatistics {
    pub total_institutions: usize,
    pub average_acceptance_rate: f64,
    pub average_undergraduate_tuition: f64,
    pub ranking_min: u32,
    pub ranking_max: u32,
    pub by_category: HashMap<String, usize>,
    pub by_state: HashMap<String, usize>,
}

// ============================================================================
// CATALOG STORE
// ============================================================================

struct CatalogInner {
    /// Records in definition order
    records: Vec<InstitutionRecord>,

    /// normalized alias -> canonical key
    aliases: HashMap<String, String>,
}

/// The catalog: built once at startup, read-shared for the life of the
/// process. The only mutation is the administrative insert path, which must
/// be externally serialized to a single writer; concurrent readers go
/// through the read guard.
pub struct CatalogStore {
    inner: RwLock<CatalogInner>,
}

impl CatalogStore {
    /// Empty store, aliases seeded from the static table.
    pub fn new() -> Self {
        CatalogStore::from_records(Vec::new())
    }

    /// Store seeded with the embedded institution catalog.
    pub fn with_defaults() -> Self {
        let records: Vec<InstitutionRecord> =
            serde_json::from_str(SEED_CATALOG).expect("embedded institution catalog must parse");
        CatalogStore::from_records(records)
    }

    /// Load a catalog from a JSON file (the administrative backup format).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read catalog file: {:?}", path.as_ref()))?;

        let records: Vec<InstitutionRecord> =
            serde_json::from_str(&content).context("Failed to parse catalog JSON")?;

        Ok(CatalogStore::from_records(records))
    }

    /// Build a store from a record list, indexing the static alias table
    /// plus each record's own key.
    pub fn from_records(records: Vec<InstitutionRecord>) -> Self {
        let mut aliases = HashMap::new();
        for (alias, key) in ALIAS_TABLE {
            aliases.insert((*alias).to_string(), (*key).to_string());
        }
        for record in &records {
            aliases
                .entry(record.key.clone())
                .or_insert_with(|| record.key.clone());
        }

        CatalogStore {
            inner: RwLock::new(CatalogInner { records, aliases }),
        }
    }

    /// Resolve an alias to its record. Normalizes, consults the alias index,
    /// then falls back to a case-insensitive substring scan over display
    /// names in definition order.
    pub fn lookup(&self, alias: &str) -> Option<InstitutionRecord> {
        let normalized = normalize_name(alias);
        if normalized.is_empty() {
            return None;
        }

        let inner = self.inner.read().unwrap();

        if let Some(key) = inner.aliases.get(&normalized) {
            if let Some(record) = inner.records.iter().find(|r| &r.key == key) {
                return Some(record.clone());
            }
        }

        // Fallback: first structural match against display names
        inner
            .records
            .iter()
            .find(|r| r.name.to_lowercase().contains(&normalized))
            .cloned()
    }

    /// Fetch by canonical key, bypassing alias resolution.
    pub fn get(&self, key: &str) -> Option<InstitutionRecord> {
        let inner = self.inner.read().unwrap();
        inner.records.iter().find(|r| r.key == key).cloned()
    }

    /// All records, in catalog definition order.
    pub fn all(&self) -> Vec<InstitutionRecord> {
        self.inner.read().unwrap().records.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Administrative insert. The canonical key is derived from the record
    /// name with the lookup normalization rule; a record whose derived key
    /// is already present is rejected. `validated` attests the caller
    /// already ran `validate_record` - only the duplicate check runs then.
    /// On success the record is immediately visible to lookups and searches.
    pub fn insert(&self, mut record: InstitutionRecord, validated: bool) -> Result<(), InsertError> {
        if !validated {
            let errors = validate_record(&record);
            if !errors.is_empty() {
                return Err(InsertError::ValidationFailed(errors));
            }
        }

        let key = normalize_name(&record.name);

        let mut inner = self.inner.write().unwrap();
        if inner.records.iter().any(|r| r.key == key) {
            return Err(InsertError::AlreadyExists(key));
        }

        record.key = key.clone();
        inner.aliases.insert(key.clone(), key);
        inner.records.push(record);
        Ok(())
    }

    /// Catalog aggregates for the administrative interface. `None` when the
    /// catalog is empty.
    pub fn statistics(&self) -> Option<CatalogStatistics> {
        let inner = self.inner.read().unwrap();
        if inner.records.is_empty() {
            return None;
        }

        let total = inner.records.len();
        let rate_sum: f64 = inner.records.iter().map(|r| r.acceptance_rate).sum();

        let tuition_figures: Vec<u32> = inner
            .records
            .iter()
            .filter_map(|r| r.tuition.undergraduate_figure())
            .collect();
        let tuition_avg = if tuition_figures.is_empty() {
            0.0
        } else {
            tuition_figures.iter().map(|t| *t as f64).sum::<f64>() / tuition_figures.len() as f64
        };

        let ranking_min = inner.records.iter().map(|r| r.ranking).min()?;
        let ranking_max = inner.records.iter().map(|r| r.ranking).max()?;

        let mut by_category: HashMap<String, usize> = HashMap::new();
        let mut by_state: HashMap<String, usize> = HashMap::new();
        for record in &inner.records {
            *by_category.entry(record.category.clone()).or_insert(0) += 1;

            let state = record
                .location
                .rsplit(',')
                .next()
                .unwrap_or(&record.location)
                .trim()
                .to_string();
            *by_state.entry(state).or_insert(0) += 1;
        }

        Some(CatalogStatistics {
            total_institutions: total,
            average_acceptance_rate: rate_sum / total as f64,
            average_undergraduate_tuition: tuition_avg,
            ranking_min,
            ranking_max,
            by_category,
            by_state,
        })
    }

    /// Serialize the record list for external backup. The in-memory
    /// structure is always consistent enough for this to run mid-process.
    pub fn dump_json(&self) -> Result<String> {
        let inner = self.inner.read().unwrap();
        serde_json::to_string_pretty(&inner.records).context("Failed to serialize catalog")
    }

    /// Write the backup JSON to a file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.dump_json()?;
        fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write catalog file: {:?}", path.as_ref()))?;
        Ok(())
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(name: &str, ranking: u32) -> InstitutionRecord {
        InstitutionRecord {
            key: String::new(),
            name: name.to_string(),
            location: "Example City, Example State".to_string(),
            category: "Private Research University".to_string(),
            founded: 1950,
            ranking,
            acceptance_rate: 15.0,
            tuition: Tuition {
                undergraduate: Some(45000),
                undergraduate_in_state: None,
                undergraduate_out_state: None,
                graduate: Some(45000),
                room_board: 12000,
            },
            programs: Programs {
                undergraduate: vec!["Computer Science".to_string(), "Engineering".to_string()],
                graduate: vec!["MBA".to_string()],
            },
            admission_requirements: AdmissionRequirements {
                gpa: 3.5,
                sat_score: 1400,
                act_score: 32,
                toefl: 80,
                ielts: 6.5,
                essays: 2,
                recommendations: 2,
                deadline: "January 15".to_string(),
            },
            campus_life: CampusLife {
                student_population: 8000,
                undergraduate: 5000,
                graduate: 3000,
                international_students: 20,
                student_faculty_ratio: 12,
                housing: "Available".to_string(),
            },
            notable_features: vec!["Strong research programs".to_string()],
            website: "https://www.example.edu".to_string(),
            contact: Contact {
                phone: "(555) 123-4567".to_string(),
                email: "admissions@example.edu".to_string(),
            },
        }
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Harvard University"), "harvard");
        assert_eq!(normalize_name("HARVARD"), "harvard");
        assert_eq!(normalize_name("  Johns Hopkins University "), "johnshopkins");
        assert_eq!(normalize_name("Boston College"), "boston");
    }

    #[test]
    fn test_lookup_is_alias_and_case_insensitive() {
        let store = CatalogStore::with_defaults();

        let a = store.lookup("Harvard University").unwrap();
        let b = store.lookup("harvard").unwrap();
        let c = store.lookup("HARVARD").unwrap();

        assert_eq!(a.key, "harvard");
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_lookup_mit() {
        let store = CatalogStore::with_defaults();
        let mit = store.lookup("MIT").unwrap();

        assert_eq!(mit.name, "Massachusetts Institute of Technology");
        assert_eq!(mit.ranking, 2);
        assert_eq!(mit.acceptance_rate, 6.7);
    }

    #[test]
    fn test_lookup_nickname_variants() {
        let store = CatalogStore::with_defaults();

        assert_eq!(store.lookup("penn").unwrap().key, "upenn");
        assert_eq!(store.lookup("upenn").unwrap().key, "upenn");
        assert_eq!(store.lookup("johns").unwrap().key, "jhu");
        assert_eq!(store.lookup("UC Berkeley").unwrap().key, "berkeley");
    }

    #[test]
    fn test_lookup_display_name_fallback() {
        let store = CatalogStore::with_defaults();

        // "hopkins" is not in the alias table; the substring scan over
        // display names picks it up.
        let jhu = store.lookup("Hopkins").unwrap();
        assert_eq!(jhu.key, "jhu");
    }

    #[test]
    fn test_lookup_unknown_returns_none() {
        let store = CatalogStore::with_defaults();
        assert!(store.lookup("hogwarts").is_none());
        assert!(store.lookup("   ").is_none());
    }

    #[test]
    fn test_all_preserves_definition_order() {
        let store = CatalogStore::with_defaults();
        let records = store.all();

        assert_eq!(records.len(), 15);
        assert_eq!(records[0].key, "harvard");
        assert_eq!(records[1].key, "mit");
        assert_eq!(records[14].key, "vanderbilt");
    }

    #[test]
    fn test_insert_then_visible() {
        let store = CatalogStore::with_defaults();
        let before = store.len();

        store
            .insert(sample_record("Example University", 16), false)
            .unwrap();

        assert_eq!(store.len(), before + 1);
        let found = store.lookup("Example University").unwrap();
        assert_eq!(found.key, "example");
        assert_eq!(found.ranking, 16);
    }

    #[test]
    fn test_insert_duplicate_key_rejected() {
        let store = CatalogStore::with_defaults();

        let result = store.insert(sample_record("Harvard University", 16), false);
        assert_eq!(
            result,
            Err(InsertError::AlreadyExists("harvard".to_string()))
        );
    }

    #[test]
    fn test_insert_collects_every_violation() {
        let store = CatalogStore::with_defaults();

        let mut record = sample_record("Example University", 0);
        record.acceptance_rate = 150.0;
        record.founded = 2999;

        let result = store.insert(record, false);
        match result {
            Err(InsertError::ValidationFailed(errors)) => {
                assert_eq!(errors.len(), 3);
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert!(fields.contains(&"ranking"));
                assert!(fields.contains(&"acceptance_rate"));
                assert!(fields.contains(&"founded"));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_insert_prevalidated_skips_field_checks() {
        let store = CatalogStore::with_defaults();

        let mut record = sample_record("Example University", 0);
        record.acceptance_rate = 150.0;

        // Caller attests validation already ran; only the duplicate check
        // applies.
        assert!(store.insert(record, true).is_ok());
        assert!(store.lookup("Example University").is_some());
    }

    #[test]
    fn test_statistics() {
        let store = CatalogStore::with_defaults();
        let stats = store.statistics().unwrap();

        assert_eq!(stats.total_institutions, 15);
        assert_eq!(stats.ranking_min, 1);
        assert_eq!(stats.ranking_max, 15);
        assert!(stats.average_acceptance_rate > 3.0 && stats.average_acceptance_rate < 15.0);
        // Berkeley contributes its out-of-state figure
        assert!(stats.average_undergraduate_tuition > 40000.0);
        assert_eq!(stats.by_category.get("Public Research University"), Some(&1));
        assert_eq!(stats.by_state.get("Massachusetts"), Some(&2));
        assert_eq!(stats.by_state.get("California"), Some(&3));
    }

    #[test]
    fn test_statistics_empty_catalog() {
        let store = CatalogStore::from_records(Vec::new());
        assert!(store.statistics().is_none());
    }

    #[test]
    fn test_dump_and_reload_roundtrip() {
        let store = CatalogStore::with_defaults();
        store
            .insert(sample_record("Example University", 16), false)
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("institutions_backup.json");
        store.save_to_file(&path).unwrap();

        let reloaded = CatalogStore::from_file(&path).unwrap();
        assert_eq!(reloaded.len(), 16);
        assert_eq!(reloaded.lookup("example").unwrap().name, "Example University");
        assert_eq!(reloaded.all(), store.all());
    }
}
