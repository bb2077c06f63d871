// College Compass - Core Library
// Exposes all modules for use in the CLI, API server, and tests

pub mod admission;
pub mod catalog;
pub mod compare;
pub mod conversation;
pub mod engine;
pub mod extract;
pub mod format;
pub mod intent;
pub mod query;

// Re-export commonly used types
pub use admission::{AdmissionAssessment, AdmissionScorer, Band, ScoreError};
pub use catalog::{
    normalize_name, validate_record, AdmissionRequirements, CampusLife, CatalogStatistics,
    CatalogStore, Contact, InsertError, InstitutionRecord, Programs, Tuition, ValidationError,
};
pub use compare::{CompareError, ComparisonEngine, ComparisonResult};
pub use conversation::{ConversationStore, ConversationTurn, Role};
pub use engine::{Engine, Reply};
pub use extract::{EntityExtractor, INSTITUTION_ALIASES, LOCATION_KEYWORDS, PROGRAM_KEYWORDS};
pub use intent::{Intent, IntentClassifier};
pub use query::{QueryCriteria, QueryEngine};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
