// 🔍 Entity Extraction - Ordered vocabularies, first hit wins
// Scans raw user text for institution aliases, program keywords, and
// location keywords. No tokenization: plain case-insensitive substring
// matching against fixed vocabularies whose order is part of the contract.

/// Institution aliases scanned against user text, with the canonical key
/// each resolves to. List position breaks ties, not match length - the
/// first alias found as a substring wins.
pub const INSTITUTION_ALIASES: &[(&str, &str)] = &[
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
    ("johns", "jhu"),
    ("cornell", "cornell"),
    ("rice", "rice"),
    ("vanderbilt", "vanderbilt"),
];

/// Program-of-study keywords, scan order fixed.
pub const PROGRAM_KEYWORDS: &[&str] = &[
    "computer science",
    "engineering",
    "business",
    "medicine",
    "law",
    "art",
    "music",
    "biology",
    "chemistry",
    "physics",
    "mathematics",
    "economics",
    "psychology",
    "history",
    "english",
];

/// State and city keywords, scan order fixed.
pub const LOCATION_KEYWORDS: &[&str] = &[
    "california",
    "massachusetts",
    "connecticut",
    "new jersey",
    "pasadena",
    "cambridge",
    "stanford",
    "berkeley",
    "new haven",
    "princeton",
];

/// Extracts institutions, programs, and locations from free text.
/// Never fails: unmatched text yields `None`, not an error.
pub struct EntityExtractor {
    institutions: &'static [(&'static str, &'static str)],
    programs: &'static [&'static str],
    locations: &'static [&'static str],
}

impl EntityExtractor {
    pub fn new() -> Self {
        EntityExtractor {
            institutions: INSTITUTION_ALIASES,
            programs: PROGRAM_KEYWORDS,
            locations: LOCATION_KEYWORDS,
        }
    }

    /// Canonical key of the first institution alias found in the text.
    pub fn extract_institution(&self, text: &str) -> Option<&'static str> {
        let lowered = text.to_lowercase();
        self.institutions
            .iter()
            .find(|(alias, _)| lowered.contains(alias))
            .map(|(_, key)| *key)
    }

    /// Every institution alias found in the text, as canonical keys in
    /// vocabulary order with duplicates suppressed. Used by comparison,
    /// which needs all named institutions, not just the first.
    pub fn extract_all_institutions(&self, text: &str) -> Vec<&'static str> {
        let lowered = text.to_lowercase();
        let mut keys: Vec<&'static str> = Vec::new();
        for &(alias, key) in self.institutions {
            if lowered.contains(alias) && !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }

    /// First program keyword found in the text.
    pub fn extract_program(&self, text: &str) -> Option<&'static str> {
        let lowered = text.to_lowercase();
        self.programs
            .iter()
            .find(|keyword| lowered.contains(*keyword))
            .copied()
    }

    /// First location keyword found in the text.
    pub fn extract_location(&self, text: &str) -> Option<&'static str> {
        let lowered = text.to_lowercase();
        self.locations
            .iter()
            .find(|keyword| lowered.contains(*keyword))
            .copied()
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_institution_first_hit() {
        let extractor = EntityExtractor::new();

        assert_eq!(
            extractor.extract_institution("Tell me about Stanford"),
            Some("stanford")
        );
        assert_eq!(extractor.extract_institution("TELL ME ABOUT MIT"), Some("mit"));
    }

    #[test]
    fn test_extract_institution_ties_break_by_list_position() {
        let extractor = EntityExtractor::new();

        // "stanford" appears first in the text, but "harvard" comes first
        // in the vocabulary.
        assert_eq!(
            extractor.extract_institution("is stanford better than harvard"),
            Some("harvard")
        );
    }

    #[test]
    fn test_extract_institution_resolves_nicknames() {
        let extractor = EntityExtractor::new();

        assert_eq!(extractor.extract_institution("what about penn"), Some("upenn"));
        assert_eq!(
            extractor.extract_institution("johns hopkins admission"),
            Some("jhu")
        );
    }

    #[test]
    fn test_extract_institution_none_when_unmatched() {
        let extractor = EntityExtractor::new();
        assert_eq!(extractor.extract_institution("best pizza in town"), None);
    }

    #[test]
    fn test_extract_all_institutions_preserves_order() {
        let extractor = EntityExtractor::new();

        assert_eq!(
            extractor.extract_all_institutions("compare mit and harvard and yale"),
            vec!["harvard", "mit", "yale"]
        );
    }

    #[test]
    fn test_extract_all_institutions_suppresses_duplicate_keys() {
        let extractor = EntityExtractor::new();

        // "upenn" and "penn" both resolve to upenn.
        assert_eq!(
            extractor.extract_all_institutions("upenn vs penn"),
            vec!["upenn"]
        );
    }

    #[test]
    fn test_extract_program() {
        let extractor = EntityExtractor::new();

        assert_eq!(
            extractor.extract_program("I want to study Computer Science"),
            Some("computer science")
        );
        assert_eq!(extractor.extract_program("any engineering schools?"), Some("engineering"));
        assert_eq!(extractor.extract_program("hello there"), None);
    }

    #[test]
    fn test_extract_location() {
        let extractor = EntityExtractor::new();

        assert_eq!(
            extractor.extract_location("colleges in California"),
            Some("california")
        );
        assert_eq!(extractor.extract_location("schools near New Haven"), Some("new haven"));
        assert_eq!(extractor.extract_location("hello there"), None);
    }
}
