// 🔎 Catalog Queries - Program, location, and criteria filtering
// Transient, read-only views over the catalog. Program and location
// searches keep catalog definition order; criteria searches sort by
// ranking.

use crate::catalog::{CatalogStore, InstitutionRecord};
use serde::{Deserialize, Serialize};

/// Filter bounds for a criteria search. Unset fields impose no constraint;
/// set fields are conjunctive.
///
/// Ranking bounds: `min_ranking` excludes records whose ranking is
/// numerically *greater* than the bound, and `max_ranking` excludes records
/// whose ranking is numerically *smaller* - "min"/"max" name the extremes of
/// the requested range, not a floor and a ceiling. Acceptance-rate bounds
/// are a conventional floor/ceiling pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_ranking: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ranking: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_acceptance_rate: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_acceptance_rate: Option<f64>,

    /// Case-insensitive substring of the location field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Case-insensitive substring of the category field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl QueryCriteria {
    fn matches(&self, record: &InstitutionRecord) -> bool {
        if let Some(min) = self.min_ranking {
            if record.ranking > min {
                return false;
            }
        }
        if let Some(max) = self.max_ranking {
            if record.ranking < max {
                return false;
            }
        }

        if let Some(min) = self.min_acceptance_rate {
            if record.acceptance_rate < min {
                return false;
            }
        }
        if let Some(max) = self.max_acceptance_rate {
            if record.acceptance_rate > max {
                return false;
            }
        }

        if let Some(location) = &self.location {
            if !record
                .location
                .to_lowercase()
                .contains(&location.to_lowercase())
            {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if !record
                .category
                .to_lowercase()
                .contains(&category.to_lowercase())
            {
                return false;
            }
        }

        true
    }
}

/// Read-only query surface over a catalog.
pub struct QueryEngine<'a> {
    catalog: &'a CatalogStore,
}

impl<'a> QueryEngine<'a> {
    pub fn new(catalog: &'a CatalogStore) -> Self {
        QueryEngine { catalog }
    }

    /// Records offering a program whose name contains the keyword
    /// (case-insensitive), in either the undergraduate or graduate list.
    /// Each record appears at most once, in catalog order.
    pub fn search_by_program(&self, keyword: &str) -> Vec<InstitutionRecord> {
        let needle = keyword.to_lowercase();
        self.catalog
            .all()
            .into_iter()
            .filter(|record| {
                record
                    .programs
                    .undergraduate
                    .iter()
                    .chain(record.programs.graduate.iter())
                    .any(|program| program.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Records whose location contains the keyword (case-insensitive), in
    /// catalog order.
    pub fn search_by_location(&self, keyword: &str) -> Vec<InstitutionRecord> {
        let needle = keyword.to_lowercase();
        self.catalog
            .all()
            .into_iter()
            .filter(|record| record.location.to_lowercase().contains(&needle))
            .collect()
    }

    /// Records satisfying every specified bound, sorted ascending by
    /// ranking.
    pub fn search_by_criteria(&self, criteria: &QueryCriteria) -> Vec<InstitutionRecord> {
        let mut results: Vec<InstitutionRecord> = self
            .catalog
            .all()
            .into_iter()
            .filter(|record| criteria.matches(record))
            .collect();

        results.sort_by_key(|record| record.ranking);
        results
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(records: &[InstitutionRecord]) -> Vec<&str> {
        records.iter().map(|r| r.key.as_str()).collect()
    }

    #[test]
    fn test_search_by_program_case_insensitive() {
        let store = CatalogStore::with_defaults();
        let engine = QueryEngine::new(&store);

        let lower = engine.search_by_program("computer science");
        let upper = engine.search_by_program("COMPUTER SCIENCE");

        assert_eq!(lower.len(), 15);
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_search_by_program_no_duplicates_across_levels() {
        let store = CatalogStore::with_defaults();
        let engine = QueryEngine::new(&store);

        // "engineering" matches MIT in both program lists.
        let results = engine.search_by_program("engineering");
        let mit_hits = results.iter().filter(|r| r.key == "mit").count();
        assert_eq!(mit_hits, 1);
    }

    #[test]
    fn test_search_by_program_graduate_only_match() {
        let store = CatalogStore::with_defaults();
        let engine = QueryEngine::new(&store);

        // "veterinary" appears only in graduate lists (upenn, cornell).
        let results = engine.search_by_program("veterinary");
        assert_eq!(keys(&results), vec!["upenn", "cornell"]);
    }

    #[test]
    fn test_search_by_location_california() {
        let store = CatalogStore::with_defaults();
        let engine = QueryEngine::new(&store);

        let results = engine.search_by_location("california");
        assert_eq!(keys(&results), vec!["stanford", "berkeley", "caltech"]);
    }

    #[test]
    fn test_search_by_location_unmatched_is_empty() {
        let store = CatalogStore::with_defaults();
        let engine = QueryEngine::new(&store);
        assert!(engine.search_by_location("alaska").is_empty());
    }

    #[test]
    fn test_criteria_unspecified_matches_everything() {
        let store = CatalogStore::with_defaults();
        let engine = QueryEngine::new(&store);

        let results = engine.search_by_criteria(&QueryCriteria::default());
        assert_eq!(results.len(), 15);
        assert_eq!(results[0].ranking, 1);
        assert_eq!(results[14].ranking, 15);
    }

    #[test]
    fn test_criteria_min_ranking_excludes_numerically_larger() {
        let store = CatalogStore::with_defaults();
        let engine = QueryEngine::new(&store);

        let criteria = QueryCriteria {
            min_ranking: Some(5),
            ..Default::default()
        };
        let results = engine.search_by_criteria(&criteria);

        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| r.ranking <= 5));
    }

    #[test]
    fn test_criteria_max_ranking_excludes_numerically_smaller() {
        let store = CatalogStore::with_defaults();
        let engine = QueryEngine::new(&store);

        let criteria = QueryCriteria {
            max_ranking: Some(10),
            ..Default::default()
        };
        let results = engine.search_by_criteria(&criteria);

        assert_eq!(results.len(), 6);
        assert!(results.iter().all(|r| r.ranking >= 10));
    }

    #[test]
    fn test_criteria_acceptance_rate_bounds_are_conventional() {
        let store = CatalogStore::with_defaults();
        let engine = QueryEngine::new(&store);

        let criteria = QueryCriteria {
            min_acceptance_rate: Some(10.0),
            ..Default::default()
        };
        let results = engine.search_by_criteria(&criteria);

        assert_eq!(keys(&results), vec!["berkeley", "jhu", "cornell", "rice", "vanderbilt"]);
        assert!(results.iter().all(|r| r.acceptance_rate >= 10.0));
    }

    #[test]
    fn test_criteria_bounds_are_conjunctive() {
        let store = CatalogStore::with_defaults();
        let engine = QueryEngine::new(&store);

        let criteria = QueryCriteria {
            min_ranking: Some(10),
            category: Some("private".to_string()),
            ..Default::default()
        };
        let results = engine.search_by_criteria(&criteria);

        // Ranks 1-10 minus the one public institution.
        assert_eq!(results.len(), 9);
        assert!(results.iter().all(|r| r.key != "berkeley"));
    }

    #[test]
    fn test_criteria_location_substring() {
        let store = CatalogStore::with_defaults();
        let engine = QueryEngine::new(&store);

        let criteria = QueryCriteria {
            location: Some("Texas".to_string()),
            ..Default::default()
        };
        let results = engine.search_by_criteria(&criteria);
        assert_eq!(keys(&results), vec!["rice"]);
    }
}
