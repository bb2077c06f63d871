// 🏷️ Intent Classification - Rules as data
// An ordered table of (keyword set, intent) pairs evaluated top to bottom
// against the lowercased input. Rules overlap; evaluation order is the
// tie-breaker and is part of the contract.

use crate::extract::INSTITUTION_ALIASES;

/// The classified purpose of a user utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Farewell,
    Help,
    CatalogListing,
    Comparison,
    Institution,
    Program,
    Admission,
    Financial,
    Location,
    Time,
    Date,
    Question,
    Fallback,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Farewell => "farewell",
            Intent::Help => "help",
            Intent::CatalogListing => "catalog-listing",
            Intent::Comparison => "comparison-query",
            Intent::Institution => "institution-query",
            Intent::Program => "program-query",
            Intent::Admission => "admission-query",
            Intent::Financial => "financial-query",
            Intent::Location => "location-query",
            Intent::Time => "time",
            Intent::Date => "date",
            Intent::Question => "question",
            Intent::Fallback => "default",
        }
    }
}

/// One classification rule: any keyword found as a substring fires the rule.
struct IntentRule {
    keywords: Vec<&'static str>,
    intent: Intent,
}

/// Single-pass, first-match classifier. Never fails: input that fires no
/// rule degrades to the question/default fallbacks.
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
}

impl IntentClassifier {
    /// Build the rule table. Comparison is ordered ahead of the institution
    /// rule so that "compare harvard and mit" classifies as a comparison
    /// even though institution aliases are present.
    pub fn new() -> Self {
        let institution_keywords: Vec<&'static str> =
            INSTITUTION_ALIASES.iter().map(|(alias, _)| *alias).collect();

        let rules = vec![
            IntentRule {
                keywords: vec!["hi", "hello", "hey", "good morning", "good afternoon", "good evening"],
                intent: Intent::Greeting,
            },
            IntentRule {
                keywords: vec!["bye", "goodbye", "see you", "farewell", "later"],
                intent: Intent::Farewell,
            },
            IntentRule {
                keywords: vec!["help", "what can you do", "assist", "support"],
                intent: Intent::Help,
            },
            IntentRule {
                keywords: vec!["colleges", "universities", "list", "show me colleges", "what colleges"],
                intent: Intent::CatalogListing,
            },
            IntentRule {
                keywords: vec!["compare", "comparison", "vs", "versus", "difference"],
                intent: Intent::Comparison,
            },
            IntentRule {
                keywords: institution_keywords,
                intent: Intent::Institution,
            },
            IntentRule {
                keywords: vec!["program", "major", "study", "degree", "course"],
                intent: Intent::Program,
            },
            IntentRule {
                keywords: vec!["admission", "requirements", "gpa", "sat", "act", "acceptance"],
                intent: Intent::Admission,
            },
            IntentRule {
                keywords: vec!["tuition", "cost", "price", "fee", "financial", "money"],
                intent: Intent::Financial,
            },
            IntentRule {
                keywords: vec!["location", "where", "city", "state", "address"],
                intent: Intent::Location,
            },
            IntentRule {
                keywords: vec!["time", "what time", "clock"],
                intent: Intent::Time,
            },
            IntentRule {
                keywords: vec!["date", "today", "what day"],
                intent: Intent::Date,
            },
        ];

        IntentClassifier { rules }
    }

    /// Classify an utterance. The first rule with any keyword present in
    /// the lowercased, trimmed input wins; otherwise a question mark falls
    /// through to `Question` and everything else to `Fallback`.
    pub fn classify(&self, text: &str) -> Intent {
        let lowered = text.to_lowercase().trim().to_string();

        for rule in &self.rules {
            if rule.keywords.iter().any(|keyword| lowered.contains(keyword)) {
                return rule.intent;
            }
        }

        if lowered.contains('?') {
            Intent::Question
        } else {
            Intent::Fallback
        }
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
