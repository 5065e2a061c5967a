//! Category catalog used by the classifier.
//!
//! # Responsibility
//! - Hold category rules (name, keyword set, weight) in declaration order.
//! - Provide the built-in reference table and a JSON loader for custom
//!   tables.
//!
//! # Invariants
//! - Rule order is declaration order and drives score tie-breaks.
//! - Category names are unique; weights are finite and non-negative.
//! - Keywords are stored lowercase.

use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

const REFERENCE_TABLE: &[(&str, &[&str])] = &[
    (
        "work",
        &[
            "work",
            "job",
            "office",
            "meeting",
            "project",
            "deadline",
            "client",
            "business",
            "team",
            "career",
            "professional",
        ],
    ),
    (
        "personal",
        &[
            "personal",
            "family",
            "friend",
            "home",
            "house",
            "life",
            "relationship",
            "self",
            "private",
        ],
    ),
    (
        "health",
        &[
            "health", "exercise", "gym", "doctor", "medical", "fitness", "diet", "wellness",
            "mental", "physical", "sleep",
        ],
    ),
    (
        "shopping",
        &[
            "buy", "shopping", "purchase", "store", "market", "shop", "order", "groceries",
            "retail",
        ],
    ),
    (
        "learning",
        &[
            "learn",
            "study",
            "read",
            "course",
            "education",
            "skill",
            "knowledge",
            "research",
            "practice",
            "training",
        ],
    ),
    (
        "finance",
        &[
            "money",
            "bill",
            "pay",
            "bank",
            "finance",
            "budget",
            "investment",
            "saving",
            "debt",
            "expense",
        ],
    ),
    (
        "travel",
        &[
            "travel",
            "trip",
            "vacation",
            "flight",
            "hotel",
            "destination",
            "journey",
            "tour",
        ],
    ),
    (
        "hobby",
        &[
            "hobby", "craft", "art", "music", "game", "sport", "activity", "interest", "pastime",
        ],
    ),
    (
        "maintenance",
        &[
            "fix", "repair", "maintain", "clean", "organize", "setup", "install", "update",
            "improve",
        ],
    ),
    (
        "social",
        &[
            "party",
            "event",
            "gathering",
            "meet",
            "social",
            "network",
            "community",
            "group",
        ],
    ),
];

const REFERENCE_WEIGHT: f64 = 1.0;

/// Errors raised while building a catalog from external data.
#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// A catalog needs at least one category.
    Empty,
    DuplicateName(String),
    InvalidWeight { name: String, weight: f64 },
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read category catalog: {err}"),
            Self::Parse(err) => write!(f, "invalid category catalog json: {err}"),
            Self::Empty => write!(f, "category catalog has no categories"),
            Self::DuplicateName(name) => write!(f, "duplicate category `{name}` in catalog"),
            Self::InvalidWeight { name, weight } => write!(
                f,
                "category `{name}` has invalid weight {weight}; expected a finite value >= 0"
            ),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// One scoring rule: a category name, its keyword set and weight.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRule {
    name: String,
    keywords: BTreeSet<String>,
    weight: f64,
}

impl CategoryRule {
    pub fn new<I, S>(name: impl Into<String>, keywords: I, weight: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.into(),
            keywords: keywords
                .into_iter()
                .map(|keyword| keyword.as_ref().to_lowercase())
                .collect(),
            weight,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// Returns whether a lowercase keyword belongs to this category.
    pub fn matches(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }
}

/// Ordered, immutable set of category rules.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCatalog {
    rules: Vec<CategoryRule>,
}

#[derive(Deserialize)]
struct CategoryRuleWire {
    name: String,
    keywords: Vec<String>,
    #[serde(default = "default_weight")]
    weight: f64,
}

fn default_weight() -> f64 {
    REFERENCE_WEIGHT
}

impl CategoryCatalog {
    /// Builds a catalog, keeping rule order as given.
    ///
    /// # Errors
    /// - `Empty` for no rules.
    /// - `DuplicateName` when two rules share a name.
    /// - `InvalidWeight` for negative or non-finite weights.
    pub fn new(rules: Vec<CategoryRule>) -> Result<Self, CatalogError> {
        if rules.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.name.as_str()) {
                return Err(CatalogError::DuplicateName(rule.name.clone()));
            }
            if !rule.weight.is_finite() || rule.weight < 0.0 {
                return Err(CatalogError::InvalidWeight {
                    name: rule.name.clone(),
                    weight: rule.weight,
                });
            }
        }

        Ok(Self { rules })
    }

    /// Built-in ten-category table, all weights 1.0.
    pub fn reference() -> Self {
        let rules = REFERENCE_TABLE
            .iter()
            .map(|(name, keywords)| CategoryRule::new(*name, keywords.iter(), REFERENCE_WEIGHT))
            .collect();
        Self { rules }
    }

    /// Parses a JSON array of `{ "name", "keywords", "weight"? }` objects.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let wire: Vec<CategoryRuleWire> = serde_json::from_str(json)?;
        let rules = wire
            .into_iter()
            .map(|rule| CategoryRule::new(rule.name, rule.keywords, rule.weight))
            .collect();
        Self::new(rules)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.iter().any(|rule| rule.name == name)
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryCatalog, REFERENCE_TABLE};

    #[test]
    fn reference_keywords_are_lowercase_and_unique_per_rule() {
        for (name, keywords) in REFERENCE_TABLE {
            let mut sorted = keywords.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), keywords.len(), "duplicate keyword in `{name}`");
            assert!(keywords.iter().all(|k| k.chars().all(|c| c.is_ascii_lowercase())));
        }
    }

    #[test]
    fn reference_catalog_passes_constructor_checks() {
        let reference = CategoryCatalog::reference();
        let rebuilt = CategoryCatalog::new(reference.rules().to_vec()).unwrap();
        assert_eq!(rebuilt, reference);
    }
}
