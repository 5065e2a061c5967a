//! Category suggestion from task text.
//!
//! # Responsibility
//! - Score catalog categories by keyword hits across title, description
//!   and context.
//! - Synthesize a label when no catalog category matches.
//!
//! # Invariants
//! - Pure: output depends only on the three inputs and the catalog.
//! - Equal top scores resolve to the earliest declared category.
//! - The returned label is never empty.

use super::catalog::CategoryCatalog;
use super::keywords::extract_keywords;
use log::debug;
use std::collections::HashMap;

const TITLE_PLACEHOLDER: &str = "Task";

/// Where a suggested label came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionSource {
    /// Best-scoring catalog category.
    Catalog,
    /// Synthesized from the most frequent keyword.
    FrequentKeyword,
    /// Synthesized from the first title word (or the placeholder).
    TitleWord,
}

impl SuggestionSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::FrequentKeyword => "frequent_keyword",
            Self::TitleWord => "title_word",
        }
    }
}

/// Score of one catalog category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    pub category: String,
    pub score: f64,
}

/// Full classifier output, including per-category scores.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub label: String,
    pub source: SuggestionSource,
    /// One entry per catalog category, in declaration order.
    pub scores: Vec<CategoryScore>,
    pub keywords: Vec<String>,
}

/// Keyword-frequency classifier over a category catalog.
#[derive(Debug, Clone, Default)]
pub struct CategoryClassifier {
    catalog: CategoryCatalog,
}

impl CategoryClassifier {
    pub fn new(catalog: CategoryCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    /// Returns the suggested category label.
    pub fn suggest(&self, title: &str, description: &str, context: &str) -> String {
        self.suggest_detailed(title, description, context).label
    }

    /// Returns the suggested label together with scoring evidence.
    pub fn suggest_detailed(&self, title: &str, description: &str, context: &str) -> Suggestion {
        let combined = format!("{title} {description} {context}").to_lowercase();
        let keywords = extract_keywords(&combined);
        let scores = self.score(&keywords);

        let (label, source) = match best_category(&scores) {
            Some(best) => (best.category.clone(), SuggestionSource::Catalog),
            None => match most_frequent(&keywords) {
                Some(keyword) => (pluralize_label(keyword), SuggestionSource::FrequentKeyword),
                None => (title_label(title), SuggestionSource::TitleWord),
            },
        };

        debug!(
            "event=category_suggest module=classify status=ok source={} keyword_count={}",
            source.as_str(),
            keywords.len()
        );

        Suggestion {
            label,
            source,
            scores,
            keywords,
        }
    }

    /// Scores every category: weight times the number of matching keywords,
    /// counting repeats.
    pub fn score(&self, keywords: &[String]) -> Vec<CategoryScore> {
        self.catalog
            .rules()
            .iter()
            .map(|rule| {
                let hits = keywords
                    .iter()
                    .filter(|keyword| rule.matches(keyword))
                    .count();
                CategoryScore {
                    category: rule.name().to_string(),
                    score: rule.weight() * hits as f64,
                }
            })
            .collect()
    }
}

/// Suggests a category using the built-in reference catalog.
pub fn suggest_category(title: &str, description: &str, context: &str) -> String {
    CategoryClassifier::default().suggest(title, description, context)
}

/// First entry with the highest strictly positive score.
fn best_category(scores: &[CategoryScore]) -> Option<&CategoryScore> {
    let mut best: Option<&CategoryScore> = None;
    for entry in scores {
        // strict `>` keeps the earlier declaration on ties
        if entry.score > best.map_or(0.0, |current| current.score) {
            best = Some(entry);
        }
    }
    best
}

/// Most frequent keyword; ties go to the one seen first.
fn most_frequent(keywords: &[String]) -> Option<&str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for keyword in keywords {
        *counts.entry(keyword.as_str()).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for keyword in keywords {
        let count = counts[keyword.as_str()];
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((keyword.as_str(), count));
        }
    }
    best.map(|(keyword, _)| keyword)
}

fn title_label(title: &str) -> String {
    let word = title.split_whitespace().next().unwrap_or(TITLE_PLACEHOLDER);
    pluralize_label(word)
}

/// Capitalizes `word` and appends `s` unless it already ends with one.
fn pluralize_label(word: &str) -> String {
    let mut label = capitalize(word);
    if !label.ends_with('s') {
        label.push('s');
    }
    label
}

/// Title-cases the first character and lowercases the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut label = title_case(first);
    label.extend(chars.flat_map(char::to_lowercase));
    label
}

/// Title case of `c`. Only differs from uppercase for the sharp s, the
/// Latin digraphs and the Latin ligatures; other scripts fall back to
/// `char::to_uppercase`.
fn title_case(c: char) -> String {
    let mapped = match c {
        'ß' => "Ss",
        'Ǆ' | 'ǅ' | 'ǆ' => "ǅ",
        'Ǉ' | 'ǈ' | 'ǉ' => "ǈ",
        'Ǌ' | 'ǋ' | 'ǌ' => "ǋ",
        'Ǳ' | 'ǲ' | 'ǳ' => "ǲ",
        'ﬀ' => "Ff",
        'ﬁ' => "Fi",
        'ﬂ' => "Fl",
        'ﬃ' => "Ffi",
        'ﬄ' => "Ffl",
        'ﬅ' | 'ﬆ' => "St",
        _ => return c.to_uppercase().collect(),
    };
    mapped.to_string()
}
