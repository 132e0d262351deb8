use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet},
};

use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::domain::allergen::entities::RiskLevel;

/// Allergens that escalate a single match straight to HIGH.
pub const DEFAULT_CRITICAL_ALLERGENS: &[&str] = &["peanut", "shellfish", "tree nut"];

/// Known aliases, keyed by the normalised allergen term.
const DEFAULT_SYNONYMS: &[(&str, &[&str])] = &[
    (
        "milk",
        &[
            "dairy",
            "cream",
            "cheese",
            "butter",
            "buttermilk",
            "yogurt",
            "yoghurt",
            "whey",
            "casein",
            "lactose",
            "ghee",
            "mozzarella",
            "parmesan",
        ],
    ),
    (
        "dairy",
        &[
            "milk",
            "cream",
            "cheese",
            "butter",
            "buttermilk",
            "yogurt",
            "yoghurt",
            "whey",
            "casein",
            "lactose",
            "ghee",
        ],
    ),
    ("egg", &["albumin", "mayonnaise", "meringue"]),
    (
        "wheat",
        &["semolina", "durum", "spelt", "couscous", "bulgur", "crouton"],
    ),
    (
        "gluten",
        &[
            "wheat", "barley", "rye", "semolina", "durum", "spelt", "couscous", "crouton",
        ],
    ),
    ("peanut", &["groundnut", "arachis"]),
    (
        "tree nut",
        &[
            "almond",
            "cashew",
            "walnut",
            "pecan",
            "hazelnut",
            "pistachio",
            "macadamia",
            "brazil nut",
        ],
    ),
    (
        "soy",
        &["soya", "soybean", "tofu", "edamame", "tempeh", "miso"],
    ),
    (
        "fish",
        &[
            "anchovy",
            "anchovies",
            "salmon",
            "tuna",
            "cod",
            "sardine",
            "mackerel",
            "tilapia",
        ],
    ),
    (
        "shellfish",
        &[
            "shrimp", "prawn", "crab", "lobster", "crayfish", "oyster", "mussel", "clam",
            "scallop",
        ],
    ),
    ("sesame", &["tahini"]),
    ("corn", &["maize", "cornmeal", "cornstarch", "polenta"]),
    ("snail", &["escargot"]),
    ("melon seed", &["agushi", "egusi"]),
    ("agushi", &["egusi", "melon seed"]),
];

const PLANT_BASED_DAIRY_LOOKALIKES: &[&str] = &[
    "peanut butter",
    "nut butter",
    "almond butter",
    "cashew butter",
    "apple butter",
    "cocoa butter",
    "cacao butter",
    "shea butter",
    "coconut milk",
    "coconut cream",
    "almond milk",
    "oat milk",
    "soy milk",
    "rice milk",
    "cream of tartar",
];

/// Compound names that contain a synonym but not the allergen. Matched
/// phrases are blanked out before the allergen's own terms are searched.
const DEFAULT_EXCLUSIONS: &[(&str, &[&str])] = &[
    ("milk", PLANT_BASED_DAIRY_LOOKALIKES),
    ("dairy", PLANT_BASED_DAIRY_LOOKALIKES),
];

pub fn default_synonyms() -> BTreeMap<String, Vec<String>> {
    DEFAULT_SYNONYMS
        .iter()
        .map(|(term, aliases)| {
            (
                term.to_string(),
                aliases.iter().map(|a| a.to_string()).collect(),
            )
        })
        .collect()
}

/// Deterministic allergen matching and severity rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllergenPolicy {
    synonyms: BTreeMap<String, Vec<String>>,
    exclusions: BTreeMap<String, Vec<String>>,
    critical: BTreeSet<String>,
}

impl Default for AllergenPolicy {
    fn default() -> Self {
        Self::new(default_synonyms(), DEFAULT_CRITICAL_ALLERGENS.iter().copied())
    }
}

impl AllergenPolicy {
    pub fn new<I, S>(synonyms: BTreeMap<String, Vec<String>>, critical: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let synonyms = synonyms
            .into_iter()
            .map(|(term, aliases)| {
                let aliases = aliases
                    .iter()
                    .map(|alias| normalize_term(alias))
                    .filter(|alias| !alias.is_empty())
                    .collect::<Vec<_>>();
                (normalize_term(&term), aliases)
            })
            .filter(|(term, _)| !term.is_empty())
            .collect();

        let critical = critical
            .into_iter()
            .map(|c| normalize_term(c.as_ref()))
            .filter(|c| !c.is_empty())
            .collect();

        let exclusions = DEFAULT_EXCLUSIONS
            .iter()
            .map(|(term, phrases)| {
                (
                    term.to_string(),
                    phrases.iter().map(|p| normalize_term(p)).collect(),
                )
            })
            .collect();

        Self {
            synonyms,
            exclusions,
            critical,
        }
    }

    /// Default synonym table with a custom critical list.
    pub fn with_critical_allergens<I, S>(critical: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(default_synonyms(), critical)
    }

    pub fn synonyms(&self) -> &BTreeMap<String, Vec<String>> {
        &self.synonyms
    }

    pub fn critical_allergens(&self) -> impl Iterator<Item = &str> {
        self.critical.iter().map(String::as_str)
    }

    pub fn is_critical(&self, allergen: &str) -> bool {
        base_terms(allergen)
            .iter()
            .any(|term| self.critical.contains(term))
    }

    /// Base terms of the label followed by their synonyms, without duplicates.
    pub fn search_terms(&self, allergen: &str) -> Vec<String> {
        let base = base_terms(allergen);
        let mut terms = base.clone();

        for term in &base {
            if let Some(aliases) = self.synonyms.get(term) {
                for alias in aliases {
                    push_unique(&mut terms, alias.clone());
                }
            }
        }

        terms
    }

    pub fn matcher(&self, allergen: &str) -> AllergenMatcher {
        let terms = self.search_terms(allergen);

        let mut excluded: Vec<String> = Vec::new();
        for term in base_terms(allergen) {
            if let Some(phrases) = self.exclusions.get(&term) {
                for phrase in phrases {
                    push_unique(&mut excluded, phrase.clone());
                }
            }
        }

        AllergenMatcher {
            allergen: allergen.to_string(),
            pattern: compile_alternation(allergen, &terms),
            exclusion: compile_alternation(allergen, &excluded),
            terms,
        }
    }

    /// HIGH for two or more distinct allergens or a single critical one,
    /// MODERATE for a single non-critical one, SAFE otherwise.
    pub fn risk_level(&self, detected: &[String]) -> RiskLevel {
        let distinct: BTreeSet<&str> = detected.iter().map(String::as_str).collect();

        match distinct.len() {
            0 => RiskLevel::Safe,
            1 if !distinct.iter().any(|a| self.is_critical(a)) => RiskLevel::Moderate,
            _ => RiskLevel::High,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AllergenMatcher {
    allergen: String,
    terms: Vec<String>,
    pattern: Option<Regex>,
    exclusion: Option<Regex>,
}

impl AllergenMatcher {
    pub fn allergen(&self) -> &str {
        &self.allergen
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn matches(&self, text: &str) -> bool {
        if self.terms.is_empty() {
            return false;
        }

        let text = match &self.exclusion {
            Some(exclusion) => exclusion.replace_all(text, " "),
            None => Cow::Borrowed(text),
        };

        match &self.pattern {
            Some(pattern) => pattern.is_match(&text),
            None => {
                let lower = text.to_lowercase();
                self.terms.iter().any(|term| lower.contains(term.as_str()))
            }
        }
    }
}

/// `"Milk (Dairy)"` becomes `["milk", "dairy"]`.
pub fn base_terms(label: &str) -> Vec<String> {
    let mut terms = Vec::new();

    let (main, qualifier) = match label.split_once('(') {
        Some((main, rest)) => (main, rest.split(')').next()),
        None => (label, None),
    };

    push_unique(&mut terms, normalize_term(main));

    if let Some(qualifier) = qualifier {
        for part in qualifier.split([',', '/']) {
            push_unique(&mut terms, normalize_term(part));
        }
    }

    terms
}

/// Lower-cases, collapses whitespace and drops a trailing plural `s`.
pub fn normalize_term(raw: &str) -> String {
    let collapsed = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    if collapsed.len() > 3 && collapsed.ends_with('s') && !collapsed.ends_with("ss") {
        collapsed[..collapsed.len() - 1].to_string()
    } else {
        collapsed
    }
}

/// `None` when there are no terms or the pattern fails to build.
fn compile_alternation(allergen: &str, terms: &[String]) -> Option<Regex> {
    if terms.is_empty() {
        return None;
    }

    let alternation = terms
        .iter()
        .map(|term| term_pattern(term))
        .collect::<Vec<_>>()
        .join("|");

    RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .build()
        .map_err(|e| {
            warn!(allergen, error = %e, "falling back to substring matching");
        })
        .ok()
}

fn term_pattern(term: &str) -> String {
    let words = term
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");

    format!(r"\b{words}(?:e?s)?\b")
}

fn push_unique(terms: &mut Vec<String>, term: String) {
    if !term.is_empty() && !terms.contains(&term) {
        terms.push(term);
    }
}
