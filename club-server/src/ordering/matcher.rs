//! Pizza name matcher
//!
//! Members type pizza names freehand ("Margherita Pizza", "margherita",
//! "MARGHERITA"); the catalog stores canonical names. Resolution runs an
//! explicit ordered list of strategies (exact, containment, first word)
//! and a strategy only wins when it produces exactly one active match.
//! Nothing ever guesses: an ambiguous or empty result falls through to the
//! next tier, and exhausting all tiers reports the attempted term plus the
//! available names so near-misses stay diagnosable.

use shared::models::Pizza;

/// Which matching tier produced the hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Case-insensitive equality with the canonical name
    Exact,
    /// Whole-string containment, either direction
    Contains,
    /// First word of query vs first word of name
    FirstWord,
}

impl MatchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Contains => "contains",
            Self::FirstWord => "first_word",
        }
    }
}

/// Result of a catalog resolution attempt
#[derive(Debug, Clone)]
pub enum MatchOutcome {
    /// Exactly one active pizza matched at the given tier
    Matched {
        strategy: MatchStrategy,
        pizza: Pizza,
    },
    /// No tier produced exactly one match
    NoMatch {
        /// The normalized term that was searched
        term: String,
        /// Canonical names of the active catalog, for the error message
        available: Vec<String>,
    },
}

/// Normalize a raw query: trim whitespace and strip one trailing "pizza"
/// word case-insensitively ("Margherita Pizza" → "Margherita"). A query
/// that is nothing but "pizza" is kept as-is.
pub fn normalize_query(raw: &str) -> String {
    let trimmed = raw.trim();
    let n = trimmed.len();
    if n > 5
        && trimmed.is_char_boundary(n - 5)
        && trimmed[n - 5..].eq_ignore_ascii_case("pizza")
    {
        let head = trimmed[..n - 5].trim_end();
        if !head.is_empty() {
            return head.to_string();
        }
    }
    trimmed.to_string()
}

/// Resolve `raw_query` against the active catalog.
pub fn resolve_pizza(raw_query: &str, catalog: &[Pizza]) -> MatchOutcome {
    let term = normalize_query(raw_query);
    let term_lower = term.to_lowercase();

    let tiers: [(MatchStrategy, fn(&str, &str) -> bool); 3] = [
        (MatchStrategy::Exact, match_exact),
        (MatchStrategy::Contains, match_contains),
        (MatchStrategy::FirstWord, match_first_word),
    ];

    for (strategy, matches) in tiers {
        let hits: Vec<&Pizza> = catalog
            .iter()
            .filter(|p| p.is_active)
            .filter(|p| matches(&p.name.to_lowercase(), &term_lower))
            .collect();
        if let [only] = hits.as_slice() {
            return MatchOutcome::Matched {
                strategy,
                pizza: (*only).clone(),
            };
        }
    }

    MatchOutcome::NoMatch {
        term,
        available: catalog
            .iter()
            .filter(|p| p.is_active)
            .map(|p| p.name.clone())
            .collect(),
    }
}

fn match_exact(name: &str, term: &str) -> bool {
    name == term
}

fn match_contains(name: &str, term: &str) -> bool {
    !term.is_empty() && (name.contains(term) || term.contains(name))
}

fn match_first_word(name: &str, term: &str) -> bool {
    match (name.split_whitespace().next(), term.split_whitespace().next()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pizza(id: i64, name: &str, active: bool) -> Pizza {
        Pizza {
            id,
            name: name.to_string(),
            description: None,
            is_active: active,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn catalog() -> Vec<Pizza> {
        vec![
            pizza(1, "Margherita", true),
            pizza(2, "Pepperoni", true),
            pizza(3, "Quattro Formaggi", true),
            pizza(4, "Spicy Pepperoni", true),
            pizza(5, "Anchovy", false),
        ]
    }

    fn assert_matched(outcome: MatchOutcome, id: i64, strategy: MatchStrategy) {
        match outcome {
            MatchOutcome::Matched { strategy: s, pizza } => {
                assert_eq!(pizza.id, id);
                assert_eq!(s, strategy);
            }
            MatchOutcome::NoMatch { term, .. } => panic!("expected match, got NoMatch({term})"),
        }
    }

    #[test]
    fn test_normalize_strips_trailing_pizza() {
        assert_eq!(normalize_query("Margherita Pizza"), "Margherita");
        assert_eq!(normalize_query("  MARGHERITA PIZZA  "), "MARGHERITA");
        assert_eq!(normalize_query("margherita"), "margherita");
        // A query that is only "pizza" is not stripped to nothing
        assert_eq!(normalize_query("Pizza"), "Pizza");
    }

    #[test]
    fn test_exact_variants_hit_same_pizza() {
        for q in ["Margherita Pizza", "margherita", "MARGHERITA PIZZA"] {
            assert_matched(resolve_pizza(q, &catalog()), 1, MatchStrategy::Exact);
        }
    }

    #[test]
    fn test_contains_tier() {
        // "Quattro" is contained in exactly one name
        assert_matched(
            resolve_pizza("quattro", &catalog()),
            3,
            MatchStrategy::Contains,
        );
    }

    #[test]
    fn test_exact_beats_broader_tiers() {
        // "pepperoni" is a substring of two names, but exact equality with
        // the plain one resolves first
        assert_matched(
            resolve_pizza("Pepperoni", &catalog()),
            2,
            MatchStrategy::Exact,
        );
    }

    #[test]
    fn test_first_word_tier() {
        // No exact hit, containment misses both directions, first word
        // matches exactly one name
        assert_matched(
            resolve_pizza("Quattro Stagioni", &catalog()),
            3,
            MatchStrategy::FirstWord,
        );
    }

    #[test]
    fn test_inactive_pizzas_never_match() {
        let outcome = resolve_pizza("Anchovy", &catalog());
        assert!(matches!(outcome, MatchOutcome::NoMatch { .. }));
    }

    #[test]
    fn test_no_match_reports_term_and_names() {
        match resolve_pizza("Pepperonni Pizza", &catalog()) {
            MatchOutcome::NoMatch { term, available } => {
                assert_eq!(term, "Pepperonni");
                assert!(available.contains(&"Margherita".to_string()));
                assert!(available.contains(&"Pepperoni".to_string()));
                assert!(!available.contains(&"Anchovy".to_string()));
            }
            MatchOutcome::Matched { pizza, .. } => {
                panic!("misspelling must not guess, matched {}", pizza.name)
            }
        }
    }
}
