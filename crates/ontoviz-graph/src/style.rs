//! Edge style buckets.
//!
//! Edges pick a visual style by case-insensitive substring match against the
//! predicate's local name. The rule table is ordered and scanned
//! top-to-bottom; overlapping substrings must keep this priority, so it is a
//! slice rather than a map.

/// Visual style bucket for a relation edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeBucket {
    Alert,
    Affirmative,
    InfoDashed,
    Emphasis,
    Highlight,
    WarnDashed,
    Neutral,
}

/// Ordered `(predicate substring, bucket)` rules; first match wins.
pub const STYLE_RULES: &[(&str, EdgeBucket)] = &[
    ("negatively", EdgeBucket::Alert),
    ("positively", EdgeBucket::Affirmative),
    ("refines", EdgeBucket::InfoDashed),
    ("evaluates", EdgeBucket::Emphasis),
    ("ismeasuredby", EdgeBucket::Highlight),
    ("validfor", EdgeBucket::WarnDashed),
];

/// Selects the bucket for a predicate's internal (local) name.
pub fn style_bucket(predicate_name: &str) -> EdgeBucket {
    let name = predicate_name.to_lowercase();
    for (needle, bucket) in STYLE_RULES {
        if name.contains(needle) {
            return *bucket;
        }
    }
    EdgeBucket::Neutral
}

/// Style descriptor for the interactive (vis.js) renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisStyle {
    pub color: &'static str,
    pub width: u32,
    pub dashes: bool,
}

impl EdgeBucket {
    /// Mermaid `linkStyle` stroke string.
    pub fn mermaid_stroke(self) -> &'static str {
        match self {
            EdgeBucket::Alert => "stroke:#dc3545,stroke-width:2px",
            EdgeBucket::Affirmative => "stroke:#28a745,stroke-width:2px",
            EdgeBucket::InfoDashed => "stroke:#007bff,stroke-width:1px,stroke-dasharray: 5 5",
            EdgeBucket::Emphasis => "stroke:#6f42c1,stroke-width:2px",
            EdgeBucket::Highlight => "stroke:#e83e8c,stroke-width:2px",
            EdgeBucket::WarnDashed => "stroke:#fd7e14,stroke-width:2px,stroke-dasharray: 3 3",
            EdgeBucket::Neutral => "stroke:#999,stroke-width:1px",
        }
    }

    /// Interactive-renderer palette. Deliberately smaller than the Mermaid
    /// one: low-priority buckets fall back to the neutral stroke.
    pub fn vis_style(self) -> VisStyle {
        match self {
            EdgeBucket::Alert => VisStyle {
                color: "#dc3545",
                width: 2,
                dashes: false,
            },
            EdgeBucket::Affirmative => VisStyle {
                color: "#28a745",
                width: 2,
                dashes: false,
            },
            EdgeBucket::Highlight => VisStyle {
                color: "#e83e8c",
                width: 2,
                dashes: false,
            },
            EdgeBucket::Emphasis => VisStyle {
                color: "#6f42c1",
                width: 1,
                dashes: false,
            },
            EdgeBucket::InfoDashed => VisStyle {
                color: "#007bff",
                width: 1,
                dashes: true,
            },
            EdgeBucket::WarnDashed | EdgeBucket::Neutral => VisStyle {
                color: "#848484",
                width: 1,
                dashes: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_matching_is_case_insensitive_substring() {
        assert_eq!(style_bucket("correlatesNegativelyWith"), EdgeBucket::Alert);
        assert_eq!(style_bucket("isMeasuredBy"), EdgeBucket::Highlight);
        assert_eq!(style_bucket("validForContext"), EdgeBucket::WarnDashed);
        assert_eq!(style_bucket("plainRelation"), EdgeBucket::Neutral);
    }

    #[test]
    fn positively_wins_even_next_to_lower_priority_keywords() {
        // `evaluates` sits below `positively` in the table, so a name that
        // carries both still lands in the affirmative bucket.
        assert_eq!(
            style_bucket("evaluatesPositively"),
            EdgeBucket::Affirmative
        );
        assert_eq!(
            style_bucket("positivelyRefines"),
            EdgeBucket::Affirmative
        );
    }

    #[test]
    fn negatively_outranks_positively() {
        assert_eq!(
            style_bucket("negativelyThenPositively"),
            EdgeBucket::Alert
        );
    }
}
