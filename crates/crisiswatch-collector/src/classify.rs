//! Business-distress keyword classifier.

use crate::text::strip_html;

/// Crisis vocabulary, partitioned by category.
///
/// Matching is case-insensitive substring containment with no word-boundary
/// requirement, so "firing" also matches "firings" — and short terms can
/// false-positive on unrelated words, an accepted imprecision.
pub(crate) const VOCABULARY: &[(&str, &[&str])] = &[
    (
        "bankruptcy",
        &[
            "bankruptcy",
            "bankrupt",
            "chapter 11",
            "chapter 7",
            "insolvency",
            "filed for bankruptcy",
            "liquidation",
            "financial collapse",
            "receivership",
        ],
    ),
    (
        "closures",
        &[
            "closure",
            "shutdown",
            "closing down",
            "going out of business",
            "ceased operations",
            "wind down",
            "store closures",
            "closing stores",
            "plant closure",
            "facility shutdown",
            "shuttering",
        ],
    ),
    (
        "layoffs",
        &[
            "layoffs",
            "mass layoffs",
            "cutting jobs",
            "firing",
            "downsizing",
            "job cuts",
            "workforce reduction",
            "eliminating jobs",
            "staff reduction",
            "redundancies",
            "pink slips",
            "terminations",
        ],
    ),
    (
        "financial_distress",
        &[
            "losses",
            "failing",
            "collapse",
            "decline",
            "crisis",
            "struggling",
            "financial troubles",
            "cash flow problems",
            "debt crisis",
            "revenue decline",
            "profit decline",
            "financial distress",
            "funding crisis",
            "cost cutting",
        ],
    ),
    (
        "corporate_issues",
        &[
            "restructuring",
            "reorganization",
            "asset sales",
            "divestiture",
            "spin off",
            "breakup",
            "rightsizing",
            "cost reduction",
            "warn notice",
        ],
    ),
    (
        "market_troubles",
        &[
            "shares fall",
            "stock drops",
            "market decline",
            "investor concerns",
            "disappointing results",
            "missed earnings",
            "guidance cut",
            "outlook lowered",
            "profit warning",
            "revenue warning",
        ],
    ),
    (
        "legal_troubles",
        &[
            "investigation",
            "lawsuit",
            "legal troubles",
            "scandal",
            "fraud",
            "misconduct",
            "penalty",
            "settlement",
            "violation",
        ],
    ),
];

/// Classify text against the crisis vocabulary.
///
/// Returns every matched term (in vocabulary order) and the comma-joined
/// list of categories with at least one hit, in declaration order. Text with
/// no hits returns an empty match set and the category `general`. Markup is
/// stripped before matching; empty input is fine.
#[must_use]
pub fn classify(text: &str) -> (Vec<String>, String) {
    let lowered = strip_html(text).to_lowercase();

    let mut matched = Vec::new();
    let mut categories = Vec::new();

    for (category, terms) in VOCABULARY {
        let mut hit = false;
        for term in *terms {
            if lowered.contains(term) {
                matched.push((*term).to_string());
                hit = true;
            }
        }
        if hit {
            categories.push(*category);
        }
    }

    let category = if categories.is_empty() {
        "general".to_string()
    } else {
        categories.join(",")
    };

    (matched, category)
}
