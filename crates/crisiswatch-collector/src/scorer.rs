//! Polarity lexicon scorer for business-news text.

use crate::text::strip_html;

/// Word weights for business-news polarity.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative. The final score is clamped to `[-1.0, 1.0]`.
pub(crate) const LEXICON: &[(&str, f32)] = &[
    // Positive signals
    ("growth", 0.4),
    ("profit", 0.3),
    ("profits", 0.3),
    ("gain", 0.3),
    ("gains", 0.4),
    ("surge", 0.5),
    ("surged", 0.5),
    ("rally", 0.5),
    ("strong", 0.4),
    ("beat", 0.4),
    ("expansion", 0.4),
    ("hiring", 0.5),
    ("upbeat", 0.5),
    ("optimistic", 0.5),
    ("soar", 0.5),
    ("soared", 0.5),
    ("boom", 0.5),
    ("thriving", 0.5),
    ("recovery", 0.4),
    ("rebound", 0.4),
    ("success", 0.4),
    ("win", 0.4),
    ("great", 0.4),
    ("good", 0.3),
    ("excellent", 0.5),
    ("best", 0.5),
    // Negative signals
    ("bankrupt", -0.7),
    ("bankruptcy", -0.7),
    ("layoff", -0.6),
    ("layoffs", -0.6),
    ("fired", -0.5),
    ("firing", -0.5),
    ("loss", -0.4),
    ("losses", -0.5),
    ("failing", -0.5),
    ("failed", -0.4),
    ("failure", -0.5),
    ("collapse", -0.7),
    ("decline", -0.4),
    ("crisis", -0.6),
    ("struggling", -0.5),
    ("shutdown", -0.6),
    ("closure", -0.5),
    ("closing", -0.4),
    ("liquidation", -0.6),
    ("insolvency", -0.7),
    ("debt", -0.3),
    ("lawsuit", -0.5),
    ("fraud", -0.7),
    ("scandal", -0.6),
    ("investigation", -0.4),
    ("warning", -0.4),
    ("cuts", -0.3),
    ("worst", -0.6),
    ("bad", -0.4),
    ("terrible", -0.6),
    ("plunge", -0.6),
    ("plunged", -0.6),
    ("tumble", -0.5),
    ("slump", -0.5),
    ("weak", -0.3),
    ("missed", -0.3),
    ("downgrade", -0.5),
    ("bleak", -0.5),
    ("grim", -0.5),
];

/// Score text polarity in `[-1.0, 1.0]`; -1 maximally negative, 0 neutral.
///
/// Strips markup, splits into lowercase punctuation-trimmed words, sums
/// matching lexicon weights, and clamps. Degenerate input (empty text,
/// markup-only text, no known words) scores exactly `0.0` — scoring never
/// fails and never aborts a fetch cycle. Only monotonic directionality is
/// promised, not linguistic accuracy.
#[must_use]
pub fn score(text: &str) -> f32 {
    let cleaned = strip_html(text);

    let mut total = 0.0_f32;
    for word in cleaned.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        if w.is_empty() {
            continue;
        }
        for &(lex_word, weight) in LEXICON {
            if w == lex_word {
                total += weight;
                break;
            }
        }
    }
    total.clamp(-1.0, 1.0)
}
