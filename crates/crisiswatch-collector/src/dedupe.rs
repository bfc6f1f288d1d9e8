//! URL-keyed deduplication.

use std::collections::HashSet;

/// Collapse a list to one item per link, keeping the first occurrence.
///
/// Pure and stable: input order is preserved for the kept subset. Items whose
/// link is empty are dropped — they cannot be deduplicated or uniquely
/// stored. `link` extracts the key, so this serves both raw candidates and
/// scored records.
pub fn dedupe_by_link<T, F>(items: Vec<T>, link: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut seen: HashSet<String> = HashSet::new();
    items
        .into_iter()
        .filter(|item| {
            let key = link(item);
            !key.is_empty() && seen.insert(key.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(link: &str, title: &str) -> (String, String) {
        (link.to_string(), title.to_string())
    }

    #[test]
    fn first_occurrence_wins() {
        let items = vec![
            pair("https://x/1", "a"),
            pair("https://x/2", "b"),
            pair("https://x/1", "c"),
            pair("https://x/3", "d"),
            pair("https://x/4", "e"),
        ];
        let kept = dedupe_by_link(items, |(l, _)| l.as_str());
        assert_eq!(kept.len(), 4);
        assert_eq!(kept[0].1, "a", "first duplicate kept, later one dropped");
        let titles: Vec<&str> = kept.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "d", "e"], "input order preserved");
    }

    #[test]
    fn empty_links_are_dropped() {
        let items = vec![pair("", "a"), pair("https://x/1", "b"), pair("", "c")];
        let kept = dedupe_by_link(items, |(l, _)| l.as_str());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].1, "b");
    }

    #[test]
    fn empty_input_is_empty_output() {
        let kept = dedupe_by_link(Vec::<(String, String)>::new(), |(l, _)| l.as_str());
        assert!(kept.is_empty());
    }
}
