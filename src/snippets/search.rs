//! Snippet filtering and category projection
//!
//! Pure functions over a snippet slice; the store wires them to its live
//! filter state. Matching is a case-folded substring check across title,
//! content, and description, and results are ranked by usage count. Neither
//! projection holds state or triggers persistence.

use super::types::Snippet;

/// Apply the category and free-text filters, then rank by usage count
/// descending. The sort is stable, so equal-usage records keep the relative
/// order they had before ranking.
///
/// Category matching is an exact, case-sensitive comparison; text matching
/// is a case-folded substring check (a blank query matches everything, an
/// absent description never matches).
pub fn filter_snippets(snippets: &[Snippet], category: Option<&str>, query: &str) -> Vec<Snippet> {
    let mut result: Vec<Snippet> = snippets
        .iter()
        .filter(|s| category.is_none_or(|c| s.category.as_deref() == Some(c)))
        .filter(|s| matches_query(s, query))
        .cloned()
        .collect();
    result.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
    result
}

fn matches_query(snippet: &Snippet, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    snippet.title.to_lowercase().contains(&needle)
        || snippet.content.to_lowercase().contains(&needle)
        || snippet
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
}

/// All distinct non-empty category values, lexicographically sorted.
pub fn categories(snippets: &[Snippet]) -> Vec<String> {
    let mut cats: Vec<String> = snippets
        .iter()
        .filter_map(|s| s.category.as_deref())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    cats.sort();
    cats.dedup();
    cats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(title: &str, content: &str, category: Option<&str>, usage: u32) -> Snippet {
        Snippet {
            id: format!("snippet-test-{title}"),
            title: title.to_string(),
            content: content.to_string(),
            category: category.map(str::to_string),
            description: None,
            created_at: 0,
            updated_at: 0,
            usage_count: usage,
        }
    }

    fn sample() -> Vec<Snippet> {
        vec![
            snippet("Deploy", "kubectl apply", Some("ops"), 5),
            snippet("Greeting", "hello world", Some("text"), 1),
        ]
    }

    #[test]
    fn category_filter_is_exact() {
        let all = sample();
        let filtered = filter_snippets(&all, Some("ops"), "");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Deploy");
    }

    #[test]
    fn category_filter_is_case_sensitive() {
        let all = sample();
        assert!(filter_snippets(&all, Some("Ops"), "").is_empty());
    }

    #[test]
    fn text_filter_matches_content() {
        let all = sample();
        let filtered = filter_snippets(&all, None, "hello");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Greeting");
    }

    #[test]
    fn text_filter_is_case_folded() {
        let all = sample();
        assert_eq!(filter_snippets(&all, None, "KUBECTL").len(), 1);
        assert_eq!(filter_snippets(&all, None, "deploy").len(), 1);
    }

    #[test]
    fn text_filter_matches_description() {
        let mut all = sample();
        all[0].description = Some("Ship to the Cluster".to_string());
        let filtered = filter_snippets(&all, None, "cluster");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Deploy");
    }

    #[test]
    fn absent_description_never_matches() {
        let all = sample();
        assert!(filter_snippets(&all, None, "cluster").is_empty());
    }

    #[test]
    fn no_filters_rank_by_usage_descending() {
        let all = sample();
        let filtered = filter_snippets(&all, None, "");
        assert_eq!(filtered[0].title, "Deploy");
        assert_eq!(filtered[1].title, "Greeting");
    }

    #[test]
    fn blank_query_is_no_filter() {
        let all = sample();
        assert_eq!(filter_snippets(&all, None, "   ").len(), 2);
    }

    #[test]
    fn equal_usage_keeps_insertion_order() {
        let all = vec![
            snippet("First", "a", None, 3),
            snippet("Second", "b", None, 3),
            snippet("Third", "c", None, 7),
        ];
        let filtered = filter_snippets(&all, None, "");
        let titles: Vec<&str> = filtered.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Third", "First", "Second"]);
    }

    #[test]
    fn both_filters_compose() {
        let all = vec![
            snippet("Deploy", "kubectl apply", Some("ops"), 5),
            snippet("Rollback", "kubectl rollout undo", Some("ops"), 2),
            snippet("Greeting", "hello world", Some("text"), 1),
        ];
        let filtered = filter_snippets(&all, Some("ops"), "rollout");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Rollback");
    }

    #[test]
    fn categories_are_deduped_and_sorted() {
        let all = vec![
            snippet("a", "", Some("text"), 0),
            snippet("b", "", Some("ops"), 0),
            snippet("c", "", Some("text"), 0),
            snippet("d", "", None, 0),
        ];
        assert_eq!(categories(&all), vec!["ops", "text"]);
    }

    #[test]
    fn empty_category_values_are_excluded() {
        let all = vec![snippet("a", "", Some(""), 0), snippet("b", "", Some("ops"), 0)];
        assert_eq!(categories(&all), vec!["ops"]);
    }
}
