//! Title search over the catalog.
//!
//! Recommendations need an exact title, so users first look titles up here
//! with a case-insensitive fragment.

use crate::types::TitleMatch;
use data_loader::Catalog;

/// Case-insensitive substring search
///
/// Exact (ignoring case) matches come first; within each group results keep
/// catalog order. An empty or blank query matches nothing.
pub fn search_titles(catalog: &Catalog, query: &str, limit: usize) -> Vec<TitleMatch> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<TitleMatch> = catalog
        .iter()
        .enumerate()
        .filter_map(|(index, movie)| {
            let title_lower = movie.title.to_lowercase();
            if !title_lower.contains(&needle) {
                return None;
            }
            Some(TitleMatch {
                index,
                movie_id: movie.id,
                title: movie.title.clone(),
                exact: title_lower == needle,
            })
        })
        .collect();

    // stable: exact hits first, catalog order otherwise
    matches.sort_by_key(|m| !m.exact);
    matches.truncate(limit);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Movie;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Movie::new(1, "The Dark Knight Rises"),
            Movie::new(2, "Batman Begins"),
            Movie::new(3, "The Dark Knight"),
            Movie::new(4, "Avatar"),
        ])
    }

    #[test]
    fn test_exact_match_first() {
        let hits = search_titles(&catalog(), "the dark knight", 10);
        let ids: Vec<_> = hits.iter().map(|h| h.movie_id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert!(hits[0].exact);
        assert!(!hits[1].exact);
    }

    #[test]
    fn test_substring_keeps_catalog_order() {
        let hits = search_titles(&catalog(), "KNIGHT", 10);
        let ids: Vec<_> = hits.iter().map(|h| h.movie_id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_limit_and_blank_query() {
        assert_eq!(search_titles(&catalog(), "the", 1).len(), 1);
        assert!(search_titles(&catalog(), "   ", 10).is_empty());
        assert!(search_titles(&catalog(), "zzz", 10).is_empty());
    }
}
