//! Which options are shown, and in what order.
//!
//! The pool itself is never filtered. Every call to
//! [`Model::visible_items`] recomputes the view from the pool, the
//! exclude/include lists and the search term:
//!
//! 1. options excluded by identifier are dropped, and when an include list is
//!    set only those identifiers survive;
//! 2. the label must contain the search term, ignoring case;
//! 3. labels starting with the term come first, then case-insensitive
//!    alphabetical order.

use super::types::{FieldNames, Record};
use super::Model;
use std::cmp::Ordering;

/// Filters `records` by `term` and sorts them for display.
///
/// ```rust
/// use bubbletea_autocomplete::autocomplete::{rank_by_search, FieldNames, Record};
/// use serde_json::json;
///
/// let fields = FieldNames::default();
/// let records: Vec<Record> = ["Apple", "Banana", "Applesauce", "Pineapple"]
///     .iter()
///     .enumerate()
///     .map(|(i, name)| Record::from_value(json!({"id": i, "name": name})).unwrap())
///     .collect();
///
/// let ranked = rank_by_search(records.iter(), &fields, "app");
/// let names: Vec<String> = ranked.iter().map(|r| r.display(&fields)).collect();
/// assert_eq!(names, ["Apple", "Applesauce", "Pineapple"]);
/// ```
pub fn rank_by_search<'a, I>(records: I, fields: &FieldNames, term: &str) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let term = term.to_lowercase();
    let mut ranked: Vec<(String, &Record)> = records
        .into_iter()
        .map(|r| (r.display(fields).to_lowercase(), r))
        .filter(|(label, _)| label.contains(&term))
        .collect();

    ranked.sort_by(|(a, _), (b, _)| {
        match (a.starts_with(&term), b.starts_with(&term)) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a.cmp(b),
        }
    });

    ranked.into_iter().map(|(_, r)| r).collect()
}

impl Model {
    /// Options as they should be shown: post-filtered, matched against the
    /// search term and ranked.
    pub fn visible_items(&self) -> Vec<&Record> {
        let candidates = self.pool.iter().filter(|record| {
            let Some(id) = record.identifier(&self.fields) else {
                return false;
            };
            if self.items_to_exclude.contains(&id) {
                return false;
            }
            match &self.items_to_include {
                Some(include) => include.contains(&id),
                None => true,
            }
        });
        rank_by_search(candidates, &self.fields, &self.search)
    }

    /// Whether the search term currently matches at least one option.
    pub(super) fn search_satisfied_locally(&self) -> bool {
        !self.visible_items().is_empty()
    }

    /// Keeps the highlight inside the visible list.
    pub(super) fn clamp_highlight(&mut self) {
        let len = self.visible_items().len();
        if self.highlight >= len {
            self.highlight = len.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(names: &[&str]) -> Vec<Record> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Record::from_value(json!({"id": i, "name": n})).unwrap())
            .collect()
    }

    fn names(ranked: &[&Record], fields: &FieldNames) -> Vec<String> {
        ranked.iter().map(|r| r.display(fields)).collect()
    }

    #[test]
    fn test_ties_sort_by_lowercased_bytes() {
        let fields = FieldNames::default();
        let pool = records(&["Émile", "Zoe", "adam", "Bea"]);
        let ranked = rank_by_search(pool.iter(), &fields, "");
        assert_eq!(names(&ranked, &fields), vec!["adam", "Bea", "Zoe", "Émile"]);
    }

    #[test]
    fn test_search_narrowing() {
        let fields = FieldNames::default();
        let pool = records(&["Apple", "Banana", "Applesauce"]);
        let ranked = rank_by_search(pool.iter(), &fields, "app");
        assert_eq!(names(&ranked, &fields), vec!["Apple", "Applesauce"]);
    }

    #[test]
    fn test_starts_with_before_contains() {
        let fields = FieldNames::default();
        let pool = records(&["Human Resources", "Resource Planning", "research"]);
        let ranked = rank_by_search(pool.iter(), &fields, "RES");
        assert_eq!(
            names(&ranked, &fields),
            vec!["research", "Resource Planning", "Human Resources"]
        );
    }

    #[test]
    fn test_empty_term_sorts_everything() {
        let fields = FieldNames::default();
        let pool = records(&["delta", "Alpha", "charlie", "Bravo"]);
        let ranked = rank_by_search(pool.iter(), &fields, "");
        assert_eq!(
            names(&ranked, &fields),
            vec!["Alpha", "Bravo", "charlie", "delta"]
        );
    }
}
