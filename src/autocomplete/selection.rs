//! Single and multiple selection.

use super::pool::OptionPool;
use super::types::{Identifier, Record};

/// The current selection, by identifier.
///
/// In multiple mode identifiers keep the order they were selected in, not
/// the order of the option pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// At most one identifier.
    Single(Option<Identifier>),
    /// An ordered set of identifiers.
    Multiple(Vec<Identifier>),
}

/// Selected records resolved against the option pool.
///
/// Entries are `None` for identifiers the pool does not hold.
#[derive(Debug, Clone, PartialEq)]
pub enum FullData {
    /// Resolution of a single selection.
    Single(Option<Record>),
    /// Resolution of a multiple selection, in selection order.
    Multiple(Vec<Option<Record>>),
}

impl Selection {
    /// An empty selection in the given mode.
    pub fn new(multiple: bool) -> Self {
        if multiple {
            Selection::Multiple(Vec::new())
        } else {
            Selection::Single(None)
        }
    }

    /// Whether this is a multiple selection.
    pub fn is_multiple(&self) -> bool {
        matches!(self, Selection::Multiple(_))
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        match self {
            Selection::Single(id) => id.is_none(),
            Selection::Multiple(ids) => ids.is_empty(),
        }
    }

    /// Whether `id` is selected.
    pub fn contains(&self, id: &Identifier) -> bool {
        match self {
            Selection::Single(current) => current.as_ref() == Some(id),
            Selection::Multiple(ids) => ids.contains(id),
        }
    }

    /// Selected identifiers in selection order.
    pub fn ids(&self) -> Vec<&Identifier> {
        match self {
            Selection::Single(id) => id.iter().collect(),
            Selection::Multiple(ids) => ids.iter().collect(),
        }
    }

    /// Selects `id`. Single mode replaces the current value, multiple mode
    /// appends unless already present. Returns true if anything changed.
    pub fn select(&mut self, id: Identifier) -> bool {
        match self {
            Selection::Single(current) => {
                if current.as_ref() == Some(&id) {
                    return false;
                }
                *current = Some(id);
                true
            }
            Selection::Multiple(ids) => {
                if ids.contains(&id) {
                    return false;
                }
                ids.push(id);
                true
            }
        }
    }

    /// Removes `id` from the selection. Returns true if it was selected.
    pub fn deselect(&mut self, id: &Identifier) -> bool {
        match self {
            Selection::Single(current) => {
                if current.as_ref() != Some(id) {
                    return false;
                }
                *current = None;
                true
            }
            Selection::Multiple(ids) => {
                let before = ids.len();
                ids.retain(|s| s != id);
                ids.len() != before
            }
        }
    }

    /// Selects `id` if it is not selected, deselects it otherwise.
    ///
    /// In single mode an already selected option stays selected, the way a
    /// single-choice menu behaves.
    pub fn toggle(&mut self, id: Identifier) -> bool {
        if self.is_multiple() && self.contains(&id) {
            self.deselect(&id)
        } else {
            self.select(id)
        }
    }

    /// Replaces the selection wholesale. Single mode keeps the first
    /// identifier; multiple mode drops repeated identifiers.
    pub fn replace(&mut self, ids: Vec<Identifier>) {
        match self {
            Selection::Single(current) => *current = ids.into_iter().next(),
            Selection::Multiple(current) => {
                current.clear();
                for id in ids {
                    if !current.contains(&id) {
                        current.push(id);
                    }
                }
            }
        }
    }

    /// Clears the selection. Returns true if anything was selected.
    pub fn clear(&mut self) -> bool {
        let was_empty = self.is_empty();
        match self {
            Selection::Single(current) => *current = None,
            Selection::Multiple(ids) => ids.clear(),
        }
        !was_empty
    }

    /// Resolves the selected identifiers against `pool`.
    pub fn resolve(&self, pool: &OptionPool) -> FullData {
        match self {
            Selection::Single(id) => FullData::Single(id.as_ref().and_then(|id| pool.get(id).cloned())),
            Selection::Multiple(ids) => {
                FullData::Multiple(ids.iter().map(|id| pool.get(id).cloned()).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autocomplete::types::FieldNames;
    use serde_json::json;

    fn a() -> Identifier {
        Identifier::from("A")
    }

    fn b() -> Identifier {
        Identifier::from("B")
    }

    #[test]
    fn test_multiple_keeps_selection_order() {
        let mut sel = Selection::new(true);
        sel.select(a());
        sel.select(b());
        sel.deselect(&a());
        assert_eq!(sel, Selection::Multiple(vec![b()]));

        sel.select(a());
        assert_eq!(sel, Selection::Multiple(vec![b(), a()]));
    }

    #[test]
    fn test_single_replaces() {
        let mut sel = Selection::new(false);
        assert!(sel.select(a()));
        assert!(sel.select(b()));
        assert_eq!(sel, Selection::Single(Some(b())));
        assert!(!sel.deselect(&a()));
        assert!(sel.deselect(&b()));
        assert!(sel.is_empty());
    }

    #[test]
    fn test_toggle() {
        let mut multi = Selection::new(true);
        multi.toggle(a());
        multi.toggle(a());
        assert!(multi.is_empty());

        let mut single = Selection::new(false);
        single.toggle(a());
        assert!(!single.toggle(a()));
        assert!(single.contains(&a()));
    }

    #[test]
    fn test_replace_dedups_and_truncates() {
        let mut multi = Selection::new(true);
        multi.replace(vec![a(), b(), a()]);
        assert_eq!(multi.ids(), vec![&a(), &b()]);

        let mut single = Selection::new(false);
        single.replace(vec![b(), a()]);
        assert_eq!(single, Selection::Single(Some(b())));
    }

    #[test]
    fn test_resolve_reports_missing_as_none() {
        let fields = FieldNames::new("code", "label");
        let mut pool = OptionPool::new();
        pool.insert(
            &fields,
            Record::from_value(json!({"code": "A", "label": "Alpha"})).unwrap(),
        );
        let mut sel = Selection::new(true);
        sel.replace(vec![b(), a()]);
        match sel.resolve(&pool) {
            FullData::Multiple(records) => {
                assert!(records[0].is_none());
                assert_eq!(records[1].as_ref().unwrap().display(&fields), "Alpha");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
