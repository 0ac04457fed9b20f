//! The option pool: every record loaded for the current query context.
//!
//! Records keep the order they arrived in and are unique by identifier.
//! Placeholders stand in for selected identifiers whose record has not been
//! fetched yet; when the real record shows up it takes the placeholder's slot.

use super::types::{FieldNames, Identifier, Record};
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct Entry {
    id: Identifier,
    record: Record,
    provisional: bool,
}

/// What happened to a record offered to the pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insert {
    /// Appended as a new entry.
    Added,
    /// Took the place of a provisional entry with the same identifier.
    Replaced(Identifier),
    /// A settled entry with this identifier already exists; the record was dropped.
    Duplicate,
    /// The record has no usable identifier and was dropped.
    Rejected,
}

/// Counts of a batch merge, see [`OptionPool::extend`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Records appended.
    pub added: usize,
    /// Identifiers whose provisional entry got its real record.
    pub replaced: Vec<Identifier>,
    /// Records dropped as duplicates or for lacking an identifier.
    pub skipped: usize,
}

/// Ordered, duplicate-free collection of loaded options.
#[derive(Debug, Clone, Default)]
pub struct OptionPool {
    entries: Vec<Entry>,
    index: HashMap<Identifier, usize>,
}

impl OptionPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, placeholders included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the pool holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Whether an entry with `id` exists.
    pub fn contains(&self, id: &Identifier) -> bool {
        self.index.contains_key(id)
    }

    /// The record stored under `id`.
    pub fn get(&self, id: &Identifier) -> Option<&Record> {
        self.index.get(id).map(|&i| &self.entries[i].record)
    }

    /// Whether the entry for `id` is still waiting for its real record.
    pub fn is_provisional(&self, id: &Identifier) -> bool {
        self.index
            .get(id)
            .map(|&i| self.entries[i].provisional)
            .unwrap_or(false)
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.entries.iter().map(|e| &e.record)
    }

    /// Identifiers in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &Identifier> {
        self.entries.iter().map(|e| &e.id)
    }

    /// Offers a settled record to the pool.
    pub fn insert(&mut self, fields: &FieldNames, record: Record) -> Insert {
        self.put(fields, record, false)
    }

    /// Offers a record that later fetched data may overwrite.
    pub fn insert_provisional(&mut self, fields: &FieldNames, record: Record) -> Insert {
        self.put(fields, record, true)
    }

    /// Inserts an identifier-only placeholder unless `id` is already present.
    /// Returns true if a placeholder was added.
    pub fn insert_placeholder(&mut self, fields: &FieldNames, id: &Identifier) -> bool {
        if self.contains(id) {
            return false;
        }
        self.push(id.clone(), Record::placeholder(fields, id), true);
        true
    }

    /// Merges a page of records, keeping arrival order.
    pub fn extend<I>(&mut self, fields: &FieldNames, records: I) -> MergeSummary
    where
        I: IntoIterator<Item = Record>,
    {
        let mut summary = MergeSummary::default();
        for record in records {
            match self.insert(fields, record) {
                Insert::Added => summary.added += 1,
                Insert::Replaced(id) => summary.replaced.push(id),
                Insert::Duplicate | Insert::Rejected => summary.skipped += 1,
            }
        }
        summary
    }

    /// Replaces the whole pool with `records`, deduplicated.
    pub fn replace_all<I>(&mut self, fields: &FieldNames, records: I)
    where
        I: IntoIterator<Item = Record>,
    {
        self.clear();
        self.extend(fields, records);
    }

    fn put(&mut self, fields: &FieldNames, record: Record, provisional: bool) -> Insert {
        let Some(id) = record.identifier(fields) else {
            return Insert::Rejected;
        };
        match self.index.get(&id) {
            Some(&i) if self.entries[i].provisional => {
                let entry = &mut self.entries[i];
                entry.record = record;
                entry.provisional = provisional;
                Insert::Replaced(id)
            }
            Some(_) => Insert::Duplicate,
            None => {
                self.push(id, record, provisional);
                Insert::Added
            }
        }
    }

    fn push(&mut self, id: Identifier, record: Record, provisional: bool) {
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push(Entry {
            id,
            record,
            provisional,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn rec(id: i64, name: &str) -> Record {
        Record::from_value(json!({"id": id, "name": name})).unwrap()
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let fields = FieldNames::default();
        let mut pool = OptionPool::new();
        pool.extend(&fields, vec![rec(3, "c"), rec(1, "a"), rec(2, "b")]);
        let ids: Vec<_> = pool.ids().cloned().collect();
        assert_eq!(
            ids,
            vec![Identifier::Int(3), Identifier::Int(1), Identifier::Int(2)]
        );
    }

    #[test]
    fn test_overlapping_pages_never_duplicate() {
        let fields = FieldNames::default();
        let mut pool = OptionPool::new();
        let pages = vec![
            vec![rec(1, "a"), rec(2, "b"), rec(3, "c")],
            vec![rec(3, "c"), rec(4, "d")],
            vec![rec(1, "a"), rec(4, "d"), rec(5, "e")],
        ];
        for page in pages {
            pool.extend(&fields, page);
            let unique: HashSet<_> = pool.ids().collect();
            assert_eq!(unique.len(), pool.len());
        }
        assert_eq!(pool.len(), 5);
    }

    #[test]
    fn test_placeholder_replaced_in_place() {
        let fields = FieldNames::default();
        let mut pool = OptionPool::new();
        pool.insert(&fields, rec(1, "a"));
        assert!(pool.insert_placeholder(&fields, &Identifier::Int(7)));
        assert!(!pool.insert_placeholder(&fields, &Identifier::Int(1)));
        assert!(pool.is_provisional(&Identifier::Int(7)));

        let summary = pool.extend(&fields, vec![rec(2, "b"), rec(7, "g")]);
        assert_eq!(summary.added, 1);
        assert_eq!(summary.replaced, vec![Identifier::Int(7)]);
        assert!(!pool.is_provisional(&Identifier::Int(7)));
        assert_eq!(pool.get(&Identifier::Int(7)).unwrap().display(&fields), "g");

        let ids: Vec<_> = pool.ids().cloned().collect();
        assert_eq!(
            ids,
            vec![Identifier::Int(1), Identifier::Int(7), Identifier::Int(2)]
        );
    }

    #[test]
    fn test_settled_entry_is_not_overwritten() {
        let fields = FieldNames::default();
        let mut pool = OptionPool::new();
        pool.insert(&fields, rec(1, "first"));
        assert_eq!(pool.insert(&fields, rec(1, "second")), Insert::Duplicate);
        assert_eq!(pool.get(&Identifier::Int(1)).unwrap().display(&fields), "first");
    }

    #[test]
    fn test_records_without_identifier_are_rejected() {
        let fields = FieldNames::default();
        let mut pool = OptionPool::new();
        let nameless = Record::from_value(json!({"name": "orphan"})).unwrap();
        assert_eq!(pool.insert(&fields, nameless), Insert::Rejected);
        assert!(pool.is_empty());
    }
}
