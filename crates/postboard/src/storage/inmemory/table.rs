use std::collections::btree_map::{BTreeMap, Values};

/// Rows of one entity type plus its identifier sequence.
///
/// Identifiers start at 1 and are never reused, even after deletion.
/// Iteration is in identifier order.
#[derive(Debug)]
pub(super) struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    /// Inserts the row built from the next identifier and returns a reference to it.
    pub fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> &T {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.entry(id).or_insert(build(id))
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn get_mut(&mut self, id: i64) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    pub fn remove(&mut self, id: i64) -> Option<T> {
        self.rows.remove(&id)
    }

    pub fn values(&self) -> Values<'_, i64, T> {
        self.rows.values()
    }
}
