use std::collections::HashSet;

use crate::row::{row_identity, Row, RowKey};

/// The fetched rows for the currently selected document/sheet, plus the
/// set of rows edited this session.
///
/// The buffer owns the collection for the lifetime of a selection:
/// replaced wholesale on fetch, patched element-wise after a successful
/// update, shrunk after a successful delete. Mutations are applied only
/// after the backend acknowledged the operation — there is no local
/// optimism to roll back.
#[derive(Debug, Clone, Default)]
pub struct SheetBuffer {
    rows: Vec<Row>,
    edited: HashSet<RowKey>,
}

impl SheetBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replaces the whole collection. A fetch starts a new sheet
    /// context, so edited marks from the previous one are dropped.
    pub fn apply_fetch(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.edited.clear();
    }

    /// Replaces the row matching `key` and marks it edited.
    ///
    /// Silent no-op when nothing matches: the row was deleted while the
    /// update was in flight, and there is no stale entry left to patch.
    pub fn apply_update(&mut self, key: RowKey, new_row: Row) {
        if let Some(pos) = self.position_of(key) {
            self.rows[pos] = new_row;
            self.edited.insert(key);
        }
    }

    /// Removes the row matching `key`, along with its edited mark.
    pub fn apply_delete(&mut self, key: RowKey) {
        if let Some(pos) = self.position_of(key) {
            self.rows.remove(pos);
        }
        self.edited.remove(&key);
    }

    pub fn is_edited(&self, key: RowKey) -> bool {
        self.edited.contains(&key)
    }

    pub fn get(&self, key: RowKey) -> Option<&Row> {
        self.position_of(key).map(|pos| &self.rows[pos])
    }

    /// Index of the row whose identity is `key`, if any.
    pub fn position_of(&self, key: RowKey) -> Option<usize> {
        self.rows
            .iter()
            .enumerate()
            .position(|(i, row)| row_identity(row, i) == key)
    }

    /// Resolves a user-supplied row reference: a `row_number` match
    /// wins; otherwise the value is taken as a position for rows that
    /// carry no `row_number`.
    pub fn resolve_key(&self, raw: i64) -> Option<RowKey> {
        if self.position_of(RowKey::Number(raw)).is_some() {
            return Some(RowKey::Number(raw));
        }
        let pos = usize::try_from(raw).ok()?;
        if self.position_of(RowKey::Position(pos)).is_some() {
            return Some(RowKey::Position(pos));
        }
        None
    }

    /// Rows whose string form contains `term`, case-insensitively, in
    /// any column. Empty or whitespace-only terms mean "no filter".
    /// Original order is preserved either way.
    ///
    /// Trimming applies only to the empty-check; a non-blank term keeps
    /// its surrounding whitespace when matching, so `"Ann "` matches
    /// only cells containing `"ann "`.
    pub fn filtered_view(&self, term: &str) -> Vec<&Row> {
        if term.trim().is_empty() {
            return self.rows.iter().collect();
        }
        let needle = term.to_lowercase();
        self.rows.iter().filter(|row| row.matches(&needle)).collect()
    }
}
