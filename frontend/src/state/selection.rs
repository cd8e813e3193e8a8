//! # Selection State Module
//!
//! Tracks which rows of the ledger table are selected for batch operations.
//! The selection is always a subset of the live row identifiers and keeps the
//! order the rows are displayed in, so batch requests list ids in table order.

use shared::{Expense, ExpenseId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionTracker {
    selected: Vec<ExpenseId>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole selection. Ids that are not present in `rows` are dropped.
    pub fn set_selected<I>(&mut self, ids: I, rows: &[Expense])
    where
        I: IntoIterator<Item = ExpenseId>,
    {
        let requested: Vec<ExpenseId> = ids.into_iter().collect();
        self.selected = rows
            .iter()
            .filter(|row| requested.contains(&row.id))
            .map(|row| row.id.clone())
            .collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Must run whenever rows leave the row-set, however they were removed
    pub fn reconcile_after_removal(&mut self, removed: &[ExpenseId]) {
        self.selected.retain(|id| !removed.contains(id));
    }

    pub fn contains(&self, id: &ExpenseId) -> bool {
        self.selected.contains(id)
    }

    pub fn ids(&self) -> &[ExpenseId] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
