//! Narrow capability the ledger controller uses to drive the table view.
//!
//! The controller never reaches into the table component; it is handed a
//! `TableView` for the duration of a call. `TableModel` is the implementation
//! the Yew table renders from.

use shared::{Expense, ExpenseId};

pub trait TableView {
    fn select_all(&mut self);
    fn deselect_all(&mut self);
    fn selected_ids(&self) -> Vec<ExpenseId>;
    /// Incremental insert without resetting the table
    fn apply_add(&mut self, row: &Expense);
    /// Incremental removal without resetting the table
    fn apply_remove(&mut self, ids: &[ExpenseId]);
    /// Full data reset after a fetch
    fn set_rows(&mut self, rows: &[Expense]);
}

/// Displayed rows plus the visual checkbox state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableModel {
    rows: Vec<Expense>,
    checked: Vec<ExpenseId>,
}

impl TableModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Expense] {
        &self.rows
    }

    pub fn is_checked(&self, id: &ExpenseId) -> bool {
        self.checked.contains(id)
    }

    pub fn all_checked(&self) -> bool {
        !self.rows.is_empty() && self.rows.iter().all(|row| self.checked.contains(&row.id))
    }

    /// Checkbox click from the user
    pub fn toggle(&mut self, id: &ExpenseId) {
        if let Some(index) = self.checked.iter().position(|checked| checked == id) {
            self.checked.remove(index);
        } else if self.rows.iter().any(|row| &row.id == id) {
            self.checked.push(id.clone());
        }
    }
}

impl TableView for TableModel {
    fn select_all(&mut self) {
        self.checked = self.rows.iter().map(|row| row.id.clone()).collect();
    }

    fn deselect_all(&mut self) {
        self.checked.clear();
    }

    fn selected_ids(&self) -> Vec<ExpenseId> {
        self.rows
            .iter()
            .filter(|row| self.checked.contains(&row.id))
            .map(|row| row.id.clone())
            .collect()
    }

    fn apply_add(&mut self, row: &Expense) {
        if !self.rows.iter().any(|existing| existing.id == row.id) {
            self.rows.push(row.clone());
        }
    }

    fn apply_remove(&mut self, ids: &[ExpenseId]) {
        self.rows.retain(|row| !ids.contains(&row.id));
        self.checked.retain(|id| !ids.contains(id));
    }

    fn set_rows(&mut self, rows: &[Expense]) {
        self.rows = rows.to_vec();
        self.checked.clear();
    }
}
