//! View state for the monthly ledger. Everything in here is free of I/O and
//! browser APIs so it can be exercised by plain unit tests.

pub mod chart;
pub mod expense_form;
pub mod ledger;
pub mod selection;
pub mod table_view;

pub use chart::{ChartData, ChartSlice};
pub use expense_form::{ExpenseForm, FormErrors};
pub use ledger::{LedgerController, LedgerRequest};
pub use table_view::{TableModel, TableView};
