pub mod add_expense_form;
pub mod expense_chart;
pub mod header;
pub mod ledger_table;
pub mod modal;
pub mod monthly_expenses;
pub mod period_navigator;
