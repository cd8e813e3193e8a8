//! Add-expense form state and its local validation.
//!
//! Validation runs before any request is issued; a form that fails it never
//! reaches the ledger controller.

use shared::{ExpenseDraft, Month, Period};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Amount,
    ExpenseType,
    Currency,
    Month,
    Year,
}

/// Violations in the order they are reported to the user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors(Vec<(FormField, String)>);

impl FormErrors {
    fn push(&mut self, field: FormField, message: &str) {
        self.0.push((field, message.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(_, message)| message.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseForm {
    pub expense_type: String,
    pub currency: String,
    pub amount: String,
    pub description: String,
    /// "Add past expense" mode: month and year become required
    pub past: bool,
    pub month: Option<Month>,
    pub year: String,
}

impl ExpenseForm {
    pub fn new(default_expense_type: &str, default_currency: &str) -> Self {
        Self {
            expense_type: default_expense_type.to_string(),
            currency: default_currency.to_string(),
            amount: String::new(),
            description: String::new(),
            past: false,
            month: None,
            year: String::new(),
        }
    }

    pub fn toggle_past(&mut self) {
        self.past = !self.past;
    }

    /// Reset the per-entry fields after a successful submit
    pub fn clear_entry(&mut self) {
        self.amount.clear();
        self.description.clear();
    }

    pub fn validate(&self) -> Result<ExpenseDraft, FormErrors> {
        let mut errors = FormErrors::default();

        let amount = self.amount.trim();
        let parsed_amount = if amount.is_empty() {
            errors.push(FormField::Amount, "Amount is required.");
            None
        } else {
            match amount.parse::<f64>() {
                Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
                _ => {
                    errors.push(FormField::Amount, "Amount must be a non-negative number.");
                    None
                }
            }
        };

        if self.expense_type.trim().is_empty() {
            errors.push(FormField::ExpenseType, "Expense type is required.");
        }
        if self.currency.trim().is_empty() {
            errors.push(FormField::Currency, "Currency is required.");
        }

        let backdate = if self.past {
            if self.month.is_none() {
                errors.push(FormField::Month, "Month is required for past expenses.");
            }
            let year = self.year.trim();
            let parsed_year = if year.is_empty() {
                errors.push(FormField::Year, "Year is required for past expenses.");
                None
            } else {
                match year.parse::<i32>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        errors.push(FormField::Year, "Year must be a whole number.");
                        None
                    }
                }
            };
            self.month
                .zip(parsed_year)
                .map(|(month, year)| Period::new(month, year))
        } else {
            None
        };

        match parsed_amount {
            Some(amount) if errors.is_empty() => Ok(ExpenseDraft {
                expense_type: self.expense_type.trim().to_string(),
                description: self.description.trim().to_string(),
                amount,
                currency: self.currency.trim().to_string(),
                backdate,
            }),
            _ => Err(errors),
        }
    }
}
