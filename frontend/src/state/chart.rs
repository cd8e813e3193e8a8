//! # Chart State Module
//!
//! Holds the expense-composition pie data for the active period. The data is
//! always sourced from the server aggregation, never from the loaded rows,
//! and is only replaced by the response to the most recent refresh request.

use std::f64::consts::TAU;

use shared::{ExpenseTypeTotal, Period};

use super::ledger::{LedgerRequest, Ticket};

pub const CHART_TITLE: &str = "Expense Composition";

/// One pie sector's source value
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDatum {
    pub expense_type: String,
    pub amount: f64,
}

/// Geometry for one pie sector, angles in radians starting at 12 o'clock
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub expense_type: String,
    pub amount: f64,
    pub share: f64,
    pub start_angle: f64,
    pub sweep: f64,
}

impl ChartSlice {
    pub fn mid_angle(&self) -> f64 {
        self.start_angle + self.sweep / 2.0
    }
}

/// Render-ready chart value
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub data: Vec<ChartDatum>,
}

impl Default for ChartData {
    fn default() -> Self {
        Self {
            title: CHART_TITLE.to_string(),
            data: Vec::new(),
        }
    }
}

impl ChartData {
    pub fn total(&self) -> f64 {
        self.data.iter().map(|d| d.amount.max(0.0)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() <= 0.0
    }

    /// Sectors for every positive amount; empty when the total is zero
    pub fn slices(&self) -> Vec<ChartSlice> {
        let total = self.total();
        if total <= 0.0 {
            return Vec::new();
        }

        let mut start_angle = 0.0;
        self.data
            .iter()
            .filter(|d| d.amount > 0.0)
            .map(|d| {
                let share = d.amount / total;
                let slice = ChartSlice {
                    expense_type: d.expense_type.clone(),
                    amount: d.amount,
                    share,
                    start_angle,
                    sweep: share * TAU,
                };
                start_angle += slice.sweep;
                slice
            })
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct ChartProjector {
    chart: ChartData,
    pending: Option<Ticket>,
}

impl ChartProjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map server group-by rows to chart data titled with the period
    pub fn project(period: Period, totals: &[ExpenseTypeTotal]) -> ChartData {
        ChartData {
            title: format!("{} {} {}", CHART_TITLE, period.month, period.year),
            data: totals
                .iter()
                .map(|row| ChartDatum {
                    expense_type: row.expense_type.clone(),
                    amount: row.total(),
                })
                .collect(),
        }
    }

    /// Issue a fresh aggregation request, superseding any outstanding one
    pub fn refresh(&mut self, ticket: Ticket, period: Period) -> LedgerRequest {
        self.pending = Some(ticket);
        LedgerRequest::FetchChart { ticket, period }
    }

    /// Apply an aggregation response. Returns false for superseded tickets.
    pub fn accept(&mut self, ticket: Ticket, period: Period, totals: &[ExpenseTypeTotal]) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        self.pending = None;
        self.chart = Self::project(period, totals);
        true
    }

    /// Settle a failed request, leaving the previous chart in place.
    /// Returns false for superseded tickets.
    pub fn reject(&mut self, ticket: Ticket) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        self.pending = None;
        true
    }

    pub fn chart(&self) -> &ChartData {
        &self.chart
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}
