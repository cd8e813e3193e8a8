//! # Ledger State Module
//!
//! The monthly ledger controller: owns the active period, the row-set, the
//! selection and the chart projection, and keeps them consistent while
//! requests to the expenses service are in flight.
//!
//! ## Protocol
//! The controller performs no I/O. Every operation returns the
//! [`LedgerRequest`]s it needs executed; the caller runs them against an
//! expense repository and feeds each outcome back through
//! [`LedgerController::handle`], which may return follow-up requests.
//!
//! Row and chart fetches carry a [`Ticket`]. Only the most recently issued
//! ticket of each kind is honoured, so a response for a period that is no
//! longer active is dropped instead of overwriting the current view.

use log::{debug, error, info};
use shared::{Direction, Expense, ExpenseDraft, ExpenseId, ExpenseTypeTotal, Period};

use super::chart::{ChartData, ChartProjector};
use super::selection::SelectionTracker;
use super::table_view::TableView;
use crate::error::ApiError;

/// Monotonic tag for fetch requests
pub type Ticket = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum LedgerRequest {
    FetchRows { ticket: Ticket, period: Period },
    FetchChart { ticket: Ticket, period: Period },
    Create { draft: ExpenseDraft },
    DeleteOne { id: ExpenseId },
    DeleteBatch { ids: Vec<ExpenseId> },
}

#[derive(Debug)]
pub enum LedgerResponse {
    Rows {
        ticket: Ticket,
        result: Result<Vec<Expense>, ApiError>,
    },
    Chart {
        ticket: Ticket,
        period: Period,
        result: Result<Vec<ExpenseTypeTotal>, ApiError>,
    },
    Created {
        result: Result<Expense, ApiError>,
    },
    DeletedOne {
        id: ExpenseId,
        result: Result<(), ApiError>,
    },
    DeletedBatch {
        ids: Vec<ExpenseId>,
        result: Result<(), ApiError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOperation {
    LoadExpenses,
    LoadChart,
    AddExpense,
    DeleteExpense,
    DeleteSelected,
}

impl LedgerOperation {
    fn describe(self) -> &'static str {
        match self {
            LedgerOperation::LoadExpenses => "load expenses",
            LedgerOperation::LoadChart => "load the expense composition",
            LedgerOperation::AddExpense => "add the expense",
            LedgerOperation::DeleteExpense => "delete the expense",
            LedgerOperation::DeleteSelected => "delete the selected expenses",
        }
    }
}

/// A repository call that failed; kept until dismissed or replaced
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub operation: LedgerOperation,
    pub error: ApiError,
}

impl Failure {
    pub fn message(&self) -> String {
        format!("Could not {}: {}.", self.operation.describe(), self.error.summary())
    }
}

#[derive(Debug)]
pub struct LedgerController {
    period: Period,
    rows: Vec<Expense>,
    selection: SelectionTracker,
    chart: ChartProjector,
    add_panel_open: bool,
    last_ticket: Ticket,
    rows_ticket: Option<Ticket>,
    failure: Option<Failure>,
    /// Creates confirmed by the server so far
    created: u64,
}

impl LedgerController {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            rows: Vec::new(),
            selection: SelectionTracker::new(),
            chart: ChartProjector::new(),
            add_panel_open: false,
            last_ticket: 0,
            rows_ticket: None,
            failure: None,
            created: 0,
        }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn rows(&self) -> &[Expense] {
        &self.rows
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn chart(&self) -> &ChartData {
        self.chart.chart()
    }

    pub fn is_add_panel_open(&self) -> bool {
        self.add_panel_open
    }

    pub fn is_loading_rows(&self) -> bool {
        self.rows_ticket.is_some()
    }

    pub fn is_loading_chart(&self) -> bool {
        self.chart.is_loading()
    }

    pub fn created_count(&self) -> u64 {
        self.created
    }

    pub fn failure(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }

    pub fn dismiss_failure(&mut self) {
        self.failure = None;
    }

    fn next_ticket(&mut self) -> Ticket {
        self.last_ticket += 1;
        self.last_ticket
    }

    pub fn initialize(&mut self) -> Vec<LedgerRequest> {
        info!("Loading ledger for {}", self.period);
        self.on_period_change()
    }

    /// Fetch rows and chart for the active period, superseding older fetches
    pub fn on_period_change(&mut self) -> Vec<LedgerRequest> {
        let ticket = self.next_ticket();
        self.rows_ticket = Some(ticket);
        let rows = LedgerRequest::FetchRows {
            ticket,
            period: self.period,
        };
        vec![rows, self.refresh_chart_request()]
    }

    pub fn navigate(&mut self, direction: Direction, view: &mut dyn TableView) -> Vec<LedgerRequest> {
        let target = self.period.step(direction);
        if target == self.period {
            return Vec::new();
        }
        self.change_period(target, view)
    }

    /// Jump straight to `period`; a no-op when it is already active
    pub fn jump_to(&mut self, period: Period, view: &mut dyn TableView) -> Vec<LedgerRequest> {
        if period == self.period {
            return Vec::new();
        }
        self.change_period(period, view)
    }

    fn change_period(&mut self, period: Period, view: &mut dyn TableView) -> Vec<LedgerRequest> {
        info!("Switching ledger from {} to {}", self.period, period);
        self.period = period;
        // rows always belong to the active period, even if the fetch fails
        self.rows.clear();
        self.selection.clear();
        view.set_rows(&[]);
        self.on_period_change()
    }

    pub fn refresh_chart(&mut self) -> Vec<LedgerRequest> {
        vec![self.refresh_chart_request()]
    }

    /// Reissue an in-flight row fetch, which may predate a mutation the
    /// server just confirmed
    fn supersede_pending_rows(&mut self) -> Option<LedgerRequest> {
        self.rows_ticket?;
        let ticket = self.next_ticket();
        self.rows_ticket = Some(ticket);
        Some(LedgerRequest::FetchRows {
            ticket,
            period: self.period,
        })
    }

    fn refresh_chart_request(&mut self) -> LedgerRequest {
        let ticket = self.next_ticket();
        self.chart.refresh(ticket, self.period)
    }

    pub fn add_expense(&mut self, draft: ExpenseDraft) -> Vec<LedgerRequest> {
        info!("Adding {} expense of {} {}", draft.expense_type, draft.amount, draft.currency);
        vec![LedgerRequest::Create { draft }]
    }

    pub fn delete_one(&mut self, id: ExpenseId) -> Vec<LedgerRequest> {
        info!("Deleting expense {}", id);
        vec![LedgerRequest::DeleteOne { id }]
    }

    pub fn delete_selected(&mut self) -> Vec<LedgerRequest> {
        if self.selection.is_empty() {
            return Vec::new();
        }
        info!("Deleting {} selected expenses", self.selection.len());
        vec![LedgerRequest::DeleteBatch {
            ids: self.selection.ids().to_vec(),
        }]
    }

    pub fn toggle_add_panel(&mut self) {
        self.add_panel_open = !self.add_panel_open;
    }

    pub fn select_all(&mut self, view: &mut dyn TableView) {
        let ids: Vec<ExpenseId> = self.rows.iter().map(|row| row.id.clone()).collect();
        self.selection.set_selected(ids, &self.rows);
        view.select_all();
    }

    pub fn clear_selection(&mut self, view: &mut dyn TableView) {
        self.selection.clear();
        view.deselect_all();
    }

    /// Selection change reported by the table view
    pub fn on_selection_changed(&mut self, ids: Vec<ExpenseId>) {
        self.selection.set_selected(ids, &self.rows);
    }

    /// Reconcile a repository outcome into local state
    pub fn handle(&mut self, response: LedgerResponse, view: &mut dyn TableView) -> Vec<LedgerRequest> {
        match response {
            LedgerResponse::Rows { ticket, result } => {
                if self.rows_ticket != Some(ticket) {
                    debug!("Discarding stale row response (ticket {})", ticket);
                    return Vec::new();
                }
                self.rows_ticket = None;
                match result {
                    Ok(rows) => {
                        debug!("Loaded {} expenses for {}", rows.len(), self.period);
                        self.rows = rows;
                        self.selection.clear();
                        view.set_rows(&self.rows);
                    }
                    Err(e) => self.record_failure(LedgerOperation::LoadExpenses, e),
                }
                Vec::new()
            }
            LedgerResponse::Chart { ticket, period, result } => {
                match result {
                    Ok(totals) => {
                        if !self.chart.accept(ticket, period, &totals) {
                            debug!("Discarding stale chart response (ticket {})", ticket);
                        }
                    }
                    Err(e) => {
                        if self.chart.reject(ticket) {
                            self.record_failure(LedgerOperation::LoadChart, e);
                        } else {
                            debug!("Ignoring failure of superseded chart request (ticket {})", ticket);
                        }
                    }
                }
                Vec::new()
            }
            LedgerResponse::Created { result } => match result {
                Ok(expense) => {
                    self.created += 1;
                    let belongs = self.period.matches(expense.month, expense.year);
                    let known = self.rows.iter().any(|row| row.id == expense.id);
                    if belongs && !known {
                        view.apply_add(&expense);
                        self.rows.push(expense);
                    } else if !belongs {
                        debug!(
                            "Created expense {} belongs to {}/{}, not shown in {}",
                            expense.id, expense.month, expense.year, self.period
                        );
                    }
                    let mut follow: Vec<LedgerRequest> = self.supersede_pending_rows().into_iter().collect();
                    follow.extend(self.refresh_chart());
                    follow
                }
                Err(e) => {
                    self.record_failure(LedgerOperation::AddExpense, e);
                    Vec::new()
                }
            },
            LedgerResponse::DeletedOne { id, result } => match result {
                Ok(()) => {
                    // row removed, then selection reconciled, then chart refreshed
                    let removed = [id];
                    self.rows.retain(|row| row.id != removed[0]);
                    view.apply_remove(&removed);
                    self.selection.reconcile_after_removal(&removed);
                    let mut follow: Vec<LedgerRequest> = self.supersede_pending_rows().into_iter().collect();
                    follow.extend(self.refresh_chart());
                    follow
                }
                Err(e) => {
                    self.record_failure(LedgerOperation::DeleteExpense, e);
                    Vec::new()
                }
            },
            LedgerResponse::DeletedBatch { ids, result } => match result {
                Ok(()) => {
                    debug!("Batch delete of {} expenses confirmed", ids.len());
                    self.selection.clear();
                    view.deselect_all();
                    self.on_period_change()
                }
                Err(e) => {
                    self.record_failure(LedgerOperation::DeleteSelected, e);
                    Vec::new()
                }
            },
        }
    }

    fn record_failure(&mut self, operation: LedgerOperation, error: ApiError) {
        error!("Failed to {}: {}", operation.describe(), error);
        self.failure = Some(Failure { operation, error });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::table_view::TableModel;
    use shared::{AmountSum, Month};

    /// Table double that records every capability call
    #[derive(Default)]
    struct RecordingTable {
        model: TableModel,
        calls: Vec<&'static str>,
    }

    impl TableView for RecordingTable {
        fn select_all(&mut self) {
            self.calls.push("select_all");
            self.model.select_all();
        }
        fn deselect_all(&mut self) {
            self.calls.push("deselect_all");
            self.model.deselect_all();
        }
        fn selected_ids(&self) -> Vec<ExpenseId> {
            self.model.selected_ids()
        }
        fn apply_add(&mut self, row: &Expense) {
            self.calls.push("apply_add");
            self.model.apply_add(row);
        }
        fn apply_remove(&mut self, ids: &[ExpenseId]) {
            self.calls.push("apply_remove");
            self.model.apply_remove(ids);
        }
        fn set_rows(&mut self, rows: &[Expense]) {
            self.calls.push("set_rows");
            self.model.set_rows(rows);
        }
    }

    fn expense(id: u64, expense_type: &str, amount: f64, period: Period) -> Expense {
        Expense {
            id: ExpenseId::from(id),
            expense_type: expense_type.to_string(),
            description: None,
            amount,
            currency: "RS".to_string(),
            month: period.month.ordinal(),
            year: period.year,
            created_at: Some("2024-12-05T08:30:00.000Z".to_string()),
        }
    }

    fn draft(backdate: Option<Period>) -> ExpenseDraft {
        ExpenseDraft {
            expense_type: "Food".to_string(),
            description: String::new(),
            amount: 75.0,
            currency: "RS".to_string(),
            backdate,
        }
    }

    fn total(expense_type: &str, amount: f64) -> ExpenseTypeTotal {
        ExpenseTypeTotal {
            expense_type: expense_type.to_string(),
            sum: AmountSum { amount: Some(amount) },
        }
    }

    fn fetch_tickets(requests: &[LedgerRequest]) -> (Ticket, Ticket) {
        let rows = requests.iter().find_map(|r| match r {
            LedgerRequest::FetchRows { ticket, .. } => Some(*ticket),
            _ => None,
        });
        let chart = requests.iter().find_map(|r| match r {
            LedgerRequest::FetchChart { ticket, .. } => Some(*ticket),
            _ => None,
        });
        (rows.unwrap(), chart.unwrap())
    }

    fn chart_requests(requests: &[LedgerRequest]) -> usize {
        requests
            .iter()
            .filter(|r| matches!(r, LedgerRequest::FetchChart { .. }))
            .count()
    }

    /// Controller at `period` with `rows` already loaded
    fn loaded(period: Period, rows: Vec<Expense>, table: &mut RecordingTable) -> LedgerController {
        let mut controller = LedgerController::new(period);
        let requests = controller.initialize();
        let (rows_ticket, chart_ticket) = fetch_tickets(&requests);
        controller.handle(LedgerResponse::Rows { ticket: rows_ticket, result: Ok(rows) }, table);
        controller.handle(
            LedgerResponse::Chart { ticket: chart_ticket, period, result: Ok(vec![]) },
            table,
        );
        table.calls.clear();
        controller
    }

    #[test]
    fn test_initialize_fetches_rows_and_chart_for_period() {
        let period = Period::new(Month::December, 2024);
        let mut controller = LedgerController::new(period);
        let requests = controller.initialize();

        assert_eq!(requests.len(), 2);
        assert!(matches!(requests[0], LedgerRequest::FetchRows { period: p, .. } if p == period));
        assert!(matches!(requests[1], LedgerRequest::FetchChart { period: p, .. } if p == period));
        assert!(controller.is_loading_rows());
        assert!(controller.is_loading_chart());
    }

    #[test]
    fn test_navigate_six_times_forward() {
        let mut table = RecordingTable::default();
        let mut controller = loaded(Period::new(Month::March, 2025), vec![], &mut table);

        for _ in 0..6 {
            let requests = controller.navigate(Direction::Next, &mut table);
            let active = controller.period();
            assert_eq!(requests.len(), 2);
            let rows_fetches: Vec<_> = requests
                .iter()
                .filter(|r| matches!(r, LedgerRequest::FetchRows { period, .. } if *period == active))
                .collect();
            let chart_fetches: Vec<_> = requests
                .iter()
                .filter(|r| matches!(r, LedgerRequest::FetchChart { period, .. } if *period == active))
                .collect();
            assert_eq!(rows_fetches.len(), 1);
            assert_eq!(chart_fetches.len(), 1);
        }

        assert_eq!(controller.period(), Period::new(Month::September, 2025));
    }

    #[test]
    fn test_navigate_wraps_year_and_clears_selection() {
        let period = Period::new(Month::December, 2024);
        let mut table = RecordingTable::default();
        let mut controller = loaded(period, vec![expense(1, "Food", 10.0, period)], &mut table);
        controller.select_all(&mut table);
        assert_eq!(controller.selection().len(), 1);

        controller.navigate(Direction::Next, &mut table);
        assert_eq!(controller.period(), Period::new(Month::January, 2025));
        assert!(controller.selection().is_empty());
        assert!(table.model.selected_ids().is_empty());

        controller.navigate(Direction::Previous, &mut table);
        controller.navigate(Direction::Previous, &mut table);
        assert_eq!(controller.period(), Period::new(Month::November, 2024));
    }

    #[test]
    fn test_stale_period_responses_are_discarded() {
        let march = Period::new(Month::March, 2025);
        let april = Period::new(Month::April, 2025);
        let mut table = RecordingTable::default();
        let mut controller = LedgerController::new(march);

        let (old_rows, old_chart) = fetch_tickets(&controller.initialize());
        let (new_rows, new_chart) = fetch_tickets(&controller.navigate(Direction::Next, &mut table));

        // the April responses arrive first
        controller.handle(
            LedgerResponse::Rows { ticket: new_rows, result: Ok(vec![expense(2, "Rent", 900.0, april)]) },
            &mut table,
        );
        controller.handle(
            LedgerResponse::Chart { ticket: new_chart, period: april, result: Ok(vec![total("Rent", 900.0)]) },
            &mut table,
        );

        // late March responses must not overwrite April
        let follow = controller.handle(
            LedgerResponse::Rows { ticket: old_rows, result: Ok(vec![expense(1, "Food", 5.0, march)]) },
            &mut table,
        );
        assert!(follow.is_empty());
        controller.handle(
            LedgerResponse::Chart { ticket: old_chart, period: march, result: Ok(vec![total("Food", 5.0)]) },
            &mut table,
        );

        assert_eq!(controller.rows().len(), 1);
        assert_eq!(controller.rows()[0].id, ExpenseId::from(2));
        assert_eq!(controller.chart().title, "Expense Composition April 2025");
        assert_eq!(controller.chart().total(), 900.0);
        assert_eq!(table.model.rows().len(), 1);
        assert!(!controller.is_loading_rows());
        assert!(!controller.is_loading_chart());
    }

    #[test]
    fn test_stale_response_before_current_one_is_discarded() {
        let march = Period::new(Month::March, 2025);
        let mut table = RecordingTable::default();
        let mut controller = LedgerController::new(march);

        let (old_rows, _) = fetch_tickets(&controller.initialize());
        let (new_rows, _) = fetch_tickets(&controller.navigate(Direction::Next, &mut table));

        controller.handle(
            LedgerResponse::Rows { ticket: old_rows, result: Ok(vec![expense(1, "Food", 5.0, march)]) },
            &mut table,
        );
        assert!(controller.rows().is_empty());
        assert!(controller.is_loading_rows());

        controller.handle(LedgerResponse::Rows { ticket: new_rows, result: Ok(vec![]) }, &mut table);
        assert!(!controller.is_loading_rows());
    }

    #[test]
    fn test_add_expense_for_active_period_is_appended() {
        let period = Period::new(Month::December, 2024);
        let mut table = RecordingTable::default();
        let mut controller = loaded(period, vec![expense(1, "Food", 10.0, period)], &mut table);

        let requests = controller.add_expense(draft(None));
        assert_eq!(requests, vec![LedgerRequest::Create { draft: draft(None) }]);

        let follow = controller.handle(
            LedgerResponse::Created { result: Ok(expense(3, "Food", 75.0, period)) },
            &mut table,
        );

        assert_eq!(controller.rows().len(), 2);
        assert_eq!(table.calls, vec!["apply_add"]);
        assert_eq!(table.model.rows().len(), 2);
        assert_eq!(chart_requests(&follow), 1);
        assert_eq!(follow.len(), 1);
    }

    #[test]
    fn test_created_count_advances_only_on_confirmed_create() {
        let period = Period::new(Month::December, 2024);
        let mut table = RecordingTable::default();
        let mut controller = loaded(period, vec![], &mut table);

        controller.add_expense(draft(None));
        controller.handle(
            LedgerResponse::Created { result: Err(ApiError::Status { status: 400, body: String::new() }) },
            &mut table,
        );
        assert_eq!(controller.created_count(), 0);

        controller.add_expense(draft(None));
        controller.handle(LedgerResponse::Created { result: Ok(expense(3, "Food", 75.0, period)) }, &mut table);
        assert_eq!(controller.created_count(), 1);
    }

    #[test]
    fn test_add_expense_for_other_period_is_not_shown() {
        let period = Period::new(Month::December, 2024);
        let past = Period::new(Month::June, 2024);
        let mut table = RecordingTable::default();
        let mut controller = loaded(period, vec![], &mut table);

        controller.add_expense(draft(Some(past)));
        let follow = controller.handle(
            LedgerResponse::Created { result: Ok(expense(4, "Food", 75.0, past)) },
            &mut table,
        );

        assert!(controller.rows().is_empty());
        assert!(table.calls.is_empty());
        // the chart is refreshed regardless
        assert_eq!(chart_requests(&follow), 1);

        // it shows up once navigation reaches its period and rows are refetched
        let (rows_ticket, _) = fetch_tickets(&controller.jump_to(past, &mut table));
        controller.handle(
            LedgerResponse::Rows { ticket: rows_ticket, result: Ok(vec![expense(4, "Food", 75.0, past)]) },
            &mut table,
        );
        assert_eq!(controller.rows().len(), 1);
    }

    #[test]
    fn test_delete_one_removes_row_and_selection() {
        let period = Period::new(Month::December, 2024);
        let mut table = RecordingTable::default();
        let mut controller = loaded(
            period,
            vec![expense(1, "Accessories", 500.0, period), expense(2, "Food", 200.0, period)],
            &mut table,
        );
        controller.select_all(&mut table);
        table.calls.clear();

        let requests = controller.delete_one(ExpenseId::from(1));
        assert_eq!(requests, vec![LedgerRequest::DeleteOne { id: ExpenseId::from(1) }]);

        let follow = controller.handle(
            LedgerResponse::DeletedOne { id: ExpenseId::from(1), result: Ok(()) },
            &mut table,
        );

        assert!(controller.rows().iter().all(|row| row.id != ExpenseId::from(1)));
        assert!(!controller.selection().contains(&ExpenseId::from(1)));
        assert!(controller.selection().contains(&ExpenseId::from(2)));
        assert_eq!(table.calls, vec!["apply_remove"]);
        assert_eq!(follow.len(), 1);
        assert_eq!(chart_requests(&follow), 1);
    }

    #[test]
    fn test_batch_delete_scenario() {
        let period = Period::new(Month::December, 2024);
        let mut table = RecordingTable::default();
        let mut controller = loaded(
            period,
            vec![expense(1, "Accessories", 500.0, period), expense(2, "Food", 200.0, period)],
            &mut table,
        );

        table.model.toggle(&ExpenseId::from(1));
        table.model.toggle(&ExpenseId::from(2));
        controller.on_selection_changed(table.model.selected_ids());
        assert_eq!(controller.selection().len(), 2);

        let requests = controller.delete_selected();
        assert_eq!(
            requests,
            vec![LedgerRequest::DeleteBatch { ids: vec![ExpenseId::from(1), ExpenseId::from(2)] }]
        );

        let follow = controller.handle(
            LedgerResponse::DeletedBatch {
                ids: vec![ExpenseId::from(1), ExpenseId::from(2)],
                result: Ok(()),
            },
            &mut table,
        );
        assert!(controller.selection().is_empty());
        assert_eq!(follow.len(), 2);
        assert_eq!(chart_requests(&follow), 1);

        let (rows_ticket, chart_ticket) = fetch_tickets(&follow);
        controller.handle(LedgerResponse::Rows { ticket: rows_ticket, result: Ok(vec![]) }, &mut table);
        controller.handle(
            LedgerResponse::Chart { ticket: chart_ticket, period, result: Ok(vec![]) },
            &mut table,
        );

        assert!(controller.rows().is_empty());
        assert!(table.model.rows().is_empty());
        assert!(controller.chart().is_empty());
        assert_eq!(controller.chart().title, "Expense Composition December 2024");
    }

    #[test]
    fn test_delete_selected_with_empty_selection_is_noop() {
        let mut controller = LedgerController::new(Period::new(Month::May, 2025));
        assert!(controller.delete_selected().is_empty());
    }

    #[test]
    fn test_failures_leave_state_unchanged_and_are_surfaced() {
        let period = Period::new(Month::December, 2024);
        let mut table = RecordingTable::default();
        let mut controller = loaded(period, vec![expense(1, "Food", 10.0, period)], &mut table);
        controller.select_all(&mut table);
        table.calls.clear();

        let follow = controller.handle(
            LedgerResponse::DeletedOne {
                id: ExpenseId::from(1),
                result: Err(ApiError::Network("offline".to_string())),
            },
            &mut table,
        );
        assert!(follow.is_empty());
        assert_eq!(controller.rows().len(), 1);
        assert_eq!(controller.selection().len(), 1);
        assert!(table.calls.is_empty());

        let failure = controller.failure().unwrap();
        assert_eq!(failure.operation, LedgerOperation::DeleteExpense);
        assert_eq!(
            failure.message(),
            "Could not delete the expense: the expenses service could not be reached."
        );

        let follow = controller.handle(
            LedgerResponse::DeletedBatch {
                ids: vec![ExpenseId::from(1)],
                result: Err(ApiError::Status { status: 500, body: "boom".to_string() }),
            },
            &mut table,
        );
        assert!(follow.is_empty());
        assert_eq!(controller.selection().len(), 1);
        assert_eq!(controller.failure().unwrap().operation, LedgerOperation::DeleteSelected);

        controller.dismiss_failure();
        assert!(controller.failure().is_none());
    }

    #[test]
    fn test_failed_row_fetch_keeps_previous_rows() {
        let period = Period::new(Month::December, 2024);
        let mut table = RecordingTable::default();
        let mut controller = loaded(period, vec![expense(1, "Food", 10.0, period)], &mut table);

        let (rows_ticket, _) = fetch_tickets(&controller.on_period_change());
        controller.handle(
            LedgerResponse::Rows { ticket: rows_ticket, result: Err(ApiError::Decode("bad json".to_string())) },
            &mut table,
        );

        assert_eq!(controller.rows().len(), 1);
        assert!(!controller.is_loading_rows());
        assert_eq!(controller.failure().unwrap().operation, LedgerOperation::LoadExpenses);
    }

    #[test]
    fn test_failed_fetch_after_navigation_shows_no_rows_from_previous_period() {
        let march = Period::new(Month::March, 2025);
        let mut table = RecordingTable::default();
        let mut controller = loaded(march, vec![expense(1, "Food", 10.0, march)], &mut table);

        let (rows_ticket, _) = fetch_tickets(&controller.navigate(Direction::Next, &mut table));
        assert!(controller.rows().is_empty());
        assert!(table.model.rows().is_empty());

        controller.handle(
            LedgerResponse::Rows { ticket: rows_ticket, result: Err(ApiError::Network("offline".to_string())) },
            &mut table,
        );
        let active = controller.period();
        assert!(controller.rows().iter().all(|row| active.matches(row.month, row.year)));
        assert!(table.model.rows().is_empty());

        // select all has nothing from March to act on
        controller.select_all(&mut table);
        assert!(controller.delete_selected().is_empty());
    }

    #[test]
    fn test_delete_during_row_fetch_supersedes_the_fetch() {
        let period = Period::new(Month::December, 2024);
        let mut table = RecordingTable::default();
        let rows = vec![expense(1, "Food", 10.0, period), expense(2, "Rent", 20.0, period)];
        let mut controller = loaded(period, rows.clone(), &mut table);

        let (pending, _) = fetch_tickets(&controller.on_period_change());
        let follow = controller.handle(
            LedgerResponse::DeletedOne { id: ExpenseId::from(1), result: Ok(()) },
            &mut table,
        );
        let (fresh, _) = fetch_tickets(&follow);
        assert_ne!(fresh, pending);
        assert_eq!(chart_requests(&follow), 1);
        assert!(matches!(follow.last(), Some(LedgerRequest::FetchChart { .. })));

        // the older fetch still lists the deleted row and must not restore it
        controller.handle(LedgerResponse::Rows { ticket: pending, result: Ok(rows) }, &mut table);
        assert!(controller.rows().iter().all(|row| row.id != ExpenseId::from(1)));
        assert_eq!(table.model.rows().len(), 1);

        controller.handle(
            LedgerResponse::Rows { ticket: fresh, result: Ok(vec![expense(2, "Rent", 20.0, period)]) },
            &mut table,
        );
        assert_eq!(controller.rows().len(), 1);
        assert!(!controller.is_loading_rows());
    }

    #[test]
    fn test_add_during_row_fetch_supersedes_the_fetch() {
        let period = Period::new(Month::December, 2024);
        let mut table = RecordingTable::default();
        let mut controller = loaded(period, vec![expense(1, "Food", 10.0, period)], &mut table);

        let (pending, _) = fetch_tickets(&controller.on_period_change());
        let follow = controller.handle(
            LedgerResponse::Created { result: Ok(expense(5, "Food", 75.0, period)) },
            &mut table,
        );
        let (fresh, _) = fetch_tickets(&follow);
        assert_ne!(fresh, pending);

        controller.handle(
            LedgerResponse::Rows { ticket: pending, result: Ok(vec![expense(1, "Food", 10.0, period)]) },
            &mut table,
        );
        assert!(controller.rows().iter().any(|row| row.id == ExpenseId::from(5)));
    }

    #[test]
    fn test_navigate_past_last_year_is_noop() {
        let last = Period::new(Month::December, i32::MAX);
        let mut table = RecordingTable::default();
        let mut controller = loaded(last, vec![], &mut table);

        assert!(controller.navigate(Direction::Next, &mut table).is_empty());
        assert_eq!(controller.period(), last);
    }

    #[test]
    fn test_failure_of_superseded_chart_request_is_silent() {
        let mut table = RecordingTable::default();
        let mut controller = LedgerController::new(Period::new(Month::May, 2025));
        let (_, old_chart) = fetch_tickets(&controller.initialize());
        controller.refresh_chart();

        controller.handle(
            LedgerResponse::Chart {
                ticket: old_chart,
                period: Period::new(Month::May, 2025),
                result: Err(ApiError::Network("timeout".to_string())),
            },
            &mut table,
        );
        assert!(controller.failure().is_none());
        assert!(controller.is_loading_chart());
    }

    #[test]
    fn test_select_all_and_clear_selection_drive_the_view() {
        let period = Period::new(Month::December, 2024);
        let mut table = RecordingTable::default();
        let mut controller = loaded(
            period,
            vec![expense(1, "Food", 10.0, period), expense(2, "Rent", 20.0, period)],
            &mut table,
        );

        controller.select_all(&mut table);
        assert_eq!(controller.selection().len(), 2);
        assert!(table.model.all_checked());

        controller.clear_selection(&mut table);
        assert!(controller.selection().is_empty());
        assert!(table.model.selected_ids().is_empty());
        // clearing never removes rows
        assert_eq!(controller.rows().len(), 2);
        assert_eq!(table.calls, vec!["select_all", "deselect_all"]);
    }

    #[test]
    fn test_jump_to_active_period_is_noop() {
        let period = Period::new(Month::May, 2025);
        let mut table = RecordingTable::default();
        let mut controller = loaded(period, vec![], &mut table);

        assert!(controller.jump_to(period, &mut table).is_empty());
        assert!(table.calls.is_empty());

        let requests = controller.jump_to(Period::new(Month::May, 2019), &mut table);
        assert_eq!(requests.len(), 2);
        assert_eq!(controller.period(), Period::new(Month::May, 2019));
    }

    #[test]
    fn test_toggle_add_panel() {
        let mut controller = LedgerController::new(Period::new(Month::May, 2025));
        assert!(!controller.is_add_panel_open());
        controller.toggle_add_panel();
        assert!(controller.is_add_panel_open());
        controller.toggle_add_panel();
        assert!(!controller.is_add_panel_open());
    }
}
