use std::cell::RefCell;
use std::rc::Rc;

use shared::{Direction, ExpenseDraft, ExpenseId, Period};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::repository::execute;
use crate::state::{ChartData, LedgerController, LedgerRequest, TableModel, TableView};

/// Controller plus the table model it drives
pub struct LedgerSession {
    pub controller: LedgerController,
    pub table: TableModel,
}

/// Render snapshot of the ledger
#[derive(Clone, PartialEq)]
pub struct LedgerState {
    pub period: Period,
    pub table: TableModel,
    pub selected_count: usize,
    pub chart: ChartData,
    pub add_panel_open: bool,
    pub loading_rows: bool,
    pub loading_chart: bool,
    pub failure: Option<String>,
    pub created_count: u64,
}

pub struct UseLedgerResult {
    pub state: LedgerState,
    pub actions: UseLedgerActions,
}

#[derive(Clone)]
pub struct UseLedgerActions {
    pub navigate: Callback<Direction>,
    pub jump_to: Callback<Period>,
    pub add_expense: Callback<ExpenseDraft>,
    pub delete_one: Callback<ExpenseId>,
    pub delete_selected: Callback<()>,
    pub select_all: Callback<()>,
    pub clear_selection: Callback<()>,
    pub toggle_row: Callback<ExpenseId>,
    pub toggle_add_panel: Callback<()>,
    pub refresh_chart: Callback<()>,
    pub dismiss_failure: Callback<()>,
}

/// Executes ledger requests and feeds each outcome back into the session.
/// Every state change is followed by a re-render.
#[derive(Clone)]
struct Dispatcher {
    session: Rc<RefCell<LedgerSession>>,
    api_client: ApiClient,
    rerender: UseForceUpdateHandle,
}

impl Dispatcher {
    fn apply<F>(&self, operation: F)
    where
        F: FnOnce(&mut LedgerController, &mut TableModel) -> Vec<LedgerRequest>,
    {
        let requests = {
            let mut session = self.session.borrow_mut();
            let LedgerSession { controller, table } = &mut *session;
            operation(controller, table)
        };
        self.run(requests);
    }

    fn run(&self, requests: Vec<LedgerRequest>) {
        self.rerender.force_update();
        for request in requests {
            let dispatcher = self.clone();
            spawn_local(async move {
                let response = execute(&dispatcher.api_client, request).await;
                dispatcher.apply(|controller, table| controller.handle(response, table));
            });
        }
    }
}

#[hook]
pub fn use_ledger(api_client: &ApiClient, initial_period: Period) -> UseLedgerResult {
    let session = use_mut_ref(|| LedgerSession {
        controller: LedgerController::new(initial_period),
        table: TableModel::new(),
    });
    let rerender = use_force_update();

    let dispatcher = Dispatcher {
        session: session.clone(),
        api_client: api_client.clone(),
        rerender,
    };

    // Initial load
    {
        let dispatcher = dispatcher.clone();
        use_effect_with((), move |_| {
            dispatcher.apply(|controller, _| controller.initialize());
            || ()
        });
    }

    let navigate = {
        let dispatcher = dispatcher.clone();
        use_callback((), move |direction: Direction, _| {
            dispatcher.apply(|controller, table| controller.navigate(direction, table));
        })
    };

    let jump_to = {
        let dispatcher = dispatcher.clone();
        use_callback((), move |period: Period, _| {
            dispatcher.apply(|controller, table| controller.jump_to(period, table));
        })
    };

    let add_expense = {
        let dispatcher = dispatcher.clone();
        use_callback((), move |draft: ExpenseDraft, _| {
            dispatcher.apply(|controller, _| controller.add_expense(draft));
        })
    };

    let delete_one = {
        let dispatcher = dispatcher.clone();
        use_callback((), move |id: ExpenseId, _| {
            dispatcher.apply(|controller, _| controller.delete_one(id));
        })
    };

    let delete_selected = {
        let dispatcher = dispatcher.clone();
        use_callback((), move |_: (), _| {
            dispatcher.apply(|controller, _| controller.delete_selected());
        })
    };

    let select_all = {
        let dispatcher = dispatcher.clone();
        use_callback((), move |_: (), _| {
            dispatcher.apply(|controller, table| {
                controller.select_all(table);
                Vec::new()
            });
        })
    };

    let clear_selection = {
        let dispatcher = dispatcher.clone();
        use_callback((), move |_: (), _| {
            dispatcher.apply(|controller, table| {
                controller.clear_selection(table);
                Vec::new()
            });
        })
    };

    // Checkbox clicks update the table first, which then reports its selection
    let toggle_row = {
        let dispatcher = dispatcher.clone();
        use_callback((), move |id: ExpenseId, _| {
            dispatcher.apply(|controller, table| {
                table.toggle(&id);
                controller.on_selection_changed(table.selected_ids());
                Vec::new()
            });
        })
    };

    let toggle_add_panel = {
        let dispatcher = dispatcher.clone();
        use_callback((), move |_: (), _| {
            dispatcher.apply(|controller, _| {
                controller.toggle_add_panel();
                Vec::new()
            });
        })
    };

    let refresh_chart = {
        let dispatcher = dispatcher.clone();
        use_callback((), move |_: (), _| {
            dispatcher.apply(|controller, _| controller.refresh_chart());
        })
    };

    let dismiss_failure = {
        let dispatcher = dispatcher.clone();
        use_callback((), move |_: (), _| {
            dispatcher.apply(|controller, _| {
                controller.dismiss_failure();
                Vec::new()
            });
        })
    };

    let state = {
        let session = session.borrow();
        let controller = &session.controller;
        LedgerState {
            period: controller.period(),
            table: session.table.clone(),
            selected_count: controller.selection().len(),
            chart: controller.chart().clone(),
            add_panel_open: controller.is_add_panel_open(),
            loading_rows: controller.is_loading_rows(),
            loading_chart: controller.is_loading_chart(),
            failure: controller.failure().map(|failure| failure.message()),
            created_count: controller.created_count(),
        }
    };

    let actions = UseLedgerActions {
        navigate,
        jump_to,
        add_expense,
        delete_one,
        delete_selected,
        select_all,
        clear_selection,
        toggle_row,
        toggle_add_panel,
        refresh_chart,
        dismiss_failure,
    };

    UseLedgerResult { state, actions }
}
