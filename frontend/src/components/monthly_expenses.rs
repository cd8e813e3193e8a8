use shared::Period;
use yew::prelude::*;

use crate::components::add_expense_form::AddExpenseForm;
use crate::components::expense_chart::ExpenseChart;
use crate::components::ledger_table::LedgerTable;
use crate::components::period_navigator::PeriodNavigator;
use crate::config::AppConfig;
use crate::hooks::use_ledger;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct MonthlyExpensesProps {
    pub config: AppConfig,
    pub initial_period: Period,
}

/// Toolbar text for an action over the current selection, e.g. "Delete :2"
fn selection_label(action: &str, selected: usize) -> String {
    format!("{} :{}", action, selected)
}

#[function_component(MonthlyExpenses)]
pub fn monthly_expenses(props: &MonthlyExpensesProps) -> Html {
    let api_client = use_memo(props.config.clone(), ApiClient::from_config);
    let ledger = use_ledger(&*api_client, props.initial_period);
    let state = &ledger.state;
    let actions = &ledger.actions;

    let selected = state.selected_count;

    // Chart labels follow the currency of the loaded rows
    let chart_currency = state
        .table
        .rows()
        .first()
        .map(|row| row.currency.clone())
        .unwrap_or_else(|| props.config.default_currency.clone());

    let on_delete_selected = {
        let delete_selected = actions.delete_selected.clone();
        Callback::from(move |_: MouseEvent| delete_selected.emit(()))
    };
    let on_clear_selection = {
        let clear_selection = actions.clear_selection.clone();
        Callback::from(move |_: MouseEvent| clear_selection.emit(()))
    };
    let on_select_all = {
        let select_all = actions.select_all.clone();
        Callback::from(move |_: MouseEvent| select_all.emit(()))
    };
    let on_toggle_add_panel = {
        let toggle_add_panel = actions.toggle_add_panel.clone();
        Callback::from(move |_: MouseEvent| toggle_add_panel.emit(()))
    };
    let on_refresh_chart = {
        let refresh_chart = actions.refresh_chart.clone();
        Callback::from(move |_: MouseEvent| refresh_chart.emit(()))
    };
    let on_dismiss_failure = {
        let dismiss_failure = actions.dismiss_failure.clone();
        Callback::from(move |_: MouseEvent| dismiss_failure.emit(()))
    };

    html! {
        <main class="main">
            <div class="container">
                <PeriodNavigator
                    period={state.period}
                    on_navigate={actions.navigate.clone()}
                    on_jump={actions.jump_to.clone()}
                />

                {if let Some(message) = state.failure.as_ref() {
                    html! {
                        <div class="form-message error" role="alert">
                            <span>{message}</span>
                            <button type="button" class="dismiss-button" onclick={on_dismiss_failure}>
                                {"Dismiss"}
                            </button>
                        </div>
                    }
                } else {
                    html! {}
                }}

                <div class="buttons-container">
                    {if selected > 0 {
                        html! {
                            <>
                                <button class="delete-selected-button" onclick={on_delete_selected}>
                                    {selection_label("Delete", selected)}
                                </button>
                                <button class="clear-selection-button" onclick={on_clear_selection}>
                                    {selection_label("Clear", selected)}
                                </button>
                                <button class="select-all-button" onclick={on_select_all}>
                                    {"Select All"}
                                </button>
                            </>
                        }
                    } else {
                        html! {}
                    }}
                    <button class="add-expense-button" onclick={on_toggle_add_panel}>
                        {if state.add_panel_open { "Close" } else { "Add Expense" }}
                    </button>
                </div>

                {if state.add_panel_open {
                    html! {
                        <AddExpenseForm
                            api_client={(*api_client).clone()}
                            default_expense_type={props.config.default_expense_type.clone()}
                            default_currency={props.config.default_currency.clone()}
                            on_submit={actions.add_expense.clone()}
                            created_count={state.created_count}
                        />
                    }
                } else {
                    html! {}
                }}

                <div class="ledger-layout">
                    <LedgerTable
                        table={state.table.clone()}
                        loading={state.loading_rows}
                        on_toggle_row={actions.toggle_row.clone()}
                        on_delete={actions.delete_one.clone()}
                    />

                    <section class="chart-section">
                        <button class="refresh-chart-button" title="Refresh chart" onclick={on_refresh_chart}>
                            {"refresh"}
                        </button>
                        <ExpenseChart
                            chart={state.chart.clone()}
                            loading={state.loading_chart}
                            currency={chart_currency}
                        />
                    </section>
                </div>
            </div>
        </main>
    }
}
