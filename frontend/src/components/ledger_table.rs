use shared::ExpenseId;
use yew::prelude::*;

use crate::services::format::{format_amount, format_date};
use crate::state::TableModel;

#[derive(Properties, PartialEq)]
pub struct LedgerTableProps {
    pub table: TableModel,
    pub loading: bool,
    pub on_toggle_row: Callback<ExpenseId>,
    pub on_delete: Callback<ExpenseId>,
}

#[function_component(LedgerTable)]
pub fn ledger_table(props: &LedgerTableProps) -> Html {
    let rows = props.table.rows();

    html! {
        <div class="table-container">
            {if props.loading {
                html! { <div class="loading">{"Loading expenses..."}</div> }
            } else {
                html! {}
            }}
            <table class="transactions-table">
                <thead>
                    <tr>
                        <th></th>
                        <th>{"Date"}</th>
                        <th>{"Type"}</th>
                        <th>{"Description"}</th>
                        <th>{"Amount"}</th>
                        <th>{"Action"}</th>
                    </tr>
                </thead>
                <tbody>
                    {if rows.is_empty() && !props.loading {
                        html! {
                            <tr>
                                <td colspan="6" class="empty">{"No expenses for this month"}</td>
                            </tr>
                        }
                    } else {
                        html! {}
                    }}
                    {for rows.iter().map(|expense| {
                        let on_toggle = {
                            let on_toggle_row = props.on_toggle_row.clone();
                            let id = expense.id.clone();
                            Callback::from(move |_: Event| on_toggle_row.emit(id.clone()))
                        };
                        let on_delete = {
                            let on_delete = props.on_delete.clone();
                            let id = expense.id.clone();
                            Callback::from(move |_: MouseEvent| on_delete.emit(id.clone()))
                        };
                        let checked = props.table.is_checked(&expense.id);

                        html! {
                            <tr key={expense.id.to_string()} class={classes!(checked.then_some("selected"))}>
                                <td>
                                    <input type="checkbox" checked={checked} onchange={on_toggle} />
                                </td>
                                <td class="date">{format_date(expense.created_at.as_deref())}</td>
                                <td>{&expense.expense_type}</td>
                                <td class="description">
                                    {expense.description.clone().unwrap_or_default()}
                                </td>
                                <td class="amount">{format_amount(&expense.currency, expense.amount)}</td>
                                <td>
                                    <button title="Delete" style="margin: 0 5px;" onclick={on_delete}>
                                        {"🗑"}
                                    </button>
                                </td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        </div>
    }
}
