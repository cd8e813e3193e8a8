use shared::{ExpenseDraft, Month};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::modal::Modal;
use crate::hooks::use_dropdowns;
use crate::services::api::ApiClient;
use crate::state::{ExpenseForm, FormErrors};

#[derive(Properties, PartialEq)]
pub struct AddExpenseFormProps {
    pub api_client: ApiClient,
    pub default_expense_type: AttrValue,
    pub default_currency: AttrValue,
    pub on_submit: Callback<ExpenseDraft>,
    /// Confirmed creates so far; the entry fields reset when it advances
    pub created_count: u64,
}

/// Make sure the current choice is selectable even before the vocabulary loads
fn options_with(values: &[String], current: &str) -> Vec<String> {
    let mut options = values.to_vec();
    if !current.is_empty() && !options.iter().any(|value| value == current) {
        options.insert(0, current.to_string());
    }
    options
}

#[function_component(AddExpenseForm)]
pub fn add_expense_form(props: &AddExpenseFormProps) -> Html {
    let vocabulary = use_dropdowns(&props.api_client);
    let form = {
        let default_expense_type = props.default_expense_type.clone();
        let default_currency = props.default_currency.clone();
        use_state(move || ExpenseForm::new(&default_expense_type, &default_currency))
    };
    let errors = use_state(|| Option::<FormErrors>::None);

    // Keep what was typed until the server confirms the create
    {
        let form = form.clone();
        let seen = use_mut_ref(|| props.created_count);
        use_effect_with(props.created_count, move |count| {
            if *seen.borrow() != *count {
                *seen.borrow_mut() = *count;
                let mut next = (*form).clone();
                next.clear_entry();
                form.set(next);
            }
            || ()
        });
    }

    let on_currency_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.currency = select.value();
            form.set(next);
        })
    };

    let on_type_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.expense_type = select.value();
            form.set(next);
        })
    };

    let on_amount_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.amount = input.value();
            form.set(next);
        })
    };

    let on_description_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.description = input.value();
            form.set(next);
        })
    };

    let on_toggle_past = {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*form).clone();
            next.toggle_past();
            form.set(next);
        })
    };

    let on_month_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.month = select.value().parse::<Month>().ok();
            form.set(next);
        })
    };

    let on_year_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.year = input.value();
            form.set(next);
        })
    };

    let on_submit = {
        let form = form.clone();
        let errors = errors.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match form.validate() {
                Ok(draft) => on_submit.emit(draft),
                Err(violations) => {
                    log::debug!("Expense form rejected: {:?}", violations);
                    errors.set(Some(violations));
                }
            }
        })
    };

    let on_close_errors = {
        let errors = errors.clone();
        Callback::from(move |_: ()| errors.set(None))
    };

    let currencies = options_with(&vocabulary.currencies, &form.currency);
    let expense_types = options_with(&vocabulary.expense_types, &form.expense_type);

    html! {
        <section class="add-expense-section">
            <Modal show={errors.is_some()} on_close={on_close_errors}>
                <h3>{"Form Errors"}</h3>
                <ul class="form-errors">
                    {for errors.iter().flat_map(|errors| errors.messages()).map(|message| html! {
                        <li>{message}</li>
                    })}
                </ul>
            </Modal>

            <form class="add-expense-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="currency">{"Currency"}</label>
                    <select id="currency" onchange={on_currency_change}>
                        {for currencies.iter().map(|currency| html! {
                            <option value={currency.clone()} selected={*currency == form.currency}>
                                {currency}
                            </option>
                        })}
                    </select>
                </div>

                <div class="form-group">
                    <label for="expense-type">{"Expense Type"}</label>
                    <select id="expense-type" onchange={on_type_change}>
                        {for expense_types.iter().map(|expense_type| html! {
                            <option value={expense_type.clone()} selected={*expense_type == form.expense_type}>
                                {expense_type}
                            </option>
                        })}
                    </select>
                </div>

                <div class="form-group">
                    <label for="amount">{"Amount"}</label>
                    <input
                        type="number"
                        id="amount"
                        placeholder="0.00"
                        step="0.01"
                        min="0"
                        value={form.amount.clone()}
                        onchange={on_amount_change}
                    />
                </div>

                <div class="form-group">
                    <label for="description">{"Description"}</label>
                    <input
                        type="text"
                        id="description"
                        placeholder="What was it for?"
                        value={form.description.clone()}
                        onchange={on_description_change}
                    />
                </div>

                <button type="button" class="toggle-past-button" onclick={on_toggle_past}>
                    {if form.past { "Add Preset Expenses" } else { "Add Past Expenses" }}
                </button>

                {if form.past {
                    html! {
                        <div class="past-expense-fields">
                            <div class="form-group">
                                <label for="past-month">{"Month"}</label>
                                <select id="past-month" onchange={on_month_change}>
                                    <option value="" selected={form.month.is_none()}>{"Select month"}</option>
                                    {for Month::ALL.iter().map(|month| html! {
                                        <option value={month.name()} selected={form.month == Some(*month)}>
                                            {month.name()}
                                        </option>
                                    })}
                                </select>
                            </div>
                            <div class="form-group">
                                <label for="past-year">{"Year"}</label>
                                <input
                                    type="number"
                                    id="past-year"
                                    placeholder="2024"
                                    value={form.year.clone()}
                                    onchange={on_year_change}
                                />
                            </div>
                        </div>
                    }
                } else {
                    html! {}
                }}

                <button type="submit" class="submit-button">{"Add Expense"}</button>
            </form>
        </section>
    }
}
