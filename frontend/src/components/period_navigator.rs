use shared::{Direction, Month, Period};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PeriodNavigatorProps {
    pub period: Period,
    pub on_navigate: Callback<Direction>,
    pub on_jump: Callback<Period>,
}

#[function_component(PeriodNavigator)]
pub fn period_navigator(props: &PeriodNavigatorProps) -> Html {
    let period = props.period;

    let on_previous = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(Direction::Previous))
    };

    let on_next = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(Direction::Next))
    };

    let on_month_change = {
        let on_jump = props.on_jump.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(month) = select.value().parse::<Month>() {
                on_jump.emit(Period::new(month, period.year));
            }
        })
    };

    // Partially typed years are ignored until they parse
    let on_year_change = {
        let on_jump = props.on_jump.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(year) = input.value().trim().parse::<i32>() {
                on_jump.emit(Period::new(period.month, year));
            }
        })
    };

    html! {
        <div class="dropdowns-container">
            <div class="dropdown">
                <button class="add-expense-button" title="Previous Month" onclick={on_previous}>
                    {"←"}
                </button>
            </div>
            <div class="dropdown">
                <label for="month">{"Month:"}</label>
                <select id="month" onchange={on_month_change}>
                    {for Month::ALL.iter().map(|month| html! {
                        <option value={month.name()} selected={*month == period.month}>
                            {month.name()}
                        </option>
                    })}
                </select>
            </div>
            <div class="dropdown">
                <label for="year">{"Year:"}</label>
                <input
                    id="year"
                    type="number"
                    style="text-align: center;"
                    value={period.year.to_string()}
                    onchange={on_year_change}
                />
            </div>
            <div class="dropdown">
                <button class="add-expense-button" title="Next Month" onclick={on_next}>
                    {"→"}
                </button>
            </div>
        </div>
    }
}
