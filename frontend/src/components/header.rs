use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    #[prop_or(AttrValue::from("Monthly Expenses Tracker"))]
    pub title: AttrValue,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h3>{props.title.clone()}</h3>
            </div>
        </header>
    }
}
