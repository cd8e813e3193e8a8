use shared::Period;
use yew::prelude::*;

mod components;
mod config;
mod error;
mod hooks;
mod services;
mod state;

use components::header::Header;
use components::monthly_expenses::MonthlyExpenses;
use config::AppConfig;

#[derive(Properties, PartialEq)]
struct AppProps {
    config: AppConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    // Start on the month the page was opened in
    let initial_period = use_state(Period::current);

    html! {
        <div class="app">
            <Header />
            <MonthlyExpenses config={props.config.clone()} initial_period={*initial_period} />
        </div>
    }
}

fn main() {
    let config = AppConfig::from_build_env();
    services::logging::init(config.log_level);
    log::info!("Monthly expenses dashboard using {}", config.api_base_url);

    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
