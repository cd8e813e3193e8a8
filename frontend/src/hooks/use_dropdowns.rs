use shared::DropdownField;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::repository::ExpenseRepository;

/// Server-provided choices for the entry form
#[derive(Clone, Default, PartialEq)]
pub struct Vocabulary {
    pub expense_types: Vec<String>,
    pub currencies: Vec<String>,
}

#[hook]
pub fn use_dropdowns(api_client: &ApiClient) -> Vocabulary {
    let expense_types = use_state(Vec::<String>::new);
    let currencies = use_state(Vec::<String>::new);

    {
        let api_client = api_client.clone();
        let expense_types = expense_types.clone();
        let currencies = currencies.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api_client.custom_dropdown(DropdownField::ExpenseType).await {
                    Ok(values) => expense_types.set(values),
                    Err(e) => log::error!("Failed to fetch expense types: {}", e),
                }
                match api_client.custom_dropdown(DropdownField::Currency).await {
                    Ok(values) => currencies.set(values),
                    Err(e) => log::error!("Failed to fetch currencies: {}", e),
                }
            });
            || ()
        });
    }

    Vocabulary {
        expense_types: (*expense_types).clone(),
        currencies: (*currencies).clone(),
    }
}
