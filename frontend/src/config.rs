//! Build-time configuration for the dashboard.
//!
//! Values are baked in at compile time (`EXPENSES_API_BASE_URL`,
//! `EXPENSES_LOG_LEVEL`) since the bundle runs in the browser.

use log::LevelFilter;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_EXPENSE_TYPE: &str = "Accessories";
pub const DEFAULT_CURRENCY: &str = "RS";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub log_level: LevelFilter,
    pub default_expense_type: String,
    pub default_currency: String,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("EXPENSES_API_BASE_URL"),
            option_env!("EXPENSES_LOG_LEVEL"),
        )
    }

    fn from_values(base_url: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base_url = base_url
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .to_string();

        let log_level = log_level
            .and_then(|level| level.trim().parse::<LevelFilter>().ok())
            .unwrap_or(LevelFilter::Info);

        Self {
            api_base_url,
            log_level,
            default_expense_type: DEFAULT_EXPENSE_TYPE.to_string(),
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}
