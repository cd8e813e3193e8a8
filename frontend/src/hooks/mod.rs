pub mod use_dropdowns;
pub mod use_ledger;

pub use use_dropdowns::use_dropdowns;
pub use use_ledger::use_ledger;
