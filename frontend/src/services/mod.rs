pub mod api;
pub mod format;
pub mod logging;
pub mod repository;
