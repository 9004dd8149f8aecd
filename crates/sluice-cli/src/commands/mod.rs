//! Command implementations.

pub mod config;
pub mod evaluate;
pub mod series_id;

pub use self::config::execute_config;
pub use self::evaluate::execute_evaluate;
pub use self::series_id::execute_series_id;
