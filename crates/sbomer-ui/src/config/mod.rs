pub mod loader;
pub mod schema;

pub use loader::{apply_env_overrides, load_config, load_config_from_str, load_dashboard_config};
pub use schema::{DashboardConfig, PAGE_SIZES};
