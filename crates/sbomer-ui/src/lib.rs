pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod pages;
pub mod query_error;
pub mod render;
pub mod resource;
pub mod routes;
pub mod status;
pub mod table;
pub mod telemetry;
pub mod theme;
pub mod timefmt;

pub use api::{ApiError, Page, SbomerClient};
pub use config::{load_config, load_dashboard_config, DashboardConfig};
pub use error::{ConfigError, Result, ThemeError, UiError};
pub use pages::{PageController, PageView, RenderedPage};
pub use query_error::{extract_query_error_message_details, QueryErrorDetails};
pub use render::render_page;
pub use resource::{AsyncState, PageQuery, ResourceLoader};
pub use routes::{app_routes, resolve, Location, PageKind};
pub use theme::{Theme, ThemeStore};
pub use timefmt::{relative_timestamp, timestamp_to_human_readable};
