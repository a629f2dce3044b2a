//! Page components: one view-model builder per dashboard page.

pub mod controller;
pub mod dashboard;
pub mod detail;
pub mod enhancements;
pub mod events;
pub mod generations;
pub mod help;
pub mod manifests;
pub mod not_found;

use serde::Serialize;

pub use controller::{document_title, PageController, RenderedPage};
pub use dashboard::{AboutSection, DashboardView, Notice, StatLine};
pub use detail::{
    DetailAction, DetailContent, DetailView, MetadataEntry, Property, RelatedSection,
    RELATED_LOADING_ROWS,
};
pub use help::{HelpSection, HelpView};
pub use not_found::NotFoundView;

use crate::table::TableView;

/// The body of a rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", content = "body", rename_all = "camelCase")]
pub enum PageView {
    Dashboard(DashboardView),
    Table(TableView),
    Detail(DetailView),
    Help(HelpView),
    NotFound(NotFoundView),
}
