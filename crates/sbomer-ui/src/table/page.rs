//! Controlled, paginated table page.
//!
//! [`TablePage`] holds only configuration. Each call to [`TablePage::view`]
//! maps the loader tuple `{data, loading, error, total, page, pageSize}` onto
//! exactly one [`TableView`]. Page changes are reported back to the caller as
//! [`PaginationEvent`]s; the table never owns page state.

use serde::Serialize;

use super::column::{Cell, TableColumn};
use crate::api::{ApiError, Page};
use crate::config::PAGE_SIZES;
use crate::resource::{AsyncState, PageQuery};

/// Skeleton rows shown while a list page loads.
pub const LOADING_ROWS: usize = 10;

pub const DEFAULT_SEARCH_PLACEHOLDER: &str = "Enter query";
pub const DEFAULT_SEARCH_LABEL: &str = "Search";
pub const DEFAULT_HELP_PATH: &str = "/help";
pub const DEFAULT_NO_RESULTS_TITLE: &str = "No results found";
pub const DEFAULT_NO_RESULTS_MESSAGE: &str = "Try adjusting your search or filters.";
pub const DEFAULT_NO_RESULTS_ACTION: &str = "Clear filters";

const INVALID_QUERY_HEADING: &str = "Invalid Query";
const INVALID_QUERY_FALLBACK: &str =
    "Your search query is not valid. Please check your syntax or clear filters to try again.";

/// Something the user can trigger from a table view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "target", rename_all = "camelCase")]
pub enum TableAction {
    /// Reset query and pagination.
    ClearFilters,
    /// Go to another dashboard location.
    Navigate(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub placeholder: String,
    pub label: String,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_SEARCH_PLACEHOLDER.to_string(),
            label: DEFAULT_SEARCH_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoResultsOptions {
    pub title: String,
    pub message: String,
    pub action_text: String,
    pub action: Option<TableAction>,
}

impl Default for NoResultsOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_NO_RESULTS_TITLE.to_string(),
            message: DEFAULT_NO_RESULTS_MESSAGE.to_string(),
            action_text: DEFAULT_NO_RESULTS_ACTION.to_string(),
            action: None,
        }
    }
}

type RowKeyFn<T> = Box<dyn Fn(&T) -> String + Send + Sync>;
type ValidationFn = Box<dyn Fn(&ApiError) -> bool + Send + Sync>;

/// Configuration of one list page.
pub struct TablePage<T> {
    pub title: String,
    pub description: String,
    columns: Vec<TableColumn<T>>,
    row_key: RowKeyFn<T>,
    search: Option<SearchOptions>,
    search_clear: bool,
    help_path: Option<String>,
    no_results: NoResultsOptions,
    query_validation: Option<ValidationFn>,
}

/// Inputs for one render of a [`TablePage`].
#[derive(Debug)]
pub struct TableState<'a, T> {
    pub data: Option<&'a [T]>,
    pub loading: bool,
    pub error: Option<&'a ApiError>,
    pub total: u64,
    /// 1-based.
    pub page: u32,
    pub page_size: u32,
    pub search_value: &'a str,
}

impl<'a, T> TableState<'a, T> {
    /// Builds the render inputs from a list loader's state and the current query.
    pub fn from_loader(state: &'a AsyncState<Page<T>>, query: &'a PageQuery) -> Self {
        Self {
            data: state.value.as_ref().map(|page| page.data.as_slice()),
            loading: state.loading,
            error: state.error.as_ref(),
            total: state.value.as_ref().map(|page| page.total).unwrap_or(0),
            page: query.page,
            page_size: query.page_size,
            search_value: &query.query,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkeletonView {
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchView {
    pub label: String,
    pub placeholder: String,
    pub value: String,
    pub clearable: bool,
}

/// Search box and help link shown above the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolbarView {
    pub search: SearchView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryErrorTile {
    pub heading: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<TableAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoResultsView {
    pub title: String,
    pub message: String,
    pub action_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<TableAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub key: String,
    pub header: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub key: String,
    pub cells: Vec<Cell>,
}

/// Page-change notification emitted towards the owner of the page state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum PaginationEvent {
    Page(u32),
    PageSize(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationView {
    pub page: u32,
    pub page_size: u32,
    pub page_sizes: Vec<u32>,
    pub total: u64,
    pub total_pages: u64,
    pub range_text: String,
}

impl PaginationView {
    pub fn new(page: u32, page_size: u32, total: u64) -> Self {
        let size = u64::from(page_size.max(1));
        let total_pages = total.div_ceil(size).max(1);
        let (min, max) = if total == 0 {
            (0, 0)
        } else {
            let min = (u64::from(page.max(1)) - 1) * size + 1;
            (min.min(total), (min + size - 1).min(total))
        };

        Self {
            page,
            page_size,
            page_sizes: PAGE_SIZES.to_vec(),
            total,
            total_pages,
            range_text: format!("{}–{} of {} items", min, max, total),
        }
    }

    /// Interprets a pagination control change.
    ///
    /// A page change wins over a simultaneous size change; an unchanged
    /// control yields nothing.
    pub fn change(&self, page: u32, page_size: u32) -> Option<PaginationEvent> {
        if page != self.page {
            Some(PaginationEvent::Page(page))
        } else if page_size != self.page_size {
            Some(PaginationEvent::PageSize(page_size))
        } else {
            None
        }
    }
}

/// The single state a table page is in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum TableView {
    #[serde(rename_all = "camelCase")]
    Loading {
        title: String,
        description: String,
        skeleton: SkeletonView,
        pagination: PaginationView,
    },
    Failed { title: String, message: String },
    #[serde(rename_all = "camelCase")]
    InvalidQuery {
        title: String,
        description: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        toolbar: Option<ToolbarView>,
        tile: QueryErrorTile,
    },
    #[serde(rename_all = "camelCase")]
    Empty {
        title: String,
        description: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        toolbar: Option<ToolbarView>,
        no_results: NoResultsView,
    },
    #[serde(rename_all = "camelCase")]
    Populated {
        title: String,
        description: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        toolbar: Option<ToolbarView>,
        headers: Vec<HeaderView>,
        rows: Vec<RowView>,
        pagination: PaginationView,
    },
}

impl TableView {
    pub fn pagination(&self) -> Option<&PaginationView> {
        match self {
            TableView::Loading { pagination, .. } | TableView::Populated { pagination, .. } => {
                Some(pagination)
            }
            _ => None,
        }
    }
}

impl<T> TablePage<T> {
    pub fn new<F>(
        title: impl Into<String>,
        description: impl Into<String>,
        columns: Vec<TableColumn<T>>,
        row_key: F,
    ) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            title: title.into(),
            description: description.into(),
            columns,
            row_key: Box::new(row_key),
            search: None,
            search_clear: false,
            help_path: None,
            no_results: NoResultsOptions::default(),
            query_validation: None,
        }
    }

    /// Shows the search toolbar.
    pub fn with_search(mut self, options: SearchOptions) -> Self {
        self.search = Some(options);
        self
    }

    /// Enables clearing the search, which also unlocks the `Clear filters`
    /// action on the invalid-query tile.
    pub fn with_search_clear(mut self) -> Self {
        self.search_clear = true;
        self
    }

    /// Shows a help link in the search toolbar; `None` uses `/help`.
    pub fn with_help(mut self, path: Option<&str>) -> Self {
        self.help_path = Some(path.unwrap_or(DEFAULT_HELP_PATH).to_string());
        self
    }

    pub fn with_no_results(mut self, options: NoResultsOptions) -> Self {
        self.no_results = options;
        self
    }

    /// Classifies errors that mean "the query itself is invalid".
    pub fn with_query_validation<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&ApiError) -> bool + Send + Sync + 'static,
    {
        self.query_validation = Some(Box::new(predicate));
        self
    }

    pub fn columns(&self) -> &[TableColumn<T>] {
        &self.columns
    }

    pub fn row_key(&self, row: &T) -> String {
        (self.row_key)(row)
    }

    fn is_validation_error(&self, error: &ApiError) -> bool {
        self.query_validation
            .as_ref()
            .map(|predicate| predicate(error))
            .unwrap_or(false)
    }

    fn toolbar(&self, search_value: &str) -> Option<ToolbarView> {
        let search = self.search.as_ref()?;
        Some(ToolbarView {
            search: SearchView {
                label: search.label.clone(),
                placeholder: search.placeholder.clone(),
                value: search_value.to_string(),
                clearable: self.search_clear,
            },
            help_path: self.help_path.clone(),
        })
    }

    fn headers(&self) -> Vec<HeaderView> {
        self.columns
            .iter()
            .map(|column| HeaderView {
                key: column.key.to_string(),
                header: column.header.to_string(),
            })
            .collect()
    }

    /// Maps the current inputs onto exactly one view.
    ///
    /// Precedence: loading, generic error, invalid query, empty, rows.
    pub fn view(&self, state: &TableState<'_, T>) -> TableView {
        let pagination = PaginationView::new(state.page, state.page_size, state.total);

        if state.loading {
            return TableView::Loading {
                title: self.title.clone(),
                description: self.description.clone(),
                skeleton: SkeletonView {
                    rows: LOADING_ROWS,
                    columns: self.columns.len(),
                },
                pagination,
            };
        }

        if let Some(error) = state.error {
            if !self.is_validation_error(error) {
                return TableView::Failed {
                    title: format!("Could not load {}", self.title.to_lowercase()),
                    message: error.to_string(),
                };
            }

            let details = error.query_error_details();
            let message = if details.message.is_empty() {
                INVALID_QUERY_FALLBACK.to_string()
            } else {
                details.message
            };
            return TableView::InvalidQuery {
                title: self.title.clone(),
                description: self.description.clone(),
                toolbar: self.toolbar(state.search_value),
                tile: QueryErrorTile {
                    heading: INVALID_QUERY_HEADING.to_string(),
                    message,
                    details: details.details,
                    action: self.search_clear.then_some(TableAction::ClearFilters),
                },
            };
        }

        let rows = state.data.unwrap_or_default();
        if rows.is_empty() {
            return TableView::Empty {
                title: self.title.clone(),
                description: self.description.clone(),
                toolbar: self.toolbar(state.search_value),
                no_results: NoResultsView {
                    title: self.no_results.title.clone(),
                    message: self.no_results.message.clone(),
                    action_text: self.no_results.action_text.clone(),
                    action: self.no_results.action.clone(),
                },
            };
        }

        TableView::Populated {
            title: self.title.clone(),
            description: self.description.clone(),
            toolbar: self.toolbar(state.search_value),
            headers: self.headers(),
            rows: rows
                .iter()
                .map(|row| RowView {
                    key: self.row_key(row),
                    cells: self.columns.iter().map(|column| column.render(row)).collect(),
                })
                .collect(),
            pagination,
        }
    }
}

impl<T> std::fmt::Debug for TablePage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TablePage")
            .field("title", &self.title)
            .field("columns", &self.columns)
            .field("search", &self.search)
            .field("help_path", &self.help_path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::TagColor;

    #[derive(Debug, Clone)]
    struct Row {
        id: &'static str,
        status: &'static str,
    }

    fn page() -> TablePage<Row> {
        TablePage::new(
            "Events",
            "Latest events",
            vec![
                TableColumn::new("id", "ID", |row: &Row| {
                    Cell::link(format!("/events/{}", row.id), row.id)
                }),
                TableColumn::new("status", "Status", |row: &Row| {
                    Cell::tag(TagColor::Gray, row.status)
                }),
            ],
            |row: &Row| row.id.to_string(),
        )
    }

    fn state<'a>(
        data: Option<&'a [Row]>,
        loading: bool,
        error: Option<&'a ApiError>,
    ) -> TableState<'a, Row> {
        TableState {
            data,
            loading,
            error,
            total: data.map(|d| d.len() as u64).unwrap_or(0),
            page: 1,
            page_size: 10,
            search_value: "",
        }
    }

    fn status_error(status: u16, body: &str) -> ApiError {
        ApiError::Status {
            resource: "events".to_string(),
            status,
            body: body.to_string(),
        }
    }

    const ROWS: [Row; 2] = [
        Row { id: "E1", status: "NEW" },
        Row { id: "E2", status: "FAILED" },
    ];

    #[test]
    fn test_empty_data_renders_no_results() {
        let view = page().view(&state(Some(&[] as &[Row]), false, None));
        match view {
            TableView::Empty { no_results, .. } => {
                assert_eq!(no_results.title, "No results found");
                assert_eq!(no_results.message, "Try adjusting your search or filters.");
                assert_eq!(no_results.action_text, "Clear filters");
            }
            other => panic!("expected empty view, got {:?}", other),
        }

        assert!(matches!(
            page().view(&state(None, false, None)),
            TableView::Empty { .. }
        ));
    }

    #[test]
    fn test_loading_wins_over_data_and_error() {
        let error = status_error(500, "boom");
        let view = page().view(&state(Some(&ROWS[..]), true, Some(&error)));
        match view {
            TableView::Loading {
                skeleton,
                pagination,
                ..
            } => {
                assert_eq!(skeleton, SkeletonView { rows: 10, columns: 2 });
                assert_eq!(pagination.page_sizes, vec![10, 20, 50, 100]);
            }
            other => panic!("expected loading view, got {:?}", other),
        }
    }

    #[test]
    fn test_generic_error_renders_failed() {
        let error = status_error(500, "boom");
        let view = page()
            .with_query_validation(ApiError::is_query_validation_error)
            .view(&state(Some(&ROWS[..]), false, Some(&error)));
        assert_eq!(
            view,
            TableView::Failed {
                title: "Could not load events".to_string(),
                message: "Failed fetching events from SBOMer, got: 500 response: 'boom'"
                    .to_string(),
            }
        );
    }

    #[test]
    fn test_validation_error_without_predicate_is_generic() {
        let error = status_error(400, "bad query");
        let view = page().view(&state(None, false, Some(&error)));
        assert!(matches!(view, TableView::Failed { .. }));
    }

    #[test]
    fn test_validation_error_renders_query_tile() {
        let error = status_error(
            400,
            r#"{"message":"The provided query is not valid","details":["Unknown field 'foo'"]}"#,
        );
        let table = page()
            .with_search(SearchOptions::default())
            .with_query_validation(ApiError::is_query_validation_error);

        match table.view(&state(None, false, Some(&error))) {
            TableView::InvalidQuery { tile, toolbar, .. } => {
                assert_eq!(tile.heading, "Invalid Query");
                assert_eq!(tile.message, "The provided query is not valid");
                assert_eq!(tile.details.as_deref(), Some("Unknown field 'foo'"));
                assert!(tile.action.is_none());
                assert!(toolbar.is_some());
            }
            other => panic!("expected invalid query view, got {:?}", other),
        }

        let clearable = page()
            .with_search_clear()
            .with_query_validation(ApiError::is_query_validation_error);
        match clearable.view(&state(None, false, Some(&error))) {
            TableView::InvalidQuery { tile, .. } => {
                assert_eq!(tile.action, Some(TableAction::ClearFilters));
            }
            other => panic!("expected invalid query view, got {:?}", other),
        }
    }

    #[test]
    fn test_populated_rows_use_renderers_and_keys() {
        let view = page().view(&state(Some(&ROWS[..]), false, None));
        match view {
            TableView::Populated {
                headers,
                rows,
                pagination,
                toolbar,
                ..
            } => {
                assert_eq!(headers.len(), 2);
                assert_eq!(headers[0].header, "ID");
                assert_eq!(rows[1].key, "E2");
                assert_eq!(rows[1].cells[0], Cell::link("/events/E2", "E2"));
                assert_eq!(rows[1].cells[1], Cell::tag(TagColor::Gray, "FAILED"));
                assert_eq!(pagination.range_text, "1–2 of 2 items");
                assert!(toolbar.is_none());
            }
            other => panic!("expected populated view, got {:?}", other),
        }
    }

    #[test]
    fn test_toolbar_defaults() {
        let table = page().with_search(SearchOptions::default()).with_help(None);
        let view = table.view(&TableState {
            search_value: "status=NEW",
            ..state(Some(&ROWS[..]), false, None)
        });
        let TableView::Populated { toolbar, .. } = view else {
            panic!("expected populated view");
        };
        let toolbar = toolbar.unwrap();
        assert_eq!(toolbar.search.placeholder, "Enter query");
        assert_eq!(toolbar.search.label, "Search");
        assert_eq!(toolbar.search.value, "status=NEW");
        assert_eq!(toolbar.help_path.as_deref(), Some("/help"));
    }

    #[test]
    fn test_pagination_range_text() {
        assert_eq!(
            PaginationView::new(1, 10, 57).range_text,
            "1–10 of 57 items"
        );
        assert_eq!(
            PaginationView::new(6, 10, 57).range_text,
            "51–57 of 57 items"
        );
        assert_eq!(PaginationView::new(6, 10, 57).total_pages, 6);
        assert_eq!(PaginationView::new(1, 10, 0).range_text, "0–0 of 0 items");
        assert_eq!(PaginationView::new(1, 10, 0).total_pages, 1);
    }

    #[test]
    fn test_pagination_change_events() {
        let pagination = PaginationView::new(2, 20, 100);
        assert_eq!(pagination.change(3, 20), Some(PaginationEvent::Page(3)));
        assert_eq!(pagination.change(3, 50), Some(PaginationEvent::Page(3)));
        assert_eq!(
            pagination.change(2, 50),
            Some(PaginationEvent::PageSize(50))
        );
        assert_eq!(pagination.change(2, 20), None);
    }

    #[test]
    fn test_from_loader_state() {
        let loaded = AsyncState {
            value: Some(Page::new(ROWS.to_vec(), 42)),
            loading: false,
            error: None,
        };
        let query = PageQuery::from_query_string("page=2&pageSize=20&query=x");
        let state = TableState::from_loader(&loaded, &query);
        assert_eq!(state.total, 42);
        assert_eq!(state.page, 2);
        assert_eq!(state.page_size, 20);
        assert_eq!(state.search_value, "x");
        assert_eq!(state.data.map(<[Row]>::len), Some(2));
    }
}
