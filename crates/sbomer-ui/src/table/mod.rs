mod column;
mod page;

pub use column::{Cell, TableColumn};
pub use page::{
    HeaderView, NoResultsOptions, NoResultsView, PaginationEvent, PaginationView, QueryErrorTile,
    RowView, SearchOptions, SearchView, SkeletonView, TableAction, TablePage, TableState,
    TableView, ToolbarView, DEFAULT_HELP_PATH, DEFAULT_NO_RESULTS_ACTION,
    DEFAULT_NO_RESULTS_MESSAGE, DEFAULT_NO_RESULTS_TITLE, DEFAULT_SEARCH_LABEL,
    DEFAULT_SEARCH_PLACEHOLDER, LOADING_ROWS,
};
