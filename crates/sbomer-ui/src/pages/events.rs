use crate::api::{ApiError, Page};
use crate::model::{Event, Generation};
use crate::resource::AsyncState;
use crate::status::event_status_to_color;
use crate::table::{
    Cell, NoResultsOptions, SearchOptions, TableAction, TableColumn, TablePage,
    DEFAULT_SEARCH_PLACEHOLDER,
};

use super::detail::{
    detail_view, related_section, DetailContent, DetailView, Property, RelatedCopy,
};
use super::generations;

pub fn columns() -> Vec<TableColumn<Event>> {
    vec![
        TableColumn::new("id", "ID", |e: &Event| {
            Cell::link(format!("/events/{}", e.id), e.id.clone())
        }),
        TableColumn::new("status", "Status", |e: &Event| {
            Cell::tag(event_status_to_color(e.status_or_unknown()), e.status_or_unknown())
        }),
        TableColumn::new("created", "Created", |e: &Event| Cell::timestamp(e.created)),
    ]
}

/// Events are the only searchable list.
pub fn table_page() -> TablePage<Event> {
    TablePage::new("Events", "Latest events", columns(), |e: &Event| e.id.clone())
        .with_search(SearchOptions {
            placeholder: DEFAULT_SEARCH_PLACEHOLDER.to_string(),
            label: "Search events".to_string(),
        })
        .with_search_clear()
        .with_help(None)
        .with_no_results(NoResultsOptions {
            title: "No events found".to_string(),
            message: "Try adjusting your search query or clear the filters to see all events."
                .to_string(),
            action_text: "Clear filters".to_string(),
            action: Some(TableAction::ClearFilters),
        })
        .with_query_validation(ApiError::is_query_validation_error)
}

const GENERATIONS_COPY: RelatedCopy = RelatedCopy {
    title: "Generations",
    description: "Generations for this event",
    error_title: "Could not load generations",
    empty_message: "No generations found for this event.",
};

pub fn detail(
    id: &str,
    event: &AsyncState<Event>,
    related: &AsyncState<Page<Generation>>,
) -> DetailView {
    detail_view(event, "Could not load event details", |e| {
        let properties = vec![
            Property::text("ID", Some(e.id.as_str())),
            Property::timestamp("Created", e.created),
            Property::new(
                "Status",
                Cell::tag(event_status_to_color(e.status_or_unknown()), e.status_or_unknown()),
            ),
        ];

        DetailContent::new(format!("Event {}", id), e, properties).with_related(related_section(
            related,
            &GENERATIONS_COPY,
            &generations::columns(),
            |g: &Generation| g.id.clone(),
        ))
    })
}
