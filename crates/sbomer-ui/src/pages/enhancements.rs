use crate::model::Enhancement;
use crate::resource::AsyncState;
use crate::status::{result_to_color, status_to_color};
use crate::table::{Cell, NoResultsOptions, TableAction, TableColumn, TablePage};

use super::detail::{detail_view, text_or_na, DetailContent, DetailView, Property};
use super::generations::result_cell;

fn id_column() -> TableColumn<Enhancement> {
    TableColumn::new("id", "ID", |e: &Enhancement| {
        Cell::link(format!("/enhancements/{}", e.id), e.id.clone())
    })
}

fn status_column() -> TableColumn<Enhancement> {
    TableColumn::new("status", "Status", |e: &Enhancement| {
        Cell::tag(status_to_color(e.status_or_unknown()), e.status_or_unknown())
    })
}

pub fn columns() -> Vec<TableColumn<Enhancement>> {
    vec![
        id_column(),
        status_column(),
        TableColumn::new("result", "Result", |e: &Enhancement| {
            result_cell(e.result.as_deref())
        }),
        TableColumn::new("created", "Created", |e: &Enhancement| Cell::timestamp(e.created)),
        TableColumn::new("updated", "Updated", |e: &Enhancement| Cell::timestamp(e.updated)),
        TableColumn::new("finished", "Finished", |e: &Enhancement| {
            Cell::timestamp(e.finished)
        }),
        TableColumn::new("reason", "Reason", |e: &Enhancement| {
            text_or_na(e.reason.as_deref())
        }),
        TableColumn::new("enhancerName", "Enhancer Type", |e: &Enhancement| {
            text_or_na(e.enhancer_name.as_deref())
        }),
        TableColumn::new("enhancerVersion", "Enhancer Version", |e: &Enhancement| {
            text_or_na(e.enhancer_version.as_deref())
        }),
        TableColumn::new("generationId", "Generation ID", |e: &Enhancement| {
            match e.generation_id.as_deref().filter(|id| !id.is_empty()) {
                Some(id) => Cell::link(format!("/generations/{}", id), id),
                None => Cell::text("N/A"),
            }
        }),
        TableColumn::new("requestId", "Request ID", |e: &Enhancement| {
            text_or_na(e.request_id.as_deref())
        }),
    ]
}

/// Columns of the enhancements sub-table on a generation page.
pub fn related_columns() -> Vec<TableColumn<Enhancement>> {
    vec![
        id_column(),
        status_column(),
        TableColumn::new("result", "Result", |e: &Enhancement| match e.result.as_deref() {
            Some(result) => Cell::tag(result_to_color(Some(result)), result),
            None => Cell::text("In progress"),
        }),
        TableColumn::new("enhancerName", "Enhancer Name", |e: &Enhancement| {
            text_or_na(e.enhancer_name.as_deref())
        }),
        TableColumn::new("enhancerVersion", "Version", |e: &Enhancement| {
            text_or_na(e.enhancer_version.as_deref())
        }),
        TableColumn::new("created", "Created", |e: &Enhancement| Cell::timestamp(e.created)),
        TableColumn::new("updated", "Updated", |e: &Enhancement| Cell::timestamp(e.updated)),
        TableColumn::new("finished", "Finished", |e: &Enhancement| {
            Cell::timestamp(e.finished)
        }),
    ]
}

pub fn table_page() -> TablePage<Enhancement> {
    TablePage::new(
        "Enhancements",
        "Latest enhancements",
        columns(),
        |e: &Enhancement| e.id.clone(),
    )
    .with_no_results(NoResultsOptions {
        title: "No enhancements found".to_string(),
        message: "No enhancements were made.".to_string(),
        action_text: "Take me home".to_string(),
        action: Some(TableAction::Navigate("/".to_string())),
    })
}

pub fn detail(id: &str, enhancement: &AsyncState<Enhancement>) -> DetailView {
    detail_view(enhancement, "Could not load enhancement", |e| {
        let properties = vec![
            Property::text("ID", Some(e.id.as_str())),
            Property::timestamp("Created", e.created),
            Property::timestamp("Updated", e.updated),
            Property::timestamp("Finished", e.finished),
            Property::new(
                "Status",
                Cell::tag(status_to_color(e.status_or_unknown()), e.status_or_unknown()),
            ),
            Property::new(
                "Result",
                Cell::tag(
                    result_to_color(e.result.as_deref()),
                    e.result.as_deref().unwrap_or("In progress"),
                ),
            ),
            Property::text("Reason", e.reason.as_deref()),
            Property::text("Enhancer Name", e.enhancer_name.as_deref()),
            Property::text("Enhancer Version", e.enhancer_version.as_deref()),
            Property::link("Request ID", "/events", e.request_id.as_deref()),
            Property::link("Generation ID", "/generations", e.generation_id.as_deref()),
        ];

        DetailContent::new(format!("Enhancement {}", id), e, properties)
    })
}
