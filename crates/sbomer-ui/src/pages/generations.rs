use crate::api::Page;
use crate::model::{Enhancement, Generation};
use crate::resource::AsyncState;
use crate::status::{result_to_color, status_to_color};
use crate::table::{Cell, NoResultsOptions, TableAction, TableColumn, TablePage};

use super::detail::{
    detail_view, related_section, DetailContent, DetailView, Property, RelatedCopy,
};
use super::enhancements;

pub(crate) fn result_cell(result: Option<&str>) -> Cell {
    Cell::tag(result_to_color(result), result.unwrap_or("unknown"))
}

pub fn columns() -> Vec<TableColumn<Generation>> {
    vec![
        TableColumn::new("id", "ID", |g: &Generation| {
            Cell::link(format!("/generations/{}", g.id), g.id.clone())
        }),
        TableColumn::new("status", "Status", |g: &Generation| {
            Cell::tag(status_to_color(g.status_or_unknown()), g.status_or_unknown())
        }),
        TableColumn::new("result", "Result", |g: &Generation| {
            result_cell(g.result.as_deref())
        }),
        TableColumn::new("created", "Created", |g: &Generation| Cell::timestamp(g.created)),
        TableColumn::new("updated", "Updated", |g: &Generation| Cell::timestamp(g.updated)),
        TableColumn::new("finished", "Finished", |g: &Generation| {
            Cell::timestamp(g.finished)
        }),
    ]
}

pub fn table_page() -> TablePage<Generation> {
    TablePage::new("Generations", "Latest generations", columns(), |g: &Generation| {
        g.id.clone()
    })
    .with_no_results(NoResultsOptions {
        title: "No generations found".to_string(),
        message: "Looks like no generations happened.".to_string(),
        action_text: "Take me home".to_string(),
        action: Some(TableAction::Navigate("/".to_string())),
    })
}

const ENHANCEMENTS_COPY: RelatedCopy = RelatedCopy {
    title: "Enhancements",
    description: "Enhancements for this generation",
    error_title: "Could not load enhancements",
    empty_message: "No enhancements found for this generation.",
};

pub fn detail(
    id: &str,
    generation: &AsyncState<Generation>,
    related: &AsyncState<Page<Enhancement>>,
) -> DetailView {
    detail_view(generation, "Could not load generations", |g| {
        let properties = vec![
            Property::text("ID", Some(g.id.as_str())),
            Property::timestamp("Created", g.created),
            Property::timestamp("Updated", g.updated),
            Property::timestamp("Finished", g.finished),
            Property::new(
                "Status",
                Cell::tag(status_to_color(g.status_or_unknown()), g.status_or_unknown()),
            ),
            Property::new(
                "Result",
                Cell::tag(
                    result_to_color(g.result.as_deref()),
                    g.result.as_deref().unwrap_or("In progress"),
                ),
            ),
            Property::text("Reason", g.reason.as_deref()),
            Property::link("Request ID", "/events", g.request_id.as_deref()),
            Property::text("Generator Name", g.generator_name.as_deref()),
            Property::text("Generator Version", g.generator_version.as_deref()),
            Property::text("Target Type", g.target_type.as_deref()),
            Property::text("Target Identifier", g.target_identifier.as_deref()),
        ];

        DetailContent::new(format!("Generation {}", id), g, properties)
            .with_metadata(g.metadata.as_ref())
            .with_related(related_section(
                related,
                &ENHANCEMENTS_COPY,
                &enhancements::related_columns(),
                |e: &Enhancement| e.id.clone(),
            ))
    })
}
