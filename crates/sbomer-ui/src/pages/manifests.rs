use crate::model::Manifest;
use crate::resource::AsyncState;
use crate::table::{Cell, NoResultsOptions, TableAction, TableColumn, TablePage};

use super::detail::{detail_view, DetailAction, DetailContent, DetailView, Property};

pub fn columns() -> Vec<TableColumn<Manifest>> {
    vec![
        TableColumn::new("id", "ID", |m: &Manifest| {
            Cell::link(format!("/manifests/{}", m.id), m.id.clone())
        }),
        TableColumn::new("created", "Created", |m: &Manifest| Cell::timestamp(m.created)),
    ]
}

pub fn table_page() -> TablePage<Manifest> {
    TablePage::new("Manifests", "Latest manifests", columns(), |m: &Manifest| {
        m.id.clone()
    })
    .with_no_results(NoResultsOptions {
        title: "No manifests found".to_string(),
        message: "Looks like no manifests were generated.".to_string(),
        action_text: "Take me home".to_string(),
        action: Some(TableAction::Navigate("/".to_string())),
    })
}

/// File name offered when downloading a manifest's BOM.
pub fn download_file_name(id: &str) -> String {
    format!("{}.json", id)
}

pub fn detail(id: &str, manifest: &AsyncState<Manifest>) -> DetailView {
    detail_view(manifest, "Could not load manifests", |m| {
        let properties = vec![
            Property::text("ID", Some(m.id.as_str())),
            Property::timestamp("Created", m.created),
        ];

        DetailContent::new(format!("Manifest {}", id), m, properties)
            .with_action(DetailAction::DownloadManifest {
                manifest_id: m.id.clone(),
                file_name: download_file_name(&m.id),
            })
            .with_metadata(m.metadata.as_ref())
    })
}
