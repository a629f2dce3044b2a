//! Building blocks shared by the detail pages.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::Page;
use crate::model::Metadata;
use crate::resource::AsyncState;
use crate::table::{Cell, HeaderView, RowView, SkeletonView, TableColumn};

/// Skeleton rows shown while a related sub-table loads.
pub const RELATED_LOADING_ROWS: usize = 5;

const NOT_AVAILABLE: &str = "N/A";

/// One row of the property list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub label: String,
    pub value: Cell,
}

impl Property {
    pub fn new(label: &str, value: Cell) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }

    pub fn text(label: &str, value: Option<&str>) -> Self {
        Self::new(label, text_or_na(value))
    }

    pub fn timestamp(label: &str, at: Option<DateTime<Utc>>) -> Self {
        Self::new(label, Cell::timestamp(at))
    }

    /// A link to `prefix/<id>`, or `N/A` when there is no id.
    pub fn link(label: &str, prefix: &str, id: Option<&str>) -> Self {
        let value = match id.filter(|id| !id.is_empty()) {
            Some(id) => Cell::link(format!("{}/{}", prefix, id), id),
            None => Cell::text(NOT_AVAILABLE),
        };
        Self::new(label, value)
    }
}

pub(crate) fn text_or_na(value: Option<&str>) -> Cell {
    Cell::text(value.filter(|v| !v.is_empty()).unwrap_or(NOT_AVAILABLE))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataEntry {
    pub key: String,
    pub value: String,
}

/// Actions offered on a detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DetailAction {
    #[serde(rename_all = "camelCase")]
    DownloadManifest { manifest_id: String, file_name: String },
}

/// Sub-table of records related to the detail record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum RelatedSection {
    Failed {
        title: String,
        message: String,
    },
    Loading {
        title: String,
        description: String,
        skeleton: SkeletonView,
    },
    Empty {
        message: String,
    },
    Table {
        title: String,
        description: String,
        headers: Vec<HeaderView>,
        rows: Vec<RowView>,
    },
}

/// Fixed copy for one related sub-table.
pub(crate) struct RelatedCopy {
    pub title: &'static str,
    pub description: &'static str,
    pub error_title: &'static str,
    pub empty_message: &'static str,
}

pub(crate) fn related_section<T>(
    state: &AsyncState<Page<T>>,
    copy: &RelatedCopy,
    columns: &[TableColumn<T>],
    row_key: impl Fn(&T) -> String,
) -> RelatedSection {
    if let Some(error) = &state.error {
        return RelatedSection::Failed {
            title: copy.error_title.to_string(),
            message: error.to_string(),
        };
    }

    let rows = match &state.value {
        Some(page) => &page.data,
        None if state.loading => {
            return RelatedSection::Loading {
                title: copy.title.to_string(),
                description: copy.description.to_string(),
                skeleton: SkeletonView {
                    rows: RELATED_LOADING_ROWS,
                    columns: columns.len(),
                },
            }
        }
        None => {
            return RelatedSection::Empty {
                message: copy.empty_message.to_string(),
            }
        }
    };

    if rows.is_empty() {
        return RelatedSection::Empty {
            message: copy.empty_message.to_string(),
        };
    }

    RelatedSection::Table {
        title: copy.title.to_string(),
        description: copy.description.to_string(),
        headers: columns
            .iter()
            .map(|column| HeaderView {
                key: column.key.to_string(),
                header: column.header.to_string(),
            })
            .collect(),
        rows: rows
            .iter()
            .map(|row| RowView {
                key: row_key(row),
                cells: columns.iter().map(|column| column.render(row)).collect(),
            })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailContent {
    pub heading: String,
    pub properties: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<DetailAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<MetadataEntry>>,
    /// Pretty-printed JSON of the record.
    pub raw_json: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<RelatedSection>,
}

impl DetailContent {
    pub fn new<T: Serialize>(heading: String, record: &T, properties: Vec<Property>) -> Self {
        Self {
            heading,
            properties,
            actions: Vec::new(),
            metadata: None,
            raw_json: raw_json(record),
            related: None,
        }
    }

    pub fn with_action(mut self, action: DetailAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_metadata(mut self, metadata: Option<&Metadata>) -> Self {
        self.metadata = metadata.map(|metadata| {
            metadata
                .iter()
                .map(|(key, value)| MetadataEntry {
                    key: key.to_string(),
                    value: value.to_string(),
                })
                .collect()
        });
        self
    }

    pub fn with_related(mut self, related: RelatedSection) -> Self {
        self.related = Some(related);
        self
    }
}

/// A detail page in exactly one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "content", rename_all = "camelCase")]
pub enum DetailView {
    Failed { title: String, message: String },
    Loading,
    /// Loaded without a record; renders nothing.
    Missing,
    Content(Box<DetailContent>),
}

/// Maps a detail loader's state onto a view.
///
/// Order: error, loading without a record yet, absent record, content.
pub(crate) fn detail_view<T>(
    state: &AsyncState<T>,
    error_title: &str,
    build: impl FnOnce(&T) -> DetailContent,
) -> DetailView {
    if let Some(error) = &state.error {
        return DetailView::Failed {
            title: error_title.to_string(),
            message: error.to_string(),
        };
    }

    match &state.value {
        None if state.loading => DetailView::Loading,
        None => DetailView::Missing,
        Some(record) => DetailView::Content(Box::new(build(record))),
    }
}

pub(crate) fn raw_json<T: Serialize>(record: &T) -> String {
    match serde_json::to_string_pretty(record) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Failed to serialize record for raw view: {}", e);
            String::from("{}")
        }
    }
}
