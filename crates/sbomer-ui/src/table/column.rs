use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::status::TagColor;

/// Display value produced by a column's render function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Cell {
    Text(String),
    /// Navigates to another dashboard location.
    Link { to: String, label: String },
    Tag { color: TagColor, label: String },
    /// Rendered relative to the current time, `N/A` when absent.
    Timestamp(Option<DateTime<Utc>>),
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Cell::Text(text.into())
    }

    pub fn link(to: impl Into<String>, label: impl Into<String>) -> Self {
        Cell::Link {
            to: to.into(),
            label: label.into(),
        }
    }

    pub fn tag(color: TagColor, label: impl Into<String>) -> Self {
        Cell::Tag {
            color,
            label: label.into(),
        }
    }

    pub fn timestamp(at: Option<DateTime<Utc>>) -> Self {
        Cell::Timestamp(at)
    }
}

type RenderFn<T> = Box<dyn Fn(&T) -> Cell + Send + Sync>;

/// One table column: a stable key, a header, and how to render a row.
///
/// The table never inspects row fields itself; all formatting goes through
/// `render`.
pub struct TableColumn<T> {
    pub key: &'static str,
    pub header: &'static str,
    render: RenderFn<T>,
}

impl<T> TableColumn<T> {
    pub fn new<F>(key: &'static str, header: &'static str, render: F) -> Self
    where
        F: Fn(&T) -> Cell + Send + Sync + 'static,
    {
        Self {
            key,
            header,
            render: Box::new(render),
        }
    }

    pub fn render(&self, row: &T) -> Cell {
        (self.render)(row)
    }
}

impl<T> std::fmt::Debug for TableColumn<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableColumn")
            .field("key", &self.key)
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}
