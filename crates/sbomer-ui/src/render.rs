//! Plain-text rendering of page view-models for the terminal.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::pages::{
    AboutSection, DashboardView, DetailAction, DetailContent, DetailView, HelpView, NotFoundView,
    PageView, RelatedSection, RenderedPage,
};
use crate::routes::NavItem;
use crate::table::{
    Cell, HeaderView, NoResultsView, PaginationView, RowView, TableAction, TableView, ToolbarView,
};
use crate::timefmt::relative_timestamp;

const COLUMN_GAP: &str = "  ";
const SKELETON_CELL: &str = "░░░░░░";

/// Renders a table cell.
pub fn cell_text(cell: &Cell, now: DateTime<Utc>) -> String {
    match cell {
        Cell::Text(text) => text.clone(),
        Cell::Link { label, .. } => label.clone(),
        Cell::Tag { label, .. } => format!("[{}]", label),
        Cell::Timestamp(at) => relative_timestamp(*at, now),
    }
}

/// Renders a property value. Links show their target and timestamps their
/// exact time.
fn property_text(cell: &Cell, now: DateTime<Utc>) -> String {
    match cell {
        Cell::Link { to, label } => format!("{} ({})", label, to),
        Cell::Timestamp(Some(at)) => format!(
            "{} ({})",
            relative_timestamp(Some(*at), now),
            at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
        other => cell_text(other, now),
    }
}

fn width(text: &str) -> usize {
    text.chars().count()
}

fn pad(text: &str, to: usize) -> String {
    let fill = to.saturating_sub(width(text));
    format!("{}{}", text, " ".repeat(fill))
}

fn table_lines(headers: &[HeaderView], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| width(&h.header)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(width(cell));
            }
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad(cell, *w))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP)
            .trim_end()
            .to_string()
    };

    let mut lines = vec![line(headers.iter().map(|h| h.header.as_str()).collect())];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP),
    );
    for row in rows {
        lines.push(line(row.iter().map(String::as_str).collect()));
    }
    lines
}

fn row_texts(rows: &[RowView], now: DateTime<Utc>) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.cells.iter().map(|cell| cell_text(cell, now)).collect())
        .collect()
}

fn skeleton_lines(headers: &[HeaderView], rows: usize) -> Vec<String> {
    let skeleton: Vec<Vec<String>> = (0..rows)
        .map(|_| headers.iter().map(|_| SKELETON_CELL.to_string()).collect())
        .collect();
    table_lines(headers, &skeleton)
}

fn pagination_line(pagination: &PaginationView) -> String {
    let sizes = pagination
        .page_sizes
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join("/");
    format!(
        "{}  |  page {} of {}  |  {} per page ({})",
        pagination.range_text,
        pagination.page,
        pagination.total_pages,
        pagination.page_size,
        sizes
    )
}

fn toolbar_lines(toolbar: Option<&ToolbarView>) -> Vec<String> {
    let Some(toolbar) = toolbar else {
        return Vec::new();
    };
    let value = if toolbar.search.value.is_empty() {
        format!("<{}>", toolbar.search.placeholder)
    } else {
        toolbar.search.value.clone()
    };
    let mut line = format!("{}: {}", toolbar.search.label, value);
    if let Some(help) = &toolbar.help_path {
        line.push_str(&format!("  (help: {})", help));
    }
    vec![line, String::new()]
}

fn action_line(text: &str, action: Option<&TableAction>) -> Option<String> {
    match action? {
        TableAction::ClearFilters => Some(format!("> {}", text)),
        TableAction::Navigate(to) => Some(format!("> {} ({})", text, to)),
    }
}

fn no_results_lines(no_results: &NoResultsView) -> Vec<String> {
    let mut lines = vec![no_results.title.clone(), no_results.message.clone()];
    lines.extend(action_line(&no_results.action_text, no_results.action.as_ref()));
    lines
}

fn heading_lines(title: &str, description: &str) -> Vec<String> {
    vec![title.to_string(), description.to_string(), String::new()]
}

fn table_view_lines(view: &TableView, now: DateTime<Utc>) -> Vec<String> {
    match view {
        TableView::Loading {
            title,
            description,
            skeleton,
            pagination,
        } => {
            let headers: Vec<HeaderView> = (0..skeleton.columns)
                .map(|_| HeaderView {
                    key: String::new(),
                    header: SKELETON_CELL.to_string(),
                })
                .collect();
            let mut lines = heading_lines(title, description);
            lines.extend(skeleton_lines(&headers, skeleton.rows));
            lines.push(String::new());
            lines.push(pagination_line(pagination));
            lines
        }
        TableView::Failed { title, message } => vec![format!("Error: {}", title), message.clone()],
        TableView::InvalidQuery {
            title,
            description,
            toolbar,
            tile,
        } => {
            let mut lines = heading_lines(title, description);
            lines.extend(toolbar_lines(toolbar.as_ref()));
            lines.push(format!("{}: {}", tile.heading, tile.message));
            if let Some(details) = &tile.details {
                lines.push(details.clone());
            }
            lines.extend(action_line("Clear filters", tile.action.as_ref()));
            lines
        }
        TableView::Empty {
            title,
            description,
            toolbar,
            no_results,
        } => {
            let mut lines = heading_lines(title, description);
            lines.extend(toolbar_lines(toolbar.as_ref()));
            lines.extend(no_results_lines(no_results));
            lines
        }
        TableView::Populated {
            title,
            description,
            toolbar,
            headers,
            rows,
            pagination,
        } => {
            let mut lines = heading_lines(title, description);
            lines.extend(toolbar_lines(toolbar.as_ref()));
            lines.extend(table_lines(headers, &row_texts(rows, now)));
            lines.push(String::new());
            lines.push(pagination_line(pagination));
            lines
        }
    }
}

fn related_lines(related: &RelatedSection, now: DateTime<Utc>) -> Vec<String> {
    match related {
        RelatedSection::Failed { title, message } => {
            vec![format!("Error: {}", title), message.clone()]
        }
        RelatedSection::Loading {
            title,
            description,
            skeleton,
        } => {
            let headers: Vec<HeaderView> = (0..skeleton.columns)
                .map(|_| HeaderView {
                    key: String::new(),
                    header: SKELETON_CELL.to_string(),
                })
                .collect();
            let mut lines = heading_lines(title, description);
            lines.extend(skeleton_lines(&headers, skeleton.rows));
            lines
        }
        RelatedSection::Empty { message } => vec![message.clone()],
        RelatedSection::Table {
            title,
            description,
            headers,
            rows,
        } => {
            let mut lines = heading_lines(title, description);
            lines.extend(table_lines(headers, &row_texts(rows, now)));
            lines
        }
    }
}

fn detail_content_lines(content: &DetailContent, now: DateTime<Utc>) -> Vec<String> {
    let mut lines = vec![content.heading.clone(), String::new()];

    let label_width = content
        .properties
        .iter()
        .map(|p| width(&p.label))
        .max()
        .unwrap_or(0);
    for property in &content.properties {
        lines.push(format!(
            "{}  {}",
            pad(&property.label, label_width),
            property_text(&property.value, now)
        ));
    }

    for action in &content.actions {
        match action {
            DetailAction::DownloadManifest {
                manifest_id,
                file_name,
            } => lines.push(format!(
                "> Download {} (sbomer-dash download {})",
                file_name, manifest_id
            )),
        }
    }

    if let Some(metadata) = &content.metadata {
        lines.push(String::new());
        lines.push("Metadata".to_string());
        if metadata.is_empty() {
            lines.push("No metadata".to_string());
        }
        for entry in metadata {
            lines.push(format!("  {}: {}", entry.key, entry.value));
        }
    }

    if let Some(related) = &content.related {
        lines.push(String::new());
        lines.extend(related_lines(related, now));
    }

    lines.push(String::new());
    lines.push("Raw JSON".to_string());
    lines.extend(content.raw_json.lines().map(str::to_string));
    lines
}

fn detail_view_lines(view: &DetailView, now: DateTime<Utc>) -> Vec<String> {
    match view {
        DetailView::Failed { title, message } => {
            vec![format!("Error: {}", title), message.clone()]
        }
        DetailView::Loading => vec!["Loading...".to_string()],
        DetailView::Missing => Vec::new(),
        DetailView::Content(content) => detail_content_lines(content, now),
    }
}

fn dashboard_lines(view: &DashboardView) -> Vec<String> {
    let mut lines = vec![
        view.heading.clone(),
        String::new(),
        format!(
            "[{}] {}: {}",
            view.notice.kind, view.notice.title, view.notice.subtitle
        ),
        String::new(),
        "About".to_string(),
    ];
    match &view.about {
        AboutSection::Loading => lines.push("Loading...".to_string()),
        AboutSection::Failed { title, message } => {
            lines.push(format!("Error: {}", title));
            lines.push(message.clone());
        }
        AboutSection::Loaded { lines: stats } => {
            let label_width = stats.iter().map(|s| width(&s.label)).max().unwrap_or(0);
            lines.extend(
                stats
                    .iter()
                    .map(|s| format!("  {}  {}", pad(&s.label, label_width), s.value)),
            );
        }
    }
    lines
}

fn help_lines(view: &HelpView) -> Vec<String> {
    let mut lines = vec![view.heading.clone()];
    for section in &view.sections {
        lines.push(String::new());
        lines.push(section.title.clone());
        lines.extend(section.paragraphs.iter().map(|p| format!("  {}", p)));
        lines.extend(section.examples.iter().map(|e| format!("    {}", e)));
    }
    lines
}

fn not_found_lines(view: &NotFoundView) -> Vec<String> {
    let mut lines = vec![view.title.clone(), view.message.clone()];
    lines.extend(action_line(&view.action_text, Some(&view.action)));
    lines
}

/// One-line navigation bar; the active entry is bracketed.
pub fn navigation_line(items: &[NavItem]) -> String {
    let mut parts = Vec::new();
    for item in items {
        match item {
            NavItem::Link(link) if link.active => parts.push(format!("[{}]", link.label)),
            NavItem::Link(link) => parts.push(link.label.clone()),
            NavItem::Group {
                label,
                expanded,
                items,
            } => {
                if *expanded {
                    let links: Vec<&str> = items.iter().map(|l| l.label.as_str()).collect();
                    parts.push(format!("{} ({})", label, links.join(", ")));
                } else {
                    parts.push(format!("{} (+)", label));
                }
            }
            NavItem::Divider => parts.push("|".to_string()),
        }
    }
    parts.join(" ")
}

pub fn page_view_lines(view: &PageView, now: DateTime<Utc>) -> Vec<String> {
    match view {
        PageView::Dashboard(view) => dashboard_lines(view),
        PageView::Table(view) => table_view_lines(view, now),
        PageView::Detail(view) => detail_view_lines(view, now),
        PageView::Help(view) => help_lines(view),
        PageView::NotFound(view) => not_found_lines(view),
    }
}

/// Full terminal rendering of a page, relative to `now`.
pub fn render_page(page: &RenderedPage, now: DateTime<Utc>) -> String {
    let mut lines = vec![
        page.title.clone(),
        navigation_line(&page.navigation),
        String::new(),
    ];
    lines.extend(page_view_lines(&page.view, now));
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
