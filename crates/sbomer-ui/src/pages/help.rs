use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpSection {
    pub title: String,
    pub paragraphs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpView {
    pub heading: String,
    pub sections: Vec<HelpSection>,
}

fn section(title: &str, paragraphs: &[&str], examples: &[&str]) -> HelpSection {
    HelpSection {
        title: title.to_string(),
        paragraphs: paragraphs.iter().map(|p| p.to_string()).collect(),
        examples: examples.iter().map(|e| e.to_string()).collect(),
    }
}

pub fn view() -> HelpView {
    HelpView {
        heading: "Help".to_string(),
        sections: vec![
            section(
                "Navigation",
                &[
                    "Events, generations, enhancements and manifests each have a list page and a detail page.",
                    "Requests are listed under /requests as an alias of /generations.",
                ],
                &["/events", "/generations/G1ABC", "/manifests"],
            ),
            section(
                "Pagination",
                &[
                    "List pages read the page number and page size from the location.",
                    "Page numbers start at 1. Supported page sizes are 10, 20, 50 and 100.",
                    "Changing the page size returns to the first page.",
                ],
                &["/generations?page=2&pageSize=50"],
            ),
            section(
                "Searching events",
                &[
                    "The events list accepts a query that is evaluated by the SBOMer service.",
                    "A query the service cannot parse is reported as an invalid query. Clear the filters to return to the full list.",
                ],
                &["/events?query=status%3DFAILED"],
            ),
        ],
    }
}
